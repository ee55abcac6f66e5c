// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! `BufferedPage`, the page-shaped view consumed by the writer/compressor
//! layer. `column::indexed_page` and `column::dictionary::DictionaryPage`
//! are this crate's implementers: a dictionary core never materialises a
//! plain, non-dictionary-encoded page.
//!
//! Names the same seam (`use column::page::{Page, PageReader};`) that
//! `file::reader` expects from its page source.

use basic::Type;
use column::value::Value;
use util::memory::ByteBufferPtr;

/// A page: a dense run of one column's rows, ready to be compressed and
/// written, or already read off the wire.
pub trait BufferedPage {
  /// Physical type of the values this page (indirectly, through its
  /// dictionary) represents.
  fn page_type(&self) -> Type;

  /// Ordinal of the column this page belongs to.
  fn column(&self) -> i32;

  fn num_rows(&self) -> usize;

  fn num_values(&self) -> usize;

  fn num_nulls(&self) -> usize;

  /// Raw byte length of this page's encoded payload.
  fn size(&self) -> usize;

  fn repetition_levels(&self) -> &[i16];

  fn definition_levels(&self) -> &[i16];

  /// This page's payload, reinterpreted as bytes — the wire format an
  /// `Encoding` collaborator (`encodings::int32_codec`) reads and writes.
  fn data(&self) -> ByteBufferPtr;

  /// Same bytes as `data()`; kept as a separate method because a page's
  /// logical payload (`data`) is conceptually distinct from its raw
  /// backing allocation (`buffer`), which for some page kinds may include
  /// header bytes the logical payload excludes. For an indexed page the
  /// two coincide.
  fn buffer(&self) -> ByteBufferPtr;

  /// Min/max of this page's values under the column's type ordering.
  fn bounds(&self) -> (Value, Value);

  fn clone_boxed(&self) -> Box<BufferedPage>;

  /// An aliasing window over rows `[i, j)`.
  fn slice(&self, i: usize, j: usize) -> Box<BufferedPage>;
}

/// Streams a page's values out in blocks via `Dictionary::lookup`,
/// signalling end-of-page by yielding `None` — the idiomatic Rust
/// `Iterator` convention, rather than a bespoke sentinel value.
pub trait ValuesCursor: Iterator<Item = Value> {}

impl<I: Iterator<Item = Value>> ValuesCursor for I {}
