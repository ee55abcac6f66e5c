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

//! Component C2: `IndexedPage`, the dense `i32` code array a column's
//! values have been interned into (spec.md §4.2). Unlike `DictionaryPage`
//! (whose payload is values), an `IndexedPage`'s payload is codes; it
//! aliases rather than owns the dictionary those codes are resolved
//! through, so `Bounds` and `Values` both lean on `Dictionary::bounds` and
//! `Dictionary::lookup`.

use std::cell::RefCell;
use std::rc::Rc;

use basic::Type;
use column::dictionary::{AnyDictionary, Dictionary};
use column::page::BufferedPage;
use column::value::Value;
use encodings::int32_codec;
use util::memory::ByteBufferPtr;

const VALUES_BLOCK_SIZE: usize = 64;

/// An aliasing window `[start, start + len)` over a shared code array.
/// `Slice` produces a new window over the same `Rc`; `Clone` copies the
/// window's own codes out into a fresh, owned array.
pub struct IndexedPage {
  dictionary: Rc<RefCell<AnyDictionary>>,
  codes: Rc<Vec<i32>>,
  start: usize,
  len: usize,
  column_index: i32,
}

impl IndexedPage {
  pub fn new(dictionary: Rc<RefCell<AnyDictionary>>, column_index: i32, codes: Vec<i32>) -> Self {
    let len = codes.len();
    IndexedPage { dictionary: dictionary, codes: Rc::new(codes), start: 0, len: len, column_index: column_index }
  }

  /// Reconstructs a page from wire bytes against an existing dictionary.
  /// A `bytes` shorter than `4 * num_values` zero-pads its tail (the
  /// quirk lives in `encodings::int32_codec::decode`).
  pub fn from_bytes(
    dictionary: Rc<RefCell<AnyDictionary>>, column_index: i32, bytes: ByteBufferPtr, num_values: usize,
  ) -> Self {
    let codes = int32_codec::decode(&bytes, num_values);
    IndexedPage::new(dictionary, column_index, codes)
  }

  pub fn codes(&self) -> &[i32] { &self.codes[self.start..self.start + self.len] }

  pub fn dictionary(&self) -> &Rc<RefCell<AnyDictionary>> { &self.dictionary }

  /// Streams this page's values out in blocks via `Dictionary::lookup`,
  /// yielding `None` once every code has been resolved.
  pub fn values(&self) -> IndexedValues {
    IndexedValues {
      dictionary: self.dictionary.clone(),
      codes: self.codes.clone(),
      pos: self.start,
      end: self.start + self.len,
      block: Vec::new(),
      block_pos: 0,
    }
  }
}

pub struct IndexedValues {
  dictionary: Rc<RefCell<AnyDictionary>>,
  codes: Rc<Vec<i32>>,
  pos: usize,
  end: usize,
  block: Vec<Value>,
  block_pos: usize,
}

impl Iterator for IndexedValues {
  type Item = Value;

  fn next(&mut self) -> Option<Value> {
    if self.block_pos >= self.block.len() {
      if self.pos >= self.end {
        return None;
      }
      let take = ::std::cmp::min(VALUES_BLOCK_SIZE, self.end - self.pos);
      let dict = self.dictionary.borrow();
      let mut block = vec![Value::zero(dict.physical_type()); take];
      dict.lookup(&self.codes[self.pos..self.pos + take], &mut block);
      self.pos += take;
      self.block = block;
      self.block_pos = 0;
    }
    let v = self.block[self.block_pos].clone();
    self.block_pos += 1;
    Some(v)
  }
}

impl BufferedPage for IndexedPage {
  fn page_type(&self) -> Type { self.dictionary.borrow().physical_type() }

  fn column(&self) -> i32 { self.column_index }

  fn num_rows(&self) -> usize { self.len }

  fn num_values(&self) -> usize { self.len }

  fn num_nulls(&self) -> usize { 0 }

  fn size(&self) -> usize { self.len * 4 }

  fn repetition_levels(&self) -> &[i16] { &[] }

  fn definition_levels(&self) -> &[i16] { &[] }

  fn data(&self) -> ByteBufferPtr { int32_codec::encode(self.codes()) }

  fn buffer(&self) -> ByteBufferPtr { self.data() }

  fn bounds(&self) -> (Value, Value) {
    let (mut min, mut max) = self.dictionary.borrow().bounds(self.codes());
    min.tag_from_dictionary(self.column_index);
    max.tag_from_dictionary(self.column_index);
    (min, max)
  }

  fn clone_boxed(&self) -> Box<BufferedPage> {
    Box::new(IndexedPage {
      dictionary: self.dictionary.clone(),
      codes: Rc::new(self.codes().to_vec()),
      start: 0,
      len: self.len,
      column_index: self.column_index,
    })
  }

  fn slice(&self, i: usize, j: usize) -> Box<BufferedPage> {
    assert!(i <= j && j <= self.len, "slice [{}, {}) out of range for length {}", i, j, self.len);
    Box::new(IndexedPage {
      dictionary: self.dictionary.clone(),
      codes: self.codes.clone(),
      start: self.start + i,
      len: j - i,
      column_index: self.column_index,
    })
  }
}
