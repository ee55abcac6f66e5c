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

//! Physical types and wire encodings the dictionary core is built over.
//!
//! The first eight variants of `Type` mirror the physical types of the
//! Parquet thrift definition. `UINT32`, `UINT64` and `BE128` have no thrift
//! counterpart: they are internal-only physical representations the
//! dictionary core also maintains a variant for (spec.md §3).

use std::fmt;

/// Physical types supported by the dictionary core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
  BOOLEAN,
  INT32,
  INT64,
  INT96,
  FLOAT,
  DOUBLE,
  BYTE_ARRAY,
  FIXED_LEN_BYTE_ARRAY,
  UINT32,
  UINT64,
  BE128,
}

/// Encodings a page's payload may be written in. Only `PLAIN` (used for the
/// dictionary's own value page) and `RLE_DICTIONARY` (the 32-bit integer
/// codec an indexed page's codes are written with) are exercised by this
/// core; the remaining variants are retained so `Type`/`Encoding` continue
/// to mirror the full Parquet thrift enumeration for collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
  PLAIN,
  PLAIN_DICTIONARY,
  RLE,
  BIT_PACKED,
  DELTA_BINARY_PACKED,
  DELTA_LENGTH_BYTE_ARRAY,
  DELTA_BYTE_ARRAY,
  RLE_DICTIONARY,
}

/// Field repetition, carried only so `ColumnDescriptor` (§3.3 of
/// SPEC_FULL.md) has somewhere to source a repetition marker from; the
/// dictionary core itself never branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Repetition {
  REQUIRED,
  OPTIONAL,
  REPEATED,
}

impl fmt::Display for Type {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{:?}", self)
  }
}

impl fmt::Display for Encoding {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{:?}", self)
  }
}

impl fmt::Display for Repetition {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{:?}", self)
  }
}
