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

//! Dictionary encoding core for a columnar (Parquet-style) file format:
//! per-type value dictionaries (`column::dictionary`) and the indexed
//! column buffers and pages (`column::indexed_buffer`,
//! `column::indexed_page`, `column::indexed_type`) built on top of them.
//! File-level reading/writing and page compression are out of scope:
//! this crate models the column collaborators a writer/reader would hold,
//! not the writer/reader itself.

extern crate byteorder;
extern crate ordered_float;
#[macro_use]
extern crate quick_error;

#[cfg(test)]
extern crate rand;

#[macro_use]
pub mod errors;

pub mod basic;
pub mod data_type;
pub mod schema;
pub mod util;
pub mod column;
pub mod encodings;
