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

//! The "configuration" collaborator a dictionary is constructed from
//! (SPEC_FULL.md §3.3): a `ColumnDescriptor` naming the column's physical
//! type and, for fixed-length byte arrays, its element size. Trimmed from
//! the teacher's full schema module (which also models groups, repetition
//! and logical-type annotations) down to what the dictionary core
//! consults — full schema shredding is out of scope (spec.md §1).

use std::rc::Rc;

use basic::Type as PhysicalType;
use errors::Result;

/// A dotted path identifying a column within the (out-of-scope) row
/// schema. Opaque to the dictionary core; carried only so
/// `ColumnDescriptor` has something to report from `path()`.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ColumnPath {
  parts: Vec<String>,
}

impl ColumnPath {
  pub fn new(parts: Vec<String>) -> Self { ColumnPath { parts: parts } }

  pub fn parts(&self) -> &[String] { &self.parts }
}

/// A leaf schema node for one physical type. Built with
/// `Type::primitive_type_builder`, in the teacher's style.
#[derive(Clone, Debug)]
pub struct Type {
  name: String,
  physical_type: PhysicalType,
  type_length: i32,
}

pub type TypePtr = Rc<Type>;

impl Type {
  pub fn primitive_type_builder(name: &str, physical_type: PhysicalType) -> PrimitiveTypeBuilder {
    PrimitiveTypeBuilder::new(name, physical_type)
  }

  pub fn name(&self) -> &str { &self.name }

  pub fn physical_type(&self) -> PhysicalType { self.physical_type }

  /// Element size in bytes for `FIXED_LEN_BYTE_ARRAY`/`BE128`; meaningless
  /// (and ignored) for every other physical type.
  pub fn type_length(&self) -> i32 { self.type_length }
}

pub struct PrimitiveTypeBuilder {
  name: String,
  physical_type: PhysicalType,
  type_length: i32,
}

impl PrimitiveTypeBuilder {
  fn new(name: &str, physical_type: PhysicalType) -> Self {
    let default_len = match physical_type {
      PhysicalType::BE128 => 16,
      _ => -1,
    };
    PrimitiveTypeBuilder { name: name.to_owned(), physical_type: physical_type, type_length: default_len }
  }

  pub fn with_length(mut self, type_length: i32) -> Self {
    self.type_length = type_length;
    self
  }

  pub fn build(self) -> Result<Type> {
    if self.physical_type == PhysicalType::FIXED_LEN_BYTE_ARRAY && self.type_length <= 0 {
      return Err(general_err!(
        "FIXED_LEN_BYTE_ARRAY column {} must have a positive type_length", self.name
      ));
    }
    Ok(Type { name: self.name, physical_type: self.physical_type, type_length: self.type_length })
  }
}

/// Describes one physical column: its type, and (for fixed-length byte
/// arrays) the element size every value must have.
#[derive(Clone, Debug)]
pub struct ColumnDescriptor {
  primitive_type: TypePtr,
  max_def_level: i32,
  max_rep_level: i32,
  path: ColumnPath,
}

pub type ColumnDescPtr = Rc<ColumnDescriptor>;

impl ColumnDescriptor {
  pub fn new(
    primitive_type: TypePtr,
    _schema: Option<TypePtr>,
    max_def_level: i32,
    max_rep_level: i32,
    path: ColumnPath,
  ) -> Self {
    ColumnDescriptor {
      primitive_type: primitive_type,
      max_def_level: max_def_level,
      max_rep_level: max_rep_level,
      path: path,
    }
  }

  pub fn physical_type(&self) -> PhysicalType { self.primitive_type.physical_type() }

  pub fn type_length(&self) -> i32 { self.primitive_type.type_length() }

  pub fn max_def_level(&self) -> i32 { self.max_def_level }

  pub fn max_rep_level(&self) -> i32 { self.max_rep_level }

  pub fn path(&self) -> &ColumnPath { &self.path }
}
