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

//! The tagged-union `Value` the core reads and writes at a known stride.
//! This is the slice of a column value representation the dictionary core
//! needs: one payload per physical type, plus the `column_index` tag
//! stored in complemented form as the marker that a value came from a
//! dictionary rather than a plain page.

use basic::Type;
use data_type::{
  Be128, ByteArray, Int96, BoolType, Int32Type, Int64Type, Int96Type, FloatType, DoubleType,
  ByteArrayType, FixedLenByteArrayType, UInt32Type, UInt64Type, Be128Type, DataType, TypedOrd,
};

#[derive(Debug, Clone, PartialEq)]
pub enum ValueData {
  Bool(bool),
  Int32(i32),
  Int64(i64),
  Int96(Int96),
  Float(f32),
  Double(f64),
  ByteArray(ByteArray),
  FixedLenByteArray(ByteArray),
  UInt32(u32),
  UInt64(u64),
  Be128(Be128),
}

impl ValueData {
  pub fn kind(&self) -> Type {
    match *self {
      ValueData::Bool(_) => Type::BOOLEAN,
      ValueData::Int32(_) => Type::INT32,
      ValueData::Int64(_) => Type::INT64,
      ValueData::Int96(_) => Type::INT96,
      ValueData::Float(_) => Type::FLOAT,
      ValueData::Double(_) => Type::DOUBLE,
      ValueData::ByteArray(_) => Type::BYTE_ARRAY,
      ValueData::FixedLenByteArray(_) => Type::FIXED_LEN_BYTE_ARRAY,
      ValueData::UInt32(_) => Type::UINT32,
      ValueData::UInt64(_) => Type::UINT64,
      ValueData::Be128(_) => Type::BE128,
    }
  }

  /// A zero-valued payload of the given kind, used to pre-initialise the
  /// output of `Dictionary::lookup` so each call only has to write the
  /// payload field, never re-derive which variant it is writing into.
  pub fn zero(kind: Type) -> Self {
    match kind {
      Type::BOOLEAN => ValueData::Bool(false),
      Type::INT32 => ValueData::Int32(0),
      Type::INT64 => ValueData::Int64(0),
      Type::INT96 => ValueData::Int96(Int96::default()),
      Type::FLOAT => ValueData::Float(0.0),
      Type::DOUBLE => ValueData::Double(0.0),
      Type::BYTE_ARRAY => ValueData::ByteArray(ByteArray::default()),
      Type::FIXED_LEN_BYTE_ARRAY => ValueData::FixedLenByteArray(ByteArray::default()),
      Type::UINT32 => ValueData::UInt32(0),
      Type::UINT64 => ValueData::UInt64(0),
      Type::BE128 => ValueData::Be128(Be128::default()),
    }
  }
}

/// One row's value plus the tag identifying which column it belongs to.
/// `column_index` is stored bitwise-complemented (`!index`) while the
/// value originates from a dictionary, so a negative `column_index` is
/// itself the "this came from a dictionary" marker a reader can check
/// without a separate flag.
#[derive(Debug, Clone, PartialEq)]
pub struct Value {
  data: ValueData,
  column_index: i32,
}

impl Value {
  pub fn new(data: ValueData) -> Self { Value { data: data, column_index: 0 } }

  pub fn zero(kind: Type) -> Self { Value::new(ValueData::zero(kind)) }

  pub fn kind(&self) -> Type { self.data.kind() }

  pub fn data(&self) -> &ValueData { &self.data }

  pub fn data_mut(&mut self) -> &mut ValueData { &mut self.data }

  pub fn is_from_dictionary(&self) -> bool { self.column_index < 0 }

  /// The plain (non-complemented) column ordinal, regardless of whether
  /// this value currently carries the dictionary marker.
  pub fn column_index(&self) -> i32 {
    if self.column_index < 0 { !self.column_index } else { self.column_index }
  }

  pub fn set_column_index(&mut self, column_index: i32) { self.column_index = column_index; }

  /// Tags this value as having come from a dictionary keyed by
  /// `column_index`, stored bitwise-complemented so it reads back negative.
  pub fn tag_from_dictionary(&mut self, column_index: i32) {
    self.column_index = !column_index;
  }

  fn mismatch(&self, expected: Type) -> ! {
    panic!("Value kind mismatch: expected {}, found {}", expected, self.kind());
  }

  pub fn as_bool(&self) -> bool {
    match self.data { ValueData::Bool(v) => v, _ => self.mismatch(Type::BOOLEAN) }
  }

  pub fn as_i32(&self) -> i32 {
    match self.data { ValueData::Int32(v) => v, _ => self.mismatch(Type::INT32) }
  }

  pub fn as_i64(&self) -> i64 {
    match self.data { ValueData::Int64(v) => v, _ => self.mismatch(Type::INT64) }
  }

  pub fn as_int96(&self) -> Int96 {
    match self.data { ValueData::Int96(v) => v, _ => self.mismatch(Type::INT96) }
  }

  pub fn as_f32(&self) -> f32 {
    match self.data { ValueData::Float(v) => v, _ => self.mismatch(Type::FLOAT) }
  }

  pub fn as_f64(&self) -> f64 {
    match self.data { ValueData::Double(v) => v, _ => self.mismatch(Type::DOUBLE) }
  }

  pub fn as_byte_array(&self) -> &ByteArray {
    match self.data {
      ValueData::ByteArray(ref v) | ValueData::FixedLenByteArray(ref v) => v,
      _ => self.mismatch(Type::BYTE_ARRAY),
    }
  }

  pub fn as_u32(&self) -> u32 {
    match self.data { ValueData::UInt32(v) => v, _ => self.mismatch(Type::UINT32) }
  }

  pub fn as_u64(&self) -> u64 {
    match self.data { ValueData::UInt64(v) => v, _ => self.mismatch(Type::UINT64) }
  }

  pub fn as_be128(&self) -> Be128 {
    match self.data { ValueData::Be128(v) => v, _ => self.mismatch(Type::BE128) }
  }

  pub fn set_bool(&mut self, v: bool) {
    match self.data { ValueData::Bool(ref mut slot) => *slot = v, _ => self.mismatch(Type::BOOLEAN) }
  }

  pub fn set_i32(&mut self, v: i32) {
    match self.data { ValueData::Int32(ref mut slot) => *slot = v, _ => self.mismatch(Type::INT32) }
  }

  pub fn set_i64(&mut self, v: i64) {
    match self.data { ValueData::Int64(ref mut slot) => *slot = v, _ => self.mismatch(Type::INT64) }
  }

  pub fn set_int96(&mut self, v: Int96) {
    match self.data { ValueData::Int96(ref mut slot) => *slot = v, _ => self.mismatch(Type::INT96) }
  }

  pub fn set_f32(&mut self, v: f32) {
    match self.data { ValueData::Float(ref mut slot) => *slot = v, _ => self.mismatch(Type::FLOAT) }
  }

  pub fn set_f64(&mut self, v: f64) {
    match self.data { ValueData::Double(ref mut slot) => *slot = v, _ => self.mismatch(Type::DOUBLE) }
  }

  pub fn set_byte_array(&mut self, v: ByteArray) {
    match self.data {
      ValueData::ByteArray(ref mut slot) | ValueData::FixedLenByteArray(ref mut slot) => *slot = v,
      _ => self.mismatch(Type::BYTE_ARRAY),
    }
  }

  pub fn set_u32(&mut self, v: u32) {
    match self.data { ValueData::UInt32(ref mut slot) => *slot = v, _ => self.mismatch(Type::UINT32) }
  }

  pub fn set_u64(&mut self, v: u64) {
    match self.data { ValueData::UInt64(ref mut slot) => *slot = v, _ => self.mismatch(Type::UINT64) }
  }

  pub fn set_be128(&mut self, v: Be128) {
    match self.data { ValueData::Be128(ref mut slot) => *slot = v, _ => self.mismatch(Type::BE128) }
  }

  /// Compares two values of the same kind under their physical type's
  /// ordering (`data_type::TypedOrd`). Used by `IndexedColumnBuffer::less`
  /// to sort rows by materialised value rather than by code. Panics if
  /// `self` and `other` are not the same kind.
  pub fn typed_lt(&self, other: &Value) -> bool {
    match (&self.data, &other.data) {
      (&ValueData::Bool(a), &ValueData::Bool(b)) => a.typed_lt(&b),
      (&ValueData::Int32(a), &ValueData::Int32(b)) => a.typed_lt(&b),
      (&ValueData::Int64(a), &ValueData::Int64(b)) => a.typed_lt(&b),
      (&ValueData::Int96(ref a), &ValueData::Int96(ref b)) => a.typed_lt(b),
      (&ValueData::Float(a), &ValueData::Float(b)) => a.typed_lt(&b),
      (&ValueData::Double(a), &ValueData::Double(b)) => a.typed_lt(&b),
      (&ValueData::ByteArray(ref a), &ValueData::ByteArray(ref b)) => a.typed_lt(b),
      (&ValueData::FixedLenByteArray(ref a), &ValueData::FixedLenByteArray(ref b)) => a.typed_lt(b),
      (&ValueData::UInt32(a), &ValueData::UInt32(b)) => a.typed_lt(&b),
      (&ValueData::UInt64(a), &ValueData::UInt64(b)) => a.typed_lt(&b),
      (&ValueData::Be128(ref a), &ValueData::Be128(ref b)) => a.typed_lt(b),
      _ => self.mismatch(other.kind()),
    }
  }
}

/// Converts between a physical type's native representation (`T::T`) and
/// the boxed `Value` the public `Insert`/`Lookup`/`Index` entry points
/// traffic in. The strided `insert`/`lookup` fast path on each concrete
/// dictionary type bypasses this entirely and works on `T::T` directly.
pub trait DictValue: DataType {
  fn wrap(v: Self::T) -> ValueData;

  fn unwrap(v: &Value) -> Self::T;

  /// Writes `v` into `out`'s existing payload slot without touching its
  /// kind tag, matching the "pre-initialised kind tag" contract `Lookup`
  /// relies on.
  fn write_into(out: &mut Value, v: Self::T);
}

macro_rules! dict_value_impl {
  ($ty:ty, $as_fn:ident, $set_fn:ident, $wrap:path) => {
    impl DictValue for $ty {
      fn wrap(v: Self::T) -> ValueData { $wrap(v) }

      fn unwrap(v: &Value) -> Self::T { v.$as_fn() }

      fn write_into(out: &mut Value, v: Self::T) { out.$set_fn(v); }
    }
  };
}

dict_value_impl!(BoolType, as_bool, set_bool, ValueData::Bool);
dict_value_impl!(Int32Type, as_i32, set_i32, ValueData::Int32);
dict_value_impl!(Int64Type, as_i64, set_i64, ValueData::Int64);
dict_value_impl!(Int96Type, as_int96, set_int96, ValueData::Int96);
dict_value_impl!(FloatType, as_f32, set_f32, ValueData::Float);
dict_value_impl!(DoubleType, as_f64, set_f64, ValueData::Double);
dict_value_impl!(UInt32Type, as_u32, set_u32, ValueData::UInt32);
dict_value_impl!(UInt64Type, as_u64, set_u64, ValueData::UInt64);
dict_value_impl!(Be128Type, as_be128, set_be128, ValueData::Be128);

impl DictValue for ByteArrayType {
  fn wrap(v: ByteArray) -> ValueData { ValueData::ByteArray(v) }

  fn unwrap(v: &Value) -> ByteArray { v.as_byte_array().clone() }

  fn write_into(out: &mut Value, v: ByteArray) { out.set_byte_array(v); }
}

impl DictValue for FixedLenByteArrayType {
  fn wrap(v: ByteArray) -> ValueData { ValueData::FixedLenByteArray(v) }

  fn unwrap(v: &Value) -> ByteArray { v.as_byte_array().clone() }

  fn write_into(out: &mut Value, v: ByteArray) { out.set_byte_array(v); }
}
