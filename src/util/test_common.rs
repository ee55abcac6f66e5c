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

//! Random value generation for dictionary property tests, one `RandGen`
//! impl per physical type. Each of the eleven variants gets an explicit
//! impl rather than a blanket one, since three of them (`Int96`, `Be128`,
//! `ByteArray`) carry non-primitive payloads that need their own
//! generation logic.

use rand::{thread_rng, Rng};

use data_type::{
  BoolType, Int32Type, Int64Type, Int96Type, FloatType, DoubleType, ByteArrayType,
  FixedLenByteArrayType, UInt32Type, UInt64Type, Be128Type, DataType, Int96, Be128, ByteArray,
};

pub trait RandGen<T: DataType> {
  /// Generates one random value. `len` is only meaningful for the two
  /// byte-array variants: a negative `len` means "pick a random length",
  /// a non-negative `len` fixes the generated value's length.
  fn gen(len: i32) -> T::T;

  fn gen_vec(len: i32, total: usize) -> Vec<T::T> {
    let mut result = Vec::with_capacity(total);
    for _ in 0..total {
      result.push(Self::gen(len));
    }
    result
  }
}

impl RandGen<BoolType> for BoolType {
  fn gen(_: i32) -> bool { thread_rng().gen::<bool>() }
}

impl RandGen<Int32Type> for Int32Type {
  fn gen(_: i32) -> i32 { thread_rng().gen::<i32>() }
}

impl RandGen<Int64Type> for Int64Type {
  fn gen(_: i32) -> i64 { thread_rng().gen::<i64>() }
}

impl RandGen<Int96Type> for Int96Type {
  fn gen(_: i32) -> Int96 {
    let mut rng = thread_rng();
    Int96::new(rng.gen::<u32>(), rng.gen::<u32>(), rng.gen::<u32>())
  }
}

impl RandGen<FloatType> for FloatType {
  fn gen(_: i32) -> f32 { thread_rng().gen::<f32>() }
}

impl RandGen<DoubleType> for DoubleType {
  fn gen(_: i32) -> f64 { thread_rng().gen::<f64>() }
}

impl RandGen<UInt32Type> for UInt32Type {
  fn gen(_: i32) -> u32 { thread_rng().gen::<u32>() }
}

impl RandGen<UInt64Type> for UInt64Type {
  fn gen(_: i32) -> u64 { thread_rng().gen::<u64>() }
}

impl RandGen<Be128Type> for Be128Type {
  fn gen(_: i32) -> Be128 {
    let mut bytes = [0u8; 16];
    let mut rng = thread_rng();
    for b in bytes.iter_mut() {
      *b = rng.gen::<u8>();
    }
    Be128::new(bytes)
  }
}

impl RandGen<ByteArrayType> for ByteArrayType {
  fn gen(len: i32) -> ByteArray {
    let mut rng = thread_rng();
    let value_len = if len < 0 { rng.gen_range::<usize>(0, 128) } else { len as usize };
    ByteArray::from(random_bytes(value_len))
  }
}

impl RandGen<FixedLenByteArrayType> for FixedLenByteArrayType {
  fn gen(len: i32) -> ByteArray {
    let value_len = if len < 0 { 16 } else { len as usize };
    ByteArray::from(random_bytes(value_len))
  }
}

pub fn random_bytes(n: usize) -> Vec<u8> {
  let mut result = Vec::with_capacity(n);
  let mut rng = thread_rng();
  for _ in 0..n {
    result.push(rng.gen_range(0u32, 256) as u8);
  }
  result
}

pub fn random_bools(n: usize) -> Vec<bool> {
  let mut result = Vec::with_capacity(n);
  let mut rng = thread_rng();
  for _ in 0..n {
    result.push(rng.gen::<bool>());
  }
  result
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn gen_vec_produces_requested_length() {
    let values = Int32Type::gen_vec(-1, 10);
    assert_eq!(values.len(), 10);
  }

  #[test]
  fn byte_array_gen_respects_fixed_length() {
    let values = FixedLenByteArrayType::gen_vec(4, 5);
    for v in &values {
      assert_eq!(v.len(), 4);
    }
  }
}
