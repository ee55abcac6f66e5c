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

//! Marker types for the ten physical types the dictionary core supports,
//! plus the value representations they carry (`Int96`, `Be128`,
//! `ByteArray`) and the per-type ordering used by `Dictionary::bounds`.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use ordered_float::OrderedFloat;

use basic::Type;

/// A value belonging to one of the ten physical types. Implemented by each
/// of the marker structs below (`BoolType`, `Int32Type`, ...).
pub trait DataType: 'static {
  type T: PartialEq + Clone + Default + fmt::Debug;

  fn get_physical_type() -> Type;
}

/// Per-type ordering used by `Dictionary::bounds`. Kept separate from
/// `DataType` because `f32`/`f64` are only partially ordered by `PartialOrd`
/// and `Int96`/`Be128` use a bespoke legacy byte order rather than their
/// component-wise derived order.
pub trait TypedOrd {
  fn typed_lt(&self, other: &Self) -> bool;
}

impl TypedOrd for bool {
  /// `false < true`, matching spec.md §3 invariant 4's ordering of the two
  /// boolean codes (though which polarity gets code 0 is insertion-order
  /// dependent, not value-dependent).
  fn typed_lt(&self, other: &Self) -> bool { !*self && *other }
}

macro_rules! typed_ord_via_partial_ord {
  ($ty:ty) => {
    impl TypedOrd for $ty {
      fn typed_lt(&self, other: &Self) -> bool { self < other }
    }
  };
}

typed_ord_via_partial_ord!(i32);
typed_ord_via_partial_ord!(i64);
typed_ord_via_partial_ord!(u32);
typed_ord_via_partial_ord!(u64);

impl TypedOrd for f32 {
  fn typed_lt(&self, other: &Self) -> bool { OrderedFloat(*self) < OrderedFloat(*other) }
}

impl TypedOrd for f64 {
  fn typed_lt(&self, other: &Self) -> bool { OrderedFloat(*self) < OrderedFloat(*other) }
}

// ----------------------------------------------------------------------
// Int96: legacy 96-bit (12-byte) fixed-width integer.

/// Legacy 96-bit fixed-width value, stored as three `u32` limbs in the
/// order they appear on the wire. `spec.md` §4.1 calls for "a three-limb
/// unsigned compare with the legacy byte order"; limb 2 is the
/// most-significant for comparison purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Int96 {
  value: [u32; 3],
}

impl Int96 {
  pub fn new(v0: u32, v1: u32, v2: u32) -> Self {
    Int96 { value: [v0, v1, v2] }
  }

  pub fn data(&self) -> &[u32; 3] { &self.value }
}

impl TypedOrd for Int96 {
  fn typed_lt(&self, other: &Self) -> bool {
    for i in (0..3).rev() {
      match self.value[i].cmp(&other.value[i]) {
        Ordering::Less => return true,
        Ordering::Greater => return false,
        Ordering::Equal => continue,
      }
    }
    false
  }
}

impl fmt::Display for Int96 {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{:?}", self.value)
  }
}

// ----------------------------------------------------------------------
// Be128: 16-byte big-endian integer blob.

/// 16-byte value compared as a big-endian magnitude, i.e. plain
/// lexicographic byte compare (spec.md §4.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Be128 {
  bytes: [u8; 16],
}

impl Be128 {
  pub fn new(bytes: [u8; 16]) -> Self { Be128 { bytes: bytes } }

  pub fn as_bytes(&self) -> &[u8; 16] { &self.bytes }
}

impl TypedOrd for Be128 {
  fn typed_lt(&self, other: &Self) -> bool { self.bytes < other.bytes }
}

impl fmt::Display for Be128 {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "0x")?;
    for b in &self.bytes {
      write!(f, "{:02x}", b)?;
    }
    Ok(())
  }
}

// ----------------------------------------------------------------------
// ByteArray: variable-length byte string, cheaply clonable.

/// A variable-length byte string. Aliases a reference-counted buffer so
/// that values handed back by `Dictionary::index`/`lookup` are cheap to
/// clone and carry no ownership of the dictionary's backing storage.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ByteArray {
  data: Rc<Vec<u8>>,
}

impl ByteArray {
  pub fn new(data: Vec<u8>) -> Self { ByteArray { data: Rc::new(data) } }

  pub fn as_bytes(&self) -> &[u8] { &self.data }

  pub fn len(&self) -> usize { self.data.len() }

  pub fn is_empty(&self) -> bool { self.data.is_empty() }
}

impl From<Vec<u8>> for ByteArray {
  fn from(data: Vec<u8>) -> Self { ByteArray::new(data) }
}

impl<'a> From<&'a str> for ByteArray {
  fn from(data: &'a str) -> Self { ByteArray::new(data.as_bytes().to_vec()) }
}

impl TypedOrd for ByteArray {
  fn typed_lt(&self, other: &Self) -> bool { self.as_bytes() < other.as_bytes() }
}

impl fmt::Display for ByteArray {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match ::std::str::from_utf8(self.as_bytes()) {
      Ok(s) => write!(f, "{}", s),
      Err(_) => write!(f, "{:?}", self.as_bytes()),
    }
  }
}

/// Gives a fixed-width `DataType` an `Eq + Hash` key to drive a
/// `std::collections::HashMap`-based reverse index. `f32`/`f64` route
/// through `OrderedFloat` since the bare types are not `Eq`/`Hash`; every
/// other fixed-width type uses itself as the key.
pub trait HashKey: DataType {
  type Key: Eq + ::std::hash::Hash + Clone;

  fn hash_key(v: &Self::T) -> Self::Key;
}

macro_rules! hash_key_is_self {
  ($ty:ty) => {
    impl HashKey for $ty {
      type Key = <$ty as DataType>::T;
      fn hash_key(v: &Self::T) -> Self::Key { v.clone() }
    }
  };
}

hash_key_is_self!(Int32Type);
hash_key_is_self!(Int64Type);
hash_key_is_self!(UInt32Type);
hash_key_is_self!(UInt64Type);

// ----------------------------------------------------------------------
// Marker types, one per physical type.

macro_rules! make_type {
  ($name:ident, $physical_ty:expr, $native_ty:ty) => {
    #[derive(Clone, Debug, PartialEq)]
    pub struct $name {}

    impl DataType for $name {
      type T = $native_ty;

      fn get_physical_type() -> Type { $physical_ty }
    }
  };
}

make_type!(BoolType, Type::BOOLEAN, bool);
make_type!(Int32Type, Type::INT32, i32);
make_type!(Int64Type, Type::INT64, i64);
make_type!(Int96Type, Type::INT96, Int96);
make_type!(FloatType, Type::FLOAT, f32);
make_type!(DoubleType, Type::DOUBLE, f64);
make_type!(ByteArrayType, Type::BYTE_ARRAY, ByteArray);
make_type!(FixedLenByteArrayType, Type::FIXED_LEN_BYTE_ARRAY, ByteArray);
make_type!(UInt32Type, Type::UINT32, u32);
make_type!(UInt64Type, Type::UINT64, u64);
make_type!(Be128Type, Type::BE128, Be128);

hash_key_is_self!(Int96Type);
hash_key_is_self!(Be128Type);

impl HashKey for FloatType {
  type Key = OrderedFloat<f32>;
  fn hash_key(v: &f32) -> OrderedFloat<f32> { OrderedFloat(*v) }
}

impl HashKey for DoubleType {
  type Key = OrderedFloat<f64>;
  fn hash_key(v: &f64) -> OrderedFloat<f64> { OrderedFloat(*v) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn bool_ordering_is_false_then_true() {
    assert!(false.typed_lt(&true));
    assert!(!true.typed_lt(&false));
    assert!(!false.typed_lt(&false));
  }

  #[test]
  fn int96_orders_by_most_significant_limb_first() {
    let low = Int96::new(u32::max_value(), 0, 0);
    let high = Int96::new(0, 0, 1);
    assert!(low.typed_lt(&high));
    assert!(!high.typed_lt(&low));
  }

  #[test]
  fn be128_orders_as_big_endian_magnitude() {
    let mut a = [0u8; 16];
    let mut b = [0u8; 16];
    a[15] = 1;
    b[15] = 2;
    assert!(Be128::new(a).typed_lt(&Be128::new(b)));
    b[0] = 1; // now b is larger in its most-significant byte too
    assert!(Be128::new(a).typed_lt(&Be128::new(b)));
  }

  #[test]
  fn byte_array_orders_lexicographically() {
    let apple = ByteArray::from("apple");
    let banana = ByteArray::from("banana");
    assert!(apple.typed_lt(&banana));
    assert!(!banana.typed_lt(&apple));
  }

  #[test]
  fn byte_array_clone_is_cheap_alias() {
    let a = ByteArray::from("hello");
    let b = a.clone();
    assert_eq!(a, b);
    assert_eq!(a.as_bytes(), b.as_bytes());
  }
}
