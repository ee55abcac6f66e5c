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

//! A plain FNV-1a hash over raw bytes, used by the byte-array dictionary's
//! open-addressing reverse index (`column::dictionary`). Hashes a byte
//! slice directly rather than a typed value, since the reverse index keys
//! into bytes already written into the values store.

const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

/// Hashes `bytes`, mixed with `seed` (used when growing the hash table so
/// entries don't collapse into the same probe sequence they started in).
pub fn hash(bytes: &[u8], seed: u64) -> u64 {
  let mut h = FNV_OFFSET_BASIS ^ seed;
  for &b in bytes {
    h ^= b as u64;
    h = h.wrapping_mul(FNV_PRIME);
  }
  h
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn hash_is_deterministic() {
    assert_eq!(hash(b"apple", 0), hash(b"apple", 0));
  }

  #[test]
  fn hash_differs_for_different_inputs() {
    assert_ne!(hash(b"apple", 0), hash(b"banana", 0));
  }

  #[test]
  fn seed_changes_the_hash() {
    assert_ne!(hash(b"apple", 0), hash(b"apple", 1));
  }
}
