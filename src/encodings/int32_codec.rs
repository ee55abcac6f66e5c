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

//! The 32-bit integer codec (spec.md §6, item 4): raw little-endian
//! `Encode`/`Decode` over an indexed page's `i32` code array. Conceptually
//! the teacher's `PlainEncoder<Int32Type>`/`PlainDecoder<Int32Type>` — a
//! plain reinterpret-as-bytes encoding, no bit-packing, RLE or delta —
//! narrowed to the one physical type an indexed page ever needs, since
//! `column::dictionary` already does the real interning `DictEncoder`
//! would otherwise duplicate.

use byteorder::{ByteOrder, LittleEndian};

use util::memory::ByteBufferPtr;

pub fn encode(codes: &[i32]) -> ByteBufferPtr {
  let mut bytes = vec![0u8; codes.len() * 4];
  for (i, &code) in codes.iter().enumerate() {
    LittleEndian::write_i32(&mut bytes[i * 4..i * 4 + 4], code);
  }
  ByteBufferPtr::new(bytes)
}

/// Decodes exactly `num_values` codes. A `bytes` shorter than
/// `4 * num_values` has its tail zero-filled rather than erroring — the
/// seed-time zero-padding quirk of spec.md §4.2/§9: a trailing code a
/// short wire buffer couldn't supply decodes as `0`, the dictionary's
/// first-ever entry.
pub fn decode(bytes: &ByteBufferPtr, num_values: usize) -> Vec<i32> {
  let raw = bytes.as_ref();
  let mut codes = vec![0i32; num_values];
  let available = ::std::cmp::min(raw.len() / 4, num_values);
  for (i, slot) in codes.iter_mut().enumerate().take(available) {
    *slot = LittleEndian::read_i32(&raw[i * 4..i * 4 + 4]);
  }
  codes
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn round_trips_through_bytes() {
    let codes = vec![0, 1, 2, 100, -1, i32::max_value(), i32::min_value()];
    let bytes = encode(&codes);
    assert_eq!(bytes.len(), codes.len() * 4);
    assert_eq!(decode(&bytes, codes.len()), codes);
  }

  #[test]
  fn short_buffer_zero_pads_the_tail() {
    let codes = vec![7, 9];
    let mut bytes = encode(&codes).as_ref().to_vec();
    bytes.truncate(6); // one whole code plus two stray bytes
    let decoded = decode(&ByteBufferPtr::new(bytes), 3);
    assert_eq!(decoded, vec![7, 0, 0]);
  }

  #[test]
  fn empty_input_encodes_to_empty_bytes() {
    assert_eq!(encode(&[]).len(), 0);
    assert_eq!(decode(&ByteBufferPtr::new(Vec::new()), 0), Vec::<i32>::new());
  }
}
