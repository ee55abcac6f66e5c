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

//! Shared, reference-counted byte storage and a thin growable-`Vec`
//! wrapper, used throughout `encodings` and `column` as
//! `ByteBufferPtr`/`ByteBuffer`/`Buffer<T>`.
//!
//! `ByteBufferPtr` is the vehicle for the aliasing discipline dictionary
//! pages rely on: a snapshot taken via `ByteBuffer::consume` stays valid
//! for as long as its `Rc` is held, independent of later growth of the
//! buffer it was taken from.

use std::ops::{Index, IndexMut};
use std::rc::Rc;
use std::{mem, slice};

/// An immutable, reference-counted view over a byte buffer. Cloning is
/// O(1): it bumps the `Rc` and copies the `start`/`len` window, it never
/// copies bytes.
#[derive(Clone, Debug)]
pub struct ByteBufferPtr {
  data: Rc<Vec<u8>>,
  start: usize,
  len: usize,
}

impl ByteBufferPtr {
  pub fn new(data: Vec<u8>) -> Self {
    let len = data.len();
    ByteBufferPtr { data: Rc::new(data), start: 0, len: len }
  }

  pub fn len(&self) -> usize { self.len }

  pub fn is_empty(&self) -> bool { self.len == 0 }

  /// Returns a view starting `start` bytes into this buffer, sharing the
  /// same backing allocation.
  pub fn start_from(&self, start: usize) -> Self {
    assert!(start <= self.len);
    ByteBufferPtr { data: self.data.clone(), start: self.start + start, len: self.len - start }
  }

  /// Returns a view of `[start, start + len)` within this buffer.
  pub fn range(&self, start: usize, len: usize) -> Self {
    assert!(start + len <= self.len);
    ByteBufferPtr { data: self.data.clone(), start: self.start + start, len: len }
  }
}

impl AsRef<[u8]> for ByteBufferPtr {
  fn as_ref(&self) -> &[u8] { &self.data[self.start..self.start + self.len] }
}

/// A growable owned byte buffer: callers append to it and then
/// `consume()` it into an immutable, shareable `ByteBufferPtr`.
#[derive(Clone, Debug, Default)]
pub struct ByteBuffer {
  buf: Vec<u8>,
}

impl ByteBuffer {
  pub fn new() -> Self { ByteBuffer { buf: Vec::new() } }

  pub fn set_data(&mut self, data: Vec<u8>) { self.buf = data; }

  pub fn extend_from_slice(&mut self, bytes: &[u8]) { self.buf.extend_from_slice(bytes); }

  pub fn len(&self) -> usize { self.buf.len() }

  pub fn is_empty(&self) -> bool { self.buf.is_empty() }

  pub fn capacity(&self) -> usize { self.buf.capacity() }

  pub fn as_slice(&self) -> &[u8] { &self.buf }

  pub fn clear(&mut self) { self.buf.clear(); }

  /// Consumes the buffer, returning it as an immutable, shareable view and
  /// leaving this buffer empty (but not deallocated).
  pub fn consume(&mut self) -> ByteBufferPtr {
    let data = mem::replace(&mut self.buf, Vec::new());
    ByteBufferPtr::new(data)
  }
}

/// A growable typed buffer wrapping `Vec<T>`, used for the dictionary's
/// values store and (for byte-array variants) its offsets array. Kept as
/// a thin newtype rather than using `Vec<T>` directly, so `Index`/`IndexMut`
/// read the same way across the core.
#[derive(Clone, Debug, Default)]
pub struct Buffer<T> {
  data: Vec<T>,
}

impl<T> Buffer<T> {
  pub fn new() -> Self { Buffer { data: Vec::new() } }

  pub fn with_capacity(capacity: usize) -> Self { Buffer { data: Vec::with_capacity(capacity) } }

  pub fn size(&self) -> usize { self.data.len() }

  pub fn capacity(&self) -> usize { self.data.capacity() }

  pub fn is_empty(&self) -> bool { self.data.is_empty() }

  pub fn data(&self) -> &[T] { &self.data }

  pub fn data_mut(&mut self) -> &mut [T] { &mut self.data }

  pub fn push(&mut self, value: T) { self.data.push(value); }

  pub fn clear(&mut self) { self.data.clear(); }

  pub fn truncate(&mut self, len: usize) { self.data.truncate(len); }
}

impl<T: Clone> Buffer<T> {
  pub fn resize(&mut self, new_len: usize, value: T) { self.data.resize(new_len, value); }
}

impl<T> Index<usize> for Buffer<T> {
  type Output = T;
  fn index(&self, i: usize) -> &T { &self.data[i] }
}

impl<T> IndexMut<usize> for Buffer<T> {
  fn index_mut(&mut self, i: usize) -> &mut T { &mut self.data[i] }
}

/// Reinterprets a typed slice as raw bytes via
/// `slice::from_raw_parts(data as *const T as *const u8, ...)`. Sound for
/// any `T` with no padding bytes that matter to equality, which holds for
/// every fixed-width physical type this core supports (`bool`, the
/// integer/float types, `Int96`, `Be128`).
pub unsafe fn slice_as_bytes<T>(data: &[T]) -> &[u8] {
  slice::from_raw_parts(data.as_ptr() as *const u8, data.len() * mem::size_of::<T>())
}

/// The inverse of `slice_as_bytes`: reinterprets a byte region as a typed
/// array without copying, used when seeding a dictionary's values store
/// from a raw byte buffer. Panics if `bytes` is not an exact multiple of
/// `size_of::<T>()`.
pub unsafe fn bytes_as_slice<T>(bytes: &[u8]) -> &[T] {
  let elem_size = mem::size_of::<T>();
  assert_eq!(
    bytes.len() % elem_size, 0,
    "byte length {} is not a multiple of element size {}", bytes.len(), elem_size
  );
  slice::from_raw_parts(bytes.as_ptr() as *const T, bytes.len() / elem_size)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn byte_buffer_ptr_start_from_shares_allocation() {
    let ptr = ByteBufferPtr::new(vec![1, 2, 3, 4, 5]);
    let tail = ptr.start_from(2);
    assert_eq!(tail.as_ref(), &[3, 4, 5]);
    assert_eq!(ptr.as_ref(), &[1, 2, 3, 4, 5]);
  }

  #[test]
  fn byte_buffer_ptr_range() {
    let ptr = ByteBufferPtr::new(vec![10, 20, 30, 40]);
    assert_eq!(ptr.range(1, 2).as_ref(), &[20, 30]);
  }

  #[test]
  fn buffer_push_and_index() {
    let mut buf: Buffer<i32> = Buffer::new();
    buf.push(1);
    buf.push(2);
    assert_eq!(buf.size(), 2);
    assert_eq!(buf[0], 1);
    buf[1] = 42;
    assert_eq!(buf.data(), &[1, 42]);
  }

  #[test]
  fn slice_as_bytes_and_back_round_trip() {
    let values: Vec<i32> = vec![1, -2, 3];
    let bytes = unsafe { slice_as_bytes(&values) };
    let back: &[i32] = unsafe { bytes_as_slice(bytes) };
    assert_eq!(back, &values[..]);
  }
}
