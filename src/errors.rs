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

//! Errors raised by the dictionary core and its wire-codec collaborator.
//!
//! Programming errors (length mismatches, out-of-range or negative codes)
//! are not represented here: those `panic!` and abort the call rather than
//! unwind through a `Result`.

use std::result;

quick_error! {
  #[derive(Debug)]
  pub enum ParquetError {
    /// General error, with a descriptive message.
    General(message: String) {
      description(message)
      display("Parquet error: {}", message)
    }
    /// Raised by `ReadValuesAt`/`ReadRowAt`/the page's value cursor once the
    /// caller has consumed every code. Distinct from `General` so callers
    /// can loop on it rather than treat it as failure.
    EndOfSequence {
      description("end of sequence")
      display("Parquet error: end of sequence")
    }
    /// A structured, non-aborting error for a negative or past-the-end row
    /// index passed to `ReadValuesAt`/`ReadRowAt`.
    OutOfBounds(index: i64, len: usize) {
      description("row index out of bounds")
      display("Parquet error: index {} out of bounds for length {}", index, len)
    }
  }
}

pub type Result<T> = result::Result<T, ParquetError>;

/// Builds a `ParquetError::General` from a formatted message.
macro_rules! general_err {
  ($fmt:expr) => (ParquetError::General($fmt.to_owned()));
  ($fmt:expr, $($args:expr),*) => (ParquetError::General(format!($fmt, $($args),*)));
}

/// Macro for the `ReadValuesAt`/`ReadRowAt` bounds error.
macro_rules! bounds_err {
  ($index:expr, $len:expr) => (ParquetError::OutOfBounds($index as i64, $len));
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn general_err_formats_message() {
    let err = general_err!("bad thing: {}", 42);
    assert_eq!(format!("{}", err), "Parquet error: bad thing: 42");
  }

  #[test]
  fn end_of_sequence_is_distinct_from_general() {
    let eos: Result<()> = Err(ParquetError::EndOfSequence);
    match eos {
      Err(ParquetError::EndOfSequence) => {},
      _ => panic!("expected EndOfSequence"),
    }
  }

  #[test]
  fn out_of_bounds_carries_index_and_len() {
    let err = bounds_err!(-1, 3);
    match err {
      ParquetError::OutOfBounds(index, len) => {
        assert_eq!(index, -1);
        assert_eq!(len, 3);
      },
      _ => panic!("expected OutOfBounds"),
    }
  }
}
