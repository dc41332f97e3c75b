//! # rangepack - compact integer range sets
//!
//! Compresses a sorted set of 32-bit unsigned integers, given as values and/or
//! inclusive ranges, into an Elias-gamma coded bitstream, and reconstructs the
//! merged ranges from it.
//!
//! The set is viewed as alternating gaps and runs over `[0, 2^32 - 1]`. A
//! small automaton folds isolated one-wide gaps and runs into single-bit
//! codewords, so both long runs and scattered individual values stay cheap.
//!
//! ## Example
//!
//! ```
//! use rangepack::{compress, decompress};
//!
//! let bytes = compress([1, 2, 3, 7, 9]).unwrap();
//!
//! let mut ranges = Vec::new();
//! decompress(&bytes, |start, end| ranges.push((start, end))).unwrap();
//! assert_eq!(ranges, vec![(1, 3), (7, 7), (9, 9)]);
//! ```
//!
//! ## Format
//!
//! - Codewords are packed most-significant bit first and zero-padded to a
//!   whole byte. There is no header, length or checksum.
//! - The base64 text of the bytes is accepted anywhere the bytes are.
//! - Truncated or corrupt data is not detected; it decodes to whatever ranges
//!   its bits describe.

mod automaton;
mod bits;
mod compress;
mod compressed;
mod decompress;
mod element;
mod error;
mod normalize;
pub mod text;

#[cfg(test)]
mod tests;

pub use automaton::{EncoderState, RangeTracker, RunEncoder};
pub use bits::{gamma_len, BitReader, BitWriter, MAX_CODEWORD};
pub use compress::{
    compress, compress_with, compress_with_stats, CompressOptions, CompressionStats,
    DEFAULT_MAX_SIZE,
};
pub use compressed::{to_base64, Compressed};
pub use decompress::{decompress, decompress_to_vec, ranges, Ranges};
pub use element::{Element, MAX_VALUE};
pub use error::{Error, Result};
pub use normalize::{merged_ranges, normalize, FlatLengths, Normalizer, Run};
