//! Elias-gamma bit packing.
//!
//! Codewords are written most-significant-bit first. A value `x` is encoded
//! as `floor(log2 x)` zero bits followed by the binary form of `x`.

use crate::error::{Error, Result};

/// Largest value representable by a single codeword.
pub const MAX_CODEWORD: u64 = u32::MAX as u64;

/// Number of bits the gamma code of `x` occupies. `x` must be non-zero.
pub fn gamma_len(x: u32) -> usize {
    let k = 31 - x.leading_zeros() as usize;
    2 * k + 1
}

/// Growable, size-capped bit buffer.
///
/// Storage is kept as 32-bit words so that every codeword touches at most two
/// of them. The buffer doubles when it runs out of room, never past
/// `max_size` bytes.
#[derive(Debug)]
pub struct BitWriter {
    words: Vec<u32>,
    /// Number of bits written.
    len: usize,
    max_size: usize,
}

impl BitWriter {
    pub fn new(max_size: usize) -> Self {
        Self {
            words: Vec::new(),
            len: 0,
            max_size,
        }
    }

    /// Bits written so far.
    pub fn bit_len(&self) -> usize {
        self.len
    }

    /// Bytes currently reserved for output, always a multiple of 4.
    pub fn capacity_bytes(&self) -> usize {
        self.words.len() * 4
    }

    /// Makes room for `additional` more bits.
    pub fn ensure_capacity(&mut self, additional: usize) -> Result<()> {
        let required = (self.len + additional).div_ceil(32) * 4;
        if required <= self.capacity_bytes() {
            return Ok(());
        }
        if required > self.max_size {
            return Err(Error::BufferCapacityExceeded {
                required,
                max_size: self.max_size,
            });
        }

        let doubled = (self.capacity_bytes() * 2).min(self.max_size) & !3;
        let grown = required.max(doubled);
        tracing::trace!(
            from = self.capacity_bytes(),
            to = grown,
            "growing bit buffer"
        );
        self.words.resize(grown / 4, 0);
        Ok(())
    }

    /// Appends the gamma code of `x`.
    pub fn write_gamma(&mut self, x: u64) -> Result<()> {
        if x == 0 || x > MAX_CODEWORD {
            return Err(Error::EncodingRangeExceeded { value: x });
        }
        let x = x as u32;
        let k = 31 - x.leading_zeros() as usize;
        let encoded_len = 2 * k + 1;
        self.ensure_capacity(encoded_len)?;

        // Leading zeros are already present; only the value bits are ORed in.
        let start = self.len + k;
        let value = x << (31 - k);
        let word = start / 32;
        let shift = start % 32;
        self.words[word] |= value >> shift;
        if shift != 0 {
            let spill = value << (32 - shift);
            if spill != 0 {
                self.words[word + 1] |= spill;
            }
        }

        self.len += encoded_len;
        Ok(())
    }

    /// Returns exactly `ceil(bits / 8)` bytes, releasing spare capacity.
    pub fn finish(self) -> Vec<u8> {
        let byte_len = self.len.div_ceil(8);
        let mut bytes: Vec<u8> = self
            .words
            .iter()
            .flat_map(|word| word.to_be_bytes())
            .collect();
        bytes.truncate(byte_len);
        bytes.shrink_to_fit();
        bytes
    }
}

/// Reads gamma codewords from a byte slice.
///
/// Bytes past the end of the slice read as zero, so a 32-bit window can be
/// taken at any offset.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Bits consumed so far.
    pub fn bit_offset(&self) -> usize {
        self.offset
    }

    pub fn remaining_bits(&self) -> usize {
        (self.data.len() * 8).saturating_sub(self.offset)
    }

    fn byte(&self, index: usize) -> u8 {
        self.data.get(index).copied().unwrap_or(0)
    }

    /// The 32 bits starting at `bit_offset`.
    pub fn peek_word(&self, bit_offset: usize) -> u32 {
        let index = bit_offset / 8;
        let shift = bit_offset % 8;
        let word = u32::from_be_bytes([
            self.byte(index),
            self.byte(index + 1),
            self.byte(index + 2),
            self.byte(index + 3),
        ]);
        if shift == 0 {
            word
        } else {
            (word << shift) | u32::from(self.byte(index + 4) >> (8 - shift))
        }
    }

    /// Reads the next codeword, or `None` once only padding is left.
    ///
    /// A codeword never starts with 32 zero bits, so such a window also ends
    /// the stream.
    pub fn read_gamma(&mut self) -> Option<u64> {
        let zeros = self.peek_word(self.offset).leading_zeros() as usize;
        if zeros >= self.remaining_bits() || zeros >= 32 {
            return None;
        }
        let value = self.peek_word(self.offset + zeros) >> (31 - zeros);
        self.offset += 2 * zeros + 1;
        Some(u64::from(value))
    }
}
