use crate::automaton::RangeTracker;
use crate::bits::BitReader;
use crate::compressed::Compressed;
use crate::error::Result;
use std::ops::RangeInclusive;

const DOMAIN_END: u64 = u32::MAX as u64;

/// Iterator over the ranges stored in a compressed buffer.
///
/// Yields each range once, in ascending order. Corrupt or truncated input
/// never fails: it decodes to whatever ranges its bits describe, cut off at
/// the end of the 32-bit domain.
pub struct Ranges<'a> {
    reader: BitReader<'a>,
    tracker: RangeTracker,
    emitted: usize,
    done: bool,
}

impl<'a> Ranges<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            reader: BitReader::new(data),
            tracker: RangeTracker::new(),
            emitted: 0,
            done: false,
        }
    }

    /// Converts a decoded run to the 32-bit domain.
    fn emit(&mut self, (start, end): (u64, u64)) -> Option<RangeInclusive<u32>> {
        if start > DOMAIN_END {
            self.finish();
            return None;
        }
        self.emitted += 1;
        if end > DOMAIN_END {
            self.finish();
        }
        Some(start as u32..=end.min(DOMAIN_END) as u32)
    }

    fn finish(&mut self) {
        if !self.done {
            self.done = true;
            tracing::debug!(
                ranges = self.emitted,
                bits = self.reader.bit_offset(),
                "decompressed range set"
            );
        }
    }
}

impl<'a> Iterator for Ranges<'a> {
    type Item = RangeInclusive<u32>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        while let Some(d) = self.reader.read_gamma() {
            if let Some(run) = self.tracker.step(d) {
                return self.emit(run);
            }
        }
        let last = self.tracker.finish();
        match last {
            Some(run) => {
                let range = self.emit(run);
                self.finish();
                range
            }
            None => {
                self.finish();
                None
            }
        }
    }
}

impl std::iter::FusedIterator for Ranges<'_> {}

/// Iterates over the ranges in a raw compressed buffer.
pub fn ranges(data: &[u8]) -> Ranges<'_> {
    Ranges::new(data)
}

/// Decompresses `data`, calling `on_range(start, end)` once per inclusive
/// range in ascending order.
///
/// `data` may be raw bytes or base64 text; both give the same calls. Only
/// undecodable base64 text produces an error.
pub fn decompress<'a, F>(data: impl Into<Compressed<'a>>, mut on_range: F) -> Result<()>
where
    F: FnMut(u32, u32),
{
    let bytes = data.into().to_bytes()?;
    for range in ranges(&bytes) {
        on_range(*range.start(), *range.end());
    }
    Ok(())
}

/// Decompresses `data` into a vector of inclusive ranges.
pub fn decompress_to_vec<'a>(data: impl Into<Compressed<'a>>) -> Result<Vec<RangeInclusive<u32>>> {
    let bytes = data.into().to_bytes()?;
    Ok(ranges(&bytes).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert_eq!(ranges(&[]).count(), 0);
        let mut calls = 0;
        decompress(&[] as &[u8], |_, _| calls += 1).unwrap();
        decompress("", |_, _| calls += 1).unwrap();
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_known_buffers() {
        assert_eq!(ranges(&[0b0011_0000]).collect::<Vec<_>>(), vec![5..=5]);
        assert_eq!(ranges(&[0b1000_0000]).collect::<Vec<_>>(), vec![0..=0]);
        assert_eq!(ranges(&[0b0101_0100]).collect::<Vec<_>>(), vec![1..=3]);
    }

    #[test]
    fn test_callback_order() {
        let mut seen = Vec::new();
        decompress(&[0b0100_1001u8, 0b0010_0100], |s, e| seen.push((s, e))).unwrap();
        assert_eq!(seen, vec![(1, 1), (3, 3), (5, 5), (7, 7), (9, 9)]);
    }

    #[test]
    fn test_base64_input() {
        // 0x30 encodes [5, 5]
        assert_eq!(decompress_to_vec("MA==").unwrap(), vec![5..=5]);
        assert_eq!(decompress_to_vec("MA").unwrap(), vec![5..=5]);
        assert!(decompress_to_vec("M@").is_err());
    }

    #[test]
    fn test_iterator_is_fused() {
        let mut iter = ranges(&[0b0011_0000]);
        assert_eq!(iter.next(), Some(5..=5));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_garbage_is_clamped_to_domain() {
        let garbage = [0x00, 0x00, 0x00, 0x01, 0xff, 0xff, 0xff, 0xff, 0x01, 0x00, 0x00, 0x00];
        for range in ranges(&garbage) {
            assert!(range.start() <= range.end());
        }
    }

    #[test]
    fn test_all_zero_buffer() {
        assert_eq!(ranges(&[0; 16]).count(), 0);
    }
}
