use crate::automaton::RunEncoder;
use crate::bits::BitWriter;
use crate::element::Element;
use crate::error::Result;
use crate::normalize::{normalize, FlatLengths};

/// Default ceiling on compressed output: 16 MiB.
pub const DEFAULT_MAX_SIZE: usize = 1 << 24;

/// Options for [`compress_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressOptions {
    /// Hard limit on the compressed size, in bytes.
    pub max_size: usize,
}

impl CompressOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }
}

impl Default for CompressOptions {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
        }
    }
}

/// Statistics about one compression.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompressionStats {
    /// Canonical runs after merging
    pub runs: usize,
    /// Gamma codewords emitted
    pub codewords: usize,
    /// Meaningful bits, excluding padding
    pub bits: usize,
    /// Output length in bytes
    pub bytes: usize,
}

impl CompressionStats {
    /// Average number of bits spent per run.
    pub fn bits_per_run(&self) -> f64 {
        if self.runs == 0 {
            0.0
        } else {
            self.bits as f64 / self.runs as f64
        }
    }
}

/// Compresses a sorted sequence of values and inclusive ranges using the
/// default options.
///
/// ```
/// let bytes = rangepack::compress([1, 2, 3, 10]).unwrap();
/// let ranges = rangepack::decompress_to_vec(&bytes).unwrap();
/// assert_eq!(ranges, vec![1..=3, 10..=10]);
/// ```
pub fn compress<I>(input: I) -> Result<Vec<u8>>
where
    I: IntoIterator,
    I::Item: Into<Element>,
{
    compress_with(input, &CompressOptions::default())
}

/// Compresses `input` under the given options.
pub fn compress_with<I>(input: I, options: &CompressOptions) -> Result<Vec<u8>>
where
    I: IntoIterator,
    I::Item: Into<Element>,
{
    compress_with_stats(input, options).map(|(bytes, _)| bytes)
}

/// Compresses `input`, also reporting [`CompressionStats`].
///
/// The input is consumed once, front to back. Adjacent elements are merged;
/// anything overlapping, backwards, out of order or outside `[0, 2^32 - 1]`
/// fails with [`crate::Error::InvalidRange`].
pub fn compress_with_stats<I>(
    input: I,
    options: &CompressOptions,
) -> Result<(Vec<u8>, CompressionStats)>
where
    I: IntoIterator,
    I::Item: Into<Element>,
{
    let mut writer = BitWriter::new(options.max_size);
    let mut stats = CompressionStats::default();
    let mut runs = 0;

    {
        let counted = normalize(input).inspect(|run| {
            if run.is_ok() {
                runs += 1;
            }
        });
        for codeword in RunEncoder::new(FlatLengths::new(counted)) {
            writer.write_gamma(codeword?)?;
            stats.codewords += 1;
        }
    }

    stats.runs = runs;
    stats.bits = writer.bit_len();
    let bytes = writer.finish();
    stats.bytes = bytes.len();

    tracing::debug!(
        runs = stats.runs,
        codewords = stats.codewords,
        bits = stats.bits,
        bytes = stats.bytes,
        "compressed range set"
    );

    Ok((bytes, stats))
}
