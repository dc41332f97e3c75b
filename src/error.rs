use thiserror::Error;

/// Errors produced while compressing or decompressing a range set.
#[derive(Debug, Error)]
pub enum Error {
    /// A range is backwards, outside `[0, 2^32 - 1]`, or does not strictly
    /// follow the previous range.
    #[error("invalid range: {start}, {end}")]
    InvalidRange { start: i64, end: i64 },

    /// A codeword value does not fit in 32 bits.
    #[error("{value} exceeds encoding range")]
    EncodingRangeExceeded { value: u64 },

    /// The compressed output would grow past the configured limit.
    #[error("compressed output needs {required} bytes, limit is {max_size}")]
    BufferCapacityExceeded { required: usize, max_size: usize },

    #[error("invalid base64 input")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("cannot parse range from '{text}'")]
    InvalidRangeSyntax { text: String },
}

impl Error {
    pub fn invalid_range(start: i64, end: i64) -> Error {
        Error::InvalidRange { start, end }
    }

    pub fn invalid_syntax(text: impl Into<String>) -> Error {
        Error::InvalidRangeSyntax { text: text.into() }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
