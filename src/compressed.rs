use crate::error::Result;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use std::borrow::Cow;

/// Standard alphabet; decoding accepts input with or without padding.
const BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Compressed data in either of its two interchangeable forms.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Compressed<'a> {
    Bytes(&'a [u8]),
    Base64(&'a str),
}

impl<'a> Compressed<'a> {
    /// Returns the raw bytes, decoding base64 text if needed.
    pub fn to_bytes(&self) -> Result<Cow<'a, [u8]>> {
        match *self {
            Compressed::Bytes(bytes) => Ok(Cow::Borrowed(bytes)),
            Compressed::Base64(text) => Ok(Cow::Owned(BASE64.decode(text.trim())?)),
        }
    }
}

impl<'a> From<&'a [u8]> for Compressed<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Compressed::Bytes(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Compressed<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Compressed::Bytes(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for Compressed<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        Compressed::Bytes(bytes)
    }
}

impl<'a> From<&'a str> for Compressed<'a> {
    fn from(text: &'a str) -> Self {
        Compressed::Base64(text)
    }
}

impl<'a> From<&'a String> for Compressed<'a> {
    fn from(text: &'a String) -> Self {
        Compressed::Base64(text)
    }
}

/// Encodes compressed bytes as padded standard base64.
pub fn to_base64(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}
