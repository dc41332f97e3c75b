//! Human-readable range syntax: `"5"`, `"3-7"`, and `"a, b-c"` listings.

use crate::element::Element;
use crate::error::{Error, Result};
use std::fmt::Write;

/// Parses `"n"` or `"start-end"`. A trailing comma is ignored.
///
/// Values are parsed as `i64`; range validation is left to the compressor.
pub fn parse_range(text: &str) -> Result<Element> {
    let trimmed = text.trim();
    let trimmed = trimmed.strip_suffix(',').unwrap_or(trimmed).trim();

    let parse = |s: &str| s.trim().parse::<i64>().map_err(|_| Error::invalid_syntax(text));

    // Skip the first character so that "-5" reads as a negative value.
    match trimmed.get(1..).and_then(|rest| rest.find('-')) {
        Some(idx) => {
            let (start, end) = trimmed.split_at(idx + 1);
            Ok(Element::Range(parse(start)?, parse(&end[1..])?))
        }
        None => Ok(Element::Value(parse(trimmed)?)),
    }
}

/// Parses every argument with [`parse_range`].
pub fn parse_ranges<I, S>(args: I) -> Result<Vec<Element>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    args.into_iter().map(|arg| parse_range(arg.as_ref())).collect()
}

/// Accumulates ranges into `"a, b-c, ..."` text.
///
/// [`RangeFormatter::push`] matches the decompression callback signature.
#[derive(Debug, Default, Clone)]
pub struct RangeFormatter {
    out: String,
}

impl RangeFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, start: u32, end: u32) {
        if !self.out.is_empty() {
            self.out.push_str(", ");
        }
        // Writing into a String cannot fail.
        let _ = if start == end {
            write!(self.out, "{start}")
        } else {
            write!(self.out, "{start}-{end}")
        };
    }

    pub fn as_str(&self) -> &str {
        &self.out
    }

    pub fn finish(self) -> String {
        self.out
    }
}

/// Formats `(start, end)` pairs as `"a, b-c, ..."`.
pub fn format_ranges<I>(ranges: I) -> String
where
    I: IntoIterator<Item = (u32, u32)>,
{
    let mut formatter = RangeFormatter::new();
    for (start, end) in ranges {
        formatter.push(start, end);
    }
    formatter.finish()
}
