use crate::element::{Element, MAX_VALUE};
use crate::error::{Error, Result};
use std::ops::RangeInclusive;

/// A closed run of set members together with the gap that precedes it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Run {
    /// Number of non-members between the previous run (or 0) and `start`.
    pub gap: u64,
    pub start: u32,
    pub end: u32,
}

impl Run {
    /// Number of members in the run. Always at least 1.
    pub fn len(&self) -> u64 {
        u64::from(self.end) - u64::from(self.start) + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn range(&self) -> RangeInclusive<u32> {
        self.start..=self.end
    }
}

/// Validates and merges input elements into canonical runs.
///
/// Consumes its input once, front to back, holding at most one open run.
/// Adjacent elements are merged; overlapping, duplicate, backwards or
/// out-of-order elements produce [`Error::InvalidRange`], after which the
/// iterator is exhausted.
pub struct Normalizer<I> {
    elements: I,
    /// Run currently being extended, not yet emitted.
    open: Option<(i64, i64)>,
    /// End of the last emitted run; -1 before the first one.
    last_end: i64,
    done: bool,
}

impl<I> Normalizer<I> {
    pub fn new(elements: I) -> Self {
        Self {
            elements,
            open: None,
            last_end: -1,
            done: false,
        }
    }

    fn close(&mut self, start: i64, end: i64) -> Run {
        let gap = (start - self.last_end - 1) as u64;
        self.last_end = end;
        Run {
            gap,
            start: start as u32,
            end: end as u32,
        }
    }

    fn fail(&mut self, start: i64, end: i64) -> Error {
        tracing::debug!(start, end, "rejecting input range");
        self.done = true;
        self.open = None;
        Error::invalid_range(start, end)
    }
}

impl<I> Iterator for Normalizer<I>
where
    I: Iterator,
    I::Item: Into<Element>,
{
    type Item = Result<Run>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let Some(item) = self.elements.next() else {
                // Input exhausted: the open run is final.
                self.done = true;
                let (start, end) = self.open.take()?;
                return Some(Ok(self.close(start, end)));
            };

            let element: Element = item.into();
            let (start, end) = element.bounds();
            if start > end || start < 0 || end > MAX_VALUE {
                return Some(Err(self.fail(start, end)));
            }

            let Some((open_start, open_end)) = self.open else {
                self.open = Some((start, end));
                continue;
            };

            if start - 1 < open_end {
                return Some(Err(self.fail(start, end)));
            }

            if start - 1 == open_end {
                self.open = Some((open_start, end));
                continue;
            }

            self.open = Some((start, end));
            return Some(Ok(self.close(open_start, open_end)));
        }
    }
}

impl<I> std::iter::FusedIterator for Normalizer<I>
where
    I: Iterator,
    I::Item: Into<Element>,
{
}

/// Flattens runs into the alternating `gap, len, gap, len, ...` sequence.
pub struct FlatLengths<I> {
    runs: I,
    /// Length of the run whose gap was just yielded.
    pending: Option<u64>,
}

impl<I> FlatLengths<I> {
    pub fn new(runs: I) -> Self {
        Self {
            runs,
            pending: None,
        }
    }
}

impl<I> Iterator for FlatLengths<I>
where
    I: Iterator<Item = Result<Run>>,
{
    type Item = Result<u64>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(len) = self.pending.take() {
            return Some(Ok(len));
        }
        match self.runs.next()? {
            Ok(run) => {
                self.pending = Some(run.len());
                Some(Ok(run.gap))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

/// Returns an iterator over the canonical runs of `input`.
pub fn normalize<I>(input: I) -> Normalizer<I::IntoIter>
where
    I: IntoIterator,
    I::Item: Into<Element>,
{
    Normalizer::new(input.into_iter())
}

/// Validates and merges `input`, collecting the canonical ranges.
pub fn merged_ranges<I>(input: I) -> Result<Vec<RangeInclusive<u32>>>
where
    I: IntoIterator,
    I::Item: Into<Element>,
{
    normalize(input).map(|run| run.map(|r| r.range())).collect()
}
