//! Run-merging automata shared by the compressor and decompressor.
//!
//! The encoder turns the flat `gap, len, gap, len, ...` sequence into a
//! series of positive integers. A codeword `d` stands for `d - 1` positions
//! carrying the current symbol followed by one position carrying the other
//! symbol. A codeword of `1` is that single boundary position alone and
//! flips which symbol is current, so isolated one-wide runs and gaps cost a
//! single bit each.

use crate::error::Result;

/// State of the encoding automaton.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EncoderState {
    /// Nothing pulled from the flat sequence yet.
    Idle,
    /// Next codeword covers everything that remains of the active length.
    Synchronized,
    /// Next codeword is a single unit step.
    Unsynchronized,
    Finished,
}

/// Encoding automaton: yields one codeword per step.
pub struct RunEncoder<I> {
    flat: I,
    state: EncoderState,
    /// Unconsumed part of the active flat length.
    remaining: u64,
}

impl<I> RunEncoder<I>
where
    I: Iterator<Item = Result<u64>>,
{
    pub fn new(flat: I) -> Self {
        Self {
            flat,
            state: EncoderState::Idle,
            remaining: 0,
        }
    }

    pub fn state(&self) -> EncoderState {
        self.state
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Pulls the next non-zero length. `Ok(None)` ends the stream.
    fn refill(&mut self) -> Result<Option<u64>> {
        match self.flat.next() {
            Some(Ok(0)) | None => Ok(None),
            Some(Ok(len)) => Ok(Some(len)),
            Some(Err(e)) => Err(e),
        }
    }

    fn step(&mut self) -> Result<Option<u64>> {
        match self.state {
            EncoderState::Finished => return Ok(None),
            EncoderState::Idle => {
                let Some(first) = self.flat.next().transpose()? else {
                    return Ok(None);
                };
                self.remaining = first;
                self.state = if first != 0 {
                    EncoderState::Synchronized
                } else {
                    EncoderState::Unsynchronized
                };
            }
            EncoderState::Synchronized | EncoderState::Unsynchronized => {}
        }

        if self.remaining == 0 {
            match self.refill()? {
                Some(len) => self.remaining = len,
                None => return Ok(None),
            }
        }

        let codeword = match self.state {
            EncoderState::Synchronized => {
                let codeword = self.remaining + 1;
                match self.refill()? {
                    Some(len) => self.remaining = len,
                    None => {
                        self.state = EncoderState::Finished;
                        self.remaining = 0;
                        return Ok(Some(codeword));
                    }
                }
                codeword
            }
            _ => 1,
        };

        self.remaining -= 1;
        let drained = self.remaining == 0;
        self.state = match (self.state, drained) {
            (EncoderState::Synchronized, true) | (EncoderState::Unsynchronized, false) => {
                EncoderState::Synchronized
            }
            _ => EncoderState::Unsynchronized,
        };

        Ok(Some(codeword))
    }
}

impl<I> Iterator for RunEncoder<I>
where
    I: Iterator<Item = Result<u64>>,
{
    type Item = Result<u64>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.step() {
            Ok(Some(codeword)) => Some(Ok(codeword)),
            Ok(None) => {
                self.state = EncoderState::Finished;
                None
            }
            Err(e) => {
                self.state = EncoderState::Finished;
                Some(Err(e))
            }
        }
    }
}

/// Decoding automaton: tracks the cursor over the integer domain and the
/// currently open run.
#[derive(Debug, Default, Clone)]
pub struct RangeTracker {
    pos: u64,
    /// Whether the `d - 1` leading positions of the next codeword are members.
    inside: bool,
    open: Option<u64>,
}

impl RangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next position to be assigned.
    pub fn position(&self) -> u64 {
        self.pos
    }

    pub fn is_inside(&self) -> bool {
        self.inside
    }

    /// Start of the run being built, if any.
    pub fn open_start(&self) -> Option<u64> {
        self.open
    }

    /// Applies `symbol` to the position at the cursor. Returns a run closed
    /// by a non-member position.
    fn mark(&mut self, symbol: bool) -> Option<(u64, u64)> {
        if symbol {
            self.open.get_or_insert(self.pos);
            None
        } else {
            self.open.take().map(|start| (start, self.pos - 1))
        }
    }

    /// Consumes one codeword (`d >= 1`). At most one run closes per step.
    pub fn step(&mut self, d: u64) -> Option<(u64, u64)> {
        let mut closed = None;
        if d > 1 {
            closed = self.mark(self.inside);
            self.pos += d - 1;
        }
        if let Some(run) = self.mark(!self.inside) {
            closed = Some(run);
        }
        self.pos += 1;
        if d == 1 {
            self.inside = !self.inside;
        }
        closed
    }

    /// Closes the run still open at end of stream.
    pub fn finish(&mut self) -> Option<(u64, u64)> {
        self.open.take().map(|start| (start, self.pos - 1))
    }
}
