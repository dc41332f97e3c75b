use std::ops::RangeInclusive;

/// Largest value that can be part of a compressed set.
pub const MAX_VALUE: i64 = u32::MAX as i64;

/// One item of compressor input: a bare value or an inclusive range.
///
/// Endpoints are kept as `i64` so that negative or oversized input can be
/// represented and rejected by validation rather than silently wrapped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Element {
    Value(i64),
    Range(i64, i64),
}

impl Element {
    /// Returns the inclusive `(start, end)` pair. A bare value is `[n, n]`.
    pub fn bounds(&self) -> (i64, i64) {
        match *self {
            Element::Value(n) => (n, n),
            Element::Range(start, end) => (start, end),
        }
    }

    /// True when the element is forwards and inside `[0, 2^32 - 1]`.
    pub fn is_valid(&self) -> bool {
        let (start, end) = self.bounds();
        start <= end && start >= 0 && end <= MAX_VALUE
    }
}

macro_rules! impl_element_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Element {
                fn from(n: $t) -> Self {
                    Element::Value(n as i64)
                }
            }

            impl From<($t, $t)> for Element {
                fn from((start, end): ($t, $t)) -> Self {
                    Element::Range(start as i64, end as i64)
                }
            }

            impl From<[$t; 2]> for Element {
                fn from([start, end]: [$t; 2]) -> Self {
                    Element::Range(start as i64, end as i64)
                }
            }

            impl From<RangeInclusive<$t>> for Element {
                fn from(range: RangeInclusive<$t>) -> Self {
                    Element::Range(*range.start() as i64, *range.end() as i64)
                }
            }

            impl From<&$t> for Element {
                fn from(n: &$t) -> Self {
                    Element::Value(*n as i64)
                }
            }

            impl From<&($t, $t)> for Element {
                fn from(&(start, end): &($t, $t)) -> Self {
                    Element::Range(start as i64, end as i64)
                }
            }

            impl From<&[$t; 2]> for Element {
                fn from(&[start, end]: &[$t; 2]) -> Self {
                    Element::Range(start as i64, end as i64)
                }
            }
        )*
    };
}

impl_element_from!(i32, u32, i64);

impl From<&Element> for Element {
    fn from(element: &Element) -> Self {
        *element
    }
}
