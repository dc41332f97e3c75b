use crate::{
    compress, compress_with, decompress, decompress_to_vec, merged_ranges, ranges, to_base64,
    CompressOptions, Error,
};
use proptest::prelude::*;
use std::collections::BTreeSet;

/// Builds ascending, non-adjacent ranges from `(gap, extra_len)` pairs.
///
/// The first gap may be zero; later gaps are bumped by one so that ranges
/// never touch.
fn ranges_from_gaps(parts: &[(u32, u32)]) -> Vec<(u32, u32)> {
    let mut out = Vec::with_capacity(parts.len());
    let mut next = 0u64;
    for (i, &(gap, extra)) in parts.iter().enumerate() {
        let gap = u64::from(gap) + u64::from(i > 0);
        let start = next + gap;
        let end = start + u64::from(extra);
        out.push((start as u32, end as u32));
        next = end + 1;
    }
    out
}

/// Collapses a set of values into maximal inclusive ranges.
fn ranges_of_set(values: &BTreeSet<u32>) -> Vec<(u32, u32)> {
    let mut out: Vec<(u32, u32)> = Vec::new();
    for &v in values {
        match out.last_mut() {
            Some((_, end)) if *end + 1 == v => *end = v,
            _ => out.push((v, v)),
        }
    }
    out
}

fn decode_pairs(bytes: &[u8]) -> Vec<(u32, u32)> {
    ranges(bytes).map(|r| (*r.start(), *r.end())).collect()
}

proptest! {
    /// Property 1: Roundtrip fidelity
    /// Canonical ranges decode to exactly themselves.
    #[test]
    fn prop_roundtrip(parts in prop::collection::vec((0u32..1000, 0u32..100), 0..200)) {
        let input = ranges_from_gaps(&parts);
        let bytes = compress(&input).unwrap();
        prop_assert_eq!(decode_pairs(&bytes), input);
    }

    /// Property 2: Large gaps stay within 32 bits
    #[test]
    fn prop_roundtrip_wide(parts in prop::collection::vec((0u32..(1 << 30), 0u32..1000), 1..4)) {
        let input = ranges_from_gaps(&parts);
        let bytes = compress(&input).unwrap();
        prop_assert_eq!(decode_pairs(&bytes), input);
    }

    /// Property 3: Merging law
    /// Any set of values decodes to its maximal runs.
    #[test]
    fn prop_value_set(values in prop::collection::btree_set(0u32..5000, 0..500)) {
        let bytes = compress(values.iter().copied()).unwrap();
        prop_assert_eq!(decode_pairs(&bytes), ranges_of_set(&values));
    }

    /// Property 4: Splitting a range into adjacent pieces changes nothing
    #[test]
    fn prop_split_equivalence(
        parts in prop::collection::vec((0u32..50, 0u32..50), 1..50),
        cut in 1u32..8,
    ) {
        let whole = ranges_from_gaps(&parts);
        let mut pieces = Vec::new();
        for &(start, end) in &whole {
            let mut s = start;
            while s <= end {
                let e = end.min(s + cut - 1);
                pieces.push((s, e));
                s = e + 1;
            }
        }
        prop_assert_eq!(compress(&pieces).unwrap(), compress(&whole).unwrap());
    }

    /// Property 5: Bytes and base64 text decode identically
    #[test]
    fn prop_base64_equivalence(parts in prop::collection::vec((0u32..300, 0u32..30), 0..100)) {
        let bytes = compress(&ranges_from_gaps(&parts)).unwrap();
        let text = to_base64(&bytes);
        prop_assert_eq!(decompress_to_vec(&bytes).unwrap(), decompress_to_vec(&text).unwrap());
    }

    /// Property 6: Output never exceeds the configured limit
    #[test]
    fn prop_max_size(
        parts in prop::collection::vec((0u32..100, 0u32..10), 0..100),
        max_size in 0usize..64,
    ) {
        let input = ranges_from_gaps(&parts);
        let options = CompressOptions::new().with_max_size(max_size);
        match compress_with(&input, &options) {
            Ok(bytes) => {
                prop_assert!(bytes.len() <= max_size);
            }
            Err(Error::BufferCapacityExceeded { max_size: reported, .. }) => {
                prop_assert_eq!(reported, max_size);
            }
            Err(e) => {
                prop_assert!(false, "unexpected error {}", e);
            }
        }
    }

    /// Property 7: Callbacks arrive ascending and never touch
    #[test]
    fn prop_callbacks_ascending(values in prop::collection::btree_set(0u32..2000, 0..300)) {
        let bytes = compress(values.iter().copied()).unwrap();
        let mut previous: Option<u32> = None;
        let mut ok = true;
        decompress(&bytes, |start, end| {
            ok &= start <= end;
            if let Some(prev_end) = previous {
                ok &= start > prev_end + 1;
            }
            previous = Some(end);
        })
        .unwrap();
        prop_assert!(ok);
    }
}

/// Bolero fuzz test: Decoding arbitrary bytes never panics
#[cfg(test)]
#[test]
fn fuzz_decode_no_panic() {
    bolero::check!().with_type::<Vec<u8>>().for_each(|input| {
        let decoded = decode_pairs(input);

        for window in decoded.windows(2) {
            assert!(u64::from(window[0].1) + 1 < u64::from(window[1].0));
        }
        for &(start, end) in &decoded {
            assert!(start <= end);
        }

        // Whatever decodes must survive a second trip.
        if let Ok(bytes) = compress(&decoded) {
            assert_eq!(decode_pairs(&bytes), decoded);
        }
    });
}

/// Bolero fuzz test: Compression either round trips or rejects
#[cfg(test)]
#[test]
fn fuzz_compress_matches_normalizer() {
    bolero::check!()
        .with_type::<Vec<(u32, u32)>>()
        .for_each(|input| {
            let merged = merged_ranges(input);
            match compress(input) {
                Ok(bytes) => {
                    let expected = merged.expect("normalizer rejected accepted input");
                    assert_eq!(decompress_to_vec(&bytes).unwrap(), expected);
                }
                Err(Error::InvalidRange { .. }) => assert!(merged.is_err()),
                Err(Error::EncodingRangeExceeded { .. }) => assert!(merged.is_ok()),
                Err(e) => panic!("unexpected error {e}"),
            }
        });
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_ranges_from_gaps() {
        assert_eq!(
            ranges_from_gaps(&[(0, 2), (0, 0), (3, 1)]),
            vec![(0, 2), (4, 4), (9, 10)]
        );
    }

    #[test]
    fn test_ranges_of_set() {
        let values: BTreeSet<u32> = [1, 2, 3, 7, 9, 10].into_iter().collect();
        assert_eq!(ranges_of_set(&values), vec![(1, 3), (7, 7), (9, 10)]);
    }
}
