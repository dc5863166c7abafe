// SPDX-License-Identifier: MIT

use parsum::SampleArray;

/// Brute-force reference: widen every value and add with plain `i64`
/// arithmetic, index by index.
#[allow(clippy::needless_range_loop)]
pub fn reference_sum(values: &[i8]) -> i64 {
    let mut total = 0i64;
    for index in 0..values.len() {
        total += values[index] as i64;
    }
    total
}

/// `len` values cycling through `0..10`.
pub fn digit_ramp(len: usize) -> Vec<i8> {
    (0..len).map(|i| (i % 10) as i8).collect()
}

/// Splits `values` into segments of the given lengths, then one final segment
/// with whatever is left.
pub fn segmented(values: &[i8], lengths: &[usize]) -> SampleArray {
    let mut segments = Vec::with_capacity(lengths.len() + 1);
    let mut rest = values;
    for &len in lengths {
        let (head, tail) = rest.split_at(len.min(rest.len()));
        segments.push(head.to_vec().into_boxed_slice());
        rest = tail;
    }
    segments.push(rest.to_vec().into_boxed_slice());
    SampleArray::from_segments(segments)
}
