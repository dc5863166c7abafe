// SPDX-License-Identifier: MIT

//! The sample array: a fixed-length sequence of signed bytes.

use crate::error::{Result, SumError};

/// Fixed-length sequence of `i8` values.
///
/// Storage is a list of contiguous segments in index order. Generation hands
/// each worker its own segment to allocate and fill; arrays built from plain
/// values have a single segment. After construction the array is read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleArray {
    segments: Vec<Box<[i8]>>,
    len: usize,
}

/// Allocates a zero-filled buffer of `len` bytes, reporting failure instead of
/// aborting.
pub(crate) fn try_zeroed(len: usize) -> Result<Vec<i8>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| SumError::Allocation { bytes: len })?;
    buffer.resize(len, 0);
    Ok(buffer)
}

impl SampleArray {
    pub fn from_vec(values: Vec<i8>) -> Self {
        Self::from_segments(vec![values.into_boxed_slice()])
    }

    /// Builds an array from segments laid end to end. Empty segments are
    /// discarded.
    pub fn from_segments(segments: Vec<Box<[i8]>>) -> Self {
        let segments: Vec<_> =
            segments.into_iter().filter(|s| !s.is_empty()).collect();
        let len = segments.iter().map(|s| s.len()).sum();
        SampleArray { segments, len }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn segments(&self) -> &[Box<[i8]>] {
        &self.segments
    }

    /// Every value, in index order.
    pub fn iter(&self) -> impl Iterator<Item = i8> + '_ {
        self.segments.iter().flat_map(|s| s.iter().copied())
    }

    /// The pieces of the segments that together cover `[start, end)`, in
    /// index order.
    ///
    /// # Panics
    /// If `start > end` or `end > self.len()`.
    pub fn slices(
        &self,
        start: usize,
        end: usize,
    ) -> impl Iterator<Item = &[i8]> + '_ {
        assert!(
            start <= end && end <= self.len,
            "range {start}..{end} out of bounds for array of length {}",
            self.len
        );

        let mut offset = 0usize;
        self.segments.iter().filter_map(move |segment| {
            let seg_start = offset;
            let seg_end = offset + segment.len();
            offset = seg_end;

            let lo = start.max(seg_start);
            let hi = end.min(seg_end);
            if lo < hi {
                Some(&segment[lo - seg_start..hi - seg_start])
            } else {
                None
            }
        })
    }
}
