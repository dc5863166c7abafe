// SPDX-License-Identifier: MIT

use std::num::NonZeroUsize;

/// What to do with the `total_items % num_chunks` items that do not divide
/// evenly among the chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Remainder {
    /// Every chunk gets `total_items / num_chunks` items and the trailing
    /// remainder is left out of every chunk.
    Drop,
    /// The remainder is handed out one item each to the first chunks, so the
    /// chunks cover the whole range.
    #[default]
    Spread,
}

impl Remainder {
    /// Number of trailing items no chunk covers under this policy.
    pub fn dropped(
        self,
        total_items: usize,
        num_chunks: NonZeroUsize,
    ) -> usize {
        match self {
            Remainder::Drop => total_items % num_chunks.get(),
            Remainder::Spread => 0,
        }
    }
}

/// Splits `[0, total_items)` into exactly `num_chunks` contiguous
/// `(start, end)` ranges, in index order. Chunks may be empty when there are
/// fewer items than chunks.
#[derive(Debug, Clone)]
pub struct ChunkSplitter {
    /// Number of chunks still to be produced.
    chunks_left: usize,
    /// The current position in the range of items.
    current_position: usize,
    /// The index of the current chunk being produced.
    current_chunk_index: usize,
    /// The base size of each chunk (without considering extra items).
    base_chunk_size: usize,
    /// The number of extra items to distribute across the first few chunks.
    extra_items: usize,
}

impl ChunkSplitter {
    /// Creates a new `ChunkSplitter` dividing `total_items` into `num_chunks`
    /// under the given remainder policy.
    pub fn new(
        total_items: usize,
        num_chunks: NonZeroUsize,
        remainder: Remainder,
    ) -> Self {
        let num_chunks = num_chunks.get();
        ChunkSplitter {
            chunks_left: num_chunks,
            current_position: 0,
            current_chunk_index: 0,
            base_chunk_size: total_items / num_chunks,
            extra_items: match remainder {
                Remainder::Drop => 0,
                Remainder::Spread => total_items % num_chunks,
            },
        }
    }
}

impl Iterator for ChunkSplitter {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.chunks_left == 0 {
            return None;
        }

        let start = self.current_position;
        let end = start
            + self.base_chunk_size
            + (self.current_chunk_index < self.extra_items) as usize;

        self.chunks_left -= 1;
        self.current_chunk_index += 1;
        self.current_position = end;

        Some((start, end))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.chunks_left, Some(self.chunks_left))
    }
}

impl ExactSizeIterator for ChunkSplitter {}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunks(
        total: usize,
        n: usize,
        remainder: Remainder,
    ) -> Vec<(usize, usize)> {
        ChunkSplitter::new(total, NonZeroUsize::new(n).unwrap(), remainder)
            .collect()
    }

    #[test]
    fn test_even_split_is_policy_independent() {
        let expected = vec![(0, 4), (4, 8), (8, 12)];
        assert_eq!(chunks(12, 3, Remainder::Drop), expected);
        assert_eq!(chunks(12, 3, Remainder::Spread), expected);
    }

    #[test]
    fn test_drop_leaves_tail_uncovered() {
        let split = chunks(10, 4, Remainder::Drop);
        assert_eq!(split, vec![(0, 2), (2, 4), (4, 6), (6, 8)]);
        assert_eq!(
            Remainder::Drop.dropped(10, NonZeroUsize::new(4).unwrap()),
            2
        );
    }

    #[test]
    fn test_spread_covers_whole_range() {
        let split = chunks(10, 4, Remainder::Spread);
        assert_eq!(split, vec![(0, 3), (3, 6), (6, 8), (8, 10)]);
        assert_eq!(
            Remainder::Spread.dropped(10, NonZeroUsize::new(4).unwrap()),
            0
        );
    }

    #[test]
    fn test_fewer_items_than_chunks() {
        assert_eq!(
            chunks(2, 4, Remainder::Spread),
            vec![(0, 1), (1, 2), (2, 2), (2, 2)]
        );
        assert_eq!(
            chunks(2, 4, Remainder::Drop),
            vec![(0, 0), (0, 0), (0, 0), (0, 0)]
        );
    }

    #[test]
    fn test_empty_range_still_yields_every_chunk() {
        let split = ChunkSplitter::new(
            0,
            NonZeroUsize::new(3).unwrap(),
            Remainder::Spread,
        );
        assert_eq!(split.len(), 3);
        assert!(split.into_iter().all(|(start, end)| start == 0 && end == 0));
    }
}
