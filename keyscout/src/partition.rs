use std::num::NonZeroUsize;
use tracing::debug;

/// Splits `items` into exactly `worker_count` contiguous chunks.
///
/// Chunk size is `max(1, len / worker_count)`; every chunk but the last covers
/// one chunk-size window and the last chunk absorbs the remainder. When there
/// are fewer items than workers, trailing chunks are empty. Concatenating the
/// chunks in order always reconstructs `items` exactly, so chunk assignment is
/// deterministic for a given input.
pub fn partition<T>(items: &[T], worker_count: NonZeroUsize) -> Vec<&[T]> {
    let n = worker_count.get();
    let chunk_size = std::cmp::max(1, items.len() / n);

    let chunks: Vec<&[T]> = (0..n)
        .map(|i| {
            let start = std::cmp::min(i * chunk_size, items.len());
            let end = if i == n - 1 {
                items.len()
            } else {
                std::cmp::min((i + 1) * chunk_size, items.len())
            };
            &items[start..end]
        })
        .collect();

    debug!(
        "Partitioned {} items into {} chunks of base size {}",
        items.len(),
        n,
        chunk_size
    );
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workers(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_partition_size_law() {
        let items: Vec<usize> = (0..10).collect();
        let chunks = partition(&items, workers(4));
        let sizes: Vec<usize> = chunks.iter().map(|c| c.len()).collect();
        assert_eq!(sizes, vec![2, 2, 2, 4]);
    }

    #[test]
    fn test_partition_completeness() {
        let items: Vec<usize> = (0..23).collect();
        for n in 1..=8 {
            let chunks = partition(&items, workers(n));
            assert_eq!(chunks.len(), n);
            let rebuilt: Vec<usize> = chunks.iter().flat_map(|c| c.iter().copied()).collect();
            assert_eq!(rebuilt, items, "worker count {n}");
        }
    }

    #[test]
    fn test_partition_even_split() {
        let items: Vec<usize> = (0..8).collect();
        let chunks = partition(&items, workers(4));
        assert!(chunks.iter().all(|c| c.len() == 2));
    }

    #[test]
    fn test_more_workers_than_items() {
        let items: Vec<usize> = (0..3).collect();
        let chunks = partition(&items, workers(5));
        let sizes: Vec<usize> = chunks.iter().map(|c| c.len()).collect();
        assert_eq!(sizes, vec![1, 1, 1, 0, 0]);
    }

    #[test]
    fn test_empty_input_yields_empty_chunks() {
        let items: Vec<usize> = Vec::new();
        let chunks = partition(&items, workers(4));
        assert_eq!(chunks.len(), 4);
        assert!(chunks.iter().all(|c| c.is_empty()));
    }

    #[test]
    fn test_single_worker_gets_everything() {
        let items: Vec<usize> = (0..7).collect();
        let chunks = partition(&items, workers(1));
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], items.as_slice());
    }
}
