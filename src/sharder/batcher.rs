// batcher.rs - balanced contiguous partitioning

use super::MaxJobs;

/// Splits a sequence into at most `max_batches` contiguous batches whose
/// sizes differ by at most one. Leading batches take the remainder.
pub struct Batcher {
    pub max_batches: MaxJobs,
}

impl Batcher {
    pub fn new(max_batches: MaxJobs) -> Self {
        Self { max_batches }
    }

    /// Number of batches produced for `len` items
    pub fn batch_count(&self, len: usize) -> usize {
        self.max_batches.get().min(len)
    }

    pub fn split<'a, T>(&self, items: &'a [T]) -> Vec<&'a [T]> {
        let count = self.batch_count(items.len());
        if count == 0 {
            return Vec::new();
        }

        let base = items.len() / count;
        let extra = items.len() % count;

        let mut batches = Vec::with_capacity(count);
        let mut start = 0;
        for index in 0..count {
            let len = base + usize::from(index < extra);
            batches.push(&items[start..start + len]);
            start += len;
        }
        batches
    }
}
