use crate::Bitmap;
use rayon::prelude::*;

impl Bitmap for croaring::Bitmap {
    fn new() -> Self {
        Self::new()
    }

    fn insert(&mut self, value: u32) {
        self.add(value);
    }

    fn optimize(&mut self) -> bool {
        self.run_optimize()
    }

    fn cardinality(&self) -> u64 {
        Self::cardinality(self)
    }

    fn to_vec(&self) -> Vec<u32> {
        Self::to_vec(self)
    }

    fn union_with(&mut self, other: &Self) {
        self.or_inplace(other);
    }

    /// Splits the inputs into one chunk per worker and merges each chunk with the many-input
    /// kernel before merging the partial results.
    fn par_union(bitmaps: &[Self]) -> Self {
        if bitmaps.is_empty() {
            return Self::new();
        }
        let chunk_size = bitmaps.len().div_ceil(rayon::current_num_threads()).max(1);
        let partials: Vec<Self> = bitmaps
            .par_chunks(chunk_size)
            .map(|chunk| Self::fast_or(&chunk.iter().collect::<Vec<_>>()))
            .collect();
        Self::fast_or(&partials.iter().collect::<Vec<_>>())
    }

    fn fast_union(bitmaps: &[Self]) -> Self {
        Self::fast_or(&bitmaps.iter().collect::<Vec<_>>())
    }
}
