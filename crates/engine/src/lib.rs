//! # realdata-engine
//!
//! The narrow set of bitmap operations the real-data benchmarks need from a compressed set
//! engine, plus the engines that provide them.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

use rayon::prelude::*;

mod roaring;

mod reference;
pub use reference::ReferenceBitmap;

/// A set of `u32` members as seen by the benchmark harness.
///
/// Implementors only need to provide construction, insertion, compaction, cardinality and a
/// pairwise in-place union. Both multi-way unions have default implementations built on
/// [`Bitmap::union_with`] which engines with dedicated kernels are expected to override.
pub trait Bitmap: Sized + Send + Sync {
    /// Creates an empty bitmap.
    fn new() -> Self;

    /// Adds `value`. Adding an existing member is a no-op.
    fn insert(&mut self, value: u32);

    /// Compacts the internal representation, e.g. by switching to run containers.
    ///
    /// Membership is never changed. Returns `true` if the representation changed.
    fn optimize(&mut self) -> bool;

    /// Number of distinct members.
    fn cardinality(&self) -> u64;

    /// Members in ascending order.
    fn to_vec(&self) -> Vec<u32>;

    /// Adds every member of `other` to `self`.
    fn union_with(&mut self, other: &Self);

    /// Unions all `bitmaps`, splitting the work across the rayon worker pool.
    ///
    /// The result does not depend on the number of workers or on the order of `bitmaps`.
    fn par_union(bitmaps: &[Self]) -> Self {
        bitmaps
            .par_iter()
            .fold(Self::new, |mut acc, bitmap| {
                acc.union_with(bitmap);
                acc
            })
            .reduce(Self::new, |mut lhs, rhs| {
                lhs.union_with(&rhs);
                lhs
            })
    }

    /// Unions all `bitmaps` on the calling thread.
    fn fast_union(bitmaps: &[Self]) -> Self {
        let mut acc = Self::new();
        for bitmap in bitmaps {
            acc.union_with(bitmap);
        }
        acc
    }
}

/// Builds a bitmap from `values`, for tests and fixtures.
pub fn bitmap_of<B: Bitmap>(values: impl IntoIterator<Item = u32>) -> B {
    let mut bitmap = B::new();
    for value in values {
        bitmap.insert(value);
    }
    bitmap
}
