use crate::Bitmap;
use std::collections::BTreeSet;

/// Uncompressed [`Bitmap`] backed by a [`BTreeSet`].
///
/// Slow, but obviously correct. Used to check the harness without a compressed engine.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReferenceBitmap(BTreeSet<u32>);

impl ReferenceBitmap {
    pub fn contains(&self, value: u32) -> bool {
        self.0.contains(&value)
    }
}

impl Bitmap for ReferenceBitmap {
    fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, value: u32) {
        self.0.insert(value);
    }

    // nothing to compact
    fn optimize(&mut self) -> bool {
        false
    }

    fn cardinality(&self) -> u64 {
        self.0.len() as u64
    }

    fn to_vec(&self) -> Vec<u32> {
        self.0.iter().copied().collect()
    }

    fn union_with(&mut self, other: &Self) {
        self.0.extend(other.0.iter().copied());
    }
}

impl FromIterator<u32> for ReferenceBitmap {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
