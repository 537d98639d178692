//! Random destination sampling
//!
//! Backs the "featured destinations" behavior: a bounded, uniform subset of
//! the store without replacement. Order among the chosen records is whatever
//! the RNG produces; only the size invariant is guaranteed.

use crate::dataset::DestinationRecord;
use rand::seq::SliceRandom;

/// Uniform sampler over the record collection
pub struct Sampler;

impl Sampler {
    /// Pick up to `n` distinct records; always returns
    /// `min(n, records.len())` entries
    pub fn sample(records: &[DestinationRecord], n: usize) -> Vec<DestinationRecord> {
        records
            .choose_multiple(&mut rand::thread_rng(), n)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::store::tests::fixture_store;

    #[test]
    fn test_sample_size_invariant() {
        let store = fixture_store();
        for n in 0..=5 {
            let picked = Sampler::sample(store.records(), n);
            assert_eq!(picked.len(), n.min(store.len()));
        }
    }

    #[test]
    fn test_sample_has_no_duplicates() {
        let store = fixture_store();
        for _ in 0..50 {
            let picked = Sampler::sample(store.records(), 3);
            let mut names: Vec<&str> = picked.iter().map(|r| r.name.as_str()).collect();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), picked.len());
        }
    }

    #[test]
    fn test_sample_zero() {
        let store = fixture_store();
        assert!(Sampler::sample(store.records(), 0).is_empty());
    }
}
