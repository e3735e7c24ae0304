//! Error types.

use thiserror::Error;

/// Returned by [`ChainedHashMap::at`](crate::ChainedHashMap::at) when the
/// key is absent. A fresh value is built for every failed lookup.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
#[error("key not found (probed bucket {bucket} of {bucket_count})")]
pub struct KeyNotFound {
    bucket: usize,
    bucket_count: usize,
}

impl KeyNotFound {
    pub(crate) fn new(bucket: usize, bucket_count: usize) -> Self {
        Self {
            bucket,
            bucket_count,
        }
    }

    /// Bucket row that was scanned for the key.
    pub fn bucket(&self) -> usize {
        self.bucket
    }

    /// Bucket count of the map at the time of the lookup.
    pub fn bucket_count(&self) -> usize {
        self.bucket_count
    }
}

/// Rejected [`RehashPolicy`](crate::RehashPolicy) parameters.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum PolicyError {
    #[error("{name} must be at least 1")]
    ZeroFactor { name: &'static str },
    #[error(
        "max_load_factor ({max_load_factor}) * growth_factor ({growth_factor}) must be at least 2"
    )]
    NoGrowth {
        max_load_factor: usize,
        growth_factor: usize,
    },
}
