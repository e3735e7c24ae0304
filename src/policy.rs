//! Rehash policy: when the bucket index grows and to what size.

use crate::error::PolicyError;

/// Element-to-bucket ratio at which an insertion triggers a rehash.
pub const MAX_LOAD_FACTOR: usize = 2;

/// Multiplier applied to the element count to size the rebuilt index.
pub const GROWTH_FACTOR: usize = 2;

/// Growth parameters for a [`ChainedHashMap`](crate::ChainedHashMap).
///
/// After every insertion that adds a record, the map checks
/// `len >= bucket_count * max_load_factor`; when true the bucket index is
/// rebuilt with `len * growth_factor` buckets. The check runs after the
/// record is linked, so the map can momentarily sit one element above the
/// threshold before the rebuild.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct RehashPolicy {
    max_load_factor: usize,
    growth_factor: usize,
}

impl RehashPolicy {
    pub fn new(max_load_factor: usize, growth_factor: usize) -> Result<Self, PolicyError> {
        if max_load_factor == 0 {
            return Err(PolicyError::ZeroFactor {
                name: "max_load_factor",
            });
        }
        if growth_factor == 0 {
            return Err(PolicyError::ZeroFactor {
                name: "growth_factor",
            });
        }
        // Rebuilt size is len * growth >= buckets * max_load * growth.
        if max_load_factor.saturating_mul(growth_factor) < 2 {
            return Err(PolicyError::NoGrowth {
                max_load_factor,
                growth_factor,
            });
        }
        Ok(Self {
            max_load_factor,
            growth_factor,
        })
    }

    pub fn max_load_factor(&self) -> usize {
        self.max_load_factor
    }

    pub fn growth_factor(&self) -> usize {
        self.growth_factor
    }

    #[inline]
    pub(crate) fn needs_rehash(&self, len: usize, bucket_count: usize) -> bool {
        len >= bucket_count.saturating_mul(self.max_load_factor)
    }

    pub(crate) fn grown_bucket_count(&self, len: usize) -> usize {
        len.saturating_mul(self.growth_factor).max(1)
    }

    /// Smallest bucket count at which `len` elements stay below the
    /// rehash threshold.
    pub(crate) fn buckets_for(&self, len: usize) -> usize {
        (len / self.max_load_factor + 1).max(1)
    }
}

impl Default for RehashPolicy {
    fn default() -> Self {
        Self {
            max_load_factor: MAX_LOAD_FACTOR,
            growth_factor: GROWTH_FACTOR,
        }
    }
}
