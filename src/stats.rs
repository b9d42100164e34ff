//! Simulation statistics

use crate::error::SimulatorError;
use crate::error::SimulatorResult;

/// Aggregate statistics for one simulation run.
/// Mutated only by the driver; counters never decrease.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimStats {
    pub total_accesses: u64,
    pub hits: u64,
    pub misses: u64,
    /// Dirty evictions, each writing a full block back to memory
    pub writebacks: u64,
    /// Bytes moved from memory into the cache (block fills on misses)
    pub bytes_to_cache: u64,
    /// Bytes moved from the cache to memory (write-backs and
    /// write-through stores)
    pub bytes_to_memory: u64,
}

impl SimStats {
    pub fn record_hit(&mut self) {
        self.total_accesses += 1;
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.total_accesses += 1;
        self.misses += 1;
    }

    /// Hit rate, or `None` before any access ran
    pub fn hit_rate(&self) -> Option<f64> {
        if self.total_accesses == 0 {
            None
        } else {
            Some(self.hits as f64 / self.total_accesses as f64)
        }
    }

    /// Miss rate, or `None` before any access ran
    pub fn miss_rate(&self) -> Option<f64> {
        self.hit_rate().map(|rate| 1.0 - rate)
    }

    /// Check the counter invariant; a mismatch is an internal defect
    pub fn verify(&self) -> SimulatorResult<()> {
        if self.hits + self.misses != self.total_accesses {
            return Err(SimulatorError::InvariantViolation(format!(
                "hits ({}) + misses ({}) != total accesses ({})",
                self.hits, self.misses, self.total_accesses
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rates_undefined_when_empty() {
        let stats = SimStats::default();
        assert_eq!(stats.hit_rate(), None);
        assert_eq!(stats.miss_rate(), None);
        assert!(stats.verify().is_ok());
    }

    #[test]
    fn test_rates_sum_to_one() {
        let mut stats = SimStats::default();
        stats.record_hit();
        stats.record_miss();
        stats.record_miss();
        assert!(stats.verify().is_ok());
        assert_eq!(stats.total_accesses, 3);
        let hit_rate = stats.hit_rate().unwrap();
        let miss_rate = stats.miss_rate().unwrap();
        assert!((hit_rate - 1.0 / 3.0).abs() < 1e-12);
        assert!((hit_rate + miss_rate - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_verify_catches_mismatch() {
        let stats = SimStats {
            total_accesses: 2,
            hits: 1,
            misses: 0,
            ..Default::default()
        };
        assert!(stats.verify().is_err());
    }
}
