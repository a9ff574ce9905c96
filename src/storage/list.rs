// In: src/storage/list.rs

//! The list-only storage backend.
//!
//! No persistent flag storage at all: each growth pass sieves into a
//! transient scratch bitmap covering just the new segment, released again on
//! commit. Membership probes above the bound are answered by trial division
//! against the cached primes, valid whenever those primes cover the probe's
//! integer square root.

use bitvec::prelude::*;

use crate::error::SieveError;
use crate::kernels::math::isqrt;
use crate::storage::SieveStorage;

const WORD_BITS: usize = u64::BITS as usize;

//==================================================================================
// 1. The Backend
//==================================================================================

/// Scratch composite flags for the active segment `(old_bound, new_bound]`
/// only; empty between growth passes.
pub(crate) struct ListProbeStore {
    scratch: BitVec<u64, Lsb0>,
    segment_start: u64,
}

impl ListProbeStore {
    pub(crate) fn new() -> Self {
        Self {
            scratch: BitVec::new(),
            segment_start: 0,
        }
    }
}

impl SieveStorage for ListProbeStore {
    fn begin_extend(&mut self, old_bound: u64, new_bound: u64) -> Result<(), SieveError> {
        let seg_len = usize::try_from(new_bound - old_bound).map_err(|_| {
            SieveError::AllocationFailure {
                requested_bound: new_bound,
            }
        })?;
        let needed_words = seg_len.div_ceil(WORD_BITS);
        let mut words: Vec<u64> = Vec::new();
        if words.try_reserve_exact(needed_words).is_err() {
            return Err(SieveError::AllocationFailure {
                requested_bound: new_bound,
            });
        }
        words.resize(needed_words, 0); // within reserved capacity
        let mut scratch = BitVec::from_vec(words);
        scratch.truncate(seg_len);
        self.scratch = scratch;
        self.segment_start = old_bound + 1;
        Ok(())
    }

    fn mark_composite(&mut self, n: u64) {
        let idx = (n - self.segment_start) as usize;
        self.scratch.set(idx, true);
    }

    fn is_prime_candidate(&self, n: u64) -> bool {
        let idx = (n - self.segment_start) as usize;
        !self.scratch[idx]
    }

    fn finish_extend(&mut self) {
        self.scratch = BitVec::new();
    }

    fn probe_is_prime(&self, n: u64, bound: u64, primes: &[u64]) -> Option<bool> {
        debug_assert!(n >= 2, "probes below 2 are resolved by the query layer");
        let root = isqrt(n);
        if root > bound {
            return None;
        }
        for &p in primes {
            if p > root {
                break;
            }
            if n % p == 0 {
                return Some(false);
            }
        }
        Some(true)
    }
}

//==================================================================================
// 2. Unit Tests
//==================================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extend_uses_transient_scratch() {
        let mut store = ListProbeStore::new();
        store.begin_extend(10, 20).unwrap();
        for n in 11..=20u64 {
            assert!(store.is_prime_candidate(n));
        }
        // Mark multiples of 2 and 3 inside the segment.
        for m in [12u64, 14, 16, 18, 20, 15] {
            store.mark_composite(m);
        }
        let survivors: Vec<u64> = (11..=20).filter(|&n| store.is_prime_candidate(n)).collect();
        assert_eq!(survivors, vec![11, 13, 17, 19]);
        store.finish_extend();
        assert!(store.scratch.is_empty());
    }

    #[test]
    fn test_probe_by_trial_division() {
        let store = ListProbeStore::new();
        let primes: [u64; 4] = [2, 3, 5, 7];
        // Cached primes reach 10, so probes up to 10^2-ish are answerable.
        assert_eq!(store.probe_is_prime(97, 10, &primes), Some(true));
        assert_eq!(store.probe_is_prime(91, 10, &primes), Some(false)); // 7 * 13
        assert_eq!(store.probe_is_prime(100, 10, &primes), Some(false));
        // isqrt(10403) = 101 > 10: the cached primes cannot rule out all factors.
        assert_eq!(store.probe_is_prime(10_403, 10, &primes), None);
    }

    #[test]
    fn test_probe_at_coverage_edge() {
        let store = ListProbeStore::new();
        let primes: [u64; 4] = [2, 3, 5, 7];
        // isqrt(121) = 11 > 10 even though 121 = 11^2 has no factor <= 10.
        assert_eq!(store.probe_is_prime(121, 10, &primes), None);
        // isqrt(120) = 10 <= 10, answerable.
        assert_eq!(store.probe_is_prime(120, 10, &primes), Some(false));
    }
}
