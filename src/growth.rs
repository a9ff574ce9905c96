// In: src/growth.rs

//! The growth controller: the incremental sieve-of-Eratosthenes pass that
//! extends the table to a larger bound while reusing all previously computed
//! work.
//!
//! Two growth policies coexist:
//! * `grow_to` targets an exact bound. Used by bound-targeted queries
//!   ("primes below K") so they never overcommit memory.
//! * `grow_amortized` doubles the bound (at minimum). Used by index-targeted
//!   and open-ended queries (nth prime, iteration, next-prime search) so that
//!   total work stays amortized near-linear across repeated growth calls.
//!
//! A growth pass is atomic: all storage is reserved up front, and any
//! allocation failure surfaces with the table exactly as it was.

use crate::error::SieveError;
use crate::kernels::math::{isqrt, smallest_multiple_geq};
use crate::kernels::search::upper_bound;
use crate::table::Table;

impl Table {
    //==============================================================================
    // 1. Growth Policies
    //==============================================================================

    /// Extends the table so that `bound >= requested`. No-op when already
    /// satisfied; never grows past `requested`.
    pub(crate) fn grow_to(&mut self, requested: u64) -> Result<(), SieveError> {
        if requested <= self.bound {
            return Ok(());
        }
        self.extend_segment(requested)
    }

    /// Extends the table to at least `at_least`, doubling the current bound
    /// (with a configured floor) to keep repeated growth amortized.
    pub(crate) fn grow_amortized(&mut self, at_least: u64) -> Result<(), SieveError> {
        let doubled = self.bound.saturating_mul(2);
        let target = at_least.max(doubled).max(self.min_growth_bound);
        self.grow_to(target)
    }

    /// Grows (amortized) until at least `count` primes are known.
    pub(crate) fn ensure_count(&mut self, count: usize) -> Result<(), SieveError> {
        while self.primes.len() < count {
            if self.bound == u64::MAX {
                return Err(SieveError::BoundOverflow);
            }
            self.grow_amortized(self.bound.saturating_add(1))?;
        }
        Ok(())
    }

    /// Grows (amortized) until the prime list holds an entry strictly greater
    /// than `x`, and returns it.
    pub(crate) fn ensure_prime_above(&mut self, x: u64) -> Result<u64, SieveError> {
        loop {
            if let Some(&p) = self.primes.get(upper_bound(&self.primes, &x)) {
                return Ok(p);
            }
            if self.bound == u64::MAX {
                return Err(SieveError::BoundOverflow);
            }
            let at_least = x.checked_add(1).ok_or(SieveError::BoundOverflow)?;
            self.grow_amortized(at_least)?;
        }
    }

    //==============================================================================
    // 2. The Incremental Eratosthenes Pass
    //==============================================================================

    /// Sieves the segment `(old_bound, new_bound]` and commits it.
    ///
    /// Already-known primes up to `isqrt(new_bound)` strike their multiples
    /// inside the segment first; the ascending scan then appends every
    /// surviving value, and any fresh prime that still lies at or below
    /// `isqrt(new_bound)` immediately strikes the remainder of the same
    /// segment starting at its square.
    fn extend_segment(&mut self, new_bound: u64) -> Result<(), SieveError> {
        let old_bound = self.bound;

        // Reserve everything fallible before mutating anything.
        let estimate = estimate_segment_primes(old_bound, new_bound);
        self.primes
            .try_reserve(estimate)
            .map_err(|_| SieveError::AllocationFailure {
                requested_bound: new_bound,
            })?;
        self.store.begin_extend(old_bound, new_bound)?;

        let limit = isqrt(new_bound);
        let segment_lo = old_bound + 1; // old_bound >= 1, so segment_lo >= 2

        // Pass 1: strike multiples of the known sqrt frontier.
        let frontier_len = upper_bound(&self.primes, &limit);
        for i in 0..frontier_len {
            let p = self.primes[i];
            let first = smallest_multiple_geq(p, segment_lo).max(p * p);
            for m in (first..=new_bound).step_by(p as usize) {
                self.store.mark_composite(m);
            }
        }

        // Pass 2: scan ascending; fresh primes <= limit sieve the tail.
        let mut found = 0usize;
        for n in segment_lo..=new_bound {
            if self.store.is_prime_candidate(n) {
                self.primes.push(n);
                found += 1;
                if n <= limit {
                    for m in ((n * n)..=new_bound).step_by(n as usize) {
                        self.store.mark_composite(m);
                    }
                }
            }
        }

        self.store.finish_extend();
        self.bound = new_bound;
        log::debug!(
            "sieve segment ({}, {}] committed: {} new primes, {} total",
            old_bound,
            new_bound,
            found,
            self.primes.len()
        );
        Ok(())
    }
}

/// Rough upper estimate of the prime count in `(old_bound, new_bound]`, used
/// to reserve list capacity up front. Overshooting slightly is fine; the
/// reservation only has to make a mid-pass reallocation unlikely.
fn estimate_segment_primes(old_bound: u64, new_bound: u64) -> usize {
    if new_bound < 32 {
        return 16;
    }
    let density = |x: f64| x / x.ln();
    let upper = density(new_bound as f64);
    let lower = if old_bound < 3 {
        0.0
    } else {
        density(old_bound as f64)
    };
    ((upper - lower) * 1.2) as usize + 16
}

//==================================================================================
// Unit Tests
//==================================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackendKind;

    fn table(backend: BackendKind) -> Table {
        Table::new(backend, 32)
    }

    #[test]
    fn test_grow_to_from_scratch() {
        for backend in [BackendKind::Dense, BackendKind::List] {
            let mut t = table(backend);
            t.grow_to(30).unwrap();
            assert_eq!(t.bound(), 30);
            assert_eq!(t.primes(), &[2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
        }
    }

    #[test]
    fn test_grow_to_below_two_stays_empty() {
        let mut t = table(BackendKind::Dense);
        t.grow_to(0).unwrap();
        assert_eq!(t.bound(), 1);
        t.grow_to(1).unwrap();
        assert_eq!(t.bound(), 1);
        assert!(t.primes().is_empty());
    }

    #[test]
    fn test_regrow_is_noop() {
        let mut t = table(BackendKind::Dense);
        t.grow_to(100).unwrap();
        let before = t.primes().to_vec();
        t.grow_to(50).unwrap();
        t.grow_to(100).unwrap();
        assert_eq!(t.bound(), 100);
        assert_eq!(t.primes(), &before[..]);
    }

    #[test]
    fn test_incremental_equals_one_shot() {
        for backend in [BackendKind::Dense, BackendKind::List] {
            let mut stepped = table(backend);
            for b in [2u64, 3, 4, 10, 11, 50, 51, 120, 500, 1000] {
                stepped.grow_to(b).unwrap();
            }
            let mut one_shot = table(backend);
            one_shot.grow_to(1000).unwrap();
            assert_eq!(stepped.primes(), one_shot.primes());
        }
    }

    #[test]
    fn test_segment_straddling_sqrt_frontier() {
        // Growing 10 -> 200 forces primes 11 and 13 (discovered inside the
        // new segment, <= isqrt(200)) to sieve the tail of that same segment:
        // 121, 143, 169, 187 must not survive.
        for backend in [BackendKind::Dense, BackendKind::List] {
            let mut t = table(backend);
            t.grow_to(10).unwrap();
            t.grow_to(200).unwrap();
            for composite in [121u64, 143, 169, 187] {
                assert!(
                    !t.primes().contains(&composite),
                    "{} leaked through the tail sieve",
                    composite
                );
            }
            assert!(t.primes().contains(&199));
            assert_eq!(t.len(), 46); // pi(200)
        }
    }

    #[test]
    fn test_grow_amortized_doubles() {
        let mut t = table(BackendKind::Dense);
        t.grow_to(100).unwrap();
        t.grow_amortized(101).unwrap();
        assert_eq!(t.bound(), 200);
        // An explicit larger target wins over doubling.
        t.grow_amortized(1000).unwrap();
        assert_eq!(t.bound(), 1000);
    }

    #[test]
    fn test_grow_amortized_floor() {
        let mut t = table(BackendKind::Dense);
        t.grow_amortized(2).unwrap();
        assert_eq!(t.bound(), 32);
    }

    #[test]
    fn test_ensure_count() {
        let mut t = table(BackendKind::List);
        t.ensure_count(100).unwrap();
        assert!(t.len() >= 100);
        assert_eq!(t.primes()[99], 541);
    }

    #[test]
    fn test_ensure_prime_above() {
        let mut t = table(BackendKind::Dense);
        assert_eq!(t.ensure_prime_above(0).unwrap(), 2);
        assert_eq!(t.ensure_prime_above(100).unwrap(), 101);
        assert_eq!(t.ensure_prime_above(101).unwrap(), 103);
        // Sparse region: 7907 -> 7919 needs the table to run past the gap.
        assert_eq!(t.ensure_prime_above(7907).unwrap(), 7919);
    }

    #[test]
    fn test_failed_growth_leaves_table_unchanged() {
        let mut t = table(BackendKind::Dense);
        t.grow_to(100).unwrap();
        let primes_before = t.primes().to_vec();
        let result = t.grow_to(u64::MAX);
        assert!(matches!(result, Err(SieveError::AllocationFailure { .. })));
        assert_eq!(t.bound(), 100);
        assert_eq!(t.primes(), &primes_before[..]);
        // The table still works afterwards.
        t.grow_to(200).unwrap();
        assert_eq!(t.bound(), 200);
    }
}
