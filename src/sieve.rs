// In: src/sieve.rs

//! The public query engine.
//!
//! `PrimeSieve` answers every query by binary search over the ordered prime
//! list, growing the table transparently when a query runs past what has been
//! computed. A query either returns a fully-sieved answer or fails explicitly
//! (allocation failure, malformed index); it never returns a partial result.
//!
//! Growth policy per query family:
//! * index-targeted and open-ended queries (`nth_prime`, slices, iteration,
//!   `next_prime_greater_than`) grow with the doubling policy;
//! * bound-targeted queries (`is_prime` on the dense backend, ranges, counts,
//!   `prev_prime_less_than`, `index_of`) grow to exactly the bound they need.

use crate::config::{BackendKind, SieveConfig};
use crate::error::SieveError;
use crate::iter::IterAllPrimes;
use crate::kernels::math::isqrt;
use crate::kernels::search::{lower_bound, upper_bound};
use crate::table::Table;

//==================================================================================
// 1. Construction
//==================================================================================

/// An incrementally growing prime table with binary-search queries on top.
pub struct PrimeSieve {
    table: Table,
    config: SieveConfig,
}

impl PrimeSieve {
    /// A sieve with the default configuration (dense backend). Nothing is
    /// computed yet; the first query seeds the table.
    pub fn new() -> Self {
        let config = SieveConfig::default();
        Self {
            table: Table::new(config.backend, config.min_growth_bound),
            config,
        }
    }

    /// A sieve built from an explicit configuration, eagerly seeded to
    /// `config.initial_bound`.
    pub fn with_config(config: SieveConfig) -> Result<Self, SieveError> {
        let mut sieve = Self {
            table: Table::new(config.backend, config.min_growth_bound),
            config,
        };
        sieve.table.grow_to(sieve.config.initial_bound)?;
        Ok(sieve)
    }

    /// The active configuration.
    pub fn config(&self) -> &SieveConfig {
        &self.config
    }

    //==============================================================================
    // 2. Snapshot Accessors (never grow)
    //==============================================================================

    /// The number of primes computed so far. A snapshot, not pi(infinity).
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.len() == 0
    }

    /// The largest integer whose primality has been finalized.
    pub fn bound(&self) -> u64 {
        self.table.bound()
    }

    /// A read-only view of the primes computed so far, ascending. The borrow
    /// checker keeps this view from aliasing any growth.
    pub fn primes_view(&self) -> &[u64] {
        self.table.primes()
    }

    //==============================================================================
    // 3. Index Queries
    //==============================================================================

    /// The `k`-th prime, zero-indexed (`nth_prime(0) == 2`). Grows with the
    /// doubling policy until the index is covered.
    pub fn nth_prime(&mut self, k: usize) -> Result<u64, SieveError> {
        self.table.ensure_count(k.saturating_add(1))?;
        self.table
            .primes()
            .get(k)
            .copied()
            .ok_or_else(|| SieveError::InternalError("ensure_count left index uncovered".into()))
    }

    /// Signed index access. Non-negative indices behave like [`Self::nth_prime`];
    /// negative indices count back from the end of the primes computed so far
    /// and never trigger growth (the end of an unbounded sequence is not a
    /// thing to grow toward).
    pub fn get(&mut self, index: isize) -> Result<u64, SieveError> {
        if index >= 0 {
            return self.nth_prime(index as usize);
        }
        let len = self.table.len();
        let back = index.unsigned_abs();
        if back > len {
            return Err(SieveError::InvalidIndex { index, len });
        }
        Ok(self.table.primes()[len - back])
    }

    /// Slice access with Python-slice semantics: endpoints are optional,
    /// negative endpoints resolve against the primes computed so far, and
    /// out-of-range endpoints clamp instead of failing. A non-negative `stop`
    /// grows (doubling) until index `stop - 1` is covered.
    pub fn slice(
        &mut self,
        start: Option<isize>,
        stop: Option<isize>,
    ) -> Result<Vec<u64>, SieveError> {
        if let Some(s) = stop {
            if s > 0 {
                self.table.ensure_count(s as usize)?;
            }
        }
        let len = self.table.len();
        let resolve = |endpoint: isize| -> usize {
            if endpoint >= 0 {
                (endpoint as usize).min(len)
            } else {
                len.saturating_sub(endpoint.unsigned_abs())
            }
        };
        let lo = start.map(&resolve).unwrap_or(0);
        let hi = stop.map(&resolve).unwrap_or(len);
        if lo >= hi {
            return Ok(Vec::new());
        }
        Ok(self.table.primes()[lo..hi].to_vec())
    }

    /// The sequence index of a prime `p` (`index_of(2) == 0`). Fails with
    /// `InvalidPrime` if `p` is not prime.
    pub fn index_of(&mut self, p: u64) -> Result<usize, SieveError> {
        if p < 2 {
            return Err(SieveError::InvalidPrime(p));
        }
        self.table.grow_to(p)?;
        let primes = self.table.primes();
        let idx = lower_bound(primes, &p);
        if primes.get(idx) == Some(&p) {
            Ok(idx)
        } else {
            Err(SieveError::InvalidPrime(p))
        }
    }

    //==============================================================================
    // 4. Membership Queries
    //==============================================================================

    /// Whether `x` is prime. Defined false for `x < 2`.
    ///
    /// On the dense backend a probe past the bound grows the table to exactly
    /// `x`. On the list backend it is answered by trial division as soon as
    /// the cached primes cover `isqrt(x)`, growing (doubling) only until they
    /// do; the flag table for `[0, x]` is never materialized.
    pub fn is_prime(&mut self, x: u64) -> Result<bool, SieveError> {
        if x < 2 {
            return Ok(false);
        }
        if x <= self.table.bound() {
            let primes = self.table.primes();
            let idx = lower_bound(primes, &x);
            return Ok(primes.get(idx) == Some(&x));
        }
        if let Some(answer) = self.table.probe(x) {
            return Ok(answer);
        }
        match self.config.backend {
            BackendKind::Dense => {
                self.table.grow_to(x)?;
                let primes = self.table.primes();
                let idx = lower_bound(primes, &x);
                Ok(primes.get(idx) == Some(&x))
            }
            BackendKind::List => {
                self.table.grow_amortized(isqrt(x))?;
                self.table.probe(x).ok_or_else(|| {
                    SieveError::InternalError("sqrt frontier missing after growth".into())
                })
            }
        }
    }

    /// Alias for [`Self::is_prime`].
    pub fn contains(&mut self, x: u64) -> Result<bool, SieveError> {
        self.is_prime(x)
    }

    //==============================================================================
    // 5. Range and Counting Queries
    //==============================================================================

    /// The primes `p` with `lo <= p < hi`, as an owned copy. Grows to exactly
    /// `hi - 1`.
    pub fn primes_in_range(&mut self, lo: u64, hi: u64) -> Result<Vec<u64>, SieveError> {
        let (a, b) = self.range_indices(lo, hi)?;
        Ok(self.table.primes()[a..b].to_vec())
    }

    /// The number of primes `p` with `lo <= p < hi`, without materializing
    /// the slice.
    pub fn count_primes_in_range(&mut self, lo: u64, hi: u64) -> Result<usize, SieveError> {
        let (a, b) = self.range_indices(lo, hi)?;
        Ok(b - a)
    }

    /// The prime-counting function pi(n): how many primes are `<= n`. Grows
    /// to exactly `n`.
    pub fn count_primes_less_or_equal(&mut self, n: u64) -> Result<usize, SieveError> {
        self.table.grow_to(n)?;
        Ok(upper_bound(self.table.primes(), &n))
    }

    /// Resolves the half-open value range `[lo, hi)` to index bounds over the
    /// prime list, growing to exactly `hi - 1` first.
    fn range_indices(&mut self, lo: u64, hi: u64) -> Result<(usize, usize), SieveError> {
        if hi <= lo || hi <= 2 {
            return Ok((0, 0));
        }
        self.table.grow_to(hi - 1)?;
        let primes = self.table.primes();
        Ok((lower_bound(primes, &lo), lower_bound(primes, &hi)))
    }

    //==============================================================================
    // 6. Neighbor Queries
    //==============================================================================

    /// The smallest prime strictly greater than `x`. Grows with the doubling
    /// policy; prime gaps are small enough that a round or two always lands one.
    pub fn next_prime_greater_than(&mut self, x: u64) -> Result<u64, SieveError> {
        self.table.ensure_prime_above(x)
    }

    /// The largest prime strictly less than `x`. Fails with `NoPrimeBelow`
    /// for `x <= 2`; otherwise grows to exactly `x`, below which everything
    /// is final.
    pub fn prev_prime_less_than(&mut self, x: u64) -> Result<u64, SieveError> {
        if x <= 2 {
            return Err(SieveError::NoPrimeBelow(x));
        }
        self.table.grow_to(x)?;
        let primes = self.table.primes();
        let idx = lower_bound(primes, &x);
        idx.checked_sub(1)
            .and_then(|i| primes.get(i).copied())
            .ok_or_else(|| SieveError::InternalError("no prime below x despite x > 2".into()))
    }

    //==============================================================================
    // 7. Open-Ended Computation
    //==============================================================================

    /// Keeps extending the table (doubling) until `stop` returns true. The
    /// predicate sees the sieve after every committed segment.
    pub fn find_primes_until<F>(&mut self, mut stop: F) -> Result<(), SieveError>
    where
        F: FnMut(&PrimeSieve) -> bool,
    {
        while !stop(self) {
            if self.table.bound() == u64::MAX {
                return Err(SieveError::BoundOverflow);
            }
            let next = self.table.bound().saturating_add(1);
            self.table.grow_amortized(next)?;
        }
        Ok(())
    }

    /// An infinite iterator over all primes in order, computing new segments
    /// on demand. Each iterator tracks its own cursor.
    pub fn iter_all_primes(&mut self) -> IterAllPrimes<'_> {
        IterAllPrimes::new(self)
    }
}

impl Default for PrimeSieve {
    fn default() -> Self {
        Self::new()
    }
}
