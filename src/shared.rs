// In: src/shared.rs

//! A cloneable, thread-safe handle over one shared sieve table.
//!
//! The core engine is synchronous and single-threaded; sharing a table across
//! threads (or across several live iterators) goes through this handle, which
//! serializes every growth-triggering query behind one exclusive lock. Lock
//! poisoning is absorbed: the table's invariants hold between operations, so
//! a panic in another thread never leaves it half-sieved.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::SieveConfig;
use crate::error::SieveError;
use crate::sieve::PrimeSieve;

//==================================================================================
// 1. The Handle
//==================================================================================

/// A cloneable handle to a shared [`PrimeSieve`]. All clones observe (and
/// grow) the same table.
#[derive(Clone)]
pub struct SharedSieve {
    inner: Arc<Mutex<PrimeSieve>>,
}

impl SharedSieve {
    /// Wraps an existing sieve in a shared handle.
    pub fn new(sieve: PrimeSieve) -> Self {
        Self {
            inner: Arc::new(Mutex::new(sieve)),
        }
    }

    /// Builds the underlying sieve from a configuration, then wraps it.
    pub fn with_config(config: SieveConfig) -> Result<Self, SieveError> {
        Ok(Self::new(PrimeSieve::with_config(config)?))
    }

    fn lock(&self) -> MutexGuard<'_, PrimeSieve> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    //==============================================================================
    // 2. Forwarded Queries
    //==============================================================================

    pub fn nth_prime(&self, k: usize) -> Result<u64, SieveError> {
        self.lock().nth_prime(k)
    }

    pub fn get(&self, index: isize) -> Result<u64, SieveError> {
        self.lock().get(index)
    }

    pub fn slice(
        &self,
        start: Option<isize>,
        stop: Option<isize>,
    ) -> Result<Vec<u64>, SieveError> {
        self.lock().slice(start, stop)
    }

    pub fn index_of(&self, p: u64) -> Result<usize, SieveError> {
        self.lock().index_of(p)
    }

    pub fn is_prime(&self, x: u64) -> Result<bool, SieveError> {
        self.lock().is_prime(x)
    }

    pub fn contains(&self, x: u64) -> Result<bool, SieveError> {
        self.lock().contains(x)
    }

    pub fn primes_in_range(&self, lo: u64, hi: u64) -> Result<Vec<u64>, SieveError> {
        self.lock().primes_in_range(lo, hi)
    }

    pub fn count_primes_in_range(&self, lo: u64, hi: u64) -> Result<usize, SieveError> {
        self.lock().count_primes_in_range(lo, hi)
    }

    pub fn count_primes_less_or_equal(&self, n: u64) -> Result<usize, SieveError> {
        self.lock().count_primes_less_or_equal(n)
    }

    pub fn next_prime_greater_than(&self, x: u64) -> Result<u64, SieveError> {
        self.lock().next_prime_greater_than(x)
    }

    pub fn prev_prime_less_than(&self, x: u64) -> Result<u64, SieveError> {
        self.lock().prev_prime_less_than(x)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn bound(&self) -> u64 {
        self.lock().bound()
    }

    /// An owned copy of the primes computed so far. A borrow cannot outlive
    /// the lock, so the shared handle hands out snapshots.
    pub fn primes_snapshot(&self) -> Vec<u64> {
        self.lock().primes_view().to_vec()
    }

    /// An independent infinite iterator over the shared table. Any number of
    /// these may run concurrently; each tracks its own cursor, and segment
    /// growth is serialized by the lock.
    pub fn iter_all_primes(&self) -> SharedPrimeIter {
        SharedPrimeIter {
            sieve: self.clone(),
            cursor: 0,
        }
    }
}

//==================================================================================
// 3. The Owning Iterator
//==================================================================================

/// An infinite prime iterator holding its own handle to the shared table.
pub struct SharedPrimeIter {
    sieve: SharedSieve,
    cursor: usize,
}

impl Iterator for SharedPrimeIter {
    type Item = Result<u64, SieveError>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.sieve.nth_prime(self.cursor);
        if item.is_ok() {
            self.cursor += 1;
        }
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}
