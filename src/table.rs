// In: src/table.rs

//! The mutable core of the sieve: the bound, the ordered prime list, and the
//! storage backend behind them.
//!
//! Invariants the rest of the crate leans on:
//! * `bound` is monotonically non-decreasing; primality of every integer in
//!   `[0, bound]` is final.
//! * `primes` is exactly the set of primes in `[0, bound]`, strictly
//!   increasing, append-only.
//!
//! Only the growth controller (`growth.rs`, the second `impl Table` block)
//! mutates this state; everything else reads it.

use crate::config::BackendKind;
use crate::storage::{make_store, SieveStorage};

//==================================================================================
// 1. The Table
//==================================================================================

pub(crate) struct Table {
    pub(crate) bound: u64,
    pub(crate) primes: Vec<u64>,
    pub(crate) store: Box<dyn SieveStorage>,
    pub(crate) min_growth_bound: u64,
}

impl Table {
    /// A fresh table: bound 1, no primes computed yet.
    pub(crate) fn new(backend: BackendKind, min_growth_bound: u64) -> Self {
        Self {
            bound: 1,
            primes: Vec::new(),
            store: make_store(backend),
            min_growth_bound,
        }
    }

    /// The largest integer whose primality is finalized.
    pub(crate) fn bound(&self) -> u64 {
        self.bound
    }

    /// The primes computed so far, ascending.
    pub(crate) fn primes(&self) -> &[u64] {
        &self.primes
    }

    pub(crate) fn len(&self) -> usize {
        self.primes.len()
    }

    /// Answers a membership probe from storage without growing, if possible.
    pub(crate) fn probe(&self, n: u64) -> Option<bool> {
        self.store.probe_is_prime(n, self.bound, &self.primes)
    }
}
