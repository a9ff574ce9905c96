// In: src/storage/dense.rs

//! The dense bit-array storage backend.
//!
//! One persistent composite bit per integer in `[0, bound]`, held in a
//! `bitvec` buffer. Extension reserves the underlying word vector through
//! `try_reserve_exact` before any mutation, so an allocation failure surfaces
//! as an error with the flags untouched.

use std::mem;

use bitvec::prelude::*;

use crate::error::SieveError;
use crate::storage::SieveStorage;

const WORD_BITS: usize = u64::BITS as usize;

//==================================================================================
// 1. The Backend
//==================================================================================

/// Composite flags over `[0, bound]`; a set bit means "marked composite".
/// Unset bits are prime candidates (or finalized primes, below the bound).
pub(crate) struct DenseBitStore {
    composite: BitVec<u64, Lsb0>,
}

impl DenseBitStore {
    pub(crate) fn new() -> Self {
        Self {
            composite: BitVec::new(),
        }
    }
}

impl SieveStorage for DenseBitStore {
    fn begin_extend(&mut self, _old_bound: u64, new_bound: u64) -> Result<(), SieveError> {
        let new_len = usize::try_from(new_bound)
            .ok()
            .and_then(|bound| bound.checked_add(1))
            .ok_or(SieveError::AllocationFailure {
                requested_bound: new_bound,
            })?;
        let old_len = self.composite.len();
        let needed_words = new_len.div_ceil(WORD_BITS);

        // `bitvec` has no fallible reserve, so round-trip through the raw
        // word vector: reserve there, then rebuild the bit view.
        let mut words = mem::take(&mut self.composite).into_vec();
        let additional = needed_words.saturating_sub(words.len());
        if words.try_reserve_exact(additional).is_err() {
            let mut restored = BitVec::from_vec(words);
            restored.truncate(old_len);
            self.composite = restored;
            return Err(SieveError::AllocationFailure {
                requested_bound: new_bound,
            });
        }
        let mut grown = BitVec::from_vec(words);
        grown.truncate(old_len);
        grown.resize(new_len, false); // within reserved capacity
        self.composite = grown;
        Ok(())
    }

    fn mark_composite(&mut self, n: u64) {
        self.composite.set(n as usize, true);
    }

    fn is_prime_candidate(&self, n: u64) -> bool {
        !self.composite[n as usize]
    }

    fn finish_extend(&mut self) {
        // The flags are the persistent state; nothing transient to release.
    }

    fn probe_is_prime(&self, n: u64, bound: u64, _primes: &[u64]) -> Option<bool> {
        debug_assert!(n >= 2, "probes below 2 are resolved by the query layer");
        if n <= bound {
            Some(!self.composite[n as usize])
        } else {
            None
        }
    }
}
