// In: src/error.rs

//! This module defines the single, unified error type for the entire erato library.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SieveError {
    // =========================================================================
    // === High-Level, Semantic Errors (Specific to our library's logic)
    // =========================================================================
    /// A signed index resolved before the start of the known prime sequence.
    /// Negative indices count back from the end of the primes computed so far;
    /// they never trigger growth.
    #[error("Index {index} is out of bounds for the {len} primes computed so far")]
    InvalidIndex { index: isize, len: usize },

    /// There is no prime strictly below the queried value (the smallest prime is 2).
    #[error("No prime exists below {0}")]
    NoPrimeBelow(u64),

    /// `index_of` was asked for the sequence position of a value that is not prime.
    #[error("{0} is not a prime number")]
    InvalidPrime(u64),

    #[error("Internal logic error (this is a bug): {0}")]
    InternalError(String),

    // =========================================================================
    // === Growth / Resource Errors
    // =========================================================================
    /// Storage for the requested bound could not be allocated. The table is
    /// left exactly as it was before the growth attempt; retrying with a
    /// smaller bound is valid.
    #[error("Failed to allocate sieve storage for bound {requested_bound}")]
    AllocationFailure { requested_bound: u64 },

    /// A growth target exceeded the representable value range (`u64::MAX`).
    #[error("Sieve growth target exceeds the supported integer range")]
    BoundOverflow,

    // =========================================================================
    // === External Error Wrappers (Using #[from] for automatic conversion)
    // =========================================================================
    /// An error from the Serde JSON library, typically during config parsing.
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}
