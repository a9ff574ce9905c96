//! This file is the root of the `erato` Rust crate.
//!
//! Its responsibilities are strictly limited to:
//! 1.  Declaring all the top-level modules of our library (`sieve`, `storage`,
//!     `kernels`, etc.) so the Rust compiler knows they exist.
//! 2.  Re-exporting the public API surface: the sieve itself, its shared
//!     handle, the configuration, and the unified error type.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//==================================================================================
// 1. Module Declarations
//==================================================================================
pub mod config;
pub mod kernels;
pub mod observability;

mod error;
mod growth;
mod iter;
mod shared;
mod sieve;
mod storage;
mod table;


//==================================================================================
// 2. Public API Re-exports
//==================================================================================
pub use config::{BackendKind, SieveConfig};
pub use error::SieveError;
pub use iter::IterAllPrimes;
pub use shared::{SharedPrimeIter, SharedSieve};
pub use sieve::PrimeSieve;
