// In: src/config.rs

//! The single source of truth for all erato sieve configuration.
//!
//! This module defines the unified `SieveConfig` struct, which is designed to be
//! created once at the application boundary (e.g., from a user's JSON file or
//! an embedding application's settings) and then handed to `PrimeSieve` at
//! construction time.
//!
//! This approach centralizes all settings and keeps the engine itself free of
//! policy knobs scattered across call sites.

use serde::{Deserialize, Serialize};

use crate::error::SieveError;

//==================================================================================
// I. Core Configuration Enums & Structs
//==================================================================================

/// Selects the storage backend the sieve uses for composite flags.
///
/// Both variants satisfy the same capability contract and produce identical
/// query results; they trade memory for probe-time work differently.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// **Default:** A dense bit-array of composite flags over `[0, bound]`.
    /// One bit per integer; membership probes are a single bit read once the
    /// bound covers the probe.
    #[default]
    Dense,

    /// A list-only backend that keeps no persistent flag storage. Membership
    /// probes above the bound are answered by trial division against the
    /// cached primes, valid whenever those primes cover `isqrt(probe)`.
    List,
}

//==================================================================================
// II. The Unified SieveConfig
//==================================================================================

/// The single, unified configuration for a `PrimeSieve` instance.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct SieveConfig {
    /// The storage backend for composite flags.
    #[serde(default)]
    pub backend: BackendKind,

    /// The bound the table is eagerly seeded to at construction. The default
    /// covers the first prime; `ensure`-style growth takes over from there.
    #[serde(default = "default_initial_bound")]
    pub initial_bound: u64,

    /// The floor for the first amortized growth step. Doubling from a tiny
    /// seeded bound would produce a run of useless one-digit segments; the
    /// first real segment jumps straight to at least this bound.
    #[serde(default = "default_min_growth_bound")]
    pub min_growth_bound: u64,
}

// Implement `Default` manually so the plain-Rust and serde defaults agree.
impl Default for SieveConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            initial_bound: default_initial_bound(),
            min_growth_bound: default_min_growth_bound(),
        }
    }
}

impl SieveConfig {
    /// Parses a configuration from a JSON document at the application boundary.
    pub fn from_json(json: &str) -> Result<Self, SieveError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Helper for `serde` to provide a default for `initial_bound`.
fn default_initial_bound() -> u64 {
    2
}

/// Helper for `serde` to provide a default for `min_growth_bound`.
fn default_min_growth_bound() -> u64 {
    32
}

//==================================================================================
// III. Unit Tests
//==================================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SieveConfig::default();
        assert_eq!(config.backend, BackendKind::Dense);
        assert_eq!(config.initial_bound, 2);
        assert_eq!(config.min_growth_bound, 32);
    }

    #[test]
    fn test_from_json_with_defaults() {
        let config = SieveConfig::from_json(r#"{ "backend": "list" }"#).unwrap();
        assert_eq!(config.backend, BackendKind::List);
        assert_eq!(config.initial_bound, 2);
        assert_eq!(config.min_growth_bound, 32);
    }

    #[test]
    fn test_from_json_full() {
        let json = r#"{ "backend": "dense", "initial_bound": 100, "min_growth_bound": 64 }"#;
        let config = SieveConfig::from_json(json).unwrap();
        assert_eq!(config.backend, BackendKind::Dense);
        assert_eq!(config.initial_bound, 100);
        assert_eq!(config.min_growth_bound, 64);
    }

    #[test]
    fn test_from_json_rejects_unknown_backend() {
        let result = SieveConfig::from_json(r#"{ "backend": "mmap" }"#);
        assert!(matches!(result, Err(SieveError::SerdeJson(_))));
    }
}
