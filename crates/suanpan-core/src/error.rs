//! # Error Types
//!
//! Domain-specific error types for suanpan-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  suanpan-core errors (this file)                                        │
//! │  └── CoreError        - Conversion / numeric-input failures             │
//! │                                                                         │
//! │  IPC errors (apps/ipc)                                                  │
//! │  └── failure envelope - { "success": false, "error": "..." }            │
//! │                                                                         │
//! │  Flow: CoreError → failure envelope → Frontend                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Note the asymmetry with [`crate::engine::CalculatorEngine`]: the engine
//! never returns a `Result` from its key-press operations. Its faults are
//! encoded in a sticky error state that the caller reads back through
//! `display()`, because that is what a calculator shows its user. Only the
//! stateless components (converter, commercial calculator, numeric parsing
//! at the boundary) signal failures through `CoreError`.
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (unit name, literal, etc.)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business arithmetic errors.
///
/// All failures are deterministic given the same input - retrying without
/// changing input is meaningless, so no variant is transient.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Unit name not present in the converter registry.
    ///
    /// Unit names are matched exactly (case-sensitive, no normalization),
    /// so "Hectare" does not find "公頃".
    #[error("Unknown unit: {name}")]
    UnknownUnit { name: String },

    /// The two units belong to different categories.
    ///
    /// Conversion is only defined between units sharing a base unit;
    /// area → weight has no meaning and is refused rather than guessed.
    #[error("Cannot convert between categories: {from} → {to}")]
    IncompatibleCategory { from: String, to: String },

    /// A numeric literal failed exact-decimal parsing.
    ///
    /// Raised at the boundary when coercing wire strings into `Decimal`;
    /// the calculator engine handles its own malformed input via the
    /// sticky error state instead.
    #[error("Invalid number: {literal}")]
    InvalidNumber { literal: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::UnknownUnit {
            name: "光年".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown unit: 光年");

        let err = CoreError::IncompatibleCategory {
            from: "面積".to_string(),
            to: "重量".to_string(),
        };
        assert_eq!(err.to_string(), "Cannot convert between categories: 面積 → 重量");

        let err = CoreError::InvalidNumber {
            literal: "12..5".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid number: 12..5");
    }
}
