//! Error types for sitebill operations
//!
//! The engine itself never fails: bad references are skipped and guarded
//! divisions yield zero. Errors here belong to the boundaries where records
//! are created or edited (CRUD-time validation) and where the engine is
//! configured.

use thiserror::Error;
use uuid::Uuid;

/// Record-level validation errors, raised where entities enter the system.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("Required field missing: {field}")]
    RequiredFieldMissing { field: String },

    #[error("Percentage out of range on breakdown {id}: {value} (expected 0..=100)")]
    PercentageOutOfRange { id: Uuid, value: f64 },

    #[error("Negative {field} on {id}: {value}")]
    NegativeValue { id: Uuid, field: String, value: f64 },
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Container depth must be at least 1, got {depth}")]
    InvalidContainerDepth { depth: usize },

    #[error("Currency code must not be empty")]
    EmptyCurrencyCode,
}

/// Engine-side errors. Kept deliberately small: unresolvable references and
/// zero denominators are handled by skipping, not by erroring.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("BOQ tree is empty")]
    EmptyTree,
}

/// Master error type for all sitebill errors.
#[derive(Debug, Clone, Error)]
pub enum SitebillError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
}

/// Result type alias for sitebill operations.
pub type SitebillResult<T> = Result<T, SitebillError>;

// =============================================================================
// TESTS
// =============================================================================
