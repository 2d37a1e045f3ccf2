//! Engine configuration

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Tree depth at which breakdown containers are auto-generated.
/// The catalogue convention puts priced leaves at the fifth level
/// (`"200.1.3.2.1"`-style codes).
pub const DEFAULT_CONTAINER_DEPTH: usize = 5;

/// Decimal places kept on final monetary amounts.
pub const DEFAULT_ROUNDING_SCALE: u32 = 2;

/// Configuration for the cost-allocation engine.
///
/// The engine works in raw numeric units; `currency_code` is only appended
/// to the human-readable calculation trace, never used for arithmetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// BOQ tree depth at which breakdown containers are synthesized
    pub container_depth: usize,
    /// Currency code appended to calculation equations
    pub currency_code: String,
    /// Decimal places for rounding final amounts
    pub rounding_scale: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            container_depth: DEFAULT_CONTAINER_DEPTH,
            currency_code: "USD".to_string(),
            rounding_scale: DEFAULT_ROUNDING_SCALE,
        }
    }
}

impl EngineConfig {
    /// Validate the configuration at load time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.container_depth == 0 {
            return Err(ConfigError::InvalidContainerDepth {
                depth: self.container_depth,
            });
        }
        if self.currency_code.trim().is_empty() {
            return Err(ConfigError::EmptyCurrencyCode);
        }
        Ok(())
    }

    /// Round a monetary amount to the configured scale.
    pub fn round_amount(&self, amount: f64) -> f64 {
        let factor = 10f64.powi(self.rounding_scale as i32);
        (amount * factor).round() / factor
    }
}

// =============================================================================
// TESTS
// =============================================================================
