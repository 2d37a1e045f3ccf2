//! Derived report records
//!
//! Outputs of the engine, consumed read-only by dashboards, exports and the
//! invoicing screens. Nothing here is persisted.

use crate::identity::{BoqItemId, BreakdownId};
use serde::{Deserialize, Serialize};

/// Result of running the calculator over a single WIR.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WirCalculation {
    /// Monetary amount the WIR contributes; `None` when nothing is
    /// computable (rejected/pending WIR, or a total of zero). Callers must
    /// treat `None` as "not yet contributing", never as an error.
    pub amount: Option<f64>,
    /// Human-readable trace of the computation; empty iff `amount` is `None`
    pub equation: String,
}

impl WirCalculation {
    /// The "nothing computable" result.
    pub fn none() -> Self {
        Self {
            amount: None,
            equation: String::new(),
        }
    }
}

/// Per-breakdown completion snapshot (leaves only).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownProgress {
    pub breakdown_id: BreakdownId,
    /// Monetary slice of the leaf this breakdown allocates:
    /// `leaf total × percentage / 100`
    pub allocated_amount: f64,
    /// Sum of calculated amounts of WIRs matched to this breakdown
    pub completed_amount: f64,
    /// `completed / allocated × 100`, clamped to [0, 100]
    pub completion_percentage: f64,
}

/// Per-BOQ-node progress snapshot.
///
/// `approved_amount` is monetary and deliberately uncapped so over-claims
/// stay visible for variance reporting; only `completion_percentage` is
/// clamped, as a display concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoqProgress {
    pub boq_item_id: BoqItemId,
    /// Total value of the node: `quantity × unit_rate` for leaves, the
    /// recursive child sum otherwise
    pub total_amount: f64,
    /// Cumulative approved WIR amount (uncapped)
    pub approved_amount: f64,
    /// `approved / total × 100`, clamped to [0, 100]; 0 when total is 0
    pub completion_percentage: f64,
    /// Per-breakdown completion; populated for leaf nodes only
    pub breakdown_progress: Vec<BreakdownProgress>,
}

/// Cumulative invoice figures for one calendar period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceBucket {
    /// Approved amount accumulated in periods strictly before the target
    pub previous_amount: f64,
    /// Approved amount accumulated in the target period
    pub current_amount: f64,
    /// Total BOQ value of the whole tree, independent of any WIR
    pub total_boq_amount: f64,
}

// =============================================================================
// TESTS
// =============================================================================
