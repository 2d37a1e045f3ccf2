//! Status and result enums for WIR records

use serde::{Deserialize, Serialize};

/// Inspection outcome recorded against a WIR.
///
/// Serialized as the single-letter grades used on inspection sheets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WirResult {
    /// Approved
    #[serde(rename = "A")]
    Approved,
    /// Conditionally approved (counts toward progress like an approval)
    #[serde(rename = "B")]
    ConditionallyApproved,
    /// Rejected (never contributes to any aggregate)
    #[serde(rename = "C")]
    Rejected,
}

impl WirResult {
    /// Whether this outcome lets the WIR claim an amount.
    /// Both full and conditional approvals count; rejections never do.
    pub fn is_claimable(self) -> bool {
        matches!(self, WirResult::Approved | WirResult::ConditionallyApproved)
    }
}

/// Workflow status of a WIR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WirStatus {
    /// Submitted, awaiting completion of the inspection workflow
    Submitted,
    /// Inspection workflow completed; derived amounts may be computed
    Completed,
}

// =============================================================================
// TESTS
// =============================================================================
