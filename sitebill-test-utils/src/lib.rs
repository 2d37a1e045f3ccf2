//! Sitebill Test Utilities
//!
//! Centralized test infrastructure for the sitebill workspace:
//! - Fixture builders for BOQ trees, breakdowns and WIRs
//! - Proptest generators for entity fields and whole scenarios

// Re-export core types for convenience
pub use sitebill_core::{
    new_entity_id, BoqItem, BoqItemId, BoqProgress, BreakdownId, BreakdownItem,
    BreakdownProgress, EngineConfig, InvoiceBucket, Wir, WirCalculation, WirResult, WirStatus,
};

use chrono::NaiveDate;
use proptest::prelude::*;

// ============================================================================
// FIXTURES
// ============================================================================

/// A priced catalogue leaf.
pub fn priced_leaf(code: &str, description: &str, quantity: f64, unit_rate: f64) -> BoqItem {
    BoqItem::new(code, description, quantity, "m3", unit_rate)
}

/// A small project tree with priced leaves at the default container depth
/// (five levels, `"200.1.1.1.x"` codes):
///
/// ```text
/// 200 Civil works
/// └── 200.1 Substructure
///     └── 200.1.1 Footings
///         └── 200.1.1.1 Zone A
///             ├── 200.1.1.1.1 Excavation   (10 × 100 = 1000)
///             └── 200.1.1.1.2 Concrete     (20 × 150 = 3000)
/// ```
pub fn deep_tree() -> Vec<BoqItem> {
    vec![BoqItem::new("200", "Civil works", 0.0, "", 0.0).with_children(vec![
        BoqItem::new("200.1", "Substructure", 0.0, "", 0.0).with_children(vec![
            BoqItem::new("200.1.1", "Footings", 0.0, "", 0.0).with_children(vec![
                BoqItem::new("200.1.1.1", "Zone A", 0.0, "", 0.0).with_children(vec![
                    priced_leaf("200.1.1.1.1", "Excavation", 10.0, 100.0),
                    priced_leaf("200.1.1.1.2", "Concrete", 20.0, 150.0),
                ]),
            ]),
        ]),
    ])]
}

/// Pre-order leaves of a tree (for wiring breakdowns and WIRs in tests).
pub fn leaves(tree: &[BoqItem]) -> Vec<&BoqItem> {
    let mut out = Vec::new();
    fn walk<'a>(nodes: &'a [BoqItem], out: &mut Vec<&'a BoqItem>) {
        for node in nodes {
            if node.is_leaf() {
                out.push(node);
            } else {
                walk(&node.children, out);
            }
        }
    }
    walk(tree, &mut out);
    out
}

/// A selectable breakdown allocation against a leaf.
pub fn breakdown_for(leaf: &BoqItem, keyword: &str, percentage: f64) -> BreakdownItem {
    BreakdownItem::new(
        leaf.boq_item_id,
        format!("{} ({keyword})", leaf.description),
        keyword,
        percentage,
        leaf.unit_rate,
        leaf.quantity,
    )
}

/// A fully approved, completed WIR ready to contribute.
pub fn approved_wir(boq_item_id: BoqItemId, value: f64, description: &str) -> Wir {
    Wir::new(boq_item_id, value, description)
        .with_result(WirResult::Approved, received_date())
        .with_status(WirStatus::Completed)
}

/// The received date used by fixtures unless a test needs its own.
pub fn received_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
}

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

/// Allocation percentage within the valid CRUD range.
pub fn arb_percentage() -> impl Strategy<Value = f64> {
    0.0..=100.0
}

/// A strictly positive allocation percentage.
pub fn arb_positive_percentage() -> impl Strategy<Value = f64> {
    0.01..=100.0
}

/// Leaf quantity in a realistic range.
pub fn arb_quantity() -> impl Strategy<Value = f64> {
    0.0..1_000.0
}

/// Unit rate in a realistic range.
pub fn arb_unit_rate() -> impl Strategy<Value = f64> {
    0.0..10_000.0
}

/// Raw WIR measure (the submitter-entered multiplier).
pub fn arb_wir_value() -> impl Strategy<Value = f64> {
    0.0..100.0
}

/// Any inspection result, including `None` for pending.
pub fn arb_wir_result() -> impl Strategy<Value = Option<WirResult>> {
    prop_oneof![
        Just(None),
        Just(Some(WirResult::Approved)),
        Just(Some(WirResult::ConditionallyApproved)),
        Just(Some(WirResult::Rejected)),
    ]
}

/// Any workflow status.
pub fn arb_wir_status() -> impl Strategy<Value = WirStatus> {
    prop_oneof![Just(WirStatus::Submitted), Just(WirStatus::Completed)]
}

/// A received date within the project window (2024-01 .. 2026-12).
pub fn arb_received_date() -> impl Strategy<Value = NaiveDate> {
    (2024i32..=2026, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| {
        NaiveDate::from_ymd_opt(y, m, d).expect("day <= 28 is valid in every month")
    })
}

// =============================================================================
// TESTS
// =============================================================================
