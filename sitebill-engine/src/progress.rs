//! Progress aggregation over the BOQ tree.
//!
//! Leaves sum the calculator amounts of their related claimable WIRs;
//! internal nodes sum their children, strictly bottom-up, and never
//! recompute from WIRs directly (a WIR linked to both a child and its
//! ancestor must not count twice). The whole pass is pure and re-entrant:
//! identical inputs produce identical output.

use crate::{calculator, tree};
use sitebill_core::{
    BoqItem, BoqItemId, BoqProgress, BreakdownItem, BreakdownProgress, EngineConfig, Wir,
    WirResult,
};
use std::collections::HashMap;
use tracing::warn;

/// Compute a progress snapshot for every node of the tree, in pre-order.
pub fn aggregate(
    boq_tree: &[BoqItem],
    breakdowns: &[BreakdownItem],
    wirs: &[Wir],
    config: &EngineConfig,
) -> Vec<BoqProgress> {
    let mut approved = HashMap::new();
    for root in boq_tree {
        accumulate(root, breakdowns, wirs, boq_tree, config, &mut approved);
    }

    tree::flatten(boq_tree)
        .into_iter()
        .map(|node| {
            let total_amount = tree::total_value(node);
            let approved_amount = approved
                .get(&node.boq_item_id)
                .copied()
                .unwrap_or_default();
            if total_amount > 0.0 && approved_amount > total_amount {
                warn!(
                    code = %node.code,
                    approved_amount,
                    total_amount,
                    "approved amount exceeds node total"
                );
            }
            let breakdown_progress = if node.is_leaf() {
                leaf_breakdown_progress(node, total_amount, breakdowns, wirs, boq_tree, config)
            } else {
                Vec::new()
            };
            BoqProgress {
                boq_item_id: node.boq_item_id,
                total_amount,
                approved_amount,
                completion_percentage: completion_percentage(approved_amount, total_amount),
                breakdown_progress,
            }
        })
        .collect()
}

/// Post-order accumulation of approved amounts. Children are fully
/// aggregated before their parent is computed.
fn accumulate(
    node: &BoqItem,
    breakdowns: &[BreakdownItem],
    wirs: &[Wir],
    boq_tree: &[BoqItem],
    config: &EngineConfig,
    approved: &mut HashMap<BoqItemId, f64>,
) -> f64 {
    let amount = if node.is_leaf() {
        related_claimable(wirs, node.boq_item_id)
            .filter_map(|wir| calculator::calculate(wir, breakdowns, boq_tree, config).amount)
            .sum()
    } else {
        node.children
            .iter()
            .map(|child| accumulate(child, breakdowns, wirs, boq_tree, config, approved))
            .sum()
    };
    approved.insert(node.boq_item_id, amount);
    amount
}

/// WIRs related to a BOQ node (primary or linked) whose result counts
/// toward progress.
fn related_claimable(wirs: &[Wir], boq_item_id: BoqItemId) -> impl Iterator<Item = &Wir> {
    wirs.iter().filter(move |wir| {
        wir.relates_to(boq_item_id) && wir.result.is_some_and(WirResult::is_claimable)
    })
}

/// Per-breakdown completion for a leaf node.
///
/// WIRs are matched to a breakdown by a case-insensitive substring search
/// of the breakdown keyword in the WIR description. Loose on purpose: the
/// tracked system had no explicit WIR-to-breakdown progress link.
fn leaf_breakdown_progress(
    leaf: &BoqItem,
    leaf_total: f64,
    breakdowns: &[BreakdownItem],
    wirs: &[Wir],
    boq_tree: &[BoqItem],
    config: &EngineConfig,
) -> Vec<BreakdownProgress> {
    breakdowns
        .iter()
        .filter(|b| b.is_leaf && b.boq_item_id == leaf.boq_item_id)
        .map(|breakdown| {
            let allocated_amount = if breakdown.percentage > 0.0 {
                leaf_total * breakdown.percentage / 100.0
            } else {
                0.0
            };
            let keyword = breakdown.keyword.trim().to_lowercase();
            let completed_amount: f64 = if keyword.is_empty() {
                0.0
            } else {
                related_claimable(wirs, leaf.boq_item_id)
                    .filter(|wir| wir.description.to_lowercase().contains(&keyword))
                    .filter_map(|wir| {
                        calculator::calculate(wir, breakdowns, boq_tree, config).amount
                    })
                    .sum()
            };
            BreakdownProgress {
                breakdown_id: breakdown.breakdown_id,
                allocated_amount,
                completed_amount,
                completion_percentage: completion_percentage(completed_amount, allocated_amount),
            }
        })
        .collect()
}

/// `amount / total × 100` clamped to [0, 100]; a zero total yields 0,
/// never NaN or infinity.
fn completion_percentage(amount: f64, total: f64) -> f64 {
    if total > 0.0 {
        (amount / total * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    }
}

// =============================================================================
// TESTS
// =============================================================================
