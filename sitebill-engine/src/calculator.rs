//! WIR amount calculator.
//!
//! Values a single WIR against its breakdown allocations:
//! `value × unit_rate × percentage / 100` per resolved pair, summed and
//! rounded. Unresolvable references are skipped with a debug log, never
//! fatal: BOQ and breakdown edits can race WIR creation in this data model
//! and availability wins over strict consistency.

use crate::tree;
use sitebill_core::{BoqItem, BoqItemId, BreakdownItem, EngineConfig, Wir, WirCalculation};
use tracing::debug;

/// A `(breakdown, boq item)` pair a WIR claims against.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedTarget<'a> {
    pub breakdown: &'a BreakdownItem,
    pub boq_item: &'a BoqItem,
}

/// Resolve the allocation targets of a WIR.
///
/// The fallback chain, in order:
/// 1. explicitly selected breakdown items, each resolved to its owning BOQ
///    item;
/// 2. otherwise the linked BOQ items (or just the primary association when
///    no links exist), each resolved to a breakdown by BOQ id first, then
///    by matching the BOQ code against a breakdown keyword.
///
/// References that no longer resolve are skipped and logged.
pub fn resolve_targets<'a>(
    wir: &Wir,
    breakdowns: &'a [BreakdownItem],
    boq_tree: &'a [BoqItem],
) -> Vec<ResolvedTarget<'a>> {
    let mut targets = Vec::new();

    if !wir.selected_breakdown_ids.is_empty() {
        for breakdown_id in &wir.selected_breakdown_ids {
            let Some(breakdown) = breakdowns
                .iter()
                .find(|b| b.breakdown_id == *breakdown_id)
            else {
                debug!(wir = %wir.wir_id, %breakdown_id, "skipping unresolvable breakdown reference");
                continue;
            };
            let Some(boq_item) = tree::find_by_id(boq_tree, breakdown.boq_item_id) else {
                debug!(
                    wir = %wir.wir_id,
                    boq_item_id = %breakdown.boq_item_id,
                    "skipping breakdown whose BOQ item no longer exists"
                );
                continue;
            };
            targets.push(ResolvedTarget { breakdown, boq_item });
        }
        return targets;
    }

    for boq_item_id in linked_boq_ids(wir) {
        let Some(boq_item) = tree::find_by_id(boq_tree, boq_item_id) else {
            debug!(wir = %wir.wir_id, %boq_item_id, "skipping unresolvable BOQ reference");
            continue;
        };
        let matched = breakdowns
            .iter()
            .find(|b| b.is_leaf && b.boq_item_id == boq_item.boq_item_id)
            .or_else(|| breakdowns.iter().find(|b| b.keyword == boq_item.code));
        match matched {
            Some(breakdown) => targets.push(ResolvedTarget { breakdown, boq_item }),
            None => {
                debug!(wir = %wir.wir_id, code = %boq_item.code, "no breakdown allocation for BOQ item")
            }
        }
    }
    targets
}

/// The BOQ items a WIR spans: its explicit links, or just the primary
/// association when no links were recorded.
fn linked_boq_ids(wir: &Wir) -> Vec<BoqItemId> {
    if wir.linked_boq_item_ids.is_empty() {
        vec![wir.boq_item_id]
    } else {
        wir.linked_boq_item_ids.clone()
    }
}

/// Compute the monetary amount a single WIR contributes.
///
/// Returns `WirCalculation::none()` for any WIR that is not fully claimable
/// (rejected, pending, or not yet completed) and for totals that round to
/// zero or below. A zero-amount approved WIR is indistinguishable from "no
/// calculation was possible" on purpose; callers treat both as "not yet
/// contributing".
pub fn calculate(
    wir: &Wir,
    breakdowns: &[BreakdownItem],
    boq_tree: &[BoqItem],
    config: &EngineConfig,
) -> WirCalculation {
    if !wir.is_claimable() {
        return WirCalculation::none();
    }

    let mut total = 0.0;
    let mut parts = Vec::new();
    for target in resolve_targets(wir, breakdowns, boq_tree) {
        // Zero or absent percentage contributes nothing; not an error.
        if target.breakdown.percentage <= 0.0 {
            continue;
        }
        let contribution =
            wir.value * target.boq_item.unit_rate * target.breakdown.percentage / 100.0;
        parts.push(format!(
            "{} × {} × {}% = {:.*}",
            wir.value,
            target.boq_item.unit_rate,
            target.breakdown.percentage,
            config.rounding_scale as usize,
            contribution,
        ));
        total += contribution;
    }

    let total = config.round_amount(total);
    if total <= 0.0 {
        return WirCalculation::none();
    }

    let equation = format!(
        "{} = {:.*} {}",
        parts.join(" + "),
        config.rounding_scale as usize,
        total,
        config.currency_code,
    );
    WirCalculation {
        amount: Some(total),
        equation,
    }
}

/// Run the calculator and write the derived fields back onto the record,
/// as persistence does after every status or result transition.
pub fn refresh_calculation(
    wir: &mut Wir,
    breakdowns: &[BreakdownItem],
    boq_tree: &[BoqItem],
    config: &EngineConfig,
) {
    let calculation = calculate(wir, breakdowns, boq_tree, config);
    wir.apply_calculation(calculation);
}

// =============================================================================
// TESTS
// =============================================================================
