//! Period aggregation for invoicing.
//!
//! Buckets approved WIR amounts by calendar month or day, giving the
//! "previous / current / total" figures an interim payment certificate
//! needs. Stateless: every call recomputes from the full WIR list, which is
//! fine at the data volumes involved (hundreds of WIRs, not millions).

use crate::{calculator, tree};
use sitebill_core::{BoqItem, BreakdownItem, EngineConfig, InvoiceBucket, Wir, WirResult};
use std::collections::BTreeMap;

/// Cumulative invoice figures for one calendar month.
///
/// `target_month` is an ISO `YYYY-MM` key; `previous_amount` covers every
/// month that sorts strictly before it, `current_amount` the month itself.
/// WIRs without a received date, or without a claimable result, are ignored.
pub fn monthly_bucket(
    wirs: &[Wir],
    breakdowns: &[BreakdownItem],
    boq_tree: &[BoqItem],
    target_month: &str,
    config: &EngineConfig,
) -> InvoiceBucket {
    bucket_by_key(wirs, breakdowns, boq_tree, target_month, "%Y-%m", config)
}

/// Daily variant of [`monthly_bucket`], keyed by ISO `YYYY-MM-DD`.
pub fn daily_bucket(
    wirs: &[Wir],
    breakdowns: &[BreakdownItem],
    boq_tree: &[BoqItem],
    target_day: &str,
    config: &EngineConfig,
) -> InvoiceBucket {
    bucket_by_key(wirs, breakdowns, boq_tree, target_day, "%Y-%m-%d", config)
}

fn bucket_by_key(
    wirs: &[Wir],
    breakdowns: &[BreakdownItem],
    boq_tree: &[BoqItem],
    target_key: &str,
    date_format: &str,
    config: &EngineConfig,
) -> InvoiceBucket {
    let mut previous_amount = 0.0;
    let mut current_amount = 0.0;

    for (key, amount) in dated_amounts(wirs, breakdowns, boq_tree, date_format, config) {
        if key.as_str() == target_key {
            current_amount += amount;
        } else if key.as_str() < target_key {
            previous_amount += amount;
        }
        // Future periods are not part of any bucket.
    }

    InvoiceBucket {
        previous_amount,
        current_amount,
        total_boq_amount: tree::tree_total(boq_tree),
    }
}

/// Per-month approved totals across the whole WIR list, sorted by month
/// key. Chart consumers plot this directly or fold it into a cumulative
/// series.
pub fn monthly_series(
    wirs: &[Wir],
    breakdowns: &[BreakdownItem],
    boq_tree: &[BoqItem],
    config: &EngineConfig,
) -> Vec<(String, f64)> {
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for (key, amount) in dated_amounts(wirs, breakdowns, boq_tree, "%Y-%m", config) {
        *totals.entry(key).or_default() += amount;
    }
    totals.into_iter().collect()
}

/// Claimable, dated WIRs valued through the calculator, as
/// `(period key, amount)` pairs.
fn dated_amounts<'a>(
    wirs: &'a [Wir],
    breakdowns: &'a [BreakdownItem],
    boq_tree: &'a [BoqItem],
    date_format: &'a str,
    config: &'a EngineConfig,
) -> impl Iterator<Item = (String, f64)> + 'a {
    wirs.iter().filter_map(move |wir| {
        if !wir.result.is_some_and(WirResult::is_claimable) {
            return None;
        }
        let received = wir.received_date?;
        let amount = calculator::calculate(wir, breakdowns, boq_tree, config).amount?;
        Some((received.format(date_format).to_string(), amount))
    })
}

// =============================================================================
// TESTS
// =============================================================================
