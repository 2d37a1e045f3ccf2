//! Property-Based Tests for the Progress Aggregator
//!
//! Properties:
//! - Leaf additivity: a leaf's approved amount equals the sum of the
//!   calculator's amounts over exactly its related claimable WIRs.
//! - Tree additivity: every internal node's approved amount equals the sum
//!   of its children's, recursively, with no double counting.
//! - Percentage clamp: completion percentages stay within [0, 100] even
//!   when the raw amount over-claims.
//! - Re-entrancy: aggregating twice over unmutated inputs is bit-identical.

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use sitebill_core::{BoqItem, BoqProgress, EngineConfig, Wir, WirStatus};
use sitebill_engine::{aggregate, calculate};
use sitebill_test_utils::{
    arb_wir_result, arb_wir_status, arb_wir_value, breakdown_for, deep_tree, leaves,
    received_date, BreakdownItem, WirResult,
};

// ============================================================================
// SCENARIO GENERATION
// ============================================================================

/// Raw WIR parameters: (leaf index, value, result, status).
fn arb_wir_params() -> impl Strategy<Value = Vec<(usize, f64, Option<WirResult>, WirStatus)>> {
    prop::collection::vec(
        (0usize..2, arb_wir_value(), arb_wir_result(), arb_wir_status()),
        0..12,
    )
}

/// Materialize a scenario: the deep fixture tree, one 60% and one 100%
/// allocation, and WIRs built from the generated parameters.
fn build_scenario(
    params: &[(usize, f64, Option<WirResult>, WirStatus)],
) -> (Vec<BoqItem>, Vec<BreakdownItem>, Vec<Wir>) {
    let tree = deep_tree();
    let (breakdowns, leaf_ids): (Vec<_>, Vec<_>) = {
        let tree_leaves = leaves(&tree);
        let breakdowns = vec![
            breakdown_for(tree_leaves[0], "excavation", 60.0),
            breakdown_for(tree_leaves[1], "concrete", 100.0),
        ];
        let ids = tree_leaves.iter().map(|l| l.boq_item_id).collect();
        (breakdowns, ids)
    };

    let wirs = params
        .iter()
        .map(|&(leaf_index, value, result, status)| {
            let mut wir = Wir::new(leaf_ids[leaf_index], value, "inspection")
                .with_selected_breakdowns(vec![breakdowns[leaf_index].breakdown_id])
                .with_status(status);
            if let Some(result) = result {
                wir = wir.with_result(result, received_date());
            }
            wir
        })
        .collect();

    (tree, breakdowns, wirs)
}

fn snapshot<'a>(snapshots: &'a [BoqProgress], node: &BoqItem) -> &'a BoqProgress {
    snapshots
        .iter()
        .find(|p| p.boq_item_id == node.boq_item_id)
        .expect("every node has a snapshot")
}

fn assert_tree_additivity(
    snapshots: &[BoqProgress],
    node: &BoqItem,
) -> Result<(), TestCaseError> {
    if !node.is_leaf() {
        let child_sum: f64 = node
            .children
            .iter()
            .map(|c| snapshot(snapshots, c).approved_amount)
            .sum();
        let own = snapshot(snapshots, node).approved_amount;
        prop_assert!((own - child_sum).abs() < 1e-6);
        for child in &node.children {
            assert_tree_additivity(snapshots, child)?;
        }
    }
    Ok(())
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn leaf_additivity(params in arb_wir_params()) {
        let (tree, breakdowns, wirs) = build_scenario(&params);
        let config = EngineConfig::default();
        let snapshots = aggregate(&tree, &breakdowns, &wirs, &config);

        for leaf in leaves(&tree) {
            let expected: f64 = wirs
                .iter()
                .filter(|w| w.relates_to(leaf.boq_item_id))
                .filter(|w| w.result.is_some_and(WirResult::is_claimable))
                .filter_map(|w| calculate(w, &breakdowns, &tree, &config).amount)
                .sum();
            let actual = snapshot(&snapshots, leaf).approved_amount;
            prop_assert!((actual - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn tree_additivity(params in arb_wir_params()) {
        let (tree, breakdowns, wirs) = build_scenario(&params);
        let snapshots = aggregate(&tree, &breakdowns, &wirs, &EngineConfig::default());
        for root in &tree {
            assert_tree_additivity(&snapshots, root)?;
        }
    }

    #[test]
    fn rejected_wirs_never_contribute(params in arb_wir_params()) {
        let (tree, breakdowns, mut wirs) = build_scenario(&params);
        let config = EngineConfig::default();
        let baseline = aggregate(&tree, &breakdowns, &wirs, &config);

        // Adding rejected and pending WIRs changes nothing.
        let extra_rejected = Wir::new(leaves(&tree)[0].boq_item_id, 999.0, "inspection")
            .with_result(WirResult::Rejected, received_date())
            .with_status(WirStatus::Completed);
        let extra_pending = Wir::new(leaves(&tree)[1].boq_item_id, 999.0, "inspection");
        wirs.push(extra_rejected);
        wirs.push(extra_pending);

        let with_noise = aggregate(&tree, &breakdowns, &wirs, &config);
        prop_assert_eq!(baseline, with_noise);
    }

    #[test]
    fn completion_percentage_clamped(params in arb_wir_params()) {
        let (tree, breakdowns, wirs) = build_scenario(&params);
        let snapshots = aggregate(&tree, &breakdowns, &wirs, &EngineConfig::default());
        for progress in &snapshots {
            prop_assert!(progress.completion_percentage >= 0.0);
            prop_assert!(progress.completion_percentage <= 100.0);
            for bp in &progress.breakdown_progress {
                prop_assert!(bp.completion_percentage >= 0.0);
                prop_assert!(bp.completion_percentage <= 100.0);
            }
        }
    }

    #[test]
    fn aggregate_is_re_entrant(params in arb_wir_params()) {
        let (tree, breakdowns, wirs) = build_scenario(&params);
        let config = EngineConfig::default();
        let first = aggregate(&tree, &breakdowns, &wirs, &config);
        let second = aggregate(&tree, &breakdowns, &wirs, &config);
        prop_assert_eq!(first, second);
    }
}
