//! End-to-end engine flow over one small project:
//! container synthesis, sub-item allocation, WIR valuation, tree roll-up
//! and monthly invoicing, the way the host application drives the engine.

use chrono::NaiveDate;
use sitebill_core::{EngineConfig, WirResult, WirStatus};
use sitebill_engine::{
    aggregate, calculate, ensure_containers, monthly_bucket, new_sub_item, refresh_calculation,
    tree_total,
};
use sitebill_test_utils::{deep_tree, leaves, Wir};

#[test]
fn full_project_cycle() {
    let config = EngineConfig::default();
    let tree = deep_tree();
    // Excavation: 10 × 100 = 1000; Concrete: 20 × 150 = 3000.
    assert_eq!(tree_total(&tree), 4000.0);

    // 1. Persistence runs container synthesis after the BOQ import.
    let containers = ensure_containers(&tree, &[], &config);
    assert_eq!(containers.len(), 2);
    assert!(ensure_containers(&tree, &containers, &config).is_empty());

    // 2. A planner splits the excavation leaf 60/40.
    let tree_leaves = leaves(&tree);
    let excavation = tree_leaves[0];
    let concrete = tree_leaves[1];
    let excavation_container = containers
        .iter()
        .find(|c| c.boq_item_id == excavation.boq_item_id)
        .unwrap();
    let digging = new_sub_item(excavation_container, excavation, "Digging", "digging", 60.0);
    let disposal = new_sub_item(excavation_container, excavation, "Disposal", "disposal", 40.0);
    let mut breakdowns = containers.clone();
    breakdowns.push(digging.clone());
    breakdowns.push(disposal);

    // 3. Two WIRs go through the approval workflow.
    let march = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
    let april = NaiveDate::from_ymd_opt(2025, 4, 5).unwrap();
    let mut wir_digging = Wir::new(excavation.boq_item_id, 5.0, "digging works zone A")
        .with_selected_breakdowns(vec![digging.breakdown_id])
        .with_result(WirResult::Approved, march)
        .with_status(WirStatus::Completed);
    let mut wir_concrete = Wir::new(concrete.boq_item_id, 10.0, "concrete pour zone A")
        .with_result(WirResult::ConditionallyApproved, april)
        .with_status(WirStatus::Completed);

    refresh_calculation(&mut wir_digging, &breakdowns, &tree, &config);
    refresh_calculation(&mut wir_concrete, &breakdowns, &tree, &config);
    // 5 × 100 × 60% = 300
    assert_eq!(wir_digging.calculated_amount, Some(300.0));
    // Fallback path: no selection, so the concrete container (100%) applies.
    // 10 × 150 × 100% = 1500
    assert_eq!(wir_concrete.calculated_amount, Some(1500.0));

    // A rejected WIR keeps no derived amount and never contributes.
    let mut wir_rejected = Wir::new(excavation.boq_item_id, 99.0, "digging rework")
        .with_selected_breakdowns(vec![digging.breakdown_id])
        .with_result(WirResult::Rejected, april)
        .with_status(WirStatus::Completed);
    refresh_calculation(&mut wir_rejected, &breakdowns, &tree, &config);
    assert_eq!(wir_rejected.calculated_amount, None);
    assert_eq!(
        calculate(&wir_rejected, &breakdowns, &tree, &config).amount,
        None
    );

    let wirs = vec![wir_digging, wir_concrete, wir_rejected];

    // 4. Dashboard roll-up.
    let snapshots = aggregate(&tree, &breakdowns, &wirs, &config);
    let root = &snapshots[0];
    assert_eq!(root.total_amount, 4000.0);
    assert_eq!(root.approved_amount, 1800.0);
    assert_eq!(root.completion_percentage, 45.0);

    let excavation_snapshot = snapshots
        .iter()
        .find(|p| p.boq_item_id == excavation.boq_item_id)
        .unwrap();
    assert_eq!(excavation_snapshot.approved_amount, 300.0);
    assert_eq!(excavation_snapshot.completion_percentage, 30.0);
    let digging_progress = excavation_snapshot
        .breakdown_progress
        .iter()
        .find(|bp| bp.breakdown_id == digging.breakdown_id)
        .unwrap();
    // Allocation 1000 × 60% = 600, completed 300 of it.
    assert_eq!(digging_progress.allocated_amount, 600.0);
    assert_eq!(digging_progress.completed_amount, 300.0);
    assert_eq!(digging_progress.completion_percentage, 50.0);

    // 5. April invoice: March amounts are "previous", April is "current".
    let bucket = monthly_bucket(&wirs, &breakdowns, &tree, "2025-04", &config);
    assert_eq!(bucket.previous_amount, 300.0);
    assert_eq!(bucket.current_amount, 1500.0);
    assert_eq!(bucket.total_boq_amount, 4000.0);
}
