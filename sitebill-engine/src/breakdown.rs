//! Breakdown allocation: container synthesis and rate distribution.
//!
//! Containers are the implicit 100% records, one per priced BOQ leaf at the
//! configured depth. [`ensure_containers`] is a pure function returning the
//! records still missing; the persistence layer decides when to run it
//! (typically after any BOQ tree mutation) and upserts the result keyed by
//! `boq_item_id`.

use sitebill_core::{BoqItem, BreakdownItem, EngineConfig};

/// Propose container records for every leaf at the configured depth that
/// does not yet have one. Idempotent: re-running with the returned records
/// merged into `existing` proposes nothing.
pub fn ensure_containers(
    tree: &[BoqItem],
    existing: &[BreakdownItem],
    config: &EngineConfig,
) -> Vec<BreakdownItem> {
    let mut proposed = Vec::new();
    walk(tree, None, existing, config, &mut proposed);
    proposed
}

fn walk(
    nodes: &[BoqItem],
    parent: Option<&BoqItem>,
    existing: &[BreakdownItem],
    config: &EngineConfig,
    proposed: &mut Vec<BreakdownItem>,
) {
    for node in nodes {
        if node.is_leaf() && node.code_depth() == config.container_depth {
            let already_present = existing
                .iter()
                .any(|b| b.boq_item_id == node.boq_item_id && b.parent_breakdown_id.is_none());
            if !already_present {
                proposed.push(container_for(node, parent));
            }
        }
        walk(&node.children, Some(node), existing, config, proposed);
    }
}

/// Synthesize the implicit 100% container for a BOQ leaf, inheriting its
/// unit rate and quantity. The description is prefixed with the immediate
/// parent's description so container lists read in catalogue order.
fn container_for(leaf: &BoqItem, parent: Option<&BoqItem>) -> BreakdownItem {
    let description = match parent {
        Some(parent) => format!("{} / {}", parent.description, leaf.description),
        None => leaf.description.clone(),
    };
    BreakdownItem::new(
        leaf.boq_item_id,
        description,
        leaf.code.clone(),
        100.0,
        leaf.unit_rate,
        leaf.quantity,
    )
    .as_container()
}

/// Monetary slice of a BOQ leaf's unit rate taken by one breakdown:
/// `unit_rate × percentage / 100`. A missing or zero percentage contributes
/// zero; it is never treated as full allocation.
pub fn allocated_amount(breakdown: &BreakdownItem, leaf: &BoqItem) -> f64 {
    if breakdown.percentage <= 0.0 {
        return 0.0;
    }
    leaf.unit_rate * breakdown.percentage / 100.0
}

/// Create a selectable sub-item under a container. The quantity is copied
/// from the owning BOQ leaf verbatim, not recomputed from the percentage:
/// quantity and monetary share are independent axes.
pub fn new_sub_item(
    container: &BreakdownItem,
    leaf: &BoqItem,
    description: impl Into<String>,
    keyword: impl Into<String>,
    percentage: f64,
) -> BreakdownItem {
    BreakdownItem::new(
        leaf.boq_item_id,
        description,
        keyword,
        percentage,
        leaf.unit_rate,
        leaf.quantity,
    )
    .with_parent(container.breakdown_id)
}

// =============================================================================
// TESTS
// =============================================================================
