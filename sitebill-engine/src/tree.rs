//! Read-only traversal utilities over the BOQ catalogue tree.

use sitebill_core::{BoqItem, BoqItemId};

/// Depth-first lookup by id: top-level array first, then each node's
/// children recursively. Ids are assumed globally unique, so the first
/// match wins.
pub fn find_by_id(tree: &[BoqItem], id: BoqItemId) -> Option<&BoqItem> {
    for node in tree {
        if node.boq_item_id == id {
            return Some(node);
        }
        if let Some(found) = find_by_id(&node.children, id) {
            return Some(found);
        }
    }
    None
}

/// Pre-order flattening (node before its children), the flat lookup order
/// every report consumer expects.
pub fn flatten(tree: &[BoqItem]) -> Vec<&BoqItem> {
    let mut out = Vec::new();
    collect(tree, &mut out);
    out
}

fn collect<'a>(nodes: &'a [BoqItem], out: &mut Vec<&'a BoqItem>) {
    for node in nodes {
        out.push(node);
        collect(&node.children, out);
    }
}

/// Total monetary value of a node: `quantity × unit_rate` for leaves, the
/// recursive child sum otherwise. A non-leaf's own quantity/rate fields are
/// ignored.
pub fn total_value(node: &BoqItem) -> f64 {
    if node.is_leaf() {
        node.quantity * node.unit_rate
    } else {
        node.children.iter().map(total_value).sum()
    }
}

/// Total value of the whole root set.
pub fn tree_total(tree: &[BoqItem]) -> f64 {
    tree.iter().map(total_value).sum()
}

/// Tree depth of a node as encoded in its dotted code.
pub fn depth(node: &BoqItem) -> usize {
    node.code_depth()
}

// =============================================================================
// TESTS
// =============================================================================
