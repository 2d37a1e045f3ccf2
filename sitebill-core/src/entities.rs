//! Core entity structures
//!
//! The BOQ catalogue, breakdown allocations and WIR records as supplied by
//! the persistence layer. The engine reads these; the only derived fields it
//! ever writes back are `Wir::calculated_amount` and
//! `Wir::calculation_equation`, via [`Wir::apply_calculation`].

use crate::{
    enums::{WirResult, WirStatus},
    error::ValidationError,
    identity::{new_entity_id, BoqItemId, BreakdownId, Timestamp, WirId},
    progress::WirCalculation,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A node in the BOQ cost catalogue.
///
/// Children are owned by value; a child refers back to its parent by id
/// only, never by reference, so the tree stays acyclic and cheaply clonable.
///
/// A node is a *leaf* iff it has no children. Only leaves carry a meaningful
/// `quantity × unit_rate`; a non-leaf node's value is always the recursive
/// sum of its children and its own quantity/rate fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoqItem {
    pub boq_item_id: BoqItemId,
    /// Dotted hierarchical code, e.g. `"200.1.3"`; dot count encodes depth
    pub code: String,
    pub description: String,
    /// Optional localized variant of the description
    pub description_localized: Option<String>,
    pub quantity: f64,
    pub unit: String,
    pub unit_rate: f64,
    pub parent_id: Option<BoqItemId>,
    pub children: Vec<BoqItem>,
}

impl BoqItem {
    /// Create a new catalogue node with no children.
    pub fn new(
        code: impl Into<String>,
        description: impl Into<String>,
        quantity: f64,
        unit: impl Into<String>,
        unit_rate: f64,
    ) -> Self {
        Self {
            boq_item_id: new_entity_id(),
            code: code.into(),
            description: description.into(),
            description_localized: None,
            quantity,
            unit: unit.into(),
            unit_rate,
            parent_id: None,
            children: Vec::new(),
        }
    }

    /// Set the localized description.
    pub fn with_localized_description(mut self, description: impl Into<String>) -> Self {
        self.description_localized = Some(description.into());
        self
    }

    /// Attach children, wiring their `parent_id` back to this node.
    pub fn with_children(mut self, children: Vec<BoqItem>) -> Self {
        self.children = children;
        for child in &mut self.children {
            child.parent_id = Some(self.boq_item_id);
        }
        self
    }

    /// A node is a leaf iff it has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Tree depth encoded in the dotted code: dot count plus one.
    pub fn code_depth(&self) -> usize {
        self.code.matches('.').count() + 1
    }
}

/// A percentage allocation against exactly one BOQ leaf.
///
/// Non-leaf records (`is_leaf == false`, no `parent_breakdown_id`) are the
/// implicit 100% containers synthesized per BOQ leaf; `is_leaf == true`
/// records are the selectable allocations a WIR can claim against.
/// Breakdown records are never hard-deleted, only edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownItem {
    pub breakdown_id: BreakdownId,
    /// The BOQ leaf this record allocates against
    pub boq_item_id: BoqItemId,
    pub description: String,
    /// Identifying keyword: matched against BOQ codes when a WIR carries no
    /// explicit breakdown selection, and against WIR descriptions for
    /// per-breakdown progress
    pub keyword: String,
    /// Share of the BOQ leaf's unit rate, in percent (0..=100)
    pub percentage: f64,
    /// Derived: `unit_rate × percentage / 100`
    pub value: f64,
    /// Whether this is a terminal, selectable allocation
    pub is_leaf: bool,
    pub parent_breakdown_id: Option<BreakdownId>,
    /// Cached copy of the owning BOQ leaf's unit rate
    pub unit_rate: f64,
    /// Cached copy of the owning BOQ leaf's quantity
    pub quantity: f64,
}

impl BreakdownItem {
    /// Create a breakdown record against a BOQ leaf.
    pub fn new(
        boq_item_id: BoqItemId,
        description: impl Into<String>,
        keyword: impl Into<String>,
        percentage: f64,
        unit_rate: f64,
        quantity: f64,
    ) -> Self {
        Self {
            breakdown_id: new_entity_id(),
            boq_item_id,
            description: description.into(),
            keyword: keyword.into(),
            percentage,
            value: unit_rate * percentage / 100.0,
            is_leaf: true,
            parent_breakdown_id: None,
            unit_rate,
            quantity,
        }
    }

    /// Mark this record as a non-terminal container.
    pub fn as_container(mut self) -> Self {
        self.is_leaf = false;
        self
    }

    /// Set the parent breakdown (for one extra level of subdivision).
    pub fn with_parent(mut self, parent_breakdown_id: BreakdownId) -> Self {
        self.parent_breakdown_id = Some(parent_breakdown_id);
        self
    }

    /// Whether this is a top-level container record (one per BOQ leaf).
    pub fn is_container(&self) -> bool {
        !self.is_leaf && self.parent_breakdown_id.is_none()
    }

    /// Re-derive `value` and the cached leaf figures after the owning BOQ
    /// leaf changed. Quantity is copied verbatim, never recomputed from the
    /// percentage: quantity and monetary share are independent axes.
    pub fn sync_from_leaf(&mut self, unit_rate: f64, quantity: f64) {
        self.unit_rate = unit_rate;
        self.quantity = quantity;
        self.value = unit_rate * self.percentage / 100.0;
    }

    /// CRUD-boundary validation. The engine itself never checks ranges;
    /// out-of-range percentages must be rejected here, at entry.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.description.trim().is_empty() {
            return Err(ValidationError::RequiredFieldMissing {
                field: "description".to_string(),
            });
        }
        if !(0.0..=100.0).contains(&self.percentage) {
            return Err(ValidationError::PercentageOutOfRange {
                id: self.breakdown_id,
                value: self.percentage,
            });
        }
        if self.unit_rate < 0.0 {
            return Err(ValidationError::NegativeValue {
                id: self.breakdown_id,
                field: "unit_rate".to_string(),
                value: self.unit_rate,
            });
        }
        if self.quantity < 0.0 {
            return Err(ValidationError::NegativeValue {
                id: self.breakdown_id,
                field: "quantity".to_string(),
                value: self.quantity,
            });
        }
        Ok(())
    }
}

/// Work Inspection Request - a unit-of-work claim against the BOQ.
///
/// `value` is the raw measure entered by the submitter, a multiplier for
/// the calculator, not a currency amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wir {
    pub wir_id: WirId,
    /// Primary BOQ association
    pub boq_item_id: BoqItemId,
    /// Additional BOQ items this WIR spans; empty means just `boq_item_id`
    pub linked_boq_item_ids: Vec<BoqItemId>,
    /// Breakdown allocations this WIR claims against; empty means "resolve
    /// from the linked BOQ items instead"
    pub selected_breakdown_ids: Vec<BreakdownId>,
    /// Raw quantity/measure entered by the submitter
    pub value: f64,
    /// Free-text description of the inspected work
    pub description: String,
    /// Inspection outcome; `None` while pending
    pub result: Option<WirResult>,
    pub status: WirStatus,
    /// Derived: monetary amount this WIR contributes, if computable
    pub calculated_amount: Option<f64>,
    /// Derived: human-readable calculation trace
    pub calculation_equation: String,
    /// Date the result was recorded; drives invoice time-bucketing
    pub received_date: Option<NaiveDate>,
    pub created_at: Timestamp,
}

impl Wir {
    /// Create a new pending WIR against a BOQ item.
    pub fn new(boq_item_id: BoqItemId, value: f64, description: impl Into<String>) -> Self {
        Self {
            wir_id: new_entity_id(),
            boq_item_id,
            linked_boq_item_ids: Vec::new(),
            selected_breakdown_ids: Vec::new(),
            value,
            description: description.into(),
            result: None,
            status: WirStatus::Submitted,
            calculated_amount: None,
            calculation_equation: String::new(),
            received_date: None,
            created_at: Utc::now(),
        }
    }

    /// Link additional BOQ items.
    pub fn with_linked_boq_items(mut self, ids: Vec<BoqItemId>) -> Self {
        self.linked_boq_item_ids = ids;
        self
    }

    /// Select explicit breakdown allocations.
    pub fn with_selected_breakdowns(mut self, ids: Vec<BreakdownId>) -> Self {
        self.selected_breakdown_ids = ids;
        self
    }

    /// Record the inspection outcome and its date.
    pub fn with_result(mut self, result: WirResult, received_date: NaiveDate) -> Self {
        self.result = Some(result);
        self.received_date = Some(received_date);
        self
    }

    /// Set the workflow status.
    pub fn with_status(mut self, status: WirStatus) -> Self {
        self.status = status;
        self
    }

    /// Whether this WIR may carry a calculated amount at all: it must be
    /// approved (fully or conditionally) *and* its workflow completed.
    /// The status gate takes precedence over the result.
    pub fn is_claimable(&self) -> bool {
        self.result.is_some_and(WirResult::is_claimable) && self.status == WirStatus::Completed
    }

    /// Whether this WIR is related to the given BOQ node, either as its
    /// primary association or through an explicit link.
    pub fn relates_to(&self, boq_item_id: BoqItemId) -> bool {
        self.boq_item_id == boq_item_id || self.linked_boq_item_ids.contains(&boq_item_id)
    }

    /// Write back the two derived fields from a calculator run.
    ///
    /// Upholds the record invariant: a non-claimable WIR (rejected, pending,
    /// or merely submitted) always ends with `calculated_amount == None`.
    pub fn apply_calculation(&mut self, calculation: WirCalculation) {
        if self.is_claimable() {
            self.calculated_amount = calculation.amount;
            self.calculation_equation = calculation.equation;
        } else {
            self.clear_calculation();
        }
    }

    /// Reset the derived fields, e.g. after a rejection or a status rollback.
    pub fn clear_calculation(&mut self) {
        self.calculated_amount = None;
        self.calculation_equation.clear();
    }
}

// =============================================================================
// TESTS
// =============================================================================
