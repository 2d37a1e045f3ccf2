//! Sitebill Engine - Cost Allocation and Progress Aggregation
//!
//! Pure, synchronous computation over in-memory data supplied by the host
//! application: distributes BOQ unit rates across percentage breakdowns,
//! values individual WIRs, rolls completion up the BOQ tree, and buckets
//! approved amounts by calendar period for invoicing.
//!
//! Nothing in this crate performs IO or keeps state between calls. All
//! entry points are safe to call concurrently as long as the inputs are not
//! mutated during the call. Diagnostics go through `tracing` at debug/warn
//! level; no subscriber is installed here.

pub mod breakdown;
pub mod calculator;
pub mod invoicing;
pub mod progress;
pub mod tree;

pub use breakdown::{allocated_amount, ensure_containers, new_sub_item};
pub use calculator::{calculate, refresh_calculation, resolve_targets, ResolvedTarget};
pub use invoicing::{daily_bucket, monthly_bucket, monthly_series};
pub use progress::aggregate;
pub use tree::{depth, find_by_id, flatten, total_value, tree_total};
