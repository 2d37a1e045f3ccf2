//! Sitebill Core - Entity Types
//!
//! Pure data structures with no behavior beyond field derivation and
//! boundary validation. All other crates depend on this.
//! This crate contains ONLY data types - no aggregation logic.

pub mod config;
pub mod entities;
pub mod enums;
pub mod error;
pub mod identity;
pub mod progress;

pub use config::EngineConfig;
pub use entities::{BoqItem, BreakdownItem, Wir};
pub use enums::{WirResult, WirStatus};
pub use error::{ConfigError, EngineError, SitebillError, SitebillResult, ValidationError};
pub use identity::{new_entity_id, BoqItemId, BreakdownId, Timestamp, WirId};
pub use progress::{BoqProgress, BreakdownProgress, InvoiceBucket, WirCalculation};
