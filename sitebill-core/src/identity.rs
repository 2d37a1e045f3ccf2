//! Identity types for sitebill entities

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Identifier of a BOQ catalogue node.
/// UUIDv7 embeds a Unix timestamp, making IDs naturally sortable by creation time.
pub type BoqItemId = Uuid;

/// Identifier of a breakdown allocation record.
pub type BreakdownId = Uuid;

/// Identifier of a Work Inspection Request.
pub type WirId = Uuid;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Generate a new UUIDv7 entity id (timestamp-sortable).
pub fn new_entity_id() -> Uuid {
    Uuid::now_v7()
}
