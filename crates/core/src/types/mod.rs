//! Record types for blueprints, contracts and their fields.
//!
//! These are the documents persisted under the `"blueprints"` and
//! `"contracts"` keys. Serialized keys are camelCase and enum values are
//! upper-case strings, matching `schema/store-schema.json`.

mod blueprint;
mod contract;
mod field;

pub use blueprint::Blueprint;
pub use contract::{Contract, ContractStatus};
pub use field::{ContractField, FieldDef, FieldType, FieldValue, Position, ValueKind};

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Fresh random identifier for a blueprint, field or contract.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Current UTC time as an RFC 3339 string, the format of every `createdAt`.
///
/// Falls back to the Unix epoch, with a warning, if the clock reading
/// cannot be formatted (a year outside 0..=9999).
pub fn now_timestamp() -> String {
    format_timestamp(OffsetDateTime::now_utc())
}

fn format_timestamp(at: OffsetDateTime) -> String {
    at.format(&Rfc3339).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "cannot format timestamp, using the Unix epoch");
        EPOCH_TIMESTAMP.to_string()
    })
}

const EPOCH_TIMESTAMP: &str = "1970-01-01T00:00:00Z";
