use serde::{Deserialize, Serialize};

use super::FieldDef;

/// A reusable contract template: a name and an ordered list of fields.
///
/// Blueprints are immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blueprint {
    pub id: String,
    pub name: String,
    pub fields: Vec<FieldDef>,
    /// RFC 3339 timestamp string.
    pub created_at: String,
}
