use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{new_id, now_timestamp, Blueprint, ContractField};

/// Workflow status of a contract. See [`crate::workflow`] for transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractStatus {
    Created,
    Approved,
    Sent,
    Signed,
    Locked,
    Revoked,
}

impl ContractStatus {
    pub const ALL: [ContractStatus; 6] = [
        ContractStatus::Created,
        ContractStatus::Approved,
        ContractStatus::Sent,
        ContractStatus::Signed,
        ContractStatus::Locked,
        ContractStatus::Revoked,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContractStatus::Created => "CREATED",
            ContractStatus::Approved => "APPROVED",
            ContractStatus::Sent => "SENT",
            ContractStatus::Signed => "SIGNED",
            ContractStatus::Locked => "LOCKED",
            ContractStatus::Revoked => "REVOKED",
        }
    }
}

impl fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContractStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContractStatus::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown contract status '{s}'"))
    }
}

/// One use of a blueprint: a snapshot of its fields with values, plus a
/// workflow status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: String,
    pub name: String,
    pub blueprint_id: String,
    /// Blueprint name at creation time.
    pub blueprint_name: String,
    pub fields: Vec<ContractField>,
    pub status: ContractStatus,
    /// RFC 3339 timestamp string.
    pub created_at: String,
}

impl Contract {
    /// A new CREATED contract for `blueprint` carrying `fields`.
    ///
    /// `fields` must come from instantiating `blueprint`'s fields; callers
    /// go through [`crate::draft::ContractDraft`] or
    /// [`crate::instantiate::instantiate_fields`].
    pub(crate) fn from_blueprint(blueprint: &Blueprint, fields: Vec<ContractField>) -> Self {
        Self {
            id: new_id(),
            name: format!("{} Contract", blueprint.name),
            blueprint_id: blueprint.id.clone(),
            blueprint_name: blueprint.name.clone(),
            fields,
            status: ContractStatus::Created,
            created_at: now_timestamp(),
        }
    }

    /// Find a field by id, falling back to the first field with that label.
    pub fn resolve_field(&self, key: &str) -> Option<&ContractField> {
        self.fields
            .iter()
            .find(|f| f.id() == key)
            .or_else(|| self.fields.iter().find(|f| f.label() == key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FieldDef, FieldType, Position};
    use serde_json::json;

    #[test]
    fn status_round_trips_through_str() {
        for status in ContractStatus::ALL {
            assert_eq!(status.as_str().parse::<ContractStatus>().unwrap(), status);
            assert_eq!(
                serde_json::to_value(status).unwrap(),
                json!(status.as_str())
            );
        }
        assert_eq!("sent".parse::<ContractStatus>().unwrap(), ContractStatus::Sent);
        assert!("ARCHIVED".parse::<ContractStatus>().is_err());
    }

    #[test]
    fn from_blueprint_snapshots_name_and_status() {
        let blueprint = Blueprint {
            id: "bp-1".into(),
            name: "NDA".into(),
            fields: vec![],
            created_at: "2025-01-01T00:00:00Z".into(),
        };
        let contract = Contract::from_blueprint(&blueprint, vec![]);
        assert_eq!(contract.name, "NDA Contract");
        assert_eq!(contract.blueprint_id, "bp-1");
        assert_eq!(contract.blueprint_name, "NDA");
        assert_eq!(contract.status, ContractStatus::Created);
        assert_ne!(contract.id, blueprint.id);
    }

    #[test]
    fn resolve_field_prefers_id_over_label() {
        let fields = vec![
            ContractField::with_default(FieldDef::new("a", FieldType::Text, "b", Position::default())),
            ContractField::with_default(FieldDef::new("b", FieldType::Text, "Other", Position::default())),
        ];
        let contract = Contract {
            id: "c".into(),
            name: "n".into(),
            blueprint_id: "bp".into(),
            blueprint_name: "bp".into(),
            fields,
            status: ContractStatus::Created,
            created_at: "2025-01-01T00:00:00Z".into(),
        };
        assert_eq!(contract.resolve_field("b").unwrap().id(), "b");
        assert_eq!(contract.resolve_field("Other").unwrap().id(), "b");
        assert!(contract.resolve_field("missing").is_none());
    }

    #[test]
    fn contract_json_uses_camel_case_keys() {
        let encoded = serde_json::to_value(Contract {
            id: "c1".into(),
            name: "NDA Contract".into(),
            blueprint_id: "bp".into(),
            blueprint_name: "NDA".into(),
            fields: vec![],
            status: ContractStatus::Approved,
            created_at: "2025-01-01T00:00:00Z".into(),
        })
        .unwrap();
        assert_eq!(encoded["blueprintId"], "bp");
        assert_eq!(encoded["blueprintName"], "NDA");
        assert_eq!(encoded["createdAt"], "2025-01-01T00:00:00Z");
        assert_eq!(encoded["status"], "APPROVED");
    }
}
