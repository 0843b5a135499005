//! Contract dashboard: status filters, per-row actions, and the guarded
//! status and field operations behind the dashboard buttons.

use std::fmt;
use std::str::FromStr;

use contractor_storage::KeyValueStore;
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::OffsetDateTime;

use crate::error::{FieldError, WorkflowError};
use crate::repository::ContractRepository;
use crate::types::{Contract, ContractField, ContractStatus, FieldValue};
use crate::workflow::{Action, StatusColor};

/// Which contracts the dashboard shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardFilter {
    #[default]
    All,
    /// Not yet signed and not revoked.
    Pending,
    /// Approved or out for signature.
    Active,
    Signed,
}

impl DashboardFilter {
    pub const ALL: [DashboardFilter; 4] = [
        DashboardFilter::All,
        DashboardFilter::Pending,
        DashboardFilter::Active,
        DashboardFilter::Signed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DashboardFilter::All => "ALL",
            DashboardFilter::Pending => "PENDING",
            DashboardFilter::Active => "ACTIVE",
            DashboardFilter::Signed => "SIGNED",
        }
    }

    pub fn matches(self, status: ContractStatus) -> bool {
        use crate::types::ContractStatus::*;
        match self {
            DashboardFilter::All => true,
            DashboardFilter::Pending => matches!(status, Created | Approved | Sent),
            DashboardFilter::Active => matches!(status, Approved | Sent),
            DashboardFilter::Signed => matches!(status, Signed | Locked),
        }
    }

    /// Contracts passing the filter, in their stored order.
    pub fn apply<'a>(self, contracts: &'a [Contract]) -> Vec<&'a Contract> {
        contracts.iter().filter(|c| self.matches(c.status)).collect()
    }
}

impl fmt::Display for DashboardFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DashboardFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DashboardFilter::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown filter '{s}' (expected ALL, PENDING, ACTIVE or SIGNED)"))
    }
}

/// One dashboard table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardRow {
    pub id: String,
    pub name: String,
    pub blueprint_name: String,
    pub status: ContractStatus,
    pub color: StatusColor,
    /// Creation date (`YYYY-MM-DD`), or the raw timestamp if unparseable.
    pub created: String,
    pub actions: Vec<Action>,
}

impl DashboardRow {
    pub fn from_contract(contract: &Contract) -> Self {
        Self {
            id: contract.id.clone(),
            name: contract.name.clone(),
            blueprint_name: contract.blueprint_name.clone(),
            status: contract.status,
            color: contract.status.color(),
            created: created_date(&contract.created_at),
            actions: contract.status.actions(),
        }
    }
}

fn created_date(timestamp: &str) -> String {
    OffsetDateTime::parse(timestamp, &Rfc3339)
        .ok()
        .and_then(|t| t.date().format(format_description!("[year]-[month]-[day]")).ok())
        .unwrap_or_else(|| timestamp.to_string())
}

/// Guarded workflow operations over a contract repository.
///
/// Every operation checks the workflow rules before calling the
/// repository; a refused operation changes nothing.
pub struct Dashboard<'r, S> {
    contracts: &'r mut ContractRepository<S>,
}

impl<'r, S: KeyValueStore> Dashboard<'r, S> {
    pub fn new(contracts: &'r mut ContractRepository<S>) -> Self {
        Self { contracts }
    }

    pub fn rows(&self, filter: DashboardFilter) -> Vec<DashboardRow> {
        filter
            .apply(self.contracts.list_contracts())
            .into_iter()
            .map(DashboardRow::from_contract)
            .collect()
    }

    /// Move contract `id` to its single successor status.
    pub fn advance(&mut self, id: &str) -> Result<ContractStatus, WorkflowError> {
        let status = self.current_status(id)?;
        let Some(next) = status.next().filter(|&to| status.permits(to)) else {
            tracing::warn!(contract_id = id, %status, "advance refused: terminal status");
            return Err(WorkflowError::NoSuccessor {
                id: id.to_string(),
                status,
            });
        };
        self.contracts.update_status(id, next)?;
        Ok(next)
    }

    /// Move contract `id` to REVOKED.
    pub fn revoke(&mut self, id: &str) -> Result<(), WorkflowError> {
        let status = self.current_status(id)?;
        if !status.permits(ContractStatus::Revoked) {
            tracing::warn!(contract_id = id, %status, "revoke refused");
            return Err(WorkflowError::NotRevocable {
                id: id.to_string(),
                status,
            });
        }
        self.contracts.update_status(id, ContractStatus::Revoked)?;
        Ok(())
    }

    /// Apply value changes to contract `id`.
    ///
    /// Each edit names a field by id or label. All edits are validated
    /// before anything is stored.
    pub fn save_edits(&mut self, id: &str, edits: &[(String, FieldValue)]) -> Result<(), WorkflowError> {
        let contract = self.editable(id)?;
        let mut fields = contract.fields.clone();
        for (key, value) in edits {
            let target = contract
                .resolve_field(key)
                .ok_or_else(|| FieldError::UnknownField { field: key.clone() })?
                .id();
            let field = fields
                .iter_mut()
                .find(|f| f.id() == target)
                .ok_or_else(|| FieldError::UnknownField { field: key.clone() })?;
            field.set_value(value.clone())?;
        }
        self.contracts.update_fields(id, fields)?;
        Ok(())
    }

    /// Replace every field of contract `id`.
    ///
    /// The replacement must keep the contract's layout: same number of
    /// fields, same ids and types, same order.
    pub fn replace_fields(&mut self, id: &str, fields: Vec<ContractField>) -> Result<(), WorkflowError> {
        let contract = self.editable(id)?;
        check_layout(&contract.fields, &fields)?;
        self.contracts.update_fields(id, fields)?;
        Ok(())
    }

    fn current_status(&self, id: &str) -> Result<ContractStatus, WorkflowError> {
        self.contracts
            .find_contract(id)
            .map(|c| c.status)
            .ok_or_else(|| WorkflowError::ContractNotFound { id: id.to_string() })
    }

    fn editable(&self, id: &str) -> Result<&Contract, WorkflowError> {
        let contract = self
            .contracts
            .find_contract(id)
            .ok_or_else(|| WorkflowError::ContractNotFound { id: id.to_string() })?;
        if !contract.status.can_edit() {
            tracing::warn!(contract_id = id, status = %contract.status, "edit refused");
            return Err(WorkflowError::NotEditable {
                id: id.to_string(),
                status: contract.status,
            });
        }
        Ok(contract)
    }
}

fn check_layout(current: &[ContractField], replacement: &[ContractField]) -> Result<(), FieldError> {
    if current.len() != replacement.len() {
        return Err(FieldError::LayoutMismatch {
            reason: format!(
                "expected {} fields, got {}",
                current.len(),
                replacement.len()
            ),
        });
    }
    for (i, (old, new)) in current.iter().zip(replacement).enumerate() {
        if old.id() != new.id() || old.field_type() != new.field_type() {
            return Err(FieldError::LayoutMismatch {
                reason: format!(
                    "field {i} is '{}' ({}), replacement has '{}' ({})",
                    old.id(),
                    old.field_type(),
                    new.id(),
                    new.field_type()
                ),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contractor_storage::MemoryStore;

    use crate::draft::{BlueprintDraft, ContractDraft};
    use crate::types::FieldType;

    fn repo_with(statuses: &[ContractStatus]) -> (ContractRepository<MemoryStore>, Vec<String>) {
        let mut bp_draft = BlueprintDraft::new();
        bp_draft.add_field(FieldType::Text, "Party Name").unwrap();
        bp_draft.add_field(FieldType::Checkbox, "Agree").unwrap();
        let bp = bp_draft.build("NDA").unwrap();

        let mut repo = ContractRepository::load(MemoryStore::new()).unwrap();
        let mut ids = Vec::new();
        for status in statuses {
            let mut draft = ContractDraft::new();
            draft.select(&bp);
            let mut contract = draft.create().unwrap();
            contract.status = *status;
            ids.push(contract.id.clone());
            repo.add_contract(contract).unwrap();
        }
        (repo, ids)
    }

    #[test]
    fn filters_select_expected_statuses() {
        use crate::types::ContractStatus::*;
        let (mut repo, _) = repo_with(&ContractStatus::ALL);
        let dashboard = Dashboard::new(&mut repo);
        let statuses = |f: DashboardFilter| -> Vec<ContractStatus> {
            dashboard.rows(f).into_iter().map(|r| r.status).collect()
        };
        assert_eq!(statuses(DashboardFilter::All), ContractStatus::ALL.to_vec());
        assert_eq!(statuses(DashboardFilter::Pending), vec![Created, Approved, Sent]);
        assert_eq!(statuses(DashboardFilter::Active), vec![Approved, Sent]);
        assert_eq!(statuses(DashboardFilter::Signed), vec![Signed, Locked]);
    }

    #[test]
    fn filter_parses_case_insensitively() {
        assert_eq!("pending".parse::<DashboardFilter>().unwrap(), DashboardFilter::Pending);
        assert!("archived".parse::<DashboardFilter>().is_err());
    }

    #[test]
    fn row_carries_color_date_and_actions() {
        let (mut repo, ids) = repo_with(&[ContractStatus::Sent]);
        let dashboard = Dashboard::new(&mut repo);
        let rows = dashboard.rows(DashboardFilter::All);
        let row = &rows[0];
        assert_eq!(row.id, ids[0]);
        assert_eq!(row.name, "NDA Contract");
        assert_eq!(row.blueprint_name, "NDA");
        assert_eq!(row.color.name, "amber");
        assert_eq!(row.created.len(), "2025-01-01".len());
        assert!(row.actions.contains(&Action::Revoke));
    }

    #[test]
    fn created_date_falls_back_to_raw_value() {
        assert_eq!(created_date("2024-03-09T23:59:59Z"), "2024-03-09");
        assert_eq!(created_date("yesterday"), "yesterday");
    }

    #[test]
    fn advance_walks_the_chain_then_refuses() {
        let (mut repo, ids) = repo_with(&[ContractStatus::Created]);
        let mut dashboard = Dashboard::new(&mut repo);
        let id = &ids[0];
        let mut seen = Vec::new();
        while let Ok(status) = dashboard.advance(id) {
            seen.push(status);
        }
        assert_eq!(
            seen,
            vec![
                ContractStatus::Approved,
                ContractStatus::Sent,
                ContractStatus::Signed,
                ContractStatus::Locked
            ]
        );
        assert!(matches!(
            dashboard.advance(id),
            Err(WorkflowError::NoSuccessor { status: ContractStatus::Locked, .. })
        ));
    }

    #[test]
    fn revoke_respects_guard() {
        let (mut repo, ids) = repo_with(&[ContractStatus::Approved, ContractStatus::Sent]);
        let mut dashboard = Dashboard::new(&mut repo);
        assert!(matches!(
            dashboard.revoke(&ids[0]),
            Err(WorkflowError::NotRevocable { status: ContractStatus::Approved, .. })
        ));
        dashboard.revoke(&ids[1]).unwrap();
        assert!(matches!(
            dashboard.revoke(&ids[1]),
            Err(WorkflowError::NotRevocable { status: ContractStatus::Revoked, .. })
        ));
        assert_eq!(repo.find_contract(&ids[0]).unwrap().status, ContractStatus::Approved);
        assert_eq!(repo.find_contract(&ids[1]).unwrap().status, ContractStatus::Revoked);
    }

    #[test]
    fn revoke_outcome_follows_permitted_transitions() {
        let (mut repo, ids) = repo_with(&ContractStatus::ALL);
        let mut dashboard = Dashboard::new(&mut repo);
        for (id, status) in ids.iter().zip(ContractStatus::ALL) {
            assert_eq!(
                dashboard.revoke(id).is_ok(),
                status.permits(ContractStatus::Revoked),
                "{status}"
            );
        }
    }

    #[test]
    fn unknown_contract_is_reported() {
        let (mut repo, _) = repo_with(&[]);
        let mut dashboard = Dashboard::new(&mut repo);
        assert!(matches!(
            dashboard.advance("ghost"),
            Err(WorkflowError::ContractNotFound { .. })
        ));
    }

    #[test]
    fn save_edits_by_label_and_id() {
        let (mut repo, ids) = repo_with(&[ContractStatus::Signed]);
        let agree_id = repo.find_contract(&ids[0]).unwrap().fields[1].id().to_string();
        let mut dashboard = Dashboard::new(&mut repo);
        dashboard
            .save_edits(
                &ids[0],
                &[
                    ("Party Name".to_string(), FieldValue::Text("Acme".into())),
                    (agree_id, FieldValue::Checked(true)),
                ],
            )
            .unwrap();
        let fields = &repo.find_contract(&ids[0]).unwrap().fields;
        assert_eq!(fields[0].value(), &FieldValue::Text("Acme".into()));
        assert_eq!(fields[1].value(), &FieldValue::Checked(true));
    }

    #[test]
    fn save_edits_is_all_or_nothing() {
        let (mut repo, ids) = repo_with(&[ContractStatus::Created]);
        let mut dashboard = Dashboard::new(&mut repo);
        let err = dashboard
            .save_edits(
                &ids[0],
                &[
                    ("Party Name".to_string(), FieldValue::Text("Acme".into())),
                    ("Agree".to_string(), FieldValue::Text("yes".into())),
                ],
            )
            .unwrap_err();
        assert!(matches!(err, WorkflowError::Field(FieldError::KindMismatch { .. })));
        assert_eq!(
            repo.find_contract(&ids[0]).unwrap().fields[0].value(),
            &FieldValue::Text(String::new())
        );
    }

    #[test]
    fn locked_and_revoked_contracts_are_read_only() {
        let (mut repo, ids) = repo_with(&[ContractStatus::Locked, ContractStatus::Revoked]);
        let mut dashboard = Dashboard::new(&mut repo);
        for id in &ids {
            let edit = [("Party Name".to_string(), FieldValue::Text("x".into()))];
            assert!(matches!(
                dashboard.save_edits(id, &edit),
                Err(WorkflowError::NotEditable { .. })
            ));
        }
    }

    #[test]
    fn replace_fields_checks_layout() {
        let (mut repo, ids) = repo_with(&[ContractStatus::Created]);
        let mut fields = repo.find_contract(&ids[0]).unwrap().fields.clone();
        let mut dashboard = Dashboard::new(&mut repo);

        let mut reversed = fields.clone();
        reversed.reverse();
        assert!(matches!(
            dashboard.replace_fields(&ids[0], reversed),
            Err(WorkflowError::Field(FieldError::LayoutMismatch { .. }))
        ));
        assert!(matches!(
            dashboard.replace_fields(&ids[0], fields[..1].to_vec()),
            Err(WorkflowError::Field(FieldError::LayoutMismatch { .. }))
        ));

        fields[1].set_value(FieldValue::Checked(true)).unwrap();
        dashboard.replace_fields(&ids[0], fields).unwrap();
        assert_eq!(
            repo.find_contract(&ids[0]).unwrap().fields[1].value(),
            &FieldValue::Checked(true)
        );
    }
}
