//! contractor-core: blueprints, contracts, and the contract workflow.
//!
//! Users design blueprints (named sets of positioned form fields), create
//! contracts from them by filling in values, and move each contract
//! through an approval and signing workflow.
//!
//! # Public API
//!
//! - [`types`] -- [`Blueprint`], [`Contract`], [`FieldDef`], [`ContractField`]
//!   and the [`ContractStatus`] enum
//! - [`instantiate_fields()`] -- blueprint fields to default-valued contract fields
//! - [`workflow`] -- status transitions, revoke/edit guards, display colors
//! - [`repository`] -- [`BlueprintRepository`] and [`ContractRepository`]
//!   over any [`contractor_storage::KeyValueStore`]
//! - [`draft`] -- the blueprint and contract creation forms
//! - [`dashboard`] -- filters, row actions, guarded advance/revoke/edit

pub mod dashboard;
pub mod draft;
pub mod error;
pub mod instantiate;
pub mod repository;
pub mod types;
pub mod workflow;

// ── Convenience re-exports: key types ────────────────────────────────

pub use dashboard::{Dashboard, DashboardFilter, DashboardRow};
pub use draft::{BlueprintDraft, ContractDraft};
pub use error::{FieldError, WorkflowError};
pub use instantiate::instantiate_fields;
pub use repository::{BlueprintRepository, ContractRepository, BLUEPRINTS_KEY, CONTRACTS_KEY};
pub use types::{
    Blueprint, Contract, ContractField, ContractStatus, FieldDef, FieldType, FieldValue, Position,
    ValueKind,
};
pub use workflow::{can_edit, can_revoke, next_status, status_color, Action, StatusColor};
