use contractor_storage::StorageError;

use crate::types::{ContractStatus, FieldType, ValueKind};

/// A field value did not fit the field it was meant for.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// The value's kind does not match the field's declared type.
    #[error("field '{field_id}' ({field_type}) takes a {expected} value, got a {got} value")]
    KindMismatch {
        field_id: String,
        field_type: FieldType,
        expected: ValueKind,
        got: ValueKind,
    },

    /// Raw input could not be read as a value for this field.
    #[error("invalid value for field '{field_id}' ({field_type}): {reason}")]
    InvalidValue {
        field_id: String,
        field_type: FieldType,
        reason: String,
    },

    /// No field with this id (or label) exists on the contract or draft.
    #[error("unknown field '{field}'")]
    UnknownField { field: String },

    /// A replacement field list does not line up with the contract's fields.
    #[error("field layout mismatch: {reason}")]
    LayoutMismatch { reason: String },
}

/// A dashboard action was refused or could not be persisted.
///
/// Refusals never change state; the contract is left as it was.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("contract not found: {id}")]
    ContractNotFound { id: String },

    /// The contract is in a terminal status.
    #[error("contract {id} is {status} and cannot advance")]
    NoSuccessor { id: String, status: ContractStatus },

    #[error("contract {id} is {status} and cannot be revoked")]
    NotRevocable { id: String, status: ContractStatus },

    #[error("contract {id} is {status} and cannot be edited")]
    NotEditable { id: String, status: ContractStatus },

    #[error(transparent)]
    Field(#[from] FieldError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
