//! Blueprint field definitions → contract fields.

use crate::types::{ContractField, FieldDef};

/// Produce one contract field per blueprint field, in order.
///
/// Each output copies the definition's id, type, label and position and
/// carries its type's default value: `false` for CHECKBOX, `""` otherwise.
pub fn instantiate_fields(blueprint_fields: &[FieldDef]) -> Vec<ContractField> {
    blueprint_fields
        .iter()
        .cloned()
        .map(ContractField::with_default)
        .collect()
}
