//! In-progress blueprint and contract forms.
//!
//! Invalid input (a blank label, a blank name, no fields, no selected
//! blueprint) is rejected by returning `None` and leaving the draft as it
//! was. Nothing is surfaced as an error.

use rand::Rng;

use crate::error::FieldError;
use crate::instantiate::instantiate_fields;
use crate::types::{
    new_id, now_timestamp, Blueprint, Contract, ContractField, FieldDef, FieldType, FieldValue,
    Position,
};

/// Fields being assembled into a new blueprint.
#[derive(Debug, Clone, Default)]
pub struct BlueprintDraft {
    fields: Vec<FieldDef>,
}

impl BlueprintDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Add a field at a random preview position. `None` if `label` is blank.
    pub fn add_field(&mut self, field_type: FieldType, label: &str) -> Option<&FieldDef> {
        self.add_field_with_rng(field_type, label, &mut rand::thread_rng())
    }

    pub fn add_field_with_rng<R: Rng>(
        &mut self,
        field_type: FieldType,
        label: &str,
        rng: &mut R,
    ) -> Option<&FieldDef> {
        if label.trim().is_empty() {
            return None;
        }
        self.fields.push(FieldDef::new(
            new_id(),
            field_type,
            label,
            Position::random(rng),
        ));
        self.fields.last()
    }

    /// Turn the draft into a blueprint named `name` and clear it.
    ///
    /// `None`, with the draft untouched, if the name is blank or there are
    /// no fields.
    pub fn build(&mut self, name: &str) -> Option<Blueprint> {
        if name.trim().is_empty() || self.fields.is_empty() {
            return None;
        }
        Some(Blueprint {
            id: new_id(),
            name: name.to_string(),
            fields: std::mem::take(&mut self.fields),
            created_at: now_timestamp(),
        })
    }
}

/// A contract being filled in from a selected blueprint.
#[derive(Debug, Clone, Default)]
pub struct ContractDraft {
    selected: Option<Blueprint>,
    fields: Vec<ContractField>,
}

impl ContractDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `blueprint` and reset the draft fields to its defaults.
    pub fn select(&mut self, blueprint: &Blueprint) {
        self.fields = instantiate_fields(&blueprint.fields);
        self.selected = Some(blueprint.clone());
    }

    /// Select the blueprint with `id` from `blueprints`.
    ///
    /// An unknown id clears the selection, so a following
    /// [`create`](Self::create) yields nothing. Returns whether it matched.
    pub fn select_by_id(&mut self, blueprints: &[Blueprint], id: &str) -> bool {
        match blueprints.iter().find(|b| b.id == id) {
            Some(blueprint) => {
                self.select(blueprint);
                true
            }
            None => {
                self.selected = None;
                self.fields.clear();
                false
            }
        }
    }

    pub fn selected(&self) -> Option<&Blueprint> {
        self.selected.as_ref()
    }

    pub fn fields(&self) -> &[ContractField] {
        &self.fields
    }

    /// Set the value of draft field `field_id`.
    pub fn set_value(&mut self, field_id: &str, value: FieldValue) -> Result<(), FieldError> {
        let field = self
            .fields
            .iter_mut()
            .find(|f| f.id() == field_id)
            .ok_or_else(|| FieldError::UnknownField {
                field: field_id.to_string(),
            })?;
        field.set_value(value)
    }

    /// Build a CREATED contract from the selection and clear the draft.
    pub fn create(&mut self) -> Option<Contract> {
        let blueprint = self.selected.take()?;
        let fields = std::mem::take(&mut self.fields);
        Some(Contract::from_blueprint(&blueprint, fields))
    }
}
