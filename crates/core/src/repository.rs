//! Blueprint and contract repositories.
//!
//! Each repository owns its records in memory and mirrors the full
//! collection to one key of a [`KeyValueStore`]: loaded once on
//! construction, rewritten after every mutation. If a write fails the
//! in-memory collection is rolled back so memory and store agree.

use contractor_storage::{KeyValueStore, StorageError};

use crate::types::{Blueprint, Contract, ContractField, ContractStatus};

/// Store key holding the blueprint collection.
pub const BLUEPRINTS_KEY: &str = "blueprints";
/// Store key holding the contract collection.
pub const CONTRACTS_KEY: &str = "contracts";

/// Append-only collection of blueprints.
#[derive(Debug)]
pub struct BlueprintRepository<S> {
    store: S,
    blueprints: Vec<Blueprint>,
}

impl<S: KeyValueStore> BlueprintRepository<S> {
    /// Load the collection from `store`, empty if never written.
    pub fn load(store: S) -> Result<Self, StorageError> {
        let blueprints: Vec<Blueprint> = store.get(BLUEPRINTS_KEY, Vec::new())?;
        tracing::debug!(count = blueprints.len(), "loaded blueprints");
        Ok(Self { store, blueprints })
    }

    /// Append a blueprint and persist the collection.
    pub fn add_blueprint(&mut self, blueprint: Blueprint) -> Result<(), StorageError> {
        let id = blueprint.id.clone();
        self.blueprints.push(blueprint);
        if let Err(e) = self.store.set(BLUEPRINTS_KEY, &self.blueprints) {
            self.blueprints.pop();
            return Err(e);
        }
        tracing::info!(blueprint_id = %id, "blueprint added");
        Ok(())
    }

    /// All blueprints in insertion order.
    pub fn list_blueprints(&self) -> &[Blueprint] {
        &self.blueprints
    }

    pub fn find_blueprint(&self, id: &str) -> Option<&Blueprint> {
        self.blueprints.iter().find(|b| b.id == id)
    }
}

/// Collection of contracts with in-place status and field updates.
///
/// Updates on an unknown id are silent no-ops and report `Ok(false)`.
/// Transition legality is not checked here; see [`crate::dashboard`].
#[derive(Debug)]
pub struct ContractRepository<S> {
    store: S,
    contracts: Vec<Contract>,
}

impl<S: KeyValueStore> ContractRepository<S> {
    /// Load the collection from `store`, empty if never written.
    pub fn load(store: S) -> Result<Self, StorageError> {
        let contracts: Vec<Contract> = store.get(CONTRACTS_KEY, Vec::new())?;
        tracing::debug!(count = contracts.len(), "loaded contracts");
        Ok(Self { store, contracts })
    }

    /// Append a contract and persist the collection.
    pub fn add_contract(&mut self, contract: Contract) -> Result<(), StorageError> {
        let id = contract.id.clone();
        self.contracts.push(contract);
        if let Err(e) = self.persist() {
            self.contracts.pop();
            return Err(e);
        }
        tracing::info!(contract_id = %id, "contract added");
        Ok(())
    }

    /// All contracts in insertion order.
    pub fn list_contracts(&self) -> &[Contract] {
        &self.contracts
    }

    pub fn find_contract(&self, id: &str) -> Option<&Contract> {
        self.contracts.iter().find(|c| c.id == id)
    }

    /// Set the status of contract `id`. Returns whether a contract matched.
    pub fn update_status(&mut self, id: &str, status: ContractStatus) -> Result<bool, StorageError> {
        let Some(index) = self.position(id) else {
            return Ok(false);
        };
        let previous = std::mem::replace(&mut self.contracts[index].status, status);
        if let Err(e) = self.persist() {
            self.contracts[index].status = previous;
            return Err(e);
        }
        tracing::info!(contract_id = id, from = %previous, to = %status, "contract status updated");
        Ok(true)
    }

    /// Replace the fields of contract `id`. Returns whether a contract matched.
    pub fn update_fields(
        &mut self,
        id: &str,
        fields: Vec<ContractField>,
    ) -> Result<bool, StorageError> {
        let Some(index) = self.position(id) else {
            return Ok(false);
        };
        let previous = std::mem::replace(&mut self.contracts[index].fields, fields);
        if let Err(e) = self.persist() {
            self.contracts[index].fields = previous;
            return Err(e);
        }
        tracing::info!(contract_id = id, "contract fields updated");
        Ok(true)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.contracts.iter().position(|c| c.id == id)
    }

    fn persist(&self) -> Result<(), StorageError> {
        self.store.set(CONTRACTS_KEY, &self.contracts)
    }
}
