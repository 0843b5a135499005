use contractor_core::{
    Contract, ContractDraft, ContractStatus, Dashboard, DashboardFilter, FieldValue,
};

use super::Context;
use crate::output::{contract_detail, dashboard_table, print_json};
use crate::OutputFormat;

pub(crate) fn cmd_create(ctx: &Context, blueprint_id: &str, values: &[(String, String)]) -> Result<(), String> {
    let blueprints = ctx.blueprints()?;
    let mut draft = ContractDraft::new();
    if !draft.select_by_id(blueprints.list_blueprints(), blueprint_id) {
        return Err(format!("blueprint not found: {}", blueprint_id));
    }

    for (key, raw) in values {
        let def = draft
            .fields()
            .iter()
            .find(|f| f.id() == key)
            .or_else(|| draft.fields().iter().find(|f| f.label() == key))
            .map(|f| f.definition().clone())
            .ok_or_else(|| format!("unknown field '{}'", key))?;
        let value = FieldValue::parse_for(&def, raw).map_err(|e| e.to_string())?;
        draft.set_value(&def.id, value).map_err(|e| e.to_string())?;
    }

    let contract = draft
        .create()
        .ok_or_else(|| format!("blueprint not found: {}", blueprint_id))?;
    let mut contracts = ctx.contracts()?;
    contracts
        .add_contract(contract.clone())
        .map_err(|e| e.to_string())?;

    match ctx.output {
        OutputFormat::Json => print_json(&contract),
        OutputFormat::Text => {
            ctx.note(&format!("Created contract '{}'", contract.name));
            println!("{}", contract.id);
            Ok(())
        }
    }
}

pub(crate) fn cmd_list(ctx: &Context, filter: DashboardFilter) -> Result<(), String> {
    let mut contracts = ctx.contracts()?;
    let rows = Dashboard::new(&mut contracts).rows(filter);
    match ctx.output {
        OutputFormat::Json => print_json(&rows),
        OutputFormat::Text => {
            print!("{}", dashboard_table(&rows));
            Ok(())
        }
    }
}

pub(crate) fn cmd_show(ctx: &Context, id: &str) -> Result<(), String> {
    let contracts = ctx.contracts()?;
    let contract = find(contracts.list_contracts(), id)?;
    match ctx.output {
        OutputFormat::Json => print_json(contract),
        OutputFormat::Text => {
            print!("{}", contract_detail(contract));
            Ok(())
        }
    }
}

pub(crate) fn cmd_advance(ctx: &Context, id: &str) -> Result<(), String> {
    let mut contracts = ctx.contracts()?;
    let status = Dashboard::new(&mut contracts)
        .advance(id)
        .map_err(|e| e.to_string())?;
    report_status(ctx, id, status)
}

pub(crate) fn cmd_revoke(ctx: &Context, id: &str) -> Result<(), String> {
    let mut contracts = ctx.contracts()?;
    Dashboard::new(&mut contracts)
        .revoke(id)
        .map_err(|e| e.to_string())?;
    report_status(ctx, id, ContractStatus::Revoked)
}

pub(crate) fn cmd_edit(ctx: &Context, id: &str, values: &[(String, String)]) -> Result<(), String> {
    let mut contracts = ctx.contracts()?;
    let contract = find(contracts.list_contracts(), id)?;

    let mut edits = Vec::with_capacity(values.len());
    for (key, raw) in values {
        let field = contract
            .resolve_field(key)
            .ok_or_else(|| format!("unknown field '{}'", key))?;
        let value = FieldValue::parse_for(field.definition(), raw).map_err(|e| e.to_string())?;
        edits.push((field.id().to_string(), value));
    }

    Dashboard::new(&mut contracts)
        .save_edits(id, &edits)
        .map_err(|e| e.to_string())?;

    let updated = find(contracts.list_contracts(), id)?;
    match ctx.output {
        OutputFormat::Json => print_json(updated),
        OutputFormat::Text => {
            ctx.note(&format!("Saved {} field(s) on '{}'", edits.len(), updated.name));
            Ok(())
        }
    }
}

fn find<'a>(contracts: &'a [Contract], id: &str) -> Result<&'a Contract, String> {
    contracts
        .iter()
        .find(|c| c.id == id)
        .ok_or_else(|| format!("contract not found: {}", id))
}

fn report_status(ctx: &Context, id: &str, status: ContractStatus) -> Result<(), String> {
    match ctx.output {
        OutputFormat::Json => print_json(&serde_json::json!({ "id": id, "status": status })),
        OutputFormat::Text => {
            println!("{}", status);
            Ok(())
        }
    }
}
