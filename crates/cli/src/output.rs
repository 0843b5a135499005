//! Text and JSON rendering of command results.

use contractor_core::{Action, Blueprint, Contract, DashboardRow, FieldValue};
use serde::Serialize;

use crate::OutputFormat;

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("error: {}", msg),
        OutputFormat::Json => eprintln!("{}", serde_json::json!({ "error": msg })),
    }
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), String> {
    let encoded = serde_json::to_string_pretty(value)
        .map_err(|e| format!("internal error: failed to encode output: {}", e))?;
    println!("{}", encoded);
    Ok(())
}

pub(crate) fn blueprint_summary(bp: &Blueprint) -> String {
    let noun = if bp.fields.len() == 1 { "field" } else { "fields" };
    format!("{}  {} ({} {})", bp.id, bp.name, bp.fields.len(), noun)
}

pub(crate) fn blueprint_detail(bp: &Blueprint) -> String {
    let mut out = format!("{}\n  id:      {}\n  created: {}\n  fields:\n", bp.name, bp.id, bp.created_at);
    for f in &bp.fields {
        out.push_str(&format!(
            "    {} ({}) at ({}, {})  [{}]\n",
            f.label, f.field_type, f.position.x, f.position.y, f.id
        ));
    }
    out
}

fn action_label(action: &Action) -> String {
    match action {
        Action::View => "view".to_string(),
        Action::Edit => "edit".to_string(),
        Action::Advance { to } => format!("move to {}", to),
        Action::Revoke => "revoke".to_string(),
    }
}

fn actions_label(actions: &[Action]) -> String {
    actions.iter().map(action_label).collect::<Vec<_>>().join(", ")
}

pub(crate) fn dashboard_table(rows: &[DashboardRow]) -> String {
    if rows.is_empty() {
        return "No contracts.\n".to_string();
    }
    let header = ["ID", "CONTRACT", "BLUEPRINT", "STATUS", "CREATED", "ACTIONS"];
    let cells: Vec<[String; 6]> = rows
        .iter()
        .map(|r| {
            [
                r.id.clone(),
                r.name.clone(),
                r.blueprint_name.clone(),
                r.status.to_string(),
                r.created.clone(),
                actions_label(&r.actions),
            ]
        })
        .collect();

    let mut widths = header.map(|h| h.chars().count());
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let mut push_line = |cols: Vec<&str>| {
        let line = cols
            .iter()
            .zip(widths)
            .map(|(c, w)| format!("{:<w$}", c, w = w))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(line.trim_end());
        out.push('\n');
    };
    push_line(header.to_vec());
    for row in &cells {
        push_line(row.iter().map(String::as_str).collect());
    }
    out
}

fn display_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Text(s) if s.is_empty() => "-".to_string(),
        FieldValue::Text(s) => s.clone(),
        FieldValue::Checked(true) => "[x]".to_string(),
        FieldValue::Checked(false) => "[ ]".to_string(),
    }
}

pub(crate) fn contract_detail(contract: &Contract) -> String {
    let color = contract.status.color();
    let mut out = format!(
        "{}\n  id:        {}\n  blueprint: {} ({})\n  status:    {} [{}]\n  created:   {}\n  actions:   {}\n  fields:\n",
        contract.name,
        contract.id,
        contract.blueprint_name,
        contract.blueprint_id,
        contract.status,
        color.name,
        contract.created_at,
        actions_label(&contract.status.actions()),
    );
    for f in &contract.fields {
        out.push_str(&format!(
            "    {} ({}): {}\n",
            f.label(),
            f.field_type(),
            display_value(f.value())
        ));
    }
    out
}
