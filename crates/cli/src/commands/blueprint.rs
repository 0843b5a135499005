use contractor_core::{BlueprintDraft, FieldType};

use super::Context;
use crate::output::{blueprint_detail, blueprint_summary, print_json};
use crate::OutputFormat;

pub(crate) fn cmd_create(ctx: &Context, name: &str, fields: &[(FieldType, String)]) -> Result<(), String> {
    let mut draft = BlueprintDraft::new();
    for (field_type, label) in fields {
        if draft.add_field(*field_type, label).is_none() {
            return Err(format!("{} field has a blank label", field_type));
        }
    }
    let blueprint = draft
        .build(name)
        .ok_or_else(|| "a blueprint needs a non-blank name and at least one --field".to_string())?;

    let mut repo = ctx.blueprints()?;
    repo.add_blueprint(blueprint.clone())
        .map_err(|e| e.to_string())?;

    match ctx.output {
        OutputFormat::Json => print_json(&blueprint),
        OutputFormat::Text => {
            ctx.note(&format!("Created blueprint '{}'", blueprint.name));
            println!("{}", blueprint.id);
            Ok(())
        }
    }
}

pub(crate) fn cmd_list(ctx: &Context) -> Result<(), String> {
    let repo = ctx.blueprints()?;
    let blueprints = repo.list_blueprints();
    match ctx.output {
        OutputFormat::Json => print_json(blueprints),
        OutputFormat::Text => {
            if blueprints.is_empty() {
                ctx.note("No blueprints.");
            }
            for bp in blueprints {
                println!("{}", blueprint_summary(bp));
            }
            Ok(())
        }
    }
}

pub(crate) fn cmd_show(ctx: &Context, id: &str) -> Result<(), String> {
    let repo = ctx.blueprints()?;
    let blueprint = repo
        .find_blueprint(id)
        .ok_or_else(|| format!("blueprint not found: {}", id))?;
    match ctx.output {
        OutputFormat::Json => print_json(blueprint),
        OutputFormat::Text => {
            print!("{}", blueprint_detail(blueprint));
            Ok(())
        }
    }
}
