mod commands;
mod config;
mod output;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use contractor_core::{DashboardFilter, FieldType};

use crate::config::Config;
use crate::output::report_error;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Dashboard filter as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FilterArg {
    All,
    Pending,
    Active,
    Signed,
}

impl From<FilterArg> for DashboardFilter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::All => DashboardFilter::All,
            FilterArg::Pending => DashboardFilter::Pending,
            FilterArg::Active => DashboardFilter::Active,
            FilterArg::Signed => DashboardFilter::Signed,
        }
    }
}

/// Contractor: blueprints, contracts, and the contract signing workflow.
#[derive(Parser)]
#[command(
    name = "contractor",
    version,
    about = "Contract blueprints and signing workflow"
)]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Directory holding blueprints.json and contracts.json
    /// [default: $CONTRACTOR_DATA_DIR or ./.contractor]
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Design and browse blueprints
    Blueprint {
        #[command(subcommand)]
        command: BlueprintCommands,
    },

    /// Create contracts and move them through the workflow
    Contract {
        #[command(subcommand)]
        command: ContractCommands,
    },
}

#[derive(Subcommand)]
enum BlueprintCommands {
    /// Create a blueprint from one or more fields
    Create {
        /// Blueprint name
        #[arg(long)]
        name: String,
        /// Field as TYPE:LABEL (TEXT, DATE, SIGNATURE or CHECKBOX); repeatable
        #[arg(long = "field", value_parser = parse_field_spec)]
        fields: Vec<(FieldType, String)>,
    },

    /// List blueprints in creation order
    List,

    /// Show one blueprint and its field layout
    Show {
        /// Blueprint id
        id: String,
    },
}

#[derive(Subcommand)]
enum ContractCommands {
    /// Create a contract from a blueprint
    Create {
        /// Id of the source blueprint
        #[arg(long)]
        blueprint: String,
        /// Initial value as FIELD=VALUE, FIELD being a field id or label; repeatable
        #[arg(long = "value", value_parser = parse_assignment)]
        values: Vec<(String, String)>,
    },

    /// List contracts on the dashboard
    List {
        #[arg(long, default_value = "all", value_enum)]
        filter: FilterArg,
    },

    /// Show one contract with its fields and permitted actions
    Show {
        /// Contract id
        id: String,
    },

    /// Move a contract to its next workflow status
    Advance {
        /// Contract id
        id: String,
    },

    /// Revoke a CREATED or SENT contract
    Revoke {
        /// Contract id
        id: String,
    },

    /// Change field values of an editable contract
    Edit {
        /// Contract id
        id: String,
        /// New value as FIELD=VALUE, FIELD being a field id or label; repeatable
        #[arg(long = "value", value_parser = parse_assignment, required = true)]
        values: Vec<(String, String)>,
    },
}

fn parse_field_spec(s: &str) -> Result<(FieldType, String), String> {
    let (kind, label) = s
        .split_once(':')
        .ok_or_else(|| format!("expected TYPE:LABEL, got '{s}'"))?;
    let field_type: FieldType = kind.trim().parse()?;
    Ok((field_type, label.to_string()))
}

fn parse_assignment(s: &str) -> Result<(String, String), String> {
    let (field, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{s}'"))?;
    if field.is_empty() {
        return Err(format!("missing field name in '{s}'"));
    }
    Ok((field.to_string(), value.to_string()))
}

fn main() {
    let cli = Cli::parse();
    config::init_logging();

    let config = Config::resolve(cli.data_dir);
    let ctx = commands::Context {
        config,
        output: cli.output,
        quiet: cli.quiet,
    };

    let result = match cli.command {
        Commands::Blueprint { command } => match command {
            BlueprintCommands::Create { name, fields } => {
                commands::blueprint::cmd_create(&ctx, &name, &fields)
            }
            BlueprintCommands::List => commands::blueprint::cmd_list(&ctx),
            BlueprintCommands::Show { id } => commands::blueprint::cmd_show(&ctx, &id),
        },
        Commands::Contract { command } => match command {
            ContractCommands::Create { blueprint, values } => {
                commands::contract::cmd_create(&ctx, &blueprint, &values)
            }
            ContractCommands::List { filter } => commands::contract::cmd_list(&ctx, filter.into()),
            ContractCommands::Show { id } => commands::contract::cmd_show(&ctx, &id),
            ContractCommands::Advance { id } => commands::contract::cmd_advance(&ctx, &id),
            ContractCommands::Revoke { id } => commands::contract::cmd_revoke(&ctx, &id),
            ContractCommands::Edit { id, values } => {
                commands::contract::cmd_edit(&ctx, &id, &values)
            }
        },
    };

    if let Err(msg) = result {
        report_error(&msg, ctx.output, ctx.quiet);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_spec_splits_on_first_colon() {
        assert_eq!(
            parse_field_spec("text:Time: start").unwrap(),
            (FieldType::Text, "Time: start".to_string())
        );
        assert!(parse_field_spec("Party Name").is_err());
        assert!(parse_field_spec("RADIO:Choice").is_err());
    }

    #[test]
    fn assignment_allows_empty_value() {
        assert_eq!(
            parse_assignment("Party Name=").unwrap(),
            ("Party Name".to_string(), String::new())
        );
        assert_eq!(
            parse_assignment("a=b=c").unwrap(),
            ("a".to_string(), "b=c".to_string())
        );
        assert!(parse_assignment("=x").is_err());
        assert!(parse_assignment("novalue").is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
