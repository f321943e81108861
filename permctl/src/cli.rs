//! Command definitions and execution

use access_core::{
    CompanyAccess, Config, ModulePermissions, NamedPermission, PermissionId, PermissionMapper,
};
use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::{Value, json};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "permctl",
    version,
    about = "Convert permission payloads between UI and backend shapes"
)]
pub struct Cli {
    /// Permission catalog JSON file (defaults to the built-in table)
    #[arg(long, global = true, env = "ACCESS_CATALOG_PATH")]
    pub catalog: Option<PathBuf>,

    /// Read input JSON from a file instead of stdin
    #[arg(short, long, global = true)]
    pub input: Option<PathBuf>,

    /// Print compact JSON
    #[arg(long, global = true)]
    pub compact: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Module permissions object -> id array
    ToIds,
    /// Id array -> module permissions object
    ToModules,
    /// `{id, name}` array -> module permissions object
    FromNamed,
    /// Company access array -> outbound payload array
    Normalize,
    /// Report `{id, name}` records that disagree with the catalog
    CheckNames,
    /// Print the permission catalog
    Catalog,
}

impl Command {
    fn reads_input(&self) -> bool {
        !matches!(self, Self::Catalog)
    }
}

/// Result of one command
#[derive(Debug)]
pub struct Outcome {
    pub output: Value,
    /// false when the command found problems (exit status 1)
    pub clean: bool,
}

impl Outcome {
    fn ok(output: Value) -> Self {
        Self { output, clean: true }
    }
}

pub fn run(cli: &Cli, config: &Config) -> anyhow::Result<ExitCode> {
    let catalog = config
        .load_catalog()
        .context("failed to load permission catalog")?;
    let mapper = PermissionMapper::new(&catalog).with_config(config);

    let input = if cli.command.reads_input() {
        read_input(cli.input.as_deref())?
    } else {
        String::new()
    };

    let outcome = execute(cli.command, &mapper, &input)?;
    let rendered = if cli.compact {
        serde_json::to_string(&outcome.output)?
    } else {
        serde_json::to_string_pretty(&outcome.output)?
    };
    println!("{rendered}");

    Ok(if outcome.clean {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

pub fn execute(command: Command, mapper: &PermissionMapper<'_>, input: &str) -> anyhow::Result<Outcome> {
    let outcome = match command {
        Command::ToIds => {
            let perms: ModulePermissions =
                serde_json::from_str(input).context("expected an object of module -> actions")?;
            Outcome::ok(json!(mapper.to_permission_ids(&perms)))
        }
        Command::ToModules => {
            let ids: Vec<PermissionId> =
                serde_json::from_str(input).context("expected an array of permission ids")?;
            Outcome::ok(json!(mapper.to_module_permissions(ids)))
        }
        Command::FromNamed => {
            let named: Vec<NamedPermission> =
                serde_json::from_str(input).context("expected an array of {id, name} records")?;
            Outcome::ok(json!(mapper.to_module_permissions_from_named(&named)))
        }
        Command::Normalize => {
            let accesses: Vec<CompanyAccess> =
                serde_json::from_str(input).context("expected an array of company access records")?;
            Outcome::ok(json!(mapper.normalize_company_access(&accesses)))
        }
        Command::CheckNames => {
            let named: Vec<NamedPermission> =
                serde_json::from_str(input).context("expected an array of {id, name} records")?;
            let mismatches = mapper.find_name_mismatches(&named);
            if !mismatches.is_empty() {
                tracing::warn!(count = mismatches.len(), "permission names disagree with catalog");
            }
            Outcome {
                clean: mismatches.is_empty(),
                output: json!(mismatches),
            }
        }
        Command::Catalog => {
            let rows: Vec<Value> = mapper
                .catalog()
                .entries()
                .iter()
                .map(|e| {
                    json!({
                        "module": e.module,
                        "action": e.action,
                        "id": e.id,
                        "label": e.label(),
                    })
                })
                .collect();
            Outcome::ok(Value::Array(rows))
        }
    };
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn exec(command: Command, input: &str) -> Outcome {
        execute(command, &PermissionMapper::builtin(), input).unwrap()
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_subcommand_with_global_flags() {
        let cli = Cli::try_parse_from(["permctl", "normalize", "--input", "access.json", "--compact"])
            .unwrap();
        assert_eq!(cli.command, Command::Normalize);
        assert_eq!(cli.input, Some(PathBuf::from("access.json")));
        assert!(cli.compact);
    }

    #[test]
    fn test_to_ids() {
        let out = exec(Command::ToIds, r#"{ "sales": ["View", "Edit"], "hr": ["View"] }"#);
        assert!(out.clean);
        assert_eq!(out.output, json!([21, 23]));
    }

    #[test]
    fn test_to_modules() {
        let out = exec(Command::ToModules, "[5, 99999, 6]");
        assert_eq!(out.output, json!({ "inventory": ["View", "Add"] }));
    }

    #[test]
    fn test_to_modules_drops_out_of_range_ids() {
        let out = exec(Command::ToModules, "[-1, 4294967296, 21]");
        assert!(out.clean);
        assert_eq!(out.output, json!({ "sales": ["View"] }));
    }

    #[test]
    fn test_from_named_drops_out_of_range_ids() {
        let out = exec(
            Command::FromNamed,
            r#"[{ "id": -5, "name": "x" }, { "id": 4294967296, "name": "y" }, { "id": 21, "name": "sales:view" }]"#,
        );
        assert_eq!(out.output, json!({ "sales": ["View"] }));
    }

    #[test]
    fn test_from_named() {
        let out = exec(Command::FromNamed, r#"[{ "id": 21, "name": "WrongLabel" }]"#);
        assert_eq!(out.output, json!({ "sales": ["View"] }));
    }

    #[test]
    fn test_normalize() {
        let out = exec(
            Command::Normalize,
            r#"[{ "companyId": 7, "roleName": "User", "modulePermissions": { "sales": ["View"] } }]"#,
        );
        assert_eq!(out.output, json!([{ "companyId": 7, "roleId": 3, "permissionIds": [21] }]));
    }

    #[test]
    fn test_check_names_marks_mismatches() {
        let out = exec(
            Command::CheckNames,
            r#"[{ "id": 21, "name": "sales:view" }, { "id": 1, "name": "WrongLabel" }]"#,
        );
        assert!(!out.clean);
        assert_eq!(
            out.output,
            json!([{ "id": 1, "supplied": "WrongLabel", "expected": "purchase:view" }])
        );

        let out = exec(Command::CheckNames, r#"[{ "id": 12, "name": "finance:delete" }]"#);
        assert!(out.clean);
    }

    #[test]
    fn test_catalog_listing() {
        let out = exec(Command::Catalog, "");
        let rows = out.output.as_array().unwrap();
        assert_eq!(rows.len(), 16);
        assert_eq!(
            rows[0],
            json!({ "module": "sales", "action": "View", "id": 21, "label": "sales:view" })
        );
    }

    #[test]
    fn test_malformed_input() {
        let err = execute(Command::ToModules, &PermissionMapper::builtin(), "{}").unwrap_err();
        assert!(err.to_string().contains("expected an array of permission ids"));
    }
}
