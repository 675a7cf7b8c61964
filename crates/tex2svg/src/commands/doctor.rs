//! Doctor command - environment health check

use crate::context::Context;
use crate::output::{print_json, print_text};
use anyhow::Result;
use chrono::Utc;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tex2svg_core::template::contains_marker;
use tex2svg_toolchain::{ResolveOptions, ResolveResult, ToolKind, resolve_tool};

/// Doctor command JSON output schema
#[derive(Debug, Serialize, Deserialize)]
struct DoctorOutput {
    schema_version: String,
    config: ConfigInfo,
    timestamp: String,
    checks: Vec<Check>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ConfigInfo {
    source: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Check {
    id: String,
    name: String,
    status: CheckStatus,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<BTreeMap<String, serde_json::Value>>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}

/// Run environment health check
///
/// Always returns Ok(()) - problems are reported in the output, not the
/// exit code.
pub fn run(config_path: Option<&Path>, json: bool, verbose: bool) -> Result<()> {
    let ctx_result = Context::new(config_path, verbose);

    let mut checks = Vec::new();

    // Check 1: Config validity
    let config_info = match &ctx_result {
        Ok(ctx) => {
            checks.push(Check {
                id: "config_valid".to_string(),
                name: "Configuration".to_string(),
                status: CheckStatus::Ok,
                message: format!("Loaded from {}", ctx.source),
                details: None,
            });
            ConfigInfo {
                source: ctx.source.to_string(),
            }
        }
        Err(e) => {
            checks.push(Check {
                id: "config_valid".to_string(),
                name: "Configuration".to_string(),
                status: CheckStatus::Error,
                message: e.to_string(),
                details: None,
            });
            ConfigInfo {
                source: config_path
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "unknown".to_string()),
            }
        }
    };

    // Checks 2-4 need a loaded config
    if let Ok(ctx) = &ctx_result {
        checks.push(tool_check(
            "typesetter_available",
            ToolKind::Typesetter,
            &ctx.config.toolchain.typesetter,
        ));
        checks.push(tool_check(
            "converter_available",
            ToolKind::Converter,
            &ctx.config.toolchain.converter,
        ));
        checks.push(template_check(&ctx.config.paths.template));
    }

    let output = DoctorOutput {
        schema_version: "1.0".to_string(),
        config: config_info,
        timestamp: Utc::now().to_rfc3339(),
        checks,
    };

    if json {
        print_json(&serde_json::to_string_pretty(&output)?)?;
    } else {
        print_human_readable(&output)?;
    }

    Ok(())
}

fn tool_check(id: &str, kind: ToolKind, program: &str) -> Check {
    let name = format!("{} ({})", kind, program);

    match resolve_tool(ResolveOptions::new(kind, program)) {
        ResolveResult::Resolved(info) => {
            let mut details = BTreeMap::new();
            details.insert(
                "path".to_string(),
                serde_json::Value::String(info.path.display().to_string()),
            );
            details.insert(
                "source".to_string(),
                serde_json::Value::String(info.source.to_string()),
            );
            if let Some(version) = &info.version {
                details.insert(
                    "version".to_string(),
                    serde_json::Value::String(version.clone()),
                );
            }

            Check {
                id: id.to_string(),
                name,
                status: CheckStatus::Ok,
                message: format!("Found at {}", info.path.display()),
                details: Some(details),
            }
        }
        ResolveResult::NotFound {
            program,
            searched_locations,
        } => {
            let mut details = BTreeMap::new();
            details.insert(
                "searched_locations".to_string(),
                serde_json::Value::Array(
                    searched_locations
                        .iter()
                        .map(|s| serde_json::Value::String(s.clone()))
                        .collect(),
                ),
            );

            Check {
                id: id.to_string(),
                name,
                status: CheckStatus::Error,
                message: format!("'{}' not found; conversions will fail", program),
                details: Some(details),
            }
        }
    }
}

fn template_check(path: &Path) -> Check {
    let (status, message) = match std::fs::read_to_string(path) {
        Ok(template) if contains_marker(&template) => {
            (CheckStatus::Ok, format!("{} is readable", path.display()))
        }
        Ok(_) => (
            CheckStatus::Warning,
            format!(
                "{} has no %%content%% marker; snippets will be ignored",
                path.display()
            ),
        ),
        Err(e) => (
            CheckStatus::Warning,
            format!(
                "cannot read {} ({}); the bundled template will be used",
                path.display(),
                e
            ),
        ),
    };

    Check {
        id: "template_readable".to_string(),
        name: "Document template".to_string(),
        status,
        message,
        details: None,
    }
}

fn print_human_readable(output: &DoctorOutput) -> std::io::Result<()> {
    print_text(&"Environment Health Check".bold().to_string())?;
    print_text("")?;
    print_text(&format!("Config: {}", output.config.source))?;
    print_text("")?;

    print_text(&"Checks:".bold().to_string())?;
    for check in &output.checks {
        let status_str = match check.status {
            CheckStatus::Ok => "✓".green(),
            CheckStatus::Warning => "⚠".yellow(),
            CheckStatus::Error => "✗".red(),
        };
        print_text(&format!(
            "  {} {}: {}",
            status_str,
            check.name.bold(),
            check.message
        ))?;

        if let Some(details) = &check.details {
            for (key, value) in details {
                print_text(&format!("      {}: {}", key, value))?;
            }
        }
    }

    print_text("")?;
    print_text(&format!("Timestamp: {}", output.timestamp))
}
