//! Convert command - one-shot snippet → SVG

use crate::context::Context;
use crate::output::print_text;
use anyhow::{Context as _, Result, anyhow};
use colored::Colorize;
use std::fs;
use std::io::Read;
use std::path::Path;
use tex2svg_core::template::{DEFAULT_TEMPLATE, compose, contains_marker};
use tex2svg_toolchain::{Toolchain, WorkingArea, convert};
use tracing::warn;

pub fn run(
    config_path: Option<&Path>,
    snippet: &Path,
    template: Option<&Path>,
    output: &Path,
    verbose: bool,
) -> Result<()> {
    let ctx = Context::new(config_path, verbose)?;

    let latex = read_snippet(snippet)?;
    let template = load_template(&ctx, template)?;
    if !contains_marker(&template) {
        warn!("template has no %%content%% marker; the snippet will be ignored");
    }
    let document = compose(&template, &latex);

    let toolchain = Toolchain::from(&ctx.config.toolchain);
    let area = WorkingArea::acquire(&ctx.config.paths.work_dir())?;
    let conversion = match convert(&toolchain, &document, &area) {
        Ok(conversion) => conversion,
        Err(e) if e.is_tool_failure() => return Err(anyhow!("Error during conversion:\n{}", e)),
        Err(e) => return Err(e.into()),
    };

    fs::write(output, &conversion.svg)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    if ctx.verbose {
        print_text(&format!(
            "  {} {}ms, {} {}ms",
            toolchain.typesetter,
            conversion.typeset.duration_ms,
            toolchain.converter,
            conversion.convert.duration_ms
        ))?;
    }
    if let Err(e) = area.close() {
        warn!("failed to remove working area: {}", e);
    }

    print_text(&format!(
        "{} Wrote {} ({} bytes)",
        "✓".green(),
        output.display(),
        conversion.svg.len()
    ))?;
    Ok(())
}

fn read_snippet(snippet: &Path) -> Result<String> {
    if snippet.as_os_str() == "-" {
        let mut latex = String::new();
        std::io::stdin()
            .read_to_string(&mut latex)
            .context("Failed to read snippet from stdin")?;
        return Ok(latex);
    }
    fs::read_to_string(snippet).with_context(|| format!("Failed to read {}", snippet.display()))
}

/// An explicit `--template` must be readable; the configured one falls back
/// to the bundled template like the web form does
fn load_template(ctx: &Context, explicit: Option<&Path>) -> Result<String> {
    if let Some(path) = explicit {
        return fs::read_to_string(path)
            .with_context(|| format!("Failed to read template {}", path.display()));
    }

    let path = &ctx.config.paths.template;
    match fs::read_to_string(path) {
        Ok(template) => Ok(template),
        Err(e) => {
            warn!(
                "cannot read template {}: {}; using bundled template",
                path.display(),
                e
            );
            Ok(DEFAULT_TEMPLATE.to_string())
        }
    }
}
