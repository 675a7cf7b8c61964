use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::exec::{ExecOptions, exec_tool};
use crate::info::{ToolInfo, ToolKind, ToolSource};

/// Options for resolving a tool binary
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    pub kind: ToolKind,
    /// Program name or path, as configured
    pub program: String,
    /// PATH to search instead of the process environment's
    pub search_path: Option<OsString>,
}

impl ResolveOptions {
    pub fn new(kind: ToolKind, program: impl Into<String>) -> Self {
        Self {
            kind,
            program: program.into(),
            search_path: None,
        }
    }
}

/// Result of tool resolution
#[derive(Debug, Clone)]
pub enum ResolveResult {
    Resolved(ToolInfo),
    NotFound {
        program: String,
        searched_locations: Vec<String>,
    },
}

impl ResolveResult {
    pub fn is_resolved(&self) -> bool {
        matches!(self, ResolveResult::Resolved(_))
    }
}

/// A configured program is treated as a path when it has more than one component
fn looks_like_path(program: &str) -> bool {
    Path::new(program).components().count() > 1
}

/// Locate a tool binary
///
/// Resolution order:
/// 1. Explicit path (`/usr/local/texlive/bin/pdflatex`, `./bin/pdf2svg`)
/// 2. Program name on PATH via `which`
pub fn resolve_tool(options: ResolveOptions) -> ResolveResult {
    let mut searched_locations = Vec::new();

    let found = if looks_like_path(&options.program) {
        let path = PathBuf::from(&options.program);
        searched_locations.push(path.display().to_string());
        path.is_file().then_some((path, ToolSource::Configured))
    } else {
        searched_locations.push(format!("PATH ({})", options.program));
        resolve_system(&options.program, options.search_path.as_ref())
            .map(|path| (path, ToolSource::System))
    };

    match found {
        Some((path, source)) => {
            debug!("resolved {} '{}' to {}", options.kind, options.program, path.display());
            let version = match options.kind {
                // pdf2svg has no version flag
                ToolKind::Typesetter => probe_version(&path),
                ToolKind::Converter => None,
            };
            ResolveResult::Resolved(ToolInfo {
                kind: options.kind,
                source,
                path,
                version,
            })
        }
        None => ResolveResult::NotFound {
            program: options.program,
            searched_locations,
        },
    }
}

fn resolve_system(program: &str, search_path: Option<&OsString>) -> Option<PathBuf> {
    match search_path {
        Some(paths) => {
            let cwd = std::env::current_dir().ok()?;
            which::which_in(program, Some(paths), cwd).ok()
        }
        None => which::which(program).ok(),
    }
}

/// First non-empty line of `<tool> --version`
fn probe_version(path: &Path) -> Option<String> {
    let options = ExecOptions::new(path.display().to_string(), vec!["--version".to_string()]);
    let result = exec_tool(&options).ok()?.into_result().ok()?;
    parse_version_line(&result.stdout)
}

fn parse_version_line(output: &str) -> Option<String> {
    output
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}
