//! LaTeX document → SVG through the external typesetter and converter

use std::fs;
use std::path::{Path, PathBuf};
use tex2svg_core::config::ToolchainConfig;
use tex2svg_core::{Result, Tex2SvgError};
use tracing::debug;

use crate::exec::{ExecOptions, ExecOutcome, ExecResult, exec_tool};
use crate::working_area::WorkingArea;

pub const INPUT_TEX: &str = "input.tex";
pub const INPUT_PDF: &str = "input.pdf";
pub const OUTPUT_SVG: &str = "input.svg";

/// Programs used for the two pipeline stages
#[derive(Debug, Clone)]
pub struct Toolchain {
    pub typesetter: String,
    pub converter: String,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self::from(&ToolchainConfig::default())
    }
}

impl From<&ToolchainConfig> for Toolchain {
    fn from(config: &ToolchainConfig) -> Self {
        Self {
            typesetter: config.typesetter.clone(),
            converter: config.converter.clone(),
        }
    }
}

impl Toolchain {
    /// `pdflatex -interaction=nonstopmode -output-directory <area> <area>/input.tex`
    fn typeset_options(&self, area: &WorkingArea) -> ExecOptions {
        ExecOptions::new(
            self.typesetter.clone(),
            vec![
                "-interaction=nonstopmode".to_string(),
                "-output-directory".to_string(),
                area.path().display().to_string(),
                area.join(INPUT_TEX).display().to_string(),
            ],
        )
        .current_dir(area.path())
    }

    /// `pdf2svg <src.pdf> <dst.svg>`
    fn convert_options(&self, pdf: &Path, svg: &Path) -> ExecOptions {
        ExecOptions::new(
            self.converter.clone(),
            vec![pdf.display().to_string(), svg.display().to_string()],
        )
    }
}

/// A successful conversion
#[derive(Debug, Clone)]
pub struct Conversion {
    pub svg: Vec<u8>,
    /// Where the converter wrote the SVG; inside the working area
    pub svg_path: PathBuf,
    pub typeset: ExecResult,
    pub convert: ExecResult,
}

/// Typeset `document` and convert the resulting PDF to SVG inside `area`
///
/// The converter only runs if the typesetter succeeded. Tool diagnostics are
/// carried verbatim in the returned error.
pub fn convert(toolchain: &Toolchain, document: &str, area: &WorkingArea) -> Result<Conversion> {
    let tex_path = area.join(INPUT_TEX);
    fs::write(&tex_path, document)?;

    // Step 1: typeset
    let typeset = match exec_tool(&toolchain.typeset_options(area))? {
        ExecOutcome::Success(result) => result,
        ExecOutcome::Failed(result) => {
            return Err(Tex2SvgError::TypesetFailed {
                tool: toolchain.typesetter.clone(),
                exit_code: result.exit_code,
                stdout: result.stdout,
                stderr: result.stderr,
            });
        }
    };

    // Step 2: convert
    let pdf_path = area.join(INPUT_PDF);
    let svg_path = area.join(OUTPUT_SVG);
    let converted = match exec_tool(&toolchain.convert_options(&pdf_path, &svg_path))? {
        ExecOutcome::Success(result) => result,
        ExecOutcome::Failed(result) => {
            return Err(Tex2SvgError::ConvertFailed {
                tool: toolchain.converter.clone(),
                exit_code: result.exit_code,
                stdout: result.stdout,
                stderr: result.stderr,
            });
        }
    };

    // Step 3: read back
    let svg = fs::read(&svg_path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Tex2SvgError::ToolOutputMissing {
            tool: toolchain.converter.clone(),
            path: svg_path.clone(),
        },
        _ => Tex2SvgError::IoError(e),
    })?;

    debug!(
        "converted {} bytes of LaTeX to {} bytes of SVG ({}ms + {}ms)",
        document.len(),
        svg.len(),
        typeset.duration_ms,
        converted.duration_ms
    );

    Ok(Conversion {
        svg,
        svg_path,
        typeset,
        convert: converted,
    })
}

/// Acquire a working area under `work_root`, convert, and remove the area
///
/// The area is removed whether the conversion succeeds or fails.
pub fn render_svg(toolchain: &Toolchain, work_root: &Path, document: &str) -> Result<Vec<u8>> {
    let area = WorkingArea::acquire(work_root)?;
    let conversion = convert(toolchain, document, &area)?;
    if let Err(e) = area.close() {
        tracing::warn!("failed to remove working area: {}", e);
    }
    Ok(conversion.svg)
}
