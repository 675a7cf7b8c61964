//! External toolchain adapter for tex2svg.
//!
//! This crate runs the two external programs that turn a LaTeX document into
//! an SVG image, and locates them for diagnostics.
//!
//! # Architecture
//!
//! - [`info`]: Types describing a located tool
//! - [`resolve`]: Tool lookup (configured path, then system PATH)
//! - [`exec`]: Process execution with output capture
//! - [`working_area`]: Scratch directory removed on every exit path
//! - [`convert`]: The typeset → convert pipeline
//!
//! # Conversion Flow
//!
//! ```text
//! render_svg()
//!     ↓
//! 1. WorkingArea::acquire(work_root)
//!     ↓
//! 2. write input.tex
//!     ↓
//! 3. pdflatex -interaction=nonstopmode -output-directory <area> <area>/input.tex
//!     → non-zero exit: TypesetFailed (area removed)
//!     ↓
//! 4. pdf2svg <area>/input.pdf <area>/input.svg
//!     → non-zero exit: ConvertFailed (area removed)
//!     ↓
//! 5. read input.svg, remove area, return bytes
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use tex2svg_core::template::compose;
//! use tex2svg_toolchain::{Toolchain, render_svg};
//!
//! # fn main() -> tex2svg_core::Result<()> {
//! let document = compose(
//!     "\\documentclass{standalone}\\begin{document}%%content%%\\end{document}",
//!     "\\textbf{Hi}",
//! );
//! let svg = render_svg(&Toolchain::default(), &std::env::temp_dir(), &document)?;
//! println!("{} bytes of SVG", svg.len());
//! # Ok(())
//! # }
//! ```

pub mod convert;
pub mod exec;
pub mod info;
pub mod resolve;
pub mod working_area;

// Re-export commonly used types
pub use convert::{Conversion, Toolchain, convert, render_svg};
pub use exec::{ExecOptions, ExecOutcome, ExecResult, exec_tool};
pub use info::{ToolInfo, ToolKind, ToolSource};
pub use resolve::{ResolveOptions, ResolveResult, resolve_tool};
pub use working_area::WorkingArea;

// Type alias for convenience
pub type Result<T> = tex2svg_core::Result<T>;
