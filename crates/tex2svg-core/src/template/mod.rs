//! Template module - marker substitution for LaTeX document templates
//!
//! A template is an ordinary LaTeX document in which the literal marker
//! `%%content%%` stands for the user's snippet.
//!
//! ## Philosophy
//!
//! - **Pure text substitution**: no LaTeX is parsed, escaped or validated
//! - **Template author responsibility**: the composed document must be valid LaTeX
//! - **Missing marker is not an error**: the template is returned unchanged

/// Literal marker replaced by the user's snippet
pub const MARKER: &str = "%%content%%";

/// Template bundled into the binary, used when no template file is readable
pub const DEFAULT_TEMPLATE: &str = include_str!("../../assets/template.tex");

/// Snippet shown in a fresh form
pub const DEFAULT_SNIPPET: &str = "\\begin{tikzpicture}\n    \\draw (0,0) circle (1in);\n\\end{tikzpicture}";

/// Replace every occurrence of [`MARKER`] in `template` with `snippet`, verbatim.
pub fn compose(template: &str, snippet: &str) -> String {
    template.replace(MARKER, snippet)
}

/// Number of markers in `template`
pub fn marker_count(template: &str) -> usize {
    template.matches(MARKER).count()
}

pub fn contains_marker(template: &str) -> bool {
    template.contains(MARKER)
}
