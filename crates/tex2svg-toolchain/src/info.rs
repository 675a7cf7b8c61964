use std::fmt;
use std::path::PathBuf;

/// The two external programs of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    /// LaTeX → PDF (`pdflatex`)
    Typesetter,
    /// PDF → SVG (`pdf2svg`)
    Converter,
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolKind::Typesetter => write!(f, "typesetter"),
            ToolKind::Converter => write!(f, "converter"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolSource {
    /// Explicit path from configuration
    Configured,
    System,
}

impl fmt::Display for ToolSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolSource::Configured => write!(f, "configured path"),
            ToolSource::System => write!(f, "system PATH"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ToolInfo {
    pub kind: ToolKind,
    pub source: ToolSource,
    pub path: PathBuf,
    /// First line of `--version`, when the tool supports it
    pub version: Option<String>,
}
