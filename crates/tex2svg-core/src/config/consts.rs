//! Defaults shared by the configuration model and the binaries

pub const CONFIG_FILE_NAME: &str = "tex2svg.toml";

pub const DEFAULT_BIND: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5666;

pub const DEFAULT_TYPESETTER: &str = "pdflatex";
pub const DEFAULT_CONVERTER: &str = "pdf2svg";

pub const DEFAULT_TEMPLATE_FILE: &str = "template.tex";

/// One hour
pub const DEFAULT_SESSION_TTL_SECS: u64 = 60 * 60;

/// Five minutes
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 5 * 60;

/// Cookie signing secrets shorter than this are rejected
pub const MIN_SECRET_BYTES: usize = 32;
