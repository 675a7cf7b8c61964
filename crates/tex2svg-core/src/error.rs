use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Tex2SvgError {
    // Toolchain errors
    #[error("{tool} failed with return code {exit_code}:\n{stdout}\n{stderr}")]
    TypesetFailed {
        tool: String,
        exit_code: i32,
        stdout: String,
        stderr: String,
    },

    #[error("{tool} failed with return code {exit_code}:\n{stdout}\n{stderr}")]
    ConvertFailed {
        tool: String,
        exit_code: i32,
        stdout: String,
        stderr: String,
    },

    #[error("TOOL_SPAWN_FAILED: could not run '{tool}': {reason}")]
    ToolSpawnFailed { tool: String, reason: String },

    #[error("TOOL_OUTPUT_MISSING: {tool} exited successfully but '{path}' was not produced")]
    ToolOutputMissing { tool: String, path: PathBuf },

    // Artifact errors
    #[error("ARTIFACT_MISSING: no file to download or file has expired")]
    ArtifactMissing,

    #[error("WORKING_AREA_FAILED: {0}")]
    WorkingAreaFailed(String),

    // Config errors
    #[error("CONFIG_PARSE_ERROR: {0}")]
    ConfigParseError(String),

    #[error("CONFIG_INVALID_VALUE: {field}: {reason}")]
    ConfigInvalidValue { field: String, reason: String },

    // IO errors
    #[error("IO_ERROR: {0}")]
    IoError(#[from] std::io::Error),

    // Generic errors
    #[error("{0}")]
    Generic(String),
}

impl Tex2SvgError {
    /// Whether the error came from one of the external tools rather than from
    /// this process. These are shown to the user verbatim.
    pub fn is_tool_failure(&self) -> bool {
        matches!(
            self,
            Tex2SvgError::TypesetFailed { .. }
                | Tex2SvgError::ConvertFailed { .. }
                | Tex2SvgError::ToolSpawnFailed { .. }
                | Tex2SvgError::ToolOutputMissing { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Tex2SvgError>;
