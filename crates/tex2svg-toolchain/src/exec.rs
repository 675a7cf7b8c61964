use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::Instant;
use tex2svg_core::{Result, Tex2SvgError};
use tracing::debug;

/// Options for running an external tool
#[derive(Debug, Clone)]
pub struct ExecOptions {
    pub program: String,
    pub args: Vec<String>,
    pub current_dir: Option<PathBuf>,
}

impl ExecOptions {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            current_dir: None,
        }
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }
}

/// Captured output of a finished tool run
#[derive(Debug, Clone)]
pub struct ExecResult {
    /// `-1` when the process was terminated by a signal
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub duration_ms: u64,
}

/// How a tool run ended
#[must_use = "a failed tool run must be handled"]
#[derive(Debug, Clone)]
pub enum ExecOutcome {
    Success(ExecResult),
    Failed(ExecResult),
}

impl ExecOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ExecOutcome::Success(_))
    }

    pub fn result(&self) -> &ExecResult {
        match self {
            ExecOutcome::Success(r) | ExecOutcome::Failed(r) => r,
        }
    }

    pub fn into_result(self) -> std::result::Result<ExecResult, ExecResult> {
        match self {
            ExecOutcome::Success(r) => Ok(r),
            ExecOutcome::Failed(r) => Err(r),
        }
    }
}

/// Run a tool to completion with stdin closed and stdout/stderr captured
///
/// Blocks until the process exits. Spawn failures (missing binary, permission
/// denied) are errors; a non-zero exit is an [`ExecOutcome::Failed`].
pub fn exec_tool(options: &ExecOptions) -> Result<ExecOutcome> {
    debug!("exec: {} {}", options.program, options.args.join(" "));

    let mut cmd = Command::new(&options.program);
    cmd.args(&options.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(dir) = &options.current_dir {
        cmd.current_dir(dir);
    }

    let start = Instant::now();
    let output = cmd.output().map_err(|e| Tex2SvgError::ToolSpawnFailed {
        tool: options.program.clone(),
        reason: e.to_string(),
    })?;
    let duration_ms = start.elapsed().as_millis() as u64;

    let result = ExecResult {
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        duration_ms,
    };

    debug!(
        "exec: {} exited with {} after {}ms",
        options.program, result.exit_code, duration_ms
    );

    if output.status.success() {
        Ok(ExecOutcome::Success(result))
    } else {
        Ok(ExecOutcome::Failed(result))
    }
}
