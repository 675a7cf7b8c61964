//! Serve command - run the web converter

use crate::context::Context;
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};
use tex2svg_toolchain::{ResolveOptions, ResolveResult, ToolKind, resolve_tool};
use tex2svg_web::{AppState, WebServer};
use tracing::{info, warn};

/// Command-line values that take precedence over the config file
#[derive(Debug, Default)]
pub struct Overrides {
    pub bind: Option<String>,
    pub port: Option<u16>,
    pub template: Option<PathBuf>,
}

pub fn run(config_path: Option<&Path>, overrides: Overrides, verbose: bool) -> Result<()> {
    let mut ctx = Context::new(config_path, verbose)?;
    let config = &mut ctx.config;

    if let Some(bind) = overrides.bind {
        config.server.bind = bind;
    }
    if let Some(port) = overrides.port {
        config.server.port = port;
    }
    if let Some(template) = overrides.template {
        config.paths.template = template;
    }
    config.validate()?;
    info!("configuration: {}", ctx.source);

    report_tool(ToolKind::Typesetter, &ctx.config.toolchain.typesetter);
    report_tool(ToolKind::Converter, &ctx.config.toolchain.converter);
    if ctx.config.session.secret.is_none() {
        warn!("session.secret is not set; sessions will not survive a restart");
    }

    let state = AppState::from_config(&ctx.config).context("Failed to load page templates")?;
    let addr = (ctx.config.server.bind.clone(), ctx.config.server.port);

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?;

    rt.block_on(async move {
        let server = WebServer::start(state, addr)
            .await
            .context("Failed to start server")?;

        tokio::signal::ctrl_c()
            .await
            .context("Failed to listen for Ctrl-C")?;
        info!("shutting down");

        server.shutdown().await;
        Ok(())
    })
}

/// Log where a tool resolves; conversions will fail if it does not
fn report_tool(kind: ToolKind, program: &str) {
    match resolve_tool(ResolveOptions::new(kind, program)) {
        ResolveResult::Resolved(info) => {
            info!("{} ({}): {}", kind, info.source, info.path.display());
        }
        ResolveResult::NotFound { program, .. } => {
            warn!("{} '{}' not found; conversions will fail", kind, program);
        }
    }
}
