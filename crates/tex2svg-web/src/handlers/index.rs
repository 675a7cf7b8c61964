//! `GET /` and `POST /`

use axum::extract::{Form, State};
use axum::response::Html;
use axum_extra::extract::cookie::SignedCookieJar;
use serde::Deserialize;
use tex2svg_core::Tex2SvgError;
use tex2svg_core::template::{DEFAULT_SNIPPET, compose};
use tex2svg_toolchain::render_svg;
use tracing::{debug, info};

use crate::context::AppState;
use crate::errors::WebError;
use crate::session;
use crate::views::IndexView;

/// Fields posted by the conversion form
#[derive(Debug, Deserialize)]
pub struct ConversionRequest {
    pub latex: String,
    pub template: String,
}

pub async fn show_form(State(state): State<AppState>) -> Result<Html<String>, WebError> {
    let template = state.load_template().await;
    let html = state
        .views
        .render_index(&IndexView::form(DEFAULT_SNIPPET, template))?;
    Ok(Html(html))
}

pub async fn submit(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<ConversionRequest>,
) -> Result<(SignedCookieJar, Html<String>), WebError> {
    let (jar, session) = session::ensure(jar);

    let document = compose(&form.template, &form.latex);
    let toolchain = state.toolchain.clone();
    let work_dir = state.work_dir.clone();
    let artifacts = state.artifacts.clone();
    let rendered = tokio::task::spawn_blocking(move || {
        // The previous artifact goes whether or not this conversion succeeds
        artifacts.supersede(session);
        let svg = render_svg(&toolchain, &work_dir, &document)?;
        let path = artifacts.store(&svg)?;
        artifacts.attach(session, path.clone());
        Ok::<_, Tex2SvgError>((svg, path))
    })
    .await?;

    let view = IndexView::form(form.latex, form.template);
    let view = match rendered {
        Ok((svg, path)) => {
            info!("session {} converted to {}", session, path.display());
            view.with_svg(String::from_utf8_lossy(&svg).into_owned())
        }
        Err(e) if e.is_tool_failure() => {
            debug!("session {} conversion failed: {}", session, e);
            view.with_error(format!("Error during conversion:\n{}", e))
        }
        Err(e) => return Err(e.into()),
    };

    let html = state.views.render_index(&view)?;
    Ok((jar, Html(html)))
}
