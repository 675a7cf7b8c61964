pub mod download;
pub mod index;

use axum::Router;
use axum::routing::get;

use crate::context::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index::show_form).post(index::submit))
        .route("/download", get(download::download))
        .route("/healthz", get(healthz))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}
