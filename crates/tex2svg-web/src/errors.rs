use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tex2svg_core::Tex2SvgError;
use thiserror::Error;
use tracing::error;

/// Body of the 404 returned by `/download`
pub const NOTHING_TO_DOWNLOAD: &str = "No file to download or file has expired.";

#[derive(Error, Debug)]
pub enum WebError {
    #[error(transparent)]
    Core(#[from] Tex2SvgError),

    #[error("RENDER_FAILED: {0}")]
    Render(#[from] minijinja::Error),

    #[error("TASK_FAILED: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            WebError::Core(Tex2SvgError::ArtifactMissing) => {
                (StatusCode::NOT_FOUND, NOTHING_TO_DOWNLOAD).into_response()
            }
            other => {
                error!("request failed: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Internal Server Error: {}", other),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_missing_is_not_found() {
        let response = WebError::from(Tex2SvgError::ArtifactMissing).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_other_errors_are_internal() {
        let err = Tex2SvgError::WorkingAreaFailed("/nope: permission denied".to_string());
        let response = WebError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
