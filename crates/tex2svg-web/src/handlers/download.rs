//! `GET /download`: one-shot artifact download

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::SignedCookieJar;
use futures_util::stream::{self, StreamExt};
use tex2svg_core::Tex2SvgError;
use tokio_util::io::ReaderStream;
use tracing::{debug, error};

use crate::context::AppState;
use crate::errors::WebError;
use crate::session;

pub const DOWNLOAD_FILE_NAME: &str = "output.svg";
pub const SVG_CONTENT_TYPE: &str = "image/svg+xml";

/// Stream the session's artifact and release it after the last chunk
///
/// The release runs when the body stream is polled past the end of the file,
/// which only happens once every byte has been handed to the connection. A
/// client that disconnects earlier leaves the artifact claimable.
pub async fn download(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<Response, WebError> {
    let session = session::current(&jar).ok_or(Tex2SvgError::ArtifactMissing)?;
    let artifacts = state.artifacts.clone();
    let path = tokio::task::spawn_blocking(move || artifacts.claim(session))
        .await?
        .ok_or(Tex2SvgError::ArtifactMissing)?;

    let file = match tokio::fs::File::open(&path).await {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Tex2SvgError::ArtifactMissing.into());
        }
        Err(e) => return Err(Tex2SvgError::IoError(e).into()),
    };
    debug!("session {} downloading {}", session, path.display());

    let artifacts = state.artifacts.clone();
    let release = stream::once(async move {
        let released =
            tokio::task::spawn_blocking(move || artifacts.release(session, &path)).await;
        if let Err(e) = released {
            error!("releasing artifact for session {} failed: {}", session, e);
        }
    })
    .filter_map(|()| async { None::<std::io::Result<Bytes>> });
    let body = Body::from_stream(ReaderStream::new(file).chain(release));

    Ok((
        [
            (header::CONTENT_TYPE, SVG_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", DOWNLOAD_FILE_NAME),
            ),
        ],
        body,
    )
        .into_response())
}
