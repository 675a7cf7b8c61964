//! HTTP front end for tex2svg.
//!
//! # Routes
//!
//! - `GET /`: the conversion form, pre-filled with a sample snippet and the
//!   configured document template
//! - `POST /`: convert the submitted snippet; renders the SVG inline with a
//!   download link, or the tool diagnostics on failure
//! - `GET /download`: one-shot download of the session's latest SVG
//! - `GET /healthz`: liveness probe
//!
//! Each browser is identified by a signed session cookie. The server keeps at
//! most one pending artifact per session; see [`tex2svg_core::artifact`].

pub mod context;
pub mod errors;
pub mod handlers;
pub mod server;
pub mod session;
pub mod views;

pub use context::AppState;
pub use errors::WebError;
pub use server::WebServer;
