// Core modules
pub mod artifact;
pub mod config;
pub mod error;
pub mod session;
pub mod template;

// Re-export commonly used types
pub use artifact::ArtifactStore;
pub use error::{Result, Tex2SvgError};
pub use session::{SessionId, SessionStore};
