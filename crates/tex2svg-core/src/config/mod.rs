pub mod consts;
mod model;

pub use model::{Config, PathsConfig, ServerConfig, SessionConfig, ToolchainConfig};
