pub mod config;
pub mod error;
pub mod logging;

pub use config::{CompilerConfig, DEFAULT_RENDERABLE_INTERFACE, LoggingConfig, TemplateFormat};
pub use error::{Result, StachecError};
