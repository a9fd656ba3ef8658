//! Aspect runtime: configuration and the framework handle.
//!
//! # Example
//!
//! ```rust
//! use aspect_runtime::{Framework, FrameworkConfig, Registries};
//!
//! let framework = Framework::new(FrameworkConfig::default(), Registries::new());
//! assert!(framework.processors().is_frozen());
//! ```

mod config;
mod error;
mod framework;

pub use config::FrameworkConfig;
pub use error::{FrameworkError, Result};
pub use framework::{Framework, Registries};
