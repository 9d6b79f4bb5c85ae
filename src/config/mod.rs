//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! redirector.toml (optional)
//!     → loader.rs (parse & deserialize)
//!     → CLI overrides (main)
//!     → validation.rs (semantic checks)
//!     → RedirectorConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the rule file is the only thing re-read
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    ListenerConfig, LogFormat, ObservabilityConfig, RedirectorConfig, SourceConfig, TimeoutConfig,
};
pub use validation::{validate_config, ValidationError};
