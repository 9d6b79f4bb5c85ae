//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request target (path + query)
//!     → matcher.rs (normalize to a path)
//!     → resolver.rs (first rule whose source path is equal)
//!     → Decision: Redirect, NotFound or Unavailable
//! ```
//!
//! # Design Decisions
//! - Exact path equality only; no prefixes, wildcards or priorities
//! - Deterministic: same rules and target always give the same decision
//! - First match wins, in source row order
//! - Query strings and fragments never influence matching

pub mod matcher;
pub mod resolver;

pub use matcher::{request_path, rule_path, PathParseError};
pub use resolver::{resolve, Decision};
