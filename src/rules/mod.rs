//! Redirect rule subsystem.
//!
//! # Data Flow
//! ```text
//! redirects.xlsx (or any TabularSource)
//!     → source.rs (read workbook → sheets of raw rows)
//!     → loader.rs (pick sheet, validate rows)
//!     → rule.rs (RawRow → RedirectRule)
//!     → RuleSet (ordered, read-only, discarded after the request)
//! ```
//!
//! # Design Decisions
//! - Rules are reloaded for every request; nothing is cached between requests
//! - A missing/unreadable source is an expected condition (`RuleSet::Unavailable`)
//! - A structurally broken source (no sheets, sheet missing) is a request failure
//! - Invalid rows are dropped with a warning; they never abort a load

pub mod error;
pub mod loader;
pub mod rule;
pub mod source;

pub use error::{LoadError, SourceError};
pub use loader::{load_rules, RuleLoader};
pub use rule::{RawRow, RedirectRule, RowError, RuleSet};
pub use source::{Sheet, TabularSource, Workbook, XlsxSource};
