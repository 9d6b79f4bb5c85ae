//! Spreadsheet-driven HTTP redirect service.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request           ┌───────────────────────────────────────────────┐
//!     ─────────────────────────┼─▶ http::server (catch-all route, middleware)  │
//!                              │        │                                      │
//!                              │        ▼                                      │
//!                              │   rules::loader ──▶ rules::source (xlsx/ods)  │
//!                              │        │  RuleSet (fresh per request)         │
//!                              │        ▼                                      │
//!                              │   routing::resolver ──▶ Decision              │
//!                              │        │                                      │
//!     Client Response          │        ▼                                      │
//!     ◀────────────────────────┼── http::response (301 / 404 / 500)           │
//!                              │                                               │
//!                              │   config · lifecycle · observability          │
//!                              └───────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod rules;

pub use config::RedirectorConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{resolve, Decision};
pub use rules::{RedirectRule, RuleLoader, RuleSet};
