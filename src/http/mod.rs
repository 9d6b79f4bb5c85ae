//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, catch-all route)
//!     → request.rs (assign/propagate request ID)
//!     → [rules loaded fresh, request target resolved]
//!     → response.rs (Decision → redirect, 404 or 500)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use response::AppError;
pub use server::HttpServer;
