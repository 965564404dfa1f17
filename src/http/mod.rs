//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, catch-all proxy handler)
//!     → request.rs (request ID generation)
//!     → intercept layer decides whether the destination host changes
//!     → hyper client forwards to the (possibly rewritten) upstream
//!     → response relayed to client unchanged
//! ```

pub mod request;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::HttpServer;
