//! Request interception subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (host extracted by the http server)
//!     → rewrite.rs (run registered interceptors)
//!     → matcher.rs (exact membership test against MatchSet)
//!     → Outcome: host rewritten to the remote host, or untouched
//!
//! Interceptor Construction (at startup):
//!     RewriteConfig { remote_host, domains }
//!     → MatchSet (frozen set of domains)
//!     → HostRewriteInterceptor (immutable for the process lifetime)
//! ```
//!
//! # Design Decisions
//! - Interceptors built at startup, immutable at runtime
//! - Matching is exact and case-sensitive (no wildcards, no port logic)
//! - Pure and synchronous: no I/O, no locking, no shared mutable state
//! - The request is seen only through the `HostField` capability

pub mod domains;
pub mod matcher;
pub mod rewrite;

pub use matcher::MatchSet;
pub use rewrite::{HostField, HostRewriteInterceptor, RequestInterceptor};
