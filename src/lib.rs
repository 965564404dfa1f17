//! Host-rewriting forwarding proxy library.
//!
//! Redirects a fixed set of game-service domains to a configured remote
//! host; everything else is forwarded untouched.

pub mod config;
pub mod http;
pub mod intercept;
pub mod observability;

pub use config::schema::ProxyConfig;
pub use http::HttpServer;
pub use intercept::{HostField, HostRewriteInterceptor, MatchSet, RequestInterceptor};
