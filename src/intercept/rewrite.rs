//! Host rewrite interceptor.
//!
//! # Responsibilities
//! - Define the capability a request exposes to interceptors (`HostField`)
//! - Define the callback contract the proxy runtime invokes per request
//! - Rewrite the destination host when it matches the configured set
//!
//! # Design Decisions
//! - The interceptor sees requests only through `HostField`, decoupling it
//!   from the concrete request type of the http server
//! - `on_request` never fails and never blocks: one set lookup, at most
//!   one field assignment
//! - No validation of the remote host here; an empty value is a config
//!   error caught by `config::validation` before an interceptor is built

use crate::config::schema::RewriteConfig;
use crate::intercept::matcher::MatchSet;

/// Capability exposing the destination host of an in-flight request.
///
/// The request itself is owned by the server; an interceptor may read
/// and replace the host for the duration of the callback, nothing else.
pub trait HostField {
    /// The request's destination host, without port.
    fn host(&self) -> &str;

    /// Replace the request's destination host.
    fn set_host(&mut self, host: &str);
}

/// Callback invoked by the proxy runtime once per request, before the
/// request is forwarded upstream.
///
/// Implementations must be safe under concurrent invocation: the runtime
/// may call `on_request` from many request-handling tasks at once.
pub trait RequestInterceptor: Send + Sync {
    fn on_request(&self, request: &mut dyn HostField);
}

/// Rewrites matching destination hosts to a single configured remote host.
///
/// All state is fixed at construction, so a single instance can be shared
/// across every in-flight request without locking. Invoking it twice on
/// the same request is a no-op on the second call as long as the remote
/// host is not itself a member of the match set.
#[derive(Debug, Clone)]
pub struct HostRewriteInterceptor {
    match_set: MatchSet,
    remote_host: String,
}

impl HostRewriteInterceptor {
    /// Create an interceptor from an explicit match set and remote host.
    pub fn new(match_set: MatchSet, remote_host: impl Into<String>) -> Self {
        Self {
            match_set,
            remote_host: remote_host.into(),
        }
    }

    /// Build the interceptor from the rewrite section of the config.
    pub fn from_config(config: &RewriteConfig) -> Self {
        Self::new(
            MatchSet::new(config.domains.iter().cloned()),
            config.remote_host.clone(),
        )
    }

    /// The host substituted in place of matched domains.
    pub fn remote_host(&self) -> &str {
        &self.remote_host
    }

    /// The set of domains eligible for rewriting.
    pub fn match_set(&self) -> &MatchSet {
        &self.match_set
    }
}

impl RequestInterceptor for HostRewriteInterceptor {
    fn on_request(&self, request: &mut dyn HostField) {
        if self.match_set.contains(request.host()) {
            tracing::debug!(
                host = %request.host(),
                remote_host = %self.remote_host,
                "Rewriting destination host"
            );
            request.set_host(&self.remote_host);
        }
    }
}
