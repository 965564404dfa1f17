//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, bind address parses)
//! - Catch rewrite misconfigurations before an interceptor is built
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use crate::config::schema::ProxyConfig;

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a valid socket address")]
    InvalidBindAddress(String),

    #[error("rewrite.remote_host must not be empty")]
    EmptyRemoteHost,

    #[error("rewrite.domains must not contain empty entries")]
    EmptyDomain,

    #[error("rewrite.domains contains duplicate entry '{0}'")]
    DuplicateDomain(String),

    #[error("rewrite.remote_host '{0}' is itself a matched domain")]
    RemoteHostInDomains(String),

    #[error("timeouts.{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("observability.metrics_address '{0}' is not a valid socket address")]
    InvalidMetricsAddress(String),
}

/// Validate a parsed configuration, collecting every error found.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.rewrite.remote_host.is_empty() {
        errors.push(ValidationError::EmptyRemoteHost);
    }

    let mut seen = HashSet::new();
    for domain in &config.rewrite.domains {
        if domain.is_empty() {
            if !errors.contains(&ValidationError::EmptyDomain) {
                errors.push(ValidationError::EmptyDomain);
            }
            continue;
        }
        if !seen.insert(domain.as_str()) {
            errors.push(ValidationError::DuplicateDomain(domain.clone()));
        }
    }

    // A remote host inside the match set would make the rewrite
    // non-idempotent and is always a misconfiguration.
    if !config.rewrite.remote_host.is_empty()
        && seen.contains(config.rewrite.remote_host.as_str())
    {
        errors.push(ValidationError::RemoteHostInDomains(
            config.rewrite.remote_host.clone(),
        ));
    }

    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("connect_secs"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("request_secs"));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
