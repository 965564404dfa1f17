//! Host membership matching.
//!
//! # Responsibilities
//! - Hold the frozen set of domains eligible for rewriting
//! - Answer exact membership queries for a request's host
//!
//! # Design Decisions
//! - Matching is case-sensitive exact match (no wildcards, no subdomain
//!   logic); the server hands us a host already stripped of its port
//! - Backed by a HashSet to guarantee O(1) lookups in the hot path
//! - Immutable after construction (thread-safe without locks)

use std::collections::HashSet;

/// The set of domains eligible for host rewriting.
///
/// Built once at startup and never mutated afterwards, so it can be
/// shared freely across request-handling tasks.
#[derive(Debug, Clone, Default)]
pub struct MatchSet {
    domains: HashSet<String>,
}

impl MatchSet {
    /// Create a match set from an iterator of domain strings.
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            domains: domains.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if `host` is an exact member of the set.
    pub fn contains(&self, host: &str) -> bool {
        self.domains.contains(host)
    }

    /// Returns true if the set holds no domains.
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// Number of domains in the set.
    pub fn len(&self) -> usize {
        self.domains.len()
    }
}

impl<S: Into<String>> FromIterator<S> for MatchSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
