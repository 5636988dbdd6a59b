// Copyright 2025 the Picture Resolver Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors surfaced by [`Resolver::resolve_all`](crate::resolver::Resolver::resolve_all).

use alloc::string::String;
use alloc::vec::Vec;

/// A media query the host refused to subscribe to or evaluate.
#[derive(Debug, thiserror::Error)]
#[error("media query `{query}` was rejected")]
pub struct QueryError<E: core::error::Error + 'static> {
    /// The query text as declared in markup.
    pub query: String,
    /// The host's error.
    #[source]
    pub source: E,
}

/// Every query that failed during a scan.
///
/// The scan itself still completed: all other placeholders were resolved and all other
/// queries subscribed.
#[derive(Debug, thiserror::Error)]
#[error("{} media queries were rejected", .failures.len())]
pub struct ResolveError<E: core::error::Error + 'static> {
    /// Failures in the order the queries were first declared.
    pub failures: Vec<QueryError<E>>,
}

impl<E: core::error::Error + 'static> ResolveError<E> {
    /// The rejected query strings.
    pub fn queries(&self) -> impl Iterator<Item = &str> + '_ {
        self.failures.iter().map(|f| f.query.as_str())
    }
}
