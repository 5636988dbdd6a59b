// Copyright 2025 the Picture Resolver Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolver implementation.
//!
//! ## Overview
//!
//! Scans a document for placeholders, subscribes once per distinct media query,
//! resolves every placeholder against the queries already matching, and re-resolves
//! affected placeholders when the host reports a late match.
//!
//! ## Ordering
//!
//! - [`Resolver::resolve_all`] subscribes to every query, then checks which already match,
//!   then resolves every placeholder. All of it completes before any notification can be
//!   delivered, because [`Resolver::notify`] needs the same `&mut` borrow.
//! - Matches accumulate: a query reported as matching stays matching for the lifetime of the
//!   scan. Later transitions back to non-matching are not tracked.
//! - Among matching queries the one declared last in a placeholder wins.
//!
//! ## Subscriptions
//!
//! Each subscription is one-shot. The first notification reporting a match re-resolves the
//! placeholders that declared the query, then unsubscribes and forgets the handle.

use alloc::string::String;
use alloc::vec::Vec;

use crate::config::ResolveConfig;
use crate::error::{QueryError, ResolveError};
use crate::index::{ConditionIndex, SetId};
use crate::markup;
use crate::source_set::SourceSet;
use crate::types::{Document, MediaMatcher, Renderer};

#[derive(Debug)]
struct Subscription<H> {
    query: String,
    handle: H,
    sets: Vec<SetId>,
}

/// Media-query driven image source resolver.
///
/// ## Usage
///
/// - Construct with [`Resolver::new`] and a [`ResolveConfig`].
/// - Call [`Resolver::resolve_all`] on load (and again to rebuild after markup changes).
/// - Forward host match-state changes to [`Resolver::notify`].
/// - Call [`Resolver::release`] before dropping the resolver to cancel outstanding
///   subscriptions.
///
/// `E` is the host element handle, `H` the host's subscription handle.
pub struct Resolver<E, H> {
    config: ResolveConfig,
    sets: Vec<SourceSet<E>>,
    true_conditions: Vec<String>,
    subscriptions: Vec<Subscription<H>>,
}

impl<E, H> core::fmt::Debug for Resolver<E, H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Resolver")
            .field("config", &self.config)
            .field("sets", &self.sets.len())
            .field("true_conditions", &self.true_conditions)
            .field("subscriptions", &self.subscriptions.len())
            .finish_non_exhaustive()
    }
}

impl<E: Clone, H: PartialEq> Default for Resolver<E, H> {
    fn default() -> Self {
        Self::new(ResolveConfig::default())
    }
}

impl<E: Clone, H: PartialEq> Resolver<E, H> {
    /// Create a resolver with no placeholders.
    pub fn new(config: ResolveConfig) -> Self {
        Self {
            config,
            sets: Vec::new(),
            true_conditions: Vec::new(),
            subscriptions: Vec::new(),
        }
    }

    /// The active configuration.
    pub fn config(&self) -> ResolveConfig {
        self.config
    }

    /// Source sets of the last scan, in document order.
    pub fn source_sets(&self) -> &[SourceSet<E>] {
        &self.sets
    }

    /// Queries known to match, in the order they were learned.
    pub fn true_conditions(&self) -> &[String] {
        &self.true_conditions
    }

    /// Queries still waiting for a match notification.
    pub fn pending_queries(&self) -> impl Iterator<Item = &str> + '_ {
        self.subscriptions.iter().map(|s| s.query.as_str())
    }

    /// Scan `root` (or the whole document), subscribe, and display the best source
    /// for every placeholder.
    ///
    /// State from a previous scan is discarded and its subscriptions released first.
    /// A query the host rejects, at subscription or at evaluation, is skipped and left
    /// unsubscribed: every other query and placeholder is still processed, then all
    /// rejections are returned together.
    pub fn resolve_all<D, M>(
        &mut self,
        document: &mut D,
        media: &mut M,
        root: Option<&E>,
    ) -> Result<(), ResolveError<M::Error>>
    where
        D: Document<Element = E>,
        M: MediaMatcher<Handle = H>,
    {
        self.release(media);
        self.true_conditions.clear();
        self.sets = markup::scan(document, root);

        let index = ConditionIndex::build(&self.sets);
        log::debug!(
            "scanned {} placeholders declaring {} media queries",
            self.sets.len(),
            index.len()
        );
        for (query, sets) in index.iter() {
            log::trace!("`{query}` is declared by {} placeholders", sets.len());
        }

        let mut failures = Vec::new();
        for (query, sets) in index {
            let handle = match media.subscribe(&query) {
                Ok(handle) => handle,
                Err(source) => {
                    log::warn!("media query `{query}` rejected: {source}");
                    failures.push(QueryError { query, source });
                    continue;
                }
            };
            match media.matches(&query) {
                Ok(true) => self.true_conditions.push(query.clone()),
                Ok(false) => {}
                Err(source) => {
                    log::warn!("media query `{query}` could not be evaluated: {source}");
                    media.unsubscribe(handle);
                    failures.push(QueryError { query, source });
                    continue;
                }
            }
            self.subscriptions.push(Subscription {
                query,
                handle,
                sets,
            });
        }

        let prune = self.config.prune;
        for set in &mut self.sets {
            set.resolve_and_apply(&self.true_conditions, prune, document);
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(ResolveError { failures })
        }
    }

    /// Deliver a match-state change for a subscription.
    ///
    /// Changes to non-matching are ignored and keep the subscription armed. A change to
    /// matching records the query as true, re-resolves every placeholder that still
    /// considers it, and unsubscribes. Returns `false` for unknown handles and ignored
    /// changes.
    pub fn notify<R, M>(
        &mut self,
        handle: &H,
        matches: bool,
        renderer: &mut R,
        media: &mut M,
    ) -> bool
    where
        R: Renderer<Element = E>,
        M: MediaMatcher<Handle = H>,
    {
        let Some(pos) = self.subscriptions.iter().position(|s| s.handle == *handle) else {
            log::trace!("notification for unknown subscription");
            return false;
        };
        if !matches {
            log::trace!(
                "`{}` stopped matching; not tracked",
                self.subscriptions[pos].query
            );
            return false;
        }
        let Subscription {
            query,
            handle,
            sets,
        } = self.subscriptions.remove(pos);

        if !self.true_conditions.contains(&query) {
            self.true_conditions.push(query.clone());
        }
        let prune = self.config.prune;
        let mut redrawn = 0_usize;
        for id in sets {
            let Some(set) = self.sets.get_mut(id) else {
                continue;
            };
            // A pruned query can no longer win for this set.
            if !set.declares(&query) {
                continue;
            }
            if set
                .resolve_and_apply(&self.true_conditions, prune, renderer)
                .redrawn()
            {
                redrawn += 1;
            }
        }
        log::debug!("`{query}` matched; redrew {redrawn} placeholders");
        media.unsubscribe(handle);
        true
    }

    /// Unsubscribe every outstanding subscription.
    pub fn release<M>(&mut self, media: &mut M)
    where
        M: MediaMatcher<Handle = H>,
    {
        for sub in self.subscriptions.drain(..) {
            media.unsubscribe(sub.handle);
        }
    }
}
