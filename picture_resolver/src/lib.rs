// Copyright 2025 the Picture Resolver Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Picture Resolver: deterministic, `no_std` selection of responsive image sources.
//!
//! ## Overview
//!
//! A placeholder declares several candidate images, each under a media-query condition,
//! plus a fallback. This crate decides which candidate to display given the queries known
//! to match, and swaps the displayed image when that decision changes.
//! It does not evaluate media queries, load images, or walk a real DOM.
//! Those are host collaborators: implement [`Document`](crate::types::Document),
//! [`Renderer`](crate::types::Renderer) and [`MediaMatcher`](crate::types::MediaMatcher).
//!
//! ## Resolution
//!
//! Among the queries a placeholder declares, the one declared last that is known to match
//! wins. When none match, the fallback (`default`) is shown. A placeholder without an
//! explicit fallback uses its last declared source.
//! See [`SourceSet::resolve_best`](crate::source_set::SourceSet::resolve_best).
//!
//! ## Swapping
//!
//! The image element is created on the first swap and reused afterwards. Swaps between
//! conditions that share a URI touch nothing. Width and height are written when the new
//! source has both and are never cleared.
//!
//! ## Workflow
//!
//! 1) Scan — [`Resolver::resolve_all`](crate::resolver::Resolver::resolve_all) reads every
//!    placeholder, subscribes once per distinct query, and resolves each placeholder against
//!    the queries already matching.
//! 2) Notify — forward host match changes to
//!    [`Resolver::notify`](crate::resolver::Resolver::notify). A match re-resolves the
//!    placeholders that declared the query and ends that subscription.
//! 3) Prune — with [`ResolveConfig::prune`](crate::config::ResolveConfig::prune) on, queries
//!    declared before a matched one are dropped from future work. This never changes which
//!    image is shown.
//!
//! ## Host sketch
//!
//! ```
//! use picture_resolver::config::ResolveConfig;
//! use picture_resolver::resolver::Resolver;
//! use picture_resolver::types::{Document, MediaMatcher, Renderer};
//!
//! # #[derive(Debug)]
//! # struct BadQuery;
//! # impl core::fmt::Display for BadQuery {
//! #     fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result { f.write_str("bad query") }
//! # }
//! # impl core::error::Error for BadQuery {}
//! #
//! /// A host whose viewport is 1024px wide and never changes.
//! struct Viewport;
//! impl MediaMatcher for Viewport {
//!     type Handle = u32;
//!     type Error = BadQuery;
//!     fn subscribe(&mut self, _query: &str) -> Result<u32, BadQuery> { Ok(0) }
//!     fn matches(&mut self, query: &str) -> Result<bool, BadQuery> {
//!         Ok(query == "(min-width: 800px)")
//!     }
//!     fn unsubscribe(&mut self, _handle: u32) {}
//! }
//!
//! fn run<D: Document<Element = u32>>(document: &mut D) {
//!     let mut resolver: Resolver<u32, u32> = Resolver::new(ResolveConfig::default());
//!     if let Err(err) = resolver.resolve_all(document, &mut Viewport, None) {
//!         // Rejected queries are reported after every placeholder was processed.
//!         let _ = err.failures.len();
//!     }
//! }
//! # let _ = run::<NoDoc>;
//! # struct NoDoc;
//! # impl Renderer for NoDoc {
//! #     type Element = u32;
//! #     fn create_image(&mut self) -> u32 { 0 }
//! #     fn set_attribute(&mut self, _: &u32, _: &str, _: &str) {}
//! #     fn append_child(&mut self, _: &u32, _: &u32) {}
//! # }
//! # impl Document for NoDoc {
//! #     fn placeholders(&self, _: Option<&u32>) -> Vec<u32> { Vec::new() }
//! #     fn descriptors(&self, _: &u32) -> Vec<u32> { Vec::new() }
//! #     fn attribute<'a>(&'a self, _: &u32, _: &str) -> Option<&'a str> { None }
//! # }
//! ```
//!
//! This crate is `no_std` and uses `alloc`.
//! The `document_adapter` feature implements the collaborator traits for
//! `picture_document::Document`.

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod config;
pub mod error;
mod index;
pub mod markup;
pub mod resolver;
pub mod source_set;
pub mod types;

pub use config::ResolveConfig;
pub use error::{QueryError, ResolveError};
pub use resolver::Resolver;
pub use source_set::SourceSet;
pub use types::{Condition, Source, SwapFlags};
