// Copyright 2025 the Picture Resolver Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types: conditions, sources, swap flags, and the host collaborator traits.
//!
//! ## Overview
//!
//! These types describe what a placeholder declares and what the resolver asks of its host.
//! They are referenced by [`SourceSet`](crate::source_set::SourceSet) and
//! [`Resolver`](crate::resolver::Resolver) and implemented by downstream integrations.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// Reserved label of the fallback condition.
pub const DEFAULT_LABEL: &str = "default";

/// The condition under which a candidate source applies.
///
/// Conditions are compared by exact text; the resolver never evaluates a media query.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Condition {
    /// The fallback source, used when no media query is known to match.
    Default,
    /// A media-query string such as `(min-width: 800px)`.
    Media(String),
}

impl Condition {
    /// Interpret a declared condition label.
    ///
    /// An absent, empty, or literal `default` label yields [`Condition::Default`].
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            None | Some("") | Some(DEFAULT_LABEL) => Self::Default,
            Some(query) => Self::Media(query.into()),
        }
    }

    /// Returns the label text: `default` or the media-query string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Default => DEFAULT_LABEL,
            Self::Media(query) => query.as_str(),
        }
    }

    /// True for [`Condition::Default`].
    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }

    /// Returns the media query for [`Condition::Media`].
    pub fn query(&self) -> Option<&str> {
        match self {
            Self::Default => None,
            Self::Media(query) => Some(query.as_str()),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A candidate image source.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Source {
    /// Image URI written to the rendered element's `src`.
    pub uri: String,
    /// Optional width attribute value.
    pub width: Option<String>,
    /// Optional height attribute value.
    pub height: Option<String>,
}

impl Source {
    /// Create a source without dimensions.
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            width: None,
            height: None,
        }
    }

    /// Attach width and height attribute values.
    pub fn with_dimensions(mut self, width: impl Into<String>, height: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self.height = Some(height.into());
        self
    }

    /// Returns `(width, height)` when both are present and non-empty.
    ///
    /// A partial pair is ignored for dimension writes.
    pub fn dimensions(&self) -> Option<(&str, &str)> {
        match (self.width.as_deref(), self.height.as_deref()) {
            (Some(w), Some(h)) if !w.is_empty() && !h.is_empty() => Some((w, h)),
            _ => None,
        }
    }
}

/// One declared candidate, in document order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Descriptor {
    /// Condition under which the source applies.
    pub condition: Condition,
    /// The candidate source.
    pub source: Source,
}

impl Descriptor {
    /// Create a descriptor from a condition and a source.
    pub fn new(condition: Condition, source: Source) -> Self {
        Self { condition, source }
    }
}

/// Attributes copied from the placeholder onto the rendered element at creation time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlaceholderAttrs {
    /// Alternative text override.
    pub alt: Option<String>,
    /// Title override.
    pub title: Option<String>,
}

bitflags::bitflags! {
    /// Element writes performed by a single swap.
    ///
    /// Returned by [`SourceSet::apply`](crate::source_set::SourceSet::apply).
    /// Empty flags mean the swap touched no element.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct SwapFlags: u8 {
        /// The image element was created and appended to the placeholder.
        const CREATED    = 0b0000_0001;
        /// The `src` attribute was written.
        const SOURCE     = 0b0000_0010;
        /// The `width` and `height` attributes were written.
        const DIMENSIONS = 0b0000_0100;
    }
}

impl SwapFlags {
    /// True if the swap wrote to the rendered element.
    pub fn redrawn(self) -> bool {
        self.contains(Self::SOURCE)
    }
}

/// Render collaborator: creates and mutates the displayed image element.
///
/// Supplied to [`SourceSet::apply`](crate::source_set::SourceSet::apply) and every
/// resolver operation that may swap images.
pub trait Renderer {
    /// Host element handle.
    type Element: Clone;
    /// Create a detached image element.
    fn create_image(&mut self) -> Self::Element;
    /// Set `name` to `value` on `element`.
    fn set_attribute(&mut self, element: &Self::Element, name: &str, value: &str);
    /// Append `child` as the last child of `parent`.
    fn append_child(&mut self, parent: &Self::Element, child: &Self::Element);
}

/// Document collaborator: locates placeholders and reads their declarations.
///
/// The markup vocabulary lives in [`markup`](crate::markup); implementations decide
/// how elements are found (for example `span[data-picture]` and descendant spans).
pub trait Document: Renderer {
    /// Placeholder elements under `root`, or in the whole document when `root` is `None`,
    /// in document order.
    fn placeholders(&self, root: Option<&Self::Element>) -> Vec<Self::Element>;
    /// Source descriptor elements of `placeholder`, in document order.
    fn descriptors(&self, placeholder: &Self::Element) -> Vec<Self::Element>;
    /// Returns the value of attribute `name` on `element`, if present.
    fn attribute<'a>(&'a self, element: &Self::Element, name: &str) -> Option<&'a str>;
}

/// Media-query collaborator: evaluates and watches queries on behalf of the resolver.
///
/// Subscriptions are one-shot from the resolver's point of view: once a
/// [`Resolver::notify`](crate::resolver::Resolver::notify) for a handle reports a match,
/// the resolver calls [`MediaMatcher::unsubscribe`] with that handle.
pub trait MediaMatcher {
    /// Identity of a subscription, compared to route notifications.
    type Handle: PartialEq;
    /// Error for a query the host rejects (for example malformed syntax).
    type Error: core::error::Error + 'static;
    /// Start watching `query`; the host later reports changes through the returned handle.
    fn subscribe(&mut self, query: &str) -> Result<Self::Handle, Self::Error>;
    /// Synchronously check whether `query` matches right now.
    fn matches(&mut self, query: &str) -> Result<bool, Self::Error>;
    /// Stop watching a subscription.
    fn unsubscribe(&mut self, handle: Self::Handle);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn condition_from_label_maps_fallbacks() {
        assert_eq!(Condition::from_label(None), Condition::Default);
        assert_eq!(Condition::from_label(Some("")), Condition::Default);
        assert_eq!(Condition::from_label(Some("default")), Condition::Default);
        assert_eq!(
            Condition::from_label(Some("(min-width: 400px)")),
            Condition::Media("(min-width: 400px)".into())
        );
    }

    #[test]
    fn condition_display_and_query() {
        let c = Condition::from_label(Some("print"));
        assert_eq!(alloc::format!("{c}"), "print");
        assert_eq!(c.query(), Some("print"));
        assert_eq!(Condition::Default.as_str(), "default");
        assert!(Condition::Default.query().is_none());
    }

    #[test]
    fn dimensions_require_both_values() {
        assert_eq!(
            Source::new("a.jpg").with_dimensions("10", "20").dimensions(),
            Some(("10", "20"))
        );
        let mut partial = Source::new("a.jpg");
        partial.width = Some("10".into());
        assert!(partial.dimensions().is_none());
        partial.height = Some(String::new());
        assert!(partial.dimensions().is_none());
    }

    #[test]
    fn swap_flags_redrawn() {
        assert!(!SwapFlags::empty().redrawn());
        assert!((SwapFlags::CREATED | SwapFlags::SOURCE).redrawn());
    }
}
