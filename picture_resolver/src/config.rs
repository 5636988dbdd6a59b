// Copyright 2025 the Picture Resolver Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolver configuration.

/// Options recognized by [`Resolver`](crate::resolver::Resolver).
///
/// With the `serde` feature this deserializes strictly: unknown fields and
/// non-boolean values are rejected rather than coerced.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct ResolveConfig {
    /// Drop queries declared before a matched one from future resolution.
    ///
    /// Only affects how much work later notifications do, never which source is shown.
    pub prune: bool,
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self { prune: true }
    }
}

impl ResolveConfig {
    /// Set [`prune`](Self::prune).
    pub fn with_prune(mut self, prune: bool) -> Self {
        self.prune = prune;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prune_defaults_on() {
        assert!(ResolveConfig::default().prune);
        assert!(!ResolveConfig::default().with_prune(false).prune);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_strictly() {
        let empty: ResolveConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, ResolveConfig::default());

        let off: ResolveConfig = serde_json::from_str(r#"{ "prune": false }"#).unwrap();
        assert!(!off.prune);

        assert!(serde_json::from_str::<ResolveConfig>(r#"{ "prune": "false" }"#).is_err());
        assert!(serde_json::from_str::<ResolveConfig>(r#"{ "prune": 0 }"#).is_err());
        assert!(serde_json::from_str::<ResolveConfig>(r#"{ "prun": true }"#).is_err());
    }
}
