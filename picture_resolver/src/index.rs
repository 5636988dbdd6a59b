// Copyright 2025 the Picture Resolver Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grouping of source sets by the media queries they declare.

use alloc::string::String;
use alloc::vec::Vec;

use crate::source_set::SourceSet;

/// Position of a [`SourceSet`] within a scan.
pub(crate) type SetId = usize;

/// Distinct media queries of a scan, each with the sets that declare it.
///
/// Built once per scan and consumed when subscriptions are created.
/// Queries appear in first-declared order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ConditionIndex {
    entries: Vec<(String, Vec<SetId>)>,
}

impl ConditionIndex {
    /// Index the media queries of `sets`.
    pub(crate) fn build<E: Clone>(sets: &[SourceSet<E>]) -> Self {
        let mut entries: Vec<(String, Vec<SetId>)> = Vec::new();
        for (id, set) in sets.iter().enumerate() {
            for query in set.conditions() {
                match entries.iter_mut().find(|(q, _)| q == query) {
                    Some((_, ids)) => ids.push(id),
                    None => entries.push((query.clone(), alloc::vec![id])),
                }
            }
        }
        Self { entries }
    }

    /// Number of distinct queries.
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate queries with their sets.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &[SetId])> + '_ {
        self.entries.iter().map(|(q, ids)| (q.as_str(), ids.as_slice()))
    }
}

impl IntoIterator for ConditionIndex {
    type Item = (String, Vec<SetId>);
    type IntoIter = alloc::vec::IntoIter<(String, Vec<SetId>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Condition, Descriptor, PlaceholderAttrs, Source};
    use alloc::vec;

    fn set(queries: &[&str]) -> SourceSet<u32> {
        SourceSet::new(
            0,
            PlaceholderAttrs::default(),
            queries
                .iter()
                .map(|q| Descriptor::new(Condition::from_label(Some(*q)), Source::new(*q))),
        )
    }

    #[test]
    fn groups_sets_by_query_in_first_seen_order() {
        let sets = vec![set(&["a", "b"]), set(&["b", "c"]), set(&["default"])];
        let index = ConditionIndex::build(&sets);
        let entries: Vec<(&str, &[SetId])> = index.iter().collect();
        assert_eq!(
            entries,
            vec![("a", &[0][..]), ("b", &[0, 1][..]), ("c", &[1][..])]
        );
    }

    #[test]
    fn no_queries_is_empty() {
        let index = ConditionIndex::build::<u32>(&[]);
        assert_eq!(index.len(), 0);
        assert_eq!(index.iter().count(), 0);
    }
}
