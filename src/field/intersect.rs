//! Ordered set routines over id sequences

use std::collections::HashSet;

use crate::document::DocId;

/// AND merge.
///
/// Keeps the ids of the first sequence that occur in every other sequence,
/// in first-sequence order, without duplicates, at most `limit` of them.
pub fn intersect(lists: &[&[DocId]], limit: usize) -> Vec<DocId> {
    let Some((first, rest)) = lists.split_first() else {
        return Vec::new();
    };

    let others: Vec<HashSet<&DocId>> = rest.iter().map(|list| list.iter().collect()).collect();
    let mut seen = HashSet::new();
    let mut result = Vec::new();

    for id in first.iter() {
        if result.len() >= limit {
            break;
        }

        if others.iter().all(|set| set.contains(id)) && seen.insert(id) {
            result.push(id.clone());
        }
    }

    result
}

/// Filter `base` to ids present in at least one of `lists`, keeping base order
pub fn intersect_union(base: &[DocId], lists: &[&[DocId]]) -> Vec<DocId> {
    let allowed: HashSet<&DocId> = lists.iter().flat_map(|list| list.iter()).collect();

    base.iter()
        .filter(|id| allowed.contains(id))
        .cloned()
        .collect()
}
