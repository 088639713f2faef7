// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Intersection resolution and recipient selection.
//!
//! ## Overview
//!
//! [`resolve_intersections`] turns the ray caster's raw leaf hits into the
//! frame's intersection list: each leaf is mapped to its registered owner and
//! the list is deduplicated so an owner struck through several leaves keeps
//! its nearest position. [`select_target`] then picks the single recipient
//! for one event kind with the deep-override rule.

use alloc::vec::Vec;

use crate::types::RayHit;

/// Map raw hits to their owning targets, nearest first, deduplicated.
///
/// `owner_of` is the registry's back-reference lookup; leaves it cannot map
/// are skipped. The output order follows the input hit order, so the caster's
/// nearest-first contract carries over to owners.
pub fn resolve_intersections<K: Clone + PartialEq>(
    hits: &[RayHit<K>],
    owner_of: impl Fn(&K) -> Option<K>,
    out: &mut Vec<K>,
) {
    out.clear();
    for hit in hits {
        if let Some(owner) = owner_of(&hit.leaf)
            && !out.contains(&owner)
        {
            out.push(owner);
        }
    }
}

/// Pick the recipient for one event kind from the frame's intersection list.
///
/// The nearest target is the default. Scanning nearest-to-farthest, the first
/// target for which `deep` holds wins instead: an occluded target that opted
/// into deep handling claims priority over nearer targets that did not,
/// while competing deep targets resolve by proximity. An empty list selects
/// nothing.
pub fn select_target<K: Clone>(intersections: &[K], deep: impl Fn(&K) -> bool) -> Option<K> {
    let mut recipient = intersections.first()?;
    for candidate in intersections {
        if deep(candidate) {
            recipient = candidate;
            break;
        }
    }
    Some(recipient.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn hit(leaf: u32, distance: f32) -> RayHit<u32> {
        RayHit { leaf, distance }
    }

    #[test]
    fn owners_keep_their_nearest_occurrence() {
        // Leaves 10 and 11 both belong to owner 1; 20 belongs to owner 2.
        let hits = vec![hit(10, 0.5), hit(20, 1.0), hit(11, 2.0)];
        let owner_of = |leaf: &u32| Some(leaf / 10);
        let mut out = Vec::new();
        resolve_intersections(&hits, owner_of, &mut out);
        assert_eq!(out, vec![1, 2]);
    }

    #[test]
    fn unmapped_leaves_drop_out() {
        let hits = vec![hit(10, 0.5), hit(99, 0.7), hit(20, 1.0)];
        let owner_of = |leaf: &u32| (*leaf != 99).then_some(leaf / 10);
        let mut out = Vec::new();
        resolve_intersections(&hits, owner_of, &mut out);
        assert_eq!(out, vec![1, 2]);
    }

    #[test]
    fn resolve_clears_previous_contents() {
        let mut out = vec![42];
        resolve_intersections(&[], |_: &u32| None, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn nearest_wins_without_deep_flags() {
        assert_eq!(select_target(&[1, 2, 3], |_| false), Some(1));
    }

    #[test]
    fn empty_list_selects_nothing() {
        assert_eq!(select_target(&[], |_: &u32| true), None);
    }

    #[test]
    fn deep_farther_target_overrides_nearer_default() {
        assert_eq!(select_target(&[1, 2, 3], |k| *k == 3), Some(3));
    }

    #[test]
    fn competing_deep_targets_resolve_by_proximity() {
        assert_eq!(select_target(&[1, 2, 3], |k| *k == 2 || *k == 3), Some(2));
    }

    #[test]
    fn deep_nearest_is_a_plain_win() {
        assert_eq!(select_target(&[1, 2], |k| *k == 1), Some(1));
    }
}
