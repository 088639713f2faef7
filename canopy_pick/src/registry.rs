// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Target registry: opted-in nodes, their flag sets and listeners, and the
//! leaf → owner back-reference map.
//!
//! ## Overview
//!
//! Registration is what makes a scene node interactive. The registry owns a
//! typed record per target — enabled/deep masks plus attached listeners — and
//! tags every pickable leaf in the target's subtree with a back-reference, so
//! a raw geometric hit can be mapped to its interactive owner without walking
//! the scene at dispatch time. A node appears at most once; registering it
//! again, or unregistering a non-member, is a no-op.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;

use crate::types::{EventKind, EventMask, SceneWalk, TargetEvent};

/// Identifier of an attached listener, handed back by
/// [`Dispatcher::on`](crate::dispatcher::Dispatcher::on) and accepted by
/// [`Dispatcher::off`](crate::dispatcher::Dispatcher::off).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ListenerId(pub(crate) u64);

pub(crate) type Listener<K> = Box<dyn FnMut(&TargetEvent<K>)>;

/// Back-reference from a pick leaf to its registered owner.
#[derive(Clone, Debug, Eq, PartialEq)]
enum Owner<K> {
    /// The leaf is itself the registered target.
    Itself,
    /// The registered ancestor owning this leaf.
    Node(K),
}

struct TargetRecord<K> {
    enabled: EventMask,
    deep: EventMask,
    listeners: [Vec<(ListenerId, Listener<K>)>; EventKind::COUNT],
}

impl<K> TargetRecord<K> {
    fn new() -> Self {
        Self {
            enabled: EventMask::empty(),
            deep: EventMask::empty(),
            listeners: [const { Vec::new() }; EventKind::COUNT],
        }
    }
}

/// The set of scene nodes opted into interaction.
pub(crate) struct TargetRegistry<K> {
    /// Registration order; doubles as the root list handed to the ray caster.
    order: Vec<K>,
    records: HashMap<K, TargetRecord<K>>,
    owners: HashMap<K, Owner<K>>,
    next_listener: u64,
}

impl<K: Clone + Eq + Hash> TargetRegistry<K> {
    pub(crate) fn new() -> Self {
        Self {
            order: Vec::new(),
            records: HashMap::new(),
            owners: HashMap::new(),
            next_listener: 0,
        }
    }

    pub(crate) fn roots(&self) -> &[K] {
        &self.order
    }

    pub(crate) fn is_registered(&self, node: &K) -> bool {
        self.records.contains_key(node)
    }

    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }

    /// Opt `node` into interaction. No-op if already registered.
    ///
    /// Every pick leaf in the node's subtree is tagged with a back-reference
    /// to `node` (or to itself when the node is its own leaf).
    pub(crate) fn register(&mut self, node: K, scene: &impl SceneWalk<K>) {
        if self.records.contains_key(&node) {
            return;
        }
        let owners = &mut self.owners;
        if !scene.has_children(&node) {
            if scene.is_pick_leaf(&node) {
                owners.insert(node.clone(), Owner::Itself);
            }
        } else {
            scene.visit_subtree(&node, &mut |leaf| {
                if scene.is_pick_leaf(leaf) {
                    let owner = if *leaf == node {
                        Owner::Itself
                    } else {
                        Owner::Node(node.clone())
                    };
                    owners.insert(leaf.clone(), owner);
                }
            });
        }
        self.records.insert(node.clone(), TargetRecord::new());
        self.order.push(node);
    }

    /// Remove `node` from the registry. No-op if not registered.
    ///
    /// Detaches all of the node's listeners (they drop with the record) and
    /// clears the back-reference tag of every visited descendant, not only
    /// the root's.
    pub(crate) fn unregister(&mut self, node: &K, scene: &impl SceneWalk<K>) {
        if self.records.remove(node).is_none() {
            return;
        }
        let owners = &mut self.owners;
        scene.visit_subtree(node, &mut |leaf| {
            owners.remove(leaf);
        });
        if let Some(pos) = self.order.iter().position(|n| n == node) {
            self.order.remove(pos);
        }
    }

    /// Map a raw geometric hit back to its interactive owner.
    ///
    /// Untagged leaves resolve to themselves only when registered directly;
    /// anything else is skipped by the caller.
    pub(crate) fn resolve_owner(&self, leaf: &K) -> Option<K> {
        match self.owners.get(leaf) {
            Some(Owner::Itself) => Some(leaf.clone()),
            Some(Owner::Node(k)) => Some(k.clone()),
            None => self.records.contains_key(leaf).then(|| leaf.clone()),
        }
    }

    pub(crate) fn set_enabled(&mut self, node: &K, kind: Option<EventKind>, on: bool) {
        if let Some(record) = self.records.get_mut(node) {
            record.enabled.set(kind_mask(kind), on);
        }
    }

    pub(crate) fn set_deep(&mut self, node: &K, kind: Option<EventKind>, on: bool) {
        if let Some(record) = self.records.get_mut(node) {
            record.deep.set(kind_mask(kind), on);
        }
    }

    pub(crate) fn enabled(&self, node: &K, kind: EventKind) -> bool {
        self.records
            .get(node)
            .is_some_and(|r| r.enabled.contains(kind.mask()))
    }

    pub(crate) fn deep_enabled(&self, node: &K, kind: EventKind) -> bool {
        self.records
            .get(node)
            .is_some_and(|r| r.deep.contains(kind.mask()))
    }

    /// Attach a listener; implicitly enables `kind` for the node.
    ///
    /// Returns `None` when the node is not registered.
    pub(crate) fn attach(
        &mut self,
        node: &K,
        kind: EventKind,
        listener: Listener<K>,
    ) -> Option<ListenerId> {
        let record = self.records.get_mut(node)?;
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        record.listeners[kind.idx()].push((id, listener));
        record.enabled.insert(kind.mask());
        Some(id)
    }

    /// Detach listeners: one by id, all of a kind, or all of them.
    ///
    /// A removal that empties a kind's listener list implicitly disables that
    /// kind, keeping `enabled` consistent with "does anything observe this".
    pub(crate) fn detach(&mut self, node: &K, kind: Option<EventKind>, id: Option<ListenerId>) {
        let Some(record) = self.records.get_mut(node) else {
            return;
        };
        match kind {
            Some(kind) => detach_kind(record, kind, id),
            None => {
                for kind in EventKind::ALL {
                    detach_kind(record, kind, id);
                }
            }
        }
    }

    pub(crate) fn listener_count(&self, node: &K, kind: EventKind) -> usize {
        self.records
            .get(node)
            .map_or(0, |r| r.listeners[kind.idx()].len())
    }

    /// Invoke the node's listeners for the payload's kind.
    pub(crate) fn notify(&mut self, node: &K, event: &TargetEvent<K>) {
        if let Some(record) = self.records.get_mut(node) {
            for (_, listener) in record.listeners[event.kind.idx()].iter_mut() {
                listener(event);
            }
        }
    }
}

fn detach_kind<K>(record: &mut TargetRecord<K>, kind: EventKind, id: Option<ListenerId>) {
    let list = &mut record.listeners[kind.idx()];
    let before = list.len();
    match id {
        Some(id) => list.retain(|(lid, _)| *lid != id),
        None => list.clear(),
    }
    // Only an actual removal may flip the flag; an explicit enable with no
    // listeners attached stays untouched.
    if before > 0 && list.is_empty() {
        record.enabled.remove(kind.mask());
    }
}

fn kind_mask(kind: Option<EventKind>) -> EventMask {
    kind.map_or(EventMask::all(), EventKind::mask)
}

impl<K: core::fmt::Debug> core::fmt::Debug for TargetRegistry<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TargetRegistry")
            .field("order", &self.order)
            .field("tagged_leaves", &self.owners.len())
            .finish_non_exhaustive()
    }
}
