// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interception: a privileged pre-delivery hook that can veto a dispatch.
//!
//! At most one interceptor is installed per event kind. It runs synchronously
//! after the enabled-gate and before listener delivery, only for dispatches
//! that carry a raw host sample, and decides solely through the
//! [`AbortHandle`] it is handed. A veto suppresses that one delivery; it is
//! not an error and leaves no trace on later dispatches.

use alloc::boxed::Box;
use core::cell::Cell;

use crate::types::{EventKind, TargetEvent};

/// One-shot cancellation flag for a single dispatch.
///
/// A fresh handle is created for every qualifying dispatch and read exactly
/// once, immediately after the interceptor returns. Handles are never reused,
/// so a veto cannot leak across dispatches.
#[derive(Debug)]
pub struct AbortHandle {
    deliverable: Cell<bool>,
}

impl AbortHandle {
    pub(crate) fn new() -> Self {
        Self {
            deliverable: Cell::new(true),
        }
    }

    /// Suppress listener delivery for the current dispatch.
    pub fn veto(&self) {
        self.deliverable.set(false);
    }

    /// Whether delivery is still allowed.
    pub fn is_deliverable(&self) -> bool {
        self.deliverable.get()
    }
}

/// An interceptor callback: observes the payload, may veto delivery.
pub type Interceptor<K> = Box<dyn FnMut(&TargetEvent<K>, &AbortHandle)>;

/// Event kind → at most one interceptor; re-registration overwrites.
///
/// There is no removal operation; callers that need one install a callback
/// that never vetoes.
pub(crate) struct InterceptTable<K> {
    slots: [Option<Interceptor<K>>; EventKind::COUNT],
}

impl<K> InterceptTable<K> {
    pub(crate) fn new() -> Self {
        Self {
            slots: [const { None }; EventKind::COUNT],
        }
    }

    /// Install `interceptor` for `kind`, replacing any existing one.
    pub(crate) fn set(&mut self, kind: EventKind, interceptor: Interceptor<K>) {
        self.slots[kind.idx()] = Some(interceptor);
    }

    /// Run the interceptor for `kind`, if one is installed.
    pub(crate) fn run(&mut self, kind: EventKind, event: &TargetEvent<K>, abort: &AbortHandle) {
        if let Some(interceptor) = self.slots[kind.idx()].as_mut() {
            interceptor(event, abort);
        }
    }
}

impl<K> core::fmt::Debug for InterceptTable<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let installed: alloc::vec::Vec<EventKind> = EventKind::ALL
            .into_iter()
            .filter(|k| self.slots[k.idx()].is_some())
            .collect();
        f.debug_struct("InterceptTable")
            .field("installed", &installed)
            .finish_non_exhaustive()
    }
}
