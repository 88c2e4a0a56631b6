#![forbid(unsafe_code)]

//! Pinned-first display ordering.
//!
//! [`OrderManager`] owns two explicit sequences, the pin set and the unpinned
//! order, plus the last collection received from the item source. The display
//! order is derived on demand:
//!
//! ```text
//! display = (pinned ∩ collection) ++ (unpinned ∩ collection)
//! ```
//!
//! # Invariants
//!
//! 1. No id appears in both sequences, and neither sequence has duplicates.
//! 2. The display order contains every id of the collection exactly once.
//! 3. Every displayed pinned id precedes every displayed unpinned id.
//! 4. Pinned ids missing from the collection are inert: kept, never shown.
//! 5. `reconcile` never reorders surviving unpinned ids and is idempotent.
//!
//! # Failure Modes
//!
//! None. Operations on unknown or pinned ids report `Unchanged` instead of
//! failing, so a stale drag or click can never break rendering.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::id::ItemId;
use crate::persistence::PersistedOrder;

/// Where an unpinned id goes in the unpinned order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnpinPlacement {
    /// Top of the unpinned region, so the card stays near where it was.
    #[default]
    Front,
    /// Bottom of the unpinned region.
    Back,
}

/// Where newly arrived ids go in the unpinned order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrivalPlacement {
    #[default]
    Append,
    Prepend,
}

/// Placement rules for ids entering the unpinned order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderPolicy {
    pub unpin_placement: UnpinPlacement,
    pub arrival_placement: ArrivalPlacement,
}

/// Result of [`OrderManager::move_unpinned`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The id moved from one unpinned index to another.
    Moved { from: usize, to: usize },
    /// Nothing changed.
    Unchanged,
}

impl MoveOutcome {
    #[must_use]
    pub fn is_moved(self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

/// Result of [`OrderManager::toggle_pin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinToggle {
    Pinned,
    Unpinned,
    Unchanged,
}

/// What a [`OrderManager::reconcile`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReconcileReport {
    /// Unpinned ids dropped because they left the collection.
    pub removed: usize,
    /// Ids that entered the unpinned order.
    pub arrived: usize,
    /// Whether the collection differed from the previous one.
    pub collection_changed: bool,
}

impl ReconcileReport {
    /// Whether the persisted sequences changed.
    #[must_use]
    pub fn order_changed(&self) -> bool {
        self.removed > 0 || self.arrived > 0
    }
}

/// Owner of the pin set and unpinned order.
#[derive(Debug, Clone, Default)]
pub struct OrderManager {
    policy: OrderPolicy,
    pinned: Vec<ItemId>,
    unpinned: Vec<ItemId>,
    collection: Vec<ItemId>,
    present: AHashSet<ItemId>,
}

impl OrderManager {
    /// Empty manager.
    #[must_use]
    pub fn new(policy: OrderPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Manager seeded from persisted state.
    ///
    /// Duplicates are dropped (first occurrence wins) and ids found in the pin
    /// set are removed from the unpinned order. Nothing is displayed until the
    /// first [`reconcile`](Self::reconcile).
    #[must_use]
    pub fn from_persisted(state: PersistedOrder, policy: OrderPolicy) -> Self {
        let mut seen = AHashSet::with_capacity(state.pinned.len() + state.unpinned.len());
        let pinned: Vec<ItemId> = state
            .pinned
            .into_iter()
            .filter(|id| seen.insert(id.clone()))
            .collect();
        let unpinned: Vec<ItemId> = state
            .unpinned
            .into_iter()
            .filter(|id| seen.insert(id.clone()))
            .collect();
        Self {
            policy,
            pinned,
            unpinned,
            collection: Vec::new(),
            present: AHashSet::new(),
        }
    }

    /// Current placement policy.
    #[must_use]
    pub fn policy(&self) -> OrderPolicy {
        self.policy
    }

    /// Replace the placement policy. Existing order is untouched.
    pub fn set_policy(&mut self, policy: OrderPolicy) {
        self.policy = policy;
    }

    /// Pin set, including inert ids.
    #[must_use]
    pub fn pinned(&self) -> &[ItemId] {
        &self.pinned
    }

    /// Unpinned order.
    #[must_use]
    pub fn unpinned(&self) -> &[ItemId] {
        &self.unpinned
    }

    /// Last collection passed to `reconcile`, deduplicated.
    #[must_use]
    pub fn collection(&self) -> &[ItemId] {
        &self.collection
    }

    /// Whether `id` is in the current collection.
    #[must_use]
    pub fn contains(&self, id: &ItemId) -> bool {
        self.present.contains(id)
    }

    /// Whether `id` is in the pin set (displayed or inert).
    #[must_use]
    pub fn is_pinned(&self, id: &ItemId) -> bool {
        self.pinned.contains(id)
    }

    /// Persistable copy of both sequences.
    #[must_use]
    pub fn snapshot(&self) -> PersistedOrder {
        PersistedOrder {
            pinned: self.pinned.clone(),
            unpinned: self.unpinned.clone(),
        }
    }

    /// Merge a fresh collection from the item source.
    ///
    /// Unpinned ids no longer present are dropped; ids absent from both
    /// sequences are placed per [`OrderPolicy::arrival_placement`] in the
    /// collection's order. Surviving ids keep their relative order.
    pub fn reconcile<I>(&mut self, collection: I) -> ReconcileReport
    where
        I: IntoIterator<Item = ItemId>,
    {
        let mut present = AHashSet::new();
        let collection: Vec<ItemId> = collection
            .into_iter()
            .filter(|id| present.insert(id.clone()))
            .collect();
        let collection_changed = collection != self.collection;

        let before = self.unpinned.len();
        self.unpinned.retain(|id| present.contains(id));
        let removed = before - self.unpinned.len();

        let known: AHashSet<&ItemId> = self.pinned.iter().chain(self.unpinned.iter()).collect();
        let arrivals: Vec<ItemId> = collection
            .iter()
            .filter(|id| !known.contains(id))
            .cloned()
            .collect();
        drop(known);
        let arrived = arrivals.len();
        match self.policy.arrival_placement {
            ArrivalPlacement::Append => self.unpinned.extend(arrivals),
            ArrivalPlacement::Prepend => {
                self.unpinned.splice(0..0, arrivals);
            }
        }

        self.collection = collection;
        self.present = present;

        let report = ReconcileReport {
            removed,
            arrived,
            collection_changed,
        };
        if report.order_changed() || collection_changed {
            tracing::debug!(
                message = "order.reconcile",
                removed,
                arrived,
                collection_len = self.collection.len()
            );
        }
        report
    }

    /// Pin an unpinned id, or unpin a pinned one.
    ///
    /// Pinning appends to the pin set. Unpinning places the id per
    /// [`OrderPolicy::unpin_placement`]; an inert id is simply dropped from
    /// the pin set. Unknown ids are ignored.
    pub fn toggle_pin(&mut self, id: &ItemId) -> PinToggle {
        let outcome = if let Some(pos) = self.pinned.iter().position(|p| p == id) {
            let id = self.pinned.remove(pos);
            if self.present.contains(&id) {
                match self.policy.unpin_placement {
                    UnpinPlacement::Front => self.unpinned.insert(0, id),
                    UnpinPlacement::Back => self.unpinned.push(id),
                }
            }
            PinToggle::Unpinned
        } else if self.present.contains(id) || self.unpinned.contains(id) {
            self.unpinned.retain(|u| u != id);
            self.pinned.push(id.clone());
            PinToggle::Pinned
        } else {
            PinToggle::Unchanged
        };
        tracing::debug!(message = "order.toggle_pin", id = %id, outcome = ?outcome);
        outcome
    }

    /// Move `from` to the unpinned index currently held by `to`.
    ///
    /// Moving backward lands `from` before `to`; moving forward lands it
    /// after. Unchanged if the ids are equal, either is pinned, or either is
    /// not a displayed unpinned id.
    pub fn move_unpinned(&mut self, from: &ItemId, to: &ItemId) -> MoveOutcome {
        if from == to || !self.present.contains(from) || !self.present.contains(to) {
            return MoveOutcome::Unchanged;
        }
        let (Some(from_idx), Some(to_idx)) = (self.unpinned_index(from), self.unpinned_index(to))
        else {
            return MoveOutcome::Unchanged;
        };
        self.relocate(from_idx, to_idx)
    }

    /// Move an unpinned id by `delta` slots, clamped to the unpinned region.
    ///
    /// Only displayed unpinned ids count as slots.
    pub fn move_unpinned_by(&mut self, id: &ItemId, delta: isize) -> MoveOutcome {
        if delta == 0 || !self.present.contains(id) {
            return MoveOutcome::Unchanged;
        }
        let slots: Vec<usize> = self
            .unpinned
            .iter()
            .enumerate()
            .filter(|(_, u)| self.present.contains(*u))
            .map(|(i, _)| i)
            .collect();
        let Some(slot) = slots.iter().position(|&i| self.unpinned[i] == *id) else {
            return MoveOutcome::Unchanged;
        };
        let target = slot
            .saturating_add_signed(delta)
            .min(slots.len().saturating_sub(1));
        if target == slot {
            return MoveOutcome::Unchanged;
        }
        self.relocate(slots[slot], slots[target])
    }

    /// Display order: displayed pinned ids, then displayed unpinned ids.
    #[must_use]
    pub fn display_order(&self) -> Vec<ItemId> {
        self.display_iter().cloned().collect()
    }

    /// Iterate the display order without allocating.
    pub fn display_iter(&self) -> impl Iterator<Item = &ItemId> + '_ {
        self.pinned
            .iter()
            .chain(self.unpinned.iter())
            .filter(|id| self.present.contains(*id))
    }

    /// Number of displayed ids.
    #[must_use]
    pub fn display_len(&self) -> usize {
        self.display_iter().count()
    }

    /// Number of displayed pinned ids (the index where unpinned ids start).
    #[must_use]
    pub fn pinned_display_len(&self) -> usize {
        self.pinned
            .iter()
            .filter(|id| self.present.contains(*id))
            .count()
    }

    /// Index of `id` in the display order.
    #[must_use]
    pub fn position_of(&self, id: &ItemId) -> Option<usize> {
        if !self.present.contains(id) {
            return None;
        }
        self.display_iter().position(|d| d == id)
    }

    /// Id at a display index.
    #[must_use]
    pub fn id_at(&self, index: usize) -> Option<&ItemId> {
        self.display_iter().nth(index)
    }

    fn unpinned_index(&self, id: &ItemId) -> Option<usize> {
        self.unpinned.iter().position(|u| u == id)
    }

    fn relocate(&mut self, from: usize, to: usize) -> MoveOutcome {
        let id = self.unpinned.remove(from);
        tracing::debug!(message = "order.move", id = %id, from, to);
        self.unpinned.insert(to, id);
        MoveOutcome::Moved { from, to }
    }
}
