//! # Item Ledger
//!
//! Owns the set of billable items and their per-participant allocations.
//!
//! ## Allocation Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 One item, four participants                             │
//! │                                                                         │
//! │  Participant   Weight    Checked   Meaning                              │
//! │  ───────────   ──────    ───────   ─────────────────────────────────    │
//! │  Alice         60        yes       pays a pinned 60%                    │
//! │  Bob           unset     yes       auto-fills from the remainder        │
//! │  Carol         unset     yes       auto-fills from the remainder        │
//! │  Dave          0         no        excluded from this item entirely     │
//! │                                                                         │
//! │  total_assigned_weight = 60   (set weights only, checked ignored)       │
//! │  unset_count           = 2    (Bob and Carol share the remaining 40)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The ledger stores state and answers the bookkeeping questions above;
//! turning them into money is the [engine]'s job.
//!
//! [engine]: crate::engine

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::amount::{Amount, Weight};
use crate::types::{Allocation, ItemId, ParticipantId, UnitType};
use crate::FULL_PERCENT;

// =============================================================================
// Item
// =============================================================================

/// One billable line with a price and per-participant allocations.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Item {
    /// Unique identifier, monotonic within the session.
    pub id: ItemId,

    /// Mutable display name, defaults to empty.
    pub name: String,

    /// Price; unset until the user enters one.
    pub amount: Amount,

    /// How the weights below are interpreted.
    pub unit_type: UnitType,

    /// Participant assignments, keyed by participant id.
    /// Ordered map so iteration (and therefore computation) is
    /// deterministic.
    pub allocations: BTreeMap<ParticipantId, Allocation>,
}

impl Item {
    fn new(id: ItemId, name: impl Into<String>, amount: Amount) -> Self {
        Item {
            id,
            name: name.into(),
            amount,
            unit_type: UnitType::default(),
            allocations: BTreeMap::new(),
        }
    }

    /// Sum of all *set* weights, ignoring unset ones and ignoring the
    /// checked flag. Checked status affects payout, not the 100%-sum
    /// bookkeeping.
    pub fn total_assigned_weight(&self) -> f64 {
        self.allocations
            .values()
            .filter_map(|alloc| alloc.weight.get())
            .sum()
    }

    /// Number of allocations whose weight is unset, checked or not.
    pub fn unset_count(&self) -> usize {
        self.allocations
            .values()
            .filter(|alloc| alloc.weight.is_unset())
            .count()
    }

    /// Looks up one participant's allocation on this item.
    pub fn allocation(&self, participant_id: ParticipantId) -> Option<&Allocation> {
        self.allocations.get(&participant_id)
    }
}

// =============================================================================
// Item Ledger
// =============================================================================

/// The set of billable items, in insertion order.
///
/// ## Invariants
/// - Item ids are monotonic and never reused within a session
/// - Unknown ids passed to any mutation are silent no-ops (stale
///   adapter references, not faults)
/// - The ledger stores whatever allocations it is given; keeping every
///   current participant present on every item is the session's job
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ItemLedger {
    items: Vec<Item>,
    next_id: u64,
}

impl ItemLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        ItemLedger {
            items: Vec::new(),
            next_id: 1,
        }
    }

    /// Adds an item and returns its id. The amount may be unset.
    pub fn add_item(&mut self, name: impl Into<String>, amount: Amount) -> ItemId {
        let id = ItemId::new(self.next_id);
        self.next_id += 1;
        self.items.push(Item::new(id, name, amount));
        id
    }

    /// Removes an item. Unknown ids are a silent no-op.
    pub fn remove_item(&mut self, id: ItemId) {
        self.items.retain(|item| item.id != id);
    }

    /// Renames an item.
    pub fn set_item_name(&mut self, id: ItemId, name: impl Into<String>) {
        if let Some(item) = self.get_mut(id) {
            item.name = name.into();
        }
    }

    /// Updates an item's amount. Unset overwrites a previous price.
    pub fn set_item_amount(&mut self, id: ItemId, amount: Amount) {
        if let Some(item) = self.get_mut(id) {
            item.amount = amount;
        }
    }

    /// Sets one participant's allocation on an item, creating the entry
    /// if it does not exist yet. No-op if the item is unknown.
    ///
    /// An unset weight is stored as unset - distinct from 0.
    pub fn set_allocation(
        &mut self,
        item_id: ItemId,
        participant_id: ParticipantId,
        weight: Weight,
        checked: bool,
    ) {
        if let Some(item) = self.get_mut(item_id) {
            item.allocations
                .insert(participant_id, Allocation::new(weight, checked));
        }
    }

    /// Inserts the default allocation (unset, checked) if the
    /// participant has no entry on this item yet. Existing entries are
    /// left alone.
    pub fn ensure_allocation(&mut self, item_id: ItemId, participant_id: ParticipantId) {
        if let Some(item) = self.get_mut(item_id) {
            item.allocations.entry(participant_id).or_default();
        }
    }

    /// Removes one participant's allocation from one item.
    pub fn remove_allocation(&mut self, item_id: ItemId, participant_id: ParticipantId) {
        if let Some(item) = self.get_mut(item_id) {
            item.allocations.remove(&participant_id);
        }
    }

    /// Cascade for participant removal: deletes the participant's
    /// allocation entry from every item.
    pub fn remove_participant(&mut self, participant_id: ParticipantId) {
        for item in &mut self.items {
            item.allocations.remove(&participant_id);
        }
    }

    /// Sum of the item's set weights. See [`Item::total_assigned_weight`].
    /// Returns 0 for unknown items.
    pub fn total_assigned_weight(&self, item_id: ItemId) -> f64 {
        self.get(item_id)
            .map(Item::total_assigned_weight)
            .unwrap_or(0.0)
    }

    /// Number of unset allocations on the item. Returns 0 for unknown
    /// items.
    pub fn unset_count(&self, item_id: ItemId) -> usize {
        self.get(item_id).map(Item::unset_count).unwrap_or(0)
    }

    /// Toggles an item between Percent and Share.
    ///
    /// Existing weights are kept: the same numeric weight is now read
    /// as a share count instead of a percentage (or back).
    pub fn switch_unit_type(&mut self, item_id: ItemId) {
        if let Some(item) = self.get_mut(item_id) {
            item.unit_type = item.unit_type.toggled();
        }
    }

    /// Distributes the remaining percentage evenly across the unset
    /// allocations of a Percent item.
    ///
    /// `remaining = 100 - total_assigned_weight` is divided by the
    /// number of *all* unset allocations, and each checked unset
    /// participant gets that quotient pinned as a concrete weight.
    /// Explicit no-op when nothing is unset (never divides by zero)
    /// and for Share items, which have no auto-fill concept.
    pub fn auto_distribute_remainder(&mut self, item_id: ItemId) {
        let Some(item) = self.get_mut(item_id) else {
            return;
        };
        if item.unit_type != UnitType::Percent {
            return;
        }

        let unset = item.unset_count();
        if unset == 0 {
            return;
        }

        let fill = (FULL_PERCENT - item.total_assigned_weight()) / unset as f64;
        for alloc in item.allocations.values_mut() {
            if alloc.checked && alloc.weight.is_unset() {
                alloc.weight = Weight::from_value(fill);
            }
        }
    }

    /// Bulk replace consumed by the receipt-import collaborator.
    ///
    /// Clears the ledger and adds the given `(name, amount)` lines in
    /// order with fresh monotonic ids. Allocations start empty; the
    /// session re-seeds the default entry for every current
    /// participant afterwards.
    pub fn replace_all_items<I>(&mut self, lines: I)
    where
        I: IntoIterator<Item = (String, Amount)>,
    {
        self.items.clear();
        for (name, amount) in lines {
            self.add_item(name, amount);
        }
    }

    /// All items, in insertion order.
    pub fn list(&self) -> &[Item] {
        &self.items
    }

    /// Looks up an item by id.
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    fn get_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    /// Ids of all current items, in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.items.iter().map(|item| item.id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for ItemLedger {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
