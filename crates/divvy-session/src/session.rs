//! # Session Aggregate
//!
//! One bill-splitting session: a participant registry, an item ledger
//! and the global inputs, owned together and mutated through a single
//! surface.
//!
//! ## Why an Aggregate?
//! The registry and ledger are only consistent *together*: every
//! current participant must have an allocation entry on every item,
//! and a removed participant must vanish from all of them. Those
//! cross-object rules live here, so neither collection can be mutated
//! past the other.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Operations                                   │
//! │                                                                         │
//! │  Adapter Action           Session Method          State Change          │
//! │  ───────────────          ──────────────          ─────────────────     │
//! │                                                                         │
//! │  Click "+ friend" ───────► add_participant() ───► registry + default    │
//! │                                                   entry on every item   │
//! │                                                                         │
//! │  Click "✖" on friend ────► remove_participant() ► registry + cascade    │
//! │                                                   across all items      │
//! │                                                                         │
//! │  Type a weight ──────────► set_weight() ────────► allocation updated,   │
//! │                                                   participant re-checked│
//! │                                                                         │
//! │  Receipt scan resolves ──► apply_receipt_import()► bulk replace + seed  │
//! │                                                                         │
//! │  After EVERY mutation the adapter calls recompute() and re-renders.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use divvy_core::amount::{Amount, Surcharge, Weight};
use divvy_core::engine::{compute, AllocationResult};
use divvy_core::error::CoreResult;
use divvy_core::export::share_summary;
use divvy_core::import::ReceiptImport;
use divvy_core::ledger::ItemLedger;
use divvy_core::registry::ParticipantRegistry;
use divvy_core::types::{GlobalInputs, ItemId, ParticipantId};
use divvy_core::validation::validate_item_name;

/// One logical bill-splitting session.
#[derive(Debug, Clone)]
pub struct Session {
    registry: ParticipantRegistry,
    ledger: ItemLedger,
    inputs: GlobalInputs,
    created_at: DateTime<Utc>,
}

impl Session {
    /// Creates a session bootstrapped with exactly one participant
    /// (`Friend 1`) and an empty ledger.
    pub fn new() -> Self {
        let mut registry = ParticipantRegistry::new();
        registry.add_default_named();
        Session {
            registry,
            ledger: ItemLedger::new(),
            inputs: GlobalInputs::default(),
            created_at: Utc::now(),
        }
    }

    // =========================================================================
    // Participants
    // =========================================================================

    /// Adds a participant, default-naming it `Friend {id}` when no name
    /// is given, and seeds the default allocation (unset, checked) on
    /// every existing item.
    pub fn add_participant(&mut self, name: Option<&str>) -> ParticipantId {
        let id = match name {
            Some(name) => self.registry.add(name),
            None => self.registry.add_default_named(),
        };
        let item_ids: Vec<ItemId> = self.ledger.ids().collect();
        for item_id in item_ids {
            self.ledger.ensure_allocation(item_id, id);
        }
        debug!(participant = %id, "participant added");
        id
    }

    /// Removes a participant and cascades the removal through every
    /// item's allocations. Unknown ids are a silent no-op.
    pub fn remove_participant(&mut self, id: ParticipantId) {
        self.registry.remove(id);
        self.ledger.remove_participant(id);
        debug!(participant = %id, "participant removed");
    }

    /// Renames a participant. Fails on an empty-after-trim name.
    pub fn rename_participant(&mut self, id: ParticipantId, name: &str) -> CoreResult<()> {
        self.registry.rename(id, name)?;
        debug!(participant = %id, "participant renamed");
        Ok(())
    }

    // =========================================================================
    // Items
    // =========================================================================

    /// Adds an item and seeds the default allocation for every current
    /// participant.
    pub fn add_item(&mut self, name: &str, amount: Amount) -> ItemId {
        let id = self.ledger.add_item(name, amount);
        let participant_ids: Vec<ParticipantId> = self.registry.ids().collect();
        for participant_id in participant_ids {
            self.ledger.ensure_allocation(id, participant_id);
        }
        debug!(item = %id, %amount, "item added");
        id
    }

    /// Removes an item. Unknown ids are a silent no-op.
    pub fn remove_item(&mut self, id: ItemId) {
        self.ledger.remove_item(id);
        debug!(item = %id, "item removed");
    }

    /// Renames an item. Empty names are allowed; over-long ones fail.
    pub fn rename_item(&mut self, id: ItemId, name: &str) -> CoreResult<()> {
        validate_item_name(name)?;
        self.ledger.set_item_name(id, name);
        Ok(())
    }

    /// Updates an item's amount; the adapter passes whatever the input
    /// box parses to, unset included.
    pub fn set_item_amount(&mut self, id: ItemId, amount: Amount) {
        self.ledger.set_item_amount(id, amount);
        debug!(item = %id, %amount, "item amount changed");
    }

    /// Toggles an item between percent and share interpretation.
    pub fn switch_unit_type(&mut self, id: ItemId) {
        self.ledger.switch_unit_type(id);
        debug!(item = %id, "unit type switched");
    }

    /// Distributes the remaining percentage across unset allocations.
    pub fn auto_distribute(&mut self, id: ItemId) {
        self.ledger.auto_distribute_remainder(id);
        debug!(item = %id, "remainder distributed");
    }

    // =========================================================================
    // Allocations
    // =========================================================================

    /// Sets a participant's weight on an item. Typing a weight
    /// re-includes the participant, so the entry is stored checked.
    ///
    /// No-op when the participant is not (or no longer) registered -
    /// a stale adapter reference, not a fault.
    pub fn set_weight(&mut self, item_id: ItemId, participant_id: ParticipantId, weight: Weight) {
        if !self.registry.contains(participant_id) {
            return;
        }
        self.ledger.set_allocation(item_id, participant_id, weight, true);
    }

    /// Includes or excludes a participant on one item.
    ///
    /// Excluding stores weight 0 (set): the participant neither pays
    /// nor occupies the auto-fill pool. Re-including resets the weight
    /// to unset so the remainder split picks the participant up again.
    pub fn set_checked(&mut self, item_id: ItemId, participant_id: ParticipantId, checked: bool) {
        if !self.registry.contains(participant_id) {
            return;
        }
        let weight = if checked {
            Weight::unset()
        } else {
            Weight::from_value(0.0)
        };
        self.ledger
            .set_allocation(item_id, participant_id, weight, checked);
    }

    // =========================================================================
    // Global Inputs
    // =========================================================================

    /// Sets or clears the explicit grand-total override.
    pub fn set_explicit_total(&mut self, total: Amount) {
        self.inputs.explicit_total = total;
        debug!(%total, "explicit total changed");
    }

    /// Sets the surcharge percentage.
    pub fn set_surcharge(&mut self, surcharge: Surcharge) {
        self.inputs.surcharge = surcharge;
        debug!(percent = surcharge.percentage(), "surcharge changed");
    }

    // =========================================================================
    // Receipt Import
    // =========================================================================

    /// Applies a parsed receipt: replaces all items, seeds the default
    /// allocation for every participant on every new item, and sets the
    /// printed total as the explicit override.
    ///
    /// Synchronous by design - the network fetch happened outside the
    /// core, and if a later scan supersedes this one, last write wins.
    pub fn apply_receipt_import(&mut self, import: &ReceiptImport) {
        info!(lines = import.items.len(), total = import.total, "applying receipt import");

        self.ledger.replace_all_items(
            import
                .items
                .iter()
                .map(|line| (line.name.clone(), Amount::from_value(line.amount))),
        );

        let participant_ids: Vec<ParticipantId> = self.registry.ids().collect();
        let item_ids: Vec<ItemId> = self.ledger.ids().collect();
        for item_id in item_ids {
            for participant_id in &participant_ids {
                self.ledger.ensure_allocation(item_id, *participant_id);
            }
        }

        self.inputs.explicit_total = Amount::from_value(import.total);
    }

    // =========================================================================
    // Computation
    // =========================================================================

    /// Runs the allocation engine over the current snapshots.
    pub fn recompute(&self) -> AllocationResult {
        compute(
            &self.registry,
            &self.ledger,
            self.inputs.explicit_total,
            self.inputs.surcharge,
        )
    }

    /// Renders the plain-text share summary for the current state.
    pub fn share_summary(&self) -> String {
        share_summary(&self.registry, &self.recompute())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn registry(&self) -> &ParticipantRegistry {
        &self.registry
    }

    pub fn ledger(&self) -> &ItemLedger {
        &self.ledger
    }

    pub fn inputs(&self) -> &GlobalInputs {
        &self.inputs
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
