//! # Allocation Engine
//!
//! Pure computation: registry + ledger snapshots in, per-participant
//! money out. No state, no side effects - every mutation anywhere in
//! the session triggers a full re-run, which is fine at tens of
//! participants and items.
//!
//! ## Computation Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      compute()                                          │
//! │                                                                         │
//! │  For each item (independently - failures stay local):                  │
//! │                                                                         │
//! │    Percent item              Share item                                 │
//! │    ───────────────           ───────────────                           │
//! │    over 100%? ── diagnostic  no shares? ──── diagnostic                │
//! │    no amount? ── diagnostic  no amount? ──── diagnostic                │
//! │    gap, no one                                                          │
//! │    to fill? ──── diagnostic                                             │
//! │    else: pinned % as-is,     else: weight / total_share                 │
//! │    unset split remainder                                                │
//! │         │                         │                                     │
//! │         └────────────┬────────────┘                                     │
//! │                      ▼                                                  │
//! │        running totals per participant                                   │
//! │                      ▼                                                  │
//! │        payout = grand_total × running / Σ running                       │
//! │        (surcharge or explicit total distributed proportionally,         │
//! │         never added flatly)                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use divvy_core::amount::{Amount, Surcharge, Weight};
//! use divvy_core::engine::compute;
//! use divvy_core::ledger::ItemLedger;
//! use divvy_core::registry::ParticipantRegistry;
//!
//! let mut registry = ParticipantRegistry::new();
//! let alice = registry.add("Alice");
//! let bob = registry.add("Bob");
//!
//! let mut ledger = ItemLedger::new();
//! let dinner = ledger.add_item("Dinner", Amount::from_value(90.0));
//! ledger.set_allocation(dinner, alice, Weight::from_value(60.0), true);
//! ledger.set_allocation(dinner, bob, Weight::from_value(40.0), true);
//!
//! let result = compute(&registry, &ledger, Amount::unset(), Surcharge::zero());
//! assert!(result.diagnostics.is_empty());
//! assert_eq!(result.per_participant[&alice].payout, 54.0);
//! assert_eq!(result.per_participant[&bob].payout, 36.0);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::amount::{Amount, Surcharge};
use crate::error::Diagnostic;
use crate::ledger::{Item, ItemLedger};
use crate::registry::ParticipantRegistry;
use crate::types::{ItemId, ParticipantId, UnitType};
use crate::{FULL_PERCENT, WEIGHT_EPSILON};

// =============================================================================
// Result Types
// =============================================================================

/// One participant's slice of the computation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ParticipantShare {
    /// Raw running total: the sum of this participant's item-level
    /// dollar allocations, before grand-total renormalization.
    pub total: f64,

    /// Final owed amount after renormalization against the grand total.
    pub payout: f64,

    /// Item-level breakdown of the raw total.
    pub per_item: BTreeMap<ItemId, f64>,
}

/// Everything one engine run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AllocationResult {
    /// One entry per registered participant, including those who owe 0.
    pub per_participant: BTreeMap<ParticipantId, ParticipantShare>,

    /// Sum of all set item amounts.
    pub subtotal: f64,

    /// Explicit total when given, otherwise subtotal with surcharge
    /// applied.
    pub grand_total: f64,

    /// Validation findings, in ledger order. Collected, never thrown.
    pub diagnostics: Vec<Diagnostic>,
}

impl AllocationResult {
    /// Final owed amount for a participant; 0 for unknown ids.
    pub fn payout(&self, id: ParticipantId) -> f64 {
        self.per_participant.get(&id).map_or(0.0, |s| s.payout)
    }
}

// =============================================================================
// Entry Point
// =============================================================================

/// Computes the full allocation for the given snapshots.
///
/// Deterministic and pure: identical inputs always yield an identical
/// result. Diagnostics are attached to the result, never returned as
/// `Err` - a broken item contributes 0 and computation of every other
/// item proceeds.
pub fn compute(
    registry: &ParticipantRegistry,
    ledger: &ItemLedger,
    explicit_total: Amount,
    surcharge: Surcharge,
) -> AllocationResult {
    let mut per_participant: BTreeMap<ParticipantId, ParticipantShare> = registry
        .ids()
        .map(|id| (id, ParticipantShare::default()))
        .collect();
    let mut diagnostics = Vec::new();

    for (index, item) in ledger.list().iter().enumerate() {
        let item_number = index + 1;
        match item.unit_type {
            UnitType::Percent => {
                resolve_percent_item(item, item_number, &mut per_participant, &mut diagnostics)
            }
            UnitType::Share => {
                resolve_share_item(item, item_number, &mut per_participant, &mut diagnostics)
            }
        }
    }

    let subtotal: f64 = ledger.list().iter().map(|item| item.amount.or_zero()).sum();
    let grand_total = match explicit_total.get() {
        Some(total) => total,
        None => surcharge.apply(subtotal),
    };

    if ledger.is_empty() {
        let total_entered = explicit_total
            .get()
            .is_some_and(|total| total.abs() > WEIGHT_EPSILON);
        if total_entered || !surcharge.is_zero() {
            diagnostics.push(Diagnostic::NothingToCalculate);
        }
    }

    // Renormalize the raw running totals against the grand total, so a
    // surcharge or explicit override is spread proportionally to each
    // participant's share of the raw subtotal. A zero running sum means
    // every payout is 0 - never NaN.
    let running_sum: f64 = per_participant.values().map(|share| share.total).sum();
    if running_sum.abs() > WEIGHT_EPSILON {
        for share in per_participant.values_mut() {
            share.payout = grand_total * share.total / running_sum;
        }
    }

    AllocationResult {
        per_participant,
        subtotal,
        grand_total,
        diagnostics,
    }
}

// =============================================================================
// Per-Item Resolution
// =============================================================================

/// Percent item: pinned weights pay their percentage, unset weights
/// split the remainder evenly.
fn resolve_percent_item(
    item: &Item,
    item_number: usize,
    per_participant: &mut BTreeMap<ParticipantId, ParticipantShare>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let assigned = item.total_assigned_weight();
    let unset = item.unset_count();

    if assigned > FULL_PERCENT + WEIGHT_EPSILON {
        diagnostics.push(Diagnostic::ItemOverAllocated { item_number });
        return;
    }

    if !item.amount.is_positive() {
        // Someone typed a concrete weight but there is no price yet.
        // An entirely untouched item stays silent.
        if unset < item.allocations.len() {
            diagnostics.push(Diagnostic::ItemMissingAmount { item_number });
        }
        return;
    }
    let amount = item.amount.or_zero();

    let remaining = FULL_PERCENT - assigned;
    if remaining.abs() > WEIGHT_EPSILON && unset == 0 {
        diagnostics.push(Diagnostic::ItemNotFull { item_number });
        return;
    }

    // The remainder is split across ALL unset allocations, checked or
    // not - but only checked participants receive payout below.
    let fill = if unset > 0 {
        remaining / unset as f64
    } else {
        0.0
    };

    for (participant_id, alloc) in &item.allocations {
        if !alloc.checked {
            continue;
        }
        // Allocations for removed participants are cascaded away by the
        // session; skip any stale stragglers rather than resurrect them.
        let Some(share) = per_participant.get_mut(participant_id) else {
            continue;
        };
        let effective = alloc.weight.get().unwrap_or(fill);
        let contribution = amount * effective / FULL_PERCENT;
        share.total += contribution;
        share.per_item.insert(item.id, contribution);
    }
}

/// Share item: each weight pays its fraction of the total share count.
/// Unset weights contribute a deterministic 0 - there is no auto-fill
/// concept for shares.
fn resolve_share_item(
    item: &Item,
    item_number: usize,
    per_participant: &mut BTreeMap<ParticipantId, ParticipantShare>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let total_share = item.total_assigned_weight();
    if total_share <= 0.0 {
        diagnostics.push(Diagnostic::ItemEmpty { item_number });
        return;
    }

    if !item.amount.is_positive() {
        diagnostics.push(Diagnostic::ItemMissingAmount { item_number });
        return;
    }
    let amount = item.amount.or_zero();

    for (participant_id, alloc) in &item.allocations {
        if !alloc.checked {
            continue;
        }
        let Some(share) = per_participant.get_mut(participant_id) else {
            continue;
        };
        let fraction = alloc.weight.or_zero() / total_share;
        let contribution = amount * fraction;
        share.total += contribution;
        share.per_item.insert(item.id, contribution);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
// Scenario coverage lives in tests/engine_scenarios.rs; these cover the
// structural basics.
