//! End-to-end allocation scenarios against the public API.
//!
//! Structural unit tests live next to each module; these walk the
//! registry/ledger/engine through realistic bill-splitting setups.

use divvy_core::amount::{Amount, Surcharge, Weight};
use divvy_core::engine::{compute, AllocationResult};
use divvy_core::error::Diagnostic;
use divvy_core::ledger::ItemLedger;
use divvy_core::registry::ParticipantRegistry;
use divvy_core::types::ParticipantId;

const TOLERANCE: f64 = 1e-9;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "expected {expected}, got {actual}"
    );
}

fn two_friends() -> (ParticipantRegistry, ParticipantId, ParticipantId) {
    let mut registry = ParticipantRegistry::new();
    let a = registry.add("Alice");
    let b = registry.add("Bob");
    (registry, a, b)
}

fn payout_sum(result: &AllocationResult) -> f64 {
    result.per_participant.values().map(|s| s.payout).sum()
}

fn running_sum(result: &AllocationResult) -> f64 {
    result.per_participant.values().map(|s| s.total).sum()
}

// =============================================================================
// Percent Items
// =============================================================================

#[test]
fn both_unset_split_evenly_at_compute_time() {
    let (registry, a, b) = two_friends();
    let mut ledger = ItemLedger::new();
    let item = ledger.add_item("Dinner", Amount::from_value(100.0));
    ledger.set_allocation(item, a, Weight::unset(), true);
    ledger.set_allocation(item, b, Weight::unset(), true);

    let result = compute(&registry, &ledger, Amount::unset(), Surcharge::zero());

    assert!(result.diagnostics.is_empty());
    assert_close(result.payout(a), 50.0);
    assert_close(result.payout(b), 50.0);
}

#[test]
fn auto_distribute_pins_the_even_split() {
    let (registry, a, b) = two_friends();
    let mut ledger = ItemLedger::new();
    let item = ledger.add_item("Dinner", Amount::from_value(100.0));
    ledger.set_allocation(item, a, Weight::unset(), true);
    ledger.set_allocation(item, b, Weight::unset(), true);

    ledger.auto_distribute_remainder(item);

    let stored = ledger.get(item).unwrap();
    assert_eq!(stored.allocation(a).unwrap().weight.get(), Some(50.0));
    assert_eq!(stored.allocation(b).unwrap().weight.get(), Some(50.0));
    assert_close(stored.total_assigned_weight(), 100.0);

    let result = compute(&registry, &ledger, Amount::unset(), Surcharge::zero());
    assert_close(result.payout(a), 50.0);
    assert_close(result.payout(b), 50.0);
}

#[test]
fn auto_distribute_sums_to_exactly_100_for_odd_splits() {
    let mut registry = ParticipantRegistry::new();
    let a = registry.add("Alice");
    let b = registry.add("Bob");
    let c = registry.add("Carol");

    let mut ledger = ItemLedger::new();
    let item = ledger.add_item("Dinner", Amount::from_value(10.0));
    ledger.set_allocation(item, a, Weight::unset(), true);
    ledger.set_allocation(item, b, Weight::unset(), true);
    ledger.set_allocation(item, c, Weight::unset(), true);

    ledger.auto_distribute_remainder(item);

    assert_close(ledger.total_assigned_weight(item), 100.0);
}

#[test]
fn pinned_weight_with_auto_filled_remainder() {
    let mut registry = ParticipantRegistry::new();
    let a = registry.add("Alice");
    let b = registry.add("Bob");
    let c = registry.add("Carol");

    let mut ledger = ItemLedger::new();
    let item = ledger.add_item("Dinner", Amount::from_value(200.0));
    ledger.set_allocation(item, a, Weight::from_value(50.0), true);
    ledger.set_allocation(item, b, Weight::unset(), true);
    ledger.set_allocation(item, c, Weight::unset(), true);

    let result = compute(&registry, &ledger, Amount::unset(), Surcharge::zero());

    assert!(result.diagnostics.is_empty());
    assert_close(result.payout(a), 100.0);
    assert_close(result.payout(b), 50.0);
    assert_close(result.payout(c), 50.0);
}

#[test]
fn over_allocated_item_contributes_nothing() {
    let (registry, a, b) = two_friends();
    let mut ledger = ItemLedger::new();
    let item = ledger.add_item("Dinner", Amount::from_value(50.0));
    ledger.set_allocation(item, a, Weight::from_value(60.0), true);
    ledger.set_allocation(item, b, Weight::from_value(60.0), true);

    let result = compute(&registry, &ledger, Amount::unset(), Surcharge::zero());

    assert_eq!(
        result.diagnostics,
        vec![Diagnostic::ItemOverAllocated { item_number: 1 }]
    );
    assert_close(result.per_participant[&a].total, 0.0);
    assert_close(result.per_participant[&b].total, 0.0);
}

#[test]
fn under_allocated_item_with_nothing_to_fill_is_not_full() {
    let (registry, a, b) = two_friends();
    let mut ledger = ItemLedger::new();
    let item = ledger.add_item("Dinner", Amount::from_value(50.0));
    ledger.set_allocation(item, a, Weight::from_value(60.0), true);
    ledger.set_allocation(item, b, Weight::from_value(30.0), true);

    let result = compute(&registry, &ledger, Amount::unset(), Surcharge::zero());

    assert_eq!(
        result.diagnostics,
        vec![Diagnostic::ItemNotFull { item_number: 1 }]
    );
    assert_close(running_sum(&result), 0.0);
}

#[test]
fn concrete_weight_without_amount_is_missing_amount() {
    let (registry, a, b) = two_friends();
    let mut ledger = ItemLedger::new();
    let item = ledger.add_item("Dinner", Amount::unset());
    ledger.set_allocation(item, a, Weight::from_value(60.0), true);
    ledger.set_allocation(item, b, Weight::unset(), true);

    let result = compute(&registry, &ledger, Amount::unset(), Surcharge::zero());

    assert_eq!(
        result.diagnostics,
        vec![Diagnostic::ItemMissingAmount { item_number: 1 }]
    );
}

#[test]
fn untouched_item_stays_silent() {
    let (registry, a, b) = two_friends();
    let mut ledger = ItemLedger::new();
    let item = ledger.add_item("", Amount::unset());
    ledger.set_allocation(item, a, Weight::unset(), true);
    ledger.set_allocation(item, b, Weight::unset(), true);

    let result = compute(&registry, &ledger, Amount::unset(), Surcharge::zero());

    assert!(result.diagnostics.is_empty());
    assert_close(result.grand_total, 0.0);
}

#[test]
fn remainder_pool_includes_unchecked_but_pays_only_checked() {
    let mut registry = ParticipantRegistry::new();
    let a = registry.add("Alice");
    let b = registry.add("Bob");
    let c = registry.add("Carol");

    let mut ledger = ItemLedger::new();
    let item = ledger.add_item("Dinner", Amount::from_value(100.0));
    ledger.set_allocation(item, a, Weight::from_value(50.0), true);
    ledger.set_allocation(item, b, Weight::unset(), true);
    ledger.set_allocation(item, c, Weight::unset(), false);

    let result = compute(&registry, &ledger, Amount::unset(), Surcharge::zero());

    // Remainder 50 splits across both unset allocations (25 each), but
    // the unchecked one receives no payout, so only 75 of the item is
    // carried into running totals.
    assert!(result.diagnostics.is_empty());
    assert_close(result.per_participant[&a].total, 50.0);
    assert_close(result.per_participant[&b].total, 25.0);
    assert_close(result.per_participant[&c].total, 0.0);
}

// =============================================================================
// Share Items
// =============================================================================

#[test]
fn share_item_splits_by_weight_ratio() {
    let (registry, a, b) = two_friends();
    let mut ledger = ItemLedger::new();
    let item = ledger.add_item("Dinner", Amount::from_value(90.0));
    ledger.switch_unit_type(item);
    ledger.set_allocation(item, a, Weight::from_value(2.0), true);
    ledger.set_allocation(item, b, Weight::from_value(1.0), true);

    let result = compute(&registry, &ledger, Amount::unset(), Surcharge::zero());

    assert!(result.diagnostics.is_empty());
    assert_close(result.payout(a), 60.0);
    assert_close(result.payout(b), 30.0);
}

#[test]
fn share_item_with_no_shares_is_empty() {
    let (registry, a, b) = two_friends();
    let mut ledger = ItemLedger::new();
    let item = ledger.add_item("Dinner", Amount::from_value(30.0));
    ledger.switch_unit_type(item);
    ledger.set_allocation(item, a, Weight::unset(), true);
    ledger.set_allocation(item, b, Weight::from_value(0.0), true);

    let result = compute(&registry, &ledger, Amount::unset(), Surcharge::zero());

    assert_eq!(
        result.diagnostics,
        vec![Diagnostic::ItemEmpty { item_number: 1 }]
    );
    assert_close(running_sum(&result), 0.0);
}

#[test]
fn unset_share_weight_contributes_deterministic_zero() {
    let (registry, a, b) = two_friends();
    let mut ledger = ItemLedger::new();
    let item = ledger.add_item("Dinner", Amount::from_value(30.0));
    ledger.switch_unit_type(item);
    ledger.set_allocation(item, a, Weight::from_value(3.0), true);
    ledger.set_allocation(item, b, Weight::unset(), true);

    let result = compute(&registry, &ledger, Amount::unset(), Surcharge::zero());

    assert!(result.diagnostics.is_empty());
    assert_close(result.payout(a), 30.0);
    assert_close(result.payout(b), 0.0);
}

// =============================================================================
// Totals, Surcharge and Explicit Override
// =============================================================================

#[test]
fn explicit_total_scales_every_payout_proportionally() {
    let (registry, a, b) = two_friends();
    let mut ledger = ItemLedger::new();
    let item = ledger.add_item("Dinner", Amount::from_value(100.0));
    ledger.set_allocation(item, a, Weight::from_value(75.0), true);
    ledger.set_allocation(item, b, Weight::from_value(25.0), true);

    let result = compute(
        &registry,
        &ledger,
        Amount::from_value(110.0),
        Surcharge::zero(),
    );

    assert_close(result.subtotal, 100.0);
    assert_close(result.grand_total, 110.0);
    assert_close(result.payout(a), 82.5); // 75 × 1.1
    assert_close(result.payout(b), 27.5); // 25 × 1.1
}

#[test]
fn surcharge_applies_when_no_explicit_total() {
    let (registry, a, b) = two_friends();
    let mut ledger = ItemLedger::new();
    let item = ledger.add_item("Dinner", Amount::from_value(100.0));
    ledger.set_allocation(item, a, Weight::from_value(50.0), true);
    ledger.set_allocation(item, b, Weight::from_value(50.0), true);

    let result = compute(
        &registry,
        &ledger,
        Amount::unset(),
        Surcharge::from_percentage(10.0),
    );

    assert_close(result.grand_total, 110.0);
    assert_close(result.payout(a), 55.0);
    assert_close(result.payout(b), 55.0);
}

#[test]
fn explicit_total_wins_over_surcharge() {
    let (registry, a, _b) = two_friends();
    let mut ledger = ItemLedger::new();
    let item = ledger.add_item("Dinner", Amount::from_value(100.0));
    ledger.set_allocation(item, a, Weight::from_value(100.0), true);

    let result = compute(
        &registry,
        &ledger,
        Amount::from_value(120.0),
        Surcharge::from_percentage(10.0),
    );

    assert_close(result.grand_total, 120.0);
    assert_close(result.payout(a), 120.0);
}

#[test]
fn running_totals_sum_to_subtotal_without_diagnostics() {
    let (registry, a, b) = two_friends();
    let mut ledger = ItemLedger::new();

    let dinner = ledger.add_item("Dinner", Amount::from_value(80.0));
    ledger.set_allocation(dinner, a, Weight::from_value(50.0), true);
    ledger.set_allocation(dinner, b, Weight::unset(), true);

    let drinks = ledger.add_item("Drinks", Amount::from_value(24.0));
    ledger.switch_unit_type(drinks);
    ledger.set_allocation(drinks, a, Weight::from_value(1.0), true);
    ledger.set_allocation(drinks, b, Weight::from_value(2.0), true);

    let result = compute(&registry, &ledger, Amount::unset(), Surcharge::zero());

    assert!(result.diagnostics.is_empty());
    assert_close(result.subtotal, 104.0);
    assert_close(running_sum(&result), result.subtotal);
    assert_close(payout_sum(&result), result.grand_total);
}

#[test]
fn broken_items_stay_local_but_count_toward_subtotal() {
    let (registry, a, b) = two_friends();
    let mut ledger = ItemLedger::new();

    let broken = ledger.add_item("Starter", Amount::from_value(50.0));
    ledger.set_allocation(broken, a, Weight::from_value(60.0), true);
    ledger.set_allocation(broken, b, Weight::from_value(60.0), true);

    let fine = ledger.add_item("Main", Amount::from_value(100.0));
    ledger.set_allocation(fine, a, Weight::from_value(50.0), true);
    ledger.set_allocation(fine, b, Weight::from_value(50.0), true);

    let result = compute(&registry, &ledger, Amount::unset(), Surcharge::zero());

    assert_eq!(
        result.diagnostics,
        vec![Diagnostic::ItemOverAllocated { item_number: 1 }]
    );
    // The broken item still has a price on the bill, so its amount is
    // spread across the participants who do have running totals.
    assert_close(result.subtotal, 150.0);
    assert_close(result.grand_total, 150.0);
    assert_close(result.payout(a), 75.0);
    assert_close(result.payout(b), 75.0);
}

// =============================================================================
// Empty-Ledger Edge Cases
// =============================================================================

#[test]
fn empty_ledger_without_inputs_is_silent() {
    let (registry, _a, _b) = two_friends();
    let ledger = ItemLedger::new();

    let result = compute(&registry, &ledger, Amount::unset(), Surcharge::zero());

    assert!(result.diagnostics.is_empty());
    assert_close(result.grand_total, 0.0);
    assert_close(payout_sum(&result), 0.0);
}

#[test]
fn explicit_total_without_items_has_nothing_to_calculate() {
    let (registry, _a, _b) = two_friends();
    let ledger = ItemLedger::new();

    let result = compute(
        &registry,
        &ledger,
        Amount::from_value(110.0),
        Surcharge::zero(),
    );

    assert_eq!(result.diagnostics, vec![Diagnostic::NothingToCalculate]);
    // The override is still reported, but nobody owes anything.
    assert_close(result.grand_total, 110.0);
    assert_close(payout_sum(&result), 0.0);
}

#[test]
fn surcharge_without_items_has_nothing_to_calculate() {
    let (registry, _a, _b) = two_friends();
    let ledger = ItemLedger::new();

    let result = compute(
        &registry,
        &ledger,
        Amount::unset(),
        Surcharge::from_percentage(10.0),
    );

    assert_eq!(result.diagnostics, vec![Diagnostic::NothingToCalculate]);
    assert_close(result.grand_total, 0.0);
}

#[test]
fn diagnostics_keep_ledger_order() {
    let (registry, a, b) = two_friends();
    let mut ledger = ItemLedger::new();

    let first = ledger.add_item("Starter", Amount::from_value(10.0));
    ledger.set_allocation(first, a, Weight::from_value(60.0), true);
    ledger.set_allocation(first, b, Weight::from_value(60.0), true);

    let second = ledger.add_item("Drinks", Amount::from_value(20.0));
    ledger.switch_unit_type(second);
    ledger.set_allocation(second, a, Weight::from_value(0.0), true);
    ledger.set_allocation(second, b, Weight::from_value(0.0), true);

    let result = compute(&registry, &ledger, Amount::unset(), Surcharge::zero());

    assert_eq!(
        result.diagnostics,
        vec![
            Diagnostic::ItemOverAllocated { item_number: 1 },
            Diagnostic::ItemEmpty { item_number: 2 },
        ]
    );
}
