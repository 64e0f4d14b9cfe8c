//! # Share Summary Export
//!
//! Builds the plain-text summary handed to the share-sheet
//! collaborator: a grand-total header, then one line per participant
//! with name, owed amount (2 decimal places) and percentage share of
//! the bill (4 decimal places).

use crate::engine::AllocationResult;
use crate::registry::ParticipantRegistry;

/// Renders the share summary for a computed result.
///
/// Participants appear in registry (insertion) order. With a zero grand
/// total every percentage renders as 0 - never NaN.
///
/// ## Example
/// ```rust
/// use divvy_core::amount::{Amount, Surcharge, Weight};
/// use divvy_core::engine::compute;
/// use divvy_core::export::share_summary;
/// use divvy_core::ledger::ItemLedger;
/// use divvy_core::registry::ParticipantRegistry;
///
/// let mut registry = ParticipantRegistry::new();
/// let alice = registry.add("Alice");
/// let mut ledger = ItemLedger::new();
/// let item = ledger.add_item("Dinner", Amount::from_value(40.0));
/// ledger.set_allocation(item, alice, Weight::from_value(100.0), true);
///
/// let result = compute(&registry, &ledger, Amount::unset(), Surcharge::zero());
/// let text = share_summary(&registry, &result);
/// assert_eq!(text, "Total: $40.00\nAlice: $40.00 (100.0000%)\n");
/// ```
pub fn share_summary(registry: &ParticipantRegistry, result: &AllocationResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("Total: ${:.2}\n", result.grand_total));

    for participant in registry.list() {
        let payout = result.payout(participant.id);
        let percentage = if result.grand_total != 0.0 {
            payout / result.grand_total * 100.0
        } else {
            0.0
        };
        out.push_str(&format!(
            "{}: ${:.2} ({:.4}%)\n",
            participant.name, payout, percentage
        ));
    }

    out
}
