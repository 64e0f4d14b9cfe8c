//! # divvy-core: Pure Business Logic for Divvy
//!
//! This crate is the **heart** of Divvy, a bill-splitting calculator.
//! It contains all business logic as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Divvy Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Presentation Adapter (browser)                  │   │
//! │  │   Friend list ──► Item list ──► Results ──► Share sheet         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ serialized DTOs                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    divvy-session                                │   │
//! │  │    Session aggregate, mutation surface, state wrapper           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ divvy-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ registry  │  │  ledger   │  │  engine   │  │ validation│  │   │
//! │  │   │Participant│  │   Item    │  │ compute() │  │   rules   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DOM • NO NETWORK • PURE FUNCTIONS                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ids, Participant, Allocation, etc.)
//! - [`amount`] - Tagged optional value types (no NaN sentinels!)
//! - [`registry`] - Participant registry
//! - [`ledger`] - Item ledger with per-participant allocations
//! - [`engine`] - The allocation engine
//! - [`error`] - Validation errors and the diagnostic taxonomy
//! - [`validation`] - Input validation rules
//! - [`import`] - Receipt bulk-import contract
//! - [`export`] - Plain-text share summary
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: `compute` is deterministic - same input =
//!    same output
//! 2. **No I/O**: DOM, network and file system access are FORBIDDEN
//!    here
//! 3. **Tagged Optionals**: "not yet entered" is a type state, never a
//!    NaN flowing through arithmetic
//! 4. **Diagnostics over Errors**: computation never fails; findings
//!    are data attached to the result
//!
//! ## Example Usage
//!
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
//! // One 90-dollar item split by share count: 2 shares vs 1 share
//! let mut ledger = ItemLedger::new();
//! let dinner = ledger.add_item("Dinner", Amount::from_value(90.0));
//! ledger.switch_unit_type(dinner);
//! ledger.set_allocation(dinner, alice, Weight::from_value(2.0), true);
//! ledger.set_allocation(dinner, bob, Weight::from_value(1.0), true);
//!
//! let result = compute(&registry, &ledger, Amount::unset(), Surcharge::zero());
//! assert!((result.payout(alice) - 60.0).abs() < 1e-9);
//! assert!((result.payout(bob) - 30.0).abs() < 1e-9);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod amount;
pub mod engine;
pub mod error;
pub mod export;
pub mod import;
pub mod ledger;
pub mod registry;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use divvy_core::Amount` instead of
// `use divvy_core::amount::Amount`

pub use amount::{Amount, Surcharge, Weight};
pub use engine::{compute, AllocationResult, ParticipantShare};
pub use error::{CoreResult, Diagnostic, ValidationError};
pub use export::share_summary;
pub use import::{ReceiptImport, ReceiptLine};
pub use ledger::{Item, ItemLedger};
pub use registry::ParticipantRegistry;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// A fully assigned percent item sums to this.
pub const FULL_PERCENT: f64 = 100.0;

/// Tolerance for floating-point weight comparisons.
///
/// Percent sums are built from user-typed decimals, so "equals 100"
/// and "exceeds 100" are judged within this tolerance.
pub const WEIGHT_EPSILON: f64 = 1e-9;

/// Maximum length of participant and item display names.
pub const MAX_NAME_LENGTH: usize = 100;
