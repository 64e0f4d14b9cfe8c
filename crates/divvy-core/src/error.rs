//! # Error Types
//!
//! Validation errors and the diagnostic taxonomy for divvy-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  divvy-core errors (this file)                                         │
//! │  ├── ValidationError  - Input validation failures (mutation surface)   │
//! │  └── Diagnostic       - Non-fatal findings attached to results         │
//! │                                                                         │
//! │  Diagnostics are DATA, not errors: compute() never returns Err.        │
//! │  The worst outcome of any computation is a zero-amount result plus     │
//! │  diagnostics for the caller to surface as banner text.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in messages (item position, field name)
//! 3. Errors are enum variants, never String
//! 4. Each variant maps to a user-facing message

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

// =============================================================================
// Diagnostics
// =============================================================================

/// A non-fatal validation finding attached to an [`AllocationResult`].
///
/// Diagnostics are collected, never thrown. Each item is evaluated
/// independently, so one broken item never aborts computation of the
/// others - it just contributes 0 and leaves a diagnostic behind.
///
/// `item_number` is the 1-based position of the item in ledger order,
/// matching the numbering the adapter shows next to each item.
///
/// [`AllocationResult`]: crate::engine::AllocationResult
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum Diagnostic {
    /// Percent item whose assigned weights exceed 100.
    #[error("item {item_number} is assigned more than 100%")]
    ItemOverAllocated { item_number: usize },

    /// Item with concrete allocations but no usable price.
    #[error("item {item_number} has assignments but no amount")]
    ItemMissingAmount { item_number: usize },

    /// Percent item whose weights don't reach 100 with nobody left to
    /// auto-fill the remainder.
    #[error("item {item_number} does not add up to 100%")]
    ItemNotFull { item_number: usize },

    /// Share item with zero total share weight.
    #[error("item {item_number} has no shares assigned")]
    ItemEmpty { item_number: usize },

    /// A total or surcharge was entered before any item exists.
    #[error("nothing to calculate: add an item first")]
    NothingToCalculate,
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors on the mutation surface.
///
/// These occur when user input doesn't meet requirements, before any
/// state changes. Malformed *numeric* input never lands here - it is
/// normalized to the unset state at the ledger boundary instead.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty after trimming.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for fallible core operations.
pub type CoreResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
