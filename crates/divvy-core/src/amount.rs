//! # Amount Module
//!
//! Optional-decimal value types for prices, weights and the surcharge.
//!
//! ## Unset vs Zero
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE NaN-SENTINEL PROBLEM                                               │
//! │                                                                         │
//! │  A blank input box is not the same thing as a zero:                     │
//! │    weight = 0      → "this person pays nothing for this item"           │
//! │    weight = unset  → "fill this person's share in automatically"        │
//! │                                                                         │
//! │  Representing "unset" as NaN and letting it flow through arithmetic     │
//! │  makes `NaN || 0` style coercions silently turn one into the other.     │
//! │                                                                         │
//! │  OUR SOLUTION: Tagged Optionals                                         │
//! │    Amount / Weight wrap Option<f64>; NaN is normalized to unset at      │
//! │    construction and can never reach the engine.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use divvy_core::amount::{Amount, Weight};
//!
//! // Malformed input normalizes to unset, never an error
//! let price = Amount::parse("12.50");
//! assert_eq!(price.get(), Some(12.5));
//! assert!(Amount::parse("abc").is_unset());
//!
//! // Unset and zero stay distinct
//! assert_ne!(Weight::from_value(0.0), Weight::unset());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

// =============================================================================
// Amount
// =============================================================================

/// A non-negative decimal price with an explicit "not yet entered" state.
///
/// ## Design Decisions
/// - **Option<f64> inside**: unset is a tag, never a NaN sentinel
/// - **Single field tuple struct**: zero-cost wrapper, serializes as
///   `number | null`
/// - **NaN normalized at construction**: the engine never sees NaN
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct Amount(Option<f64>);

impl Amount {
    /// Creates a set amount. NaN input normalizes to unset.
    ///
    /// ## Example
    /// ```rust
    /// use divvy_core::amount::Amount;
    ///
    /// assert_eq!(Amount::from_value(9.99).get(), Some(9.99));
    /// assert!(Amount::from_value(f64::NAN).is_unset());
    /// ```
    #[inline]
    pub fn from_value(value: f64) -> Self {
        if value.is_nan() {
            Amount(None)
        } else {
            Amount(Some(value))
        }
    }

    /// The "not yet entered" state.
    #[inline]
    pub const fn unset() -> Self {
        Amount(None)
    }

    /// Parses user input, normalizing anything unparseable to unset.
    ///
    /// This is the ledger boundary where malformed numeric strings are
    /// absorbed instead of raised as errors.
    ///
    /// ## Example
    /// ```rust
    /// use divvy_core::amount::Amount;
    ///
    /// assert_eq!(Amount::parse(" 42 ").get(), Some(42.0));
    /// assert!(Amount::parse("").is_unset());
    /// assert!(Amount::parse("12,5").is_unset());
    /// ```
    pub fn parse(input: &str) -> Self {
        match input.trim().parse::<f64>() {
            Ok(value) => Amount::from_value(value),
            Err(_) => Amount::unset(),
        }
    }

    /// Returns the inner value, if set.
    #[inline]
    pub const fn get(&self) -> Option<f64> {
        self.0
    }

    /// Checks whether a value has been entered.
    #[inline]
    pub const fn is_set(&self) -> bool {
        self.0.is_some()
    }

    /// Checks whether the amount is still unset.
    #[inline]
    pub const fn is_unset(&self) -> bool {
        self.0.is_none()
    }

    /// The value for summation contexts: unset contributes 0, never NaN.
    #[inline]
    pub fn or_zero(&self) -> f64 {
        self.0.unwrap_or(0.0)
    }

    /// Checks for a set, strictly positive value.
    ///
    /// An unset or zero amount means "no usable price" to the engine.
    #[inline]
    pub fn is_positive(&self) -> bool {
        matches!(self.0, Some(v) if v > 0.0)
    }
}

/// Display implementation for debugging and log output.
/// The export module does its own formatting for the share summary.
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "${:.2}", value),
            None => write!(f, "-"),
        }
    }
}

// =============================================================================
// Weight
// =============================================================================

/// A participant's raw input value on an item.
///
/// Interpreted as a percentage on Percent items and as a relative share
/// count on Share items. Unset means "auto-fill from the remainder" on
/// Percent items and contributes a deterministic 0 on Share items.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct Weight(Option<f64>);

impl Weight {
    /// Creates a set weight. NaN input normalizes to unset.
    #[inline]
    pub fn from_value(value: f64) -> Self {
        if value.is_nan() {
            Weight(None)
        } else {
            Weight(Some(value))
        }
    }

    /// The "auto-fill me" state.
    #[inline]
    pub const fn unset() -> Self {
        Weight(None)
    }

    /// Parses user input, normalizing anything unparseable to unset.
    pub fn parse(input: &str) -> Self {
        match input.trim().parse::<f64>() {
            Ok(value) => Weight::from_value(value),
            Err(_) => Weight::unset(),
        }
    }

    /// Returns the inner value, if set.
    #[inline]
    pub const fn get(&self) -> Option<f64> {
        self.0
    }

    /// Checks whether a concrete weight has been entered.
    #[inline]
    pub const fn is_set(&self) -> bool {
        self.0.is_some()
    }

    /// Checks whether the weight is in the auto-fill state.
    #[inline]
    pub const fn is_unset(&self) -> bool {
        self.0.is_none()
    }

    /// The value for summation contexts: unset contributes 0, never NaN.
    #[inline]
    pub fn or_zero(&self) -> f64 {
        self.0.unwrap_or(0.0)
    }
}

// =============================================================================
// Surcharge
// =============================================================================

/// An additional percentage (tip / service charge) applied to the
/// subtotal when no explicit grand total is given.
///
/// Negative values act as a discount; both are distributed across
/// participants proportionally to their raw share of the subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct Surcharge(f64);

impl Surcharge {
    /// Creates a surcharge from a percentage (10.0 = 10%).
    /// NaN input normalizes to zero.
    #[inline]
    pub fn from_percentage(pct: f64) -> Self {
        if pct.is_nan() {
            Surcharge(0.0)
        } else {
            Surcharge(pct)
        }
    }

    /// No surcharge.
    #[inline]
    pub const fn zero() -> Self {
        Surcharge(0.0)
    }

    /// Returns the percentage (for display only).
    #[inline]
    pub const fn percentage(&self) -> f64 {
        self.0
    }

    /// Checks whether a surcharge is in effect.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    /// Applies the surcharge multiplicatively to a subtotal.
    ///
    /// ## Example
    /// ```rust
    /// use divvy_core::amount::Surcharge;
    ///
    /// let tip = Surcharge::from_percentage(10.0);
    /// assert_eq!(tip.apply(200.0), 220.0);
    /// ```
    #[inline]
    pub fn apply(&self, subtotal: f64) -> f64 {
        subtotal * (1.0 + self.0 / 100.0)
    }
}

impl Default for Surcharge {
    fn default() -> Self {
        Surcharge::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
