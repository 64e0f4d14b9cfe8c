//! # Domain Types
//!
//! Core domain types used throughout Divvy.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  Participant    │   │   Allocation    │   │  GlobalInputs   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  weight         │   │  explicit_total │       │
//! │  │  name           │   │  checked        │   │  surcharge      │       │
//! │  │  color_tag      │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  ParticipantId  │   │     ItemId      │   │    UnitType     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  u64, monotonic │   │  u64, monotonic │   │  Percent        │       │
//! │  │  never reused   │   │  never reused   │   │  Share          │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity Pattern
//! Ids are plain monotonic counters scoped to one session. They are
//! typed (`ParticipantId` vs `ItemId`) so an item id can never be passed
//! where a participant id is expected - the composite keys the original
//! encoded into DOM id strings are expressed directly in the type system.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::amount::{Amount, Surcharge, Weight};

// =============================================================================
// Identifiers
// =============================================================================

/// Identity of a participant. Monotonically assigned, never reused
/// within a session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(transparent)]
#[ts(export)]
pub struct ParticipantId(u64);

impl ParticipantId {
    #[inline]
    pub const fn new(value: u64) -> Self {
        ParticipantId(value)
    }

    #[inline]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a billable item. Monotonically assigned, never reused
/// within a session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(transparent)]
#[ts(export)]
pub struct ItemId(u64);

impl ItemId {
    #[inline]
    pub const fn new(value: u64) -> Self {
        ItemId(value)
    }

    #[inline]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Color Tag
// =============================================================================

/// Display color for a participant, for visual distinction only.
///
/// Channels are drawn from bright constrained ranges and sum toward a
/// fixed brightness, so every tag reads as a saturated mid-tone that
/// dark text stays legible on. Derived deterministically from the
/// participant id: the same session always produces the same colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ColorTag {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Target sum of the three channels.
const COLOR_BRIGHTNESS: i64 = 700;

impl ColorTag {
    /// Derives the color tag for a participant id.
    pub fn derive(id: ParticipantId) -> Self {
        // Bit-mix the id so consecutive ids land far apart in color space.
        let mut x = id.value().wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        x ^= x >> 33;
        x = x.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
        x ^= x >> 29;

        let first = 100 + (x % 141) as i64; // 100..=240
        let second = 50 + ((x >> 16) % 191) as i64; // 50..=240
        let third = (COLOR_BRIGHTNESS - first - second).clamp(0, 255);

        let channels = [first as u8, second as u8, third as u8];
        // Rotate channel order per id so the dominant hue varies too.
        let rotation = (x >> 32) as usize % 3;
        ColorTag {
            r: channels[rotation],
            g: channels[(rotation + 1) % 3],
            b: channels[(rotation + 2) % 3],
        }
    }

    /// Renders the CSS color string the adapter puts on name badges.
    pub fn css_string(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

// =============================================================================
// Participant
// =============================================================================

/// A person among whom item costs are divided.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Participant {
    /// Unique identifier, monotonic within the session.
    pub id: ParticipantId,

    /// Mutable display name.
    pub name: String,

    /// Display color, assigned once at creation.
    pub color_tag: ColorTag,
}

impl Participant {
    /// Creates a participant with a color derived from its id.
    pub fn new(id: ParticipantId, name: impl Into<String>) -> Self {
        Participant {
            id,
            name: name.into(),
            color_tag: ColorTag::derive(id),
        }
    }
}

// =============================================================================
// Unit Type
// =============================================================================

/// How an item's allocation weights are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum UnitType {
    /// Weights are percentages that must account for 100% of the item.
    Percent,
    /// Weights are relative share counts (2 shares pay twice 1 share).
    Share,
}

impl Default for UnitType {
    fn default() -> Self {
        UnitType::Percent
    }
}

impl UnitType {
    /// The other unit type; switching an item does not clear weights,
    /// only their interpretation changes.
    #[inline]
    pub fn toggled(&self) -> Self {
        match self {
            UnitType::Percent => UnitType::Share,
            UnitType::Share => UnitType::Percent,
        }
    }
}

// =============================================================================
// Allocation
// =============================================================================

/// One participant's assignment on one item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Allocation {
    /// Raw input value; unset means "auto-fill from the remainder".
    pub weight: Weight,

    /// Whether the participant is charged for this item at all.
    /// An unchecked participant never receives payout, whatever the weight.
    pub checked: bool,
}

impl Allocation {
    pub const fn new(weight: Weight, checked: bool) -> Self {
        Allocation { weight, checked }
    }
}

/// New participants join every item unset and checked.
impl Default for Allocation {
    fn default() -> Self {
        Allocation {
            weight: Weight::unset(),
            checked: true,
        }
    }
}

// =============================================================================
// Global Inputs
// =============================================================================

/// Caller-owned inputs passed into the engine on every run.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GlobalInputs {
    /// Optional override of the computed subtotal.
    pub explicit_total: Amount,

    /// Tip / service percentage, applied only when no explicit total
    /// is given.
    pub surcharge: Surcharge,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_tag_is_deterministic() {
        let id = ParticipantId::new(7);
        assert_eq!(ColorTag::derive(id), ColorTag::derive(id));
    }

    #[test]
    fn test_color_tag_varies_across_ids() {
        let a = ColorTag::derive(ParticipantId::new(1));
        let b = ColorTag::derive(ParticipantId::new(2));
        assert_ne!(a, b);
    }

    #[test]
    fn test_color_tag_css_string() {
        let tag = ColorTag { r: 10, g: 20, b: 30 };
        assert_eq!(tag.css_string(), "rgb(10, 20, 30)");
    }

    #[test]
    fn test_unit_type_default_and_toggle() {
        assert_eq!(UnitType::default(), UnitType::Percent);
        assert_eq!(UnitType::Percent.toggled(), UnitType::Share);
        assert_eq!(UnitType::Share.toggled(), UnitType::Percent);
    }

    #[test]
    fn test_allocation_default() {
        let alloc = Allocation::default();
        assert!(alloc.checked);
        assert!(alloc.weight.is_unset());
    }

    #[test]
    fn test_id_display() {
        assert_eq!(format!("{}", ParticipantId::new(3)), "3");
        assert_eq!(format!("{}", ItemId::new(12)), "12");
    }
}
