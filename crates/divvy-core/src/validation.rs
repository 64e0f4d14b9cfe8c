//! # Validation Module
//!
//! Input validation for the mutation surface.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (adapter)                                           │
//! │  ├── Input element constraints (min/max/step)                          │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Name requirements (rename must not end up empty)                  │
//! │  └── Per-field numeric ranges                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Engine diagnostics                                           │
//! │  └── Cross-field findings (over-allocation, missing amounts)           │
//! │                                                                         │
//! │  Note the split: a single weight of 120 fails HERE; two weights of     │
//! │  60 each pass here and surface as ItemOverAllocated from the engine.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::{FULL_PERCENT, MAX_NAME_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a participant name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 100 characters
///
/// ## Example
/// ```rust
/// use divvy_core::validation::validate_participant_name;
///
/// assert!(validate_participant_name("Alice").is_ok());
/// assert!(validate_participant_name("   ").is_err());
/// ```
pub fn validate_participant_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Validates an item name.
///
/// ## Rules
/// - May be empty (items default to an empty name)
/// - Must be at most 100 characters
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    if name.trim().len() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "item name".to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a single percentage weight input.
///
/// ## Rules
/// - Must be between 0 and 100
///
/// A *sum* of valid weights may still exceed 100; that is a cross-field
/// condition and surfaces as an engine diagnostic, not here.
pub fn validate_percent_weight(weight: f64) -> ValidationResult<()> {
    if !(0.0..=FULL_PERCENT).contains(&weight) {
        return Err(ValidationError::OutOfRange {
            field: "percentage".to_string(),
            min: 0,
            max: FULL_PERCENT as i64,
        });
    }

    Ok(())
}

/// Validates a single share-count weight input.
///
/// ## Rules
/// - Must be non-negative (zero shares = pays nothing)
pub fn validate_share_weight(weight: f64) -> ValidationResult<()> {
    if weight < 0.0 {
        return Err(ValidationError::OutOfRange {
            field: "shares".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates an item amount.
///
/// ## Rules
/// - Must be non-negative (zero is allowed; the engine treats it as
///   "no usable price")
pub fn validate_amount(amount: f64) -> ValidationResult<()> {
    if amount < 0.0 {
        return Err(ValidationError::OutOfRange {
            field: "amount".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a surcharge percentage.
///
/// ## Rules
/// - Must be between -100 (full discount) and 1000
pub fn validate_surcharge_percent(pct: f64) -> ValidationResult<()> {
    if !(-100.0..=1000.0).contains(&pct) {
        return Err(ValidationError::OutOfRange {
            field: "surcharge".to_string(),
            min: -100,
            max: 1000,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_participant_name() {
        assert!(validate_participant_name("Alice").is_ok());
        assert!(validate_participant_name("  Bob  ").is_ok());

        assert!(validate_participant_name("").is_err());
        assert!(validate_participant_name("   ").is_err());
        assert!(validate_participant_name(&"A".repeat(200)).is_err());
    }

    #[test]
    fn test_validate_item_name_allows_empty() {
        assert!(validate_item_name("").is_ok());
        assert!(validate_item_name("Pad Thai").is_ok());
        assert!(validate_item_name(&"A".repeat(200)).is_err());
    }

    #[test]
    fn test_validate_percent_weight() {
        assert!(validate_percent_weight(0.0).is_ok());
        assert!(validate_percent_weight(33.3).is_ok());
        assert!(validate_percent_weight(100.0).is_ok());

        assert!(validate_percent_weight(-1.0).is_err());
        assert!(validate_percent_weight(100.1).is_err());
    }

    #[test]
    fn test_validate_share_weight() {
        assert!(validate_share_weight(0.0).is_ok());
        assert!(validate_share_weight(7.5).is_ok());
        assert!(validate_share_weight(-0.5).is_err());
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount(0.0).is_ok());
        assert!(validate_amount(12.5).is_ok());
        assert!(validate_amount(-0.01).is_err());
    }

    #[test]
    fn test_validate_surcharge_percent() {
        assert!(validate_surcharge_percent(0.0).is_ok());
        assert!(validate_surcharge_percent(12.5).is_ok());
        assert!(validate_surcharge_percent(-100.0).is_ok());
        assert!(validate_surcharge_percent(-100.5).is_err());
        assert!(validate_surcharge_percent(1001.0).is_err());
    }
}
