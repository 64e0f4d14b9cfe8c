//! # Receipt Import Contract
//!
//! Types for the bulk-import boundary with the external receipt-parsing
//! collaborator (a vision API client living outside the core).
//!
//! The collaborator resolves its network call and hands over plain
//! data; the core applies it synchronously as a bulk item replace
//! followed by setting the explicit total. If a later scan supersedes
//! an earlier one, last write wins at this boundary - that ordering is
//! the caller's responsibility.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One recognized receipt line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReceiptLine {
    pub name: String,
    pub amount: f64,
}

/// A full parsed receipt: ordered lines plus the printed total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReceiptImport {
    pub items: Vec<ReceiptLine>,
    pub total: f64,
}

impl ReceiptImport {
    /// Parses the collaborator's JSON payload.
    ///
    /// ## Example
    /// ```rust
    /// use divvy_core::import::ReceiptImport;
    ///
    /// let payload = r#"{
    ///     "items": [
    ///         { "name": "Pad Thai", "amount": 12.5 },
    ///         { "name": "Iced Tea", "amount": 3.0 }
    ///     ],
    ///     "total": 15.5
    /// }"#;
    ///
    /// let import = ReceiptImport::from_json(payload).unwrap();
    /// assert_eq!(import.items.len(), 2);
    /// assert_eq!(import.total, 15.5);
    /// ```
    pub fn from_json(payload: &str) -> serde_json::Result<Self> {
        serde_json::from_str(payload)
    }
}
