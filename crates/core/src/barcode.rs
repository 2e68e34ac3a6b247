//! Barcode identity normalization.
//!
//! Scanned or typed text comes in two shapes: compound
//! (`<order number>-<line number>`) and raw (no separator). Raw text is
//! never stored as-is; it is completed with an operator-supplied line
//! number first. The prompt is modeled as an explicit two-phase protocol:
//! [`normalize`] either finishes immediately or hands back a
//! [`PendingScan`] that the caller completes once the line number is known.

use crate::item::ItemId;

/// Conventional separator between order number and line number.
pub const SEPARATOR: char = '-';

/// Number of leading characters of a raw scan taken as the order number.
pub const ORDER_NUMBER_LEN: usize = 10;

/// Result of normalizing one piece of raw scanned/typed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    /// The text already contained the separator; returned unchanged.
    Complete(ItemId),
    /// The text had no separator; a line number must be supplied.
    NeedsLineNumber(PendingScan),
}

/// A raw scan waiting for its line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingScan {
    order_number: String,
}

impl PendingScan {
    pub fn order_number(&self) -> &str {
        &self.order_number
    }

    /// Complete the scan with the supplied line number.
    ///
    /// The line number is taken verbatim; it may be empty.
    pub fn complete(self, line_number: &str) -> ItemId {
        ItemId::from_compound(format!("{}{}{}", self.order_number, SEPARATOR, line_number))
    }
}

/// Resolve raw text to a compound identifier, or to a pending scan when
/// the line number is missing.
///
/// Compound text passes through without any validation of its parts. For
/// raw text the order number is the first [`ORDER_NUMBER_LEN`] characters,
/// or all of them when the scan is shorter.
pub fn normalize(raw: &str) -> Normalized {
    if raw.contains(SEPARATOR) {
        return Normalized::Complete(ItemId::from_compound(raw));
    }
    Normalized::NeedsLineNumber(PendingScan {
        // chars, not bytes: a short or multi-byte scan must not panic
        order_number: raw.chars().take(ORDER_NUMBER_LEN).collect(),
    })
}
