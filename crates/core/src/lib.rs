//! `shelftrack-core` — domain foundation for the shelving tracker.
//!
//! This crate contains **pure domain** logic (no IO): the persisted
//! document model, barcode identity normalization, hierarchy mutations
//! and the item locator scan.

pub mod barcode;
pub mod document;
pub mod error;
pub mod item;

pub use barcode::{normalize, Normalized, PendingScan, SEPARATOR};
pub use document::{InventoryDoc, LocationNode, NestedShelfNode, Outcome, ShelfNode};
pub use error::{DomainError, DomainResult};
pub use item::{ItemId, ItemPath};
