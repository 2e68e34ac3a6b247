//! `shelftrack-store` — JSON file persistence for the inventory document.
//!
//! The whole document is read, mutated in memory and written back on every
//! logical change; there are no partial updates. A file that fails to parse
//! is never overwritten — the explicit backup-then-reset action is the
//! documented recovery path.
//!
//! Map keys in the file are written in sorted order (item sequences keep
//! insertion order), so a byte diff against a file from an app that kept
//! dict insertion order will show reordered keys with identical content.

mod json_store;

pub use json_store::{JsonStore, StoreError, StoreResult};
