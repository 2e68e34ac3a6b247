//! `shelftrack-shelving` — the operation layer.
//!
//! Every operation is one critical section: load the document, mutate it
//! in memory, write it back once, report the outcome. Frontends and scan
//! consumers share a [`ShelfService`] through the [`SharedService`] guard;
//! nothing may mutate the store outside it.

mod service;

pub use service::{lock_service, OpError, OpResult, ShelfService, SharedService};
