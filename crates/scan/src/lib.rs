//! `shelftrack-scan` — the acquisition boundary.
//!
//! Camera decoders, keyboards and other producers submit raw scan text
//! through a [`ScanFeed`]; the [`ScanWorker`] consumes one event at a
//! time, finishing normalization (including the line-number prompt)
//! before entering the store's critical section. A producer callback must
//! never touch the store directly.

mod sources;
mod worker;

pub use sources::{FeedbackSink, FnPrompt, LinePrompt, SilentFeedback};
pub use worker::{scan_queue, ScanEvent, ScanFeed, ScanQueue, ScanWorker};
