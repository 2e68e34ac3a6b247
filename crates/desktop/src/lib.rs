//! `shelftrack-desktop` — thin application facade.
//!
//! Any frontend (touchscreen, console, web form) drives the system
//! through [`commands`]: one function per operation, returning a short
//! status string. Display, confirmation dialogs and re-rendering are the
//! frontend's business.

pub mod commands;

pub use commands::AppState;
