//! Lifecycle management for long-running consumers of a `Config`.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGHUP → ReloadControl::request_reload
//!     Ctrl+C → ReloadControl::stop
//!
//! Reload loop (signals.rs):
//!     ReloadTriggers → Config::reload → diff reported
//! ```
//!
//! # Design Decisions
//! - Reload is always explicit; a signal is just a caller asking for it
//! - A failed reload keeps the previous data and the loop keeps running
//! - Requests arriving while a reload is already queued fold into it

pub mod control;
pub mod signals;

pub use control::{ReloadControl, ReloadTriggers};
