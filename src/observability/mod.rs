//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! config subsystem produces:
//!     → tracing events (load, reload, validation, macro cycles)
//!     → metrics.rs (load/reload outcomes, changed keys, validation failures)
//!
//! Consumers:
//!     → logging.rs subscriber (binary only; the library never installs one)
//!     → any `metrics` recorder the embedding application installs
//! ```
//!
//! # Design Decisions
//! - Library code only emits; installing subscribers/recorders is the caller's job
//! - Metrics are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
