//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (sections + properties)
//!     → loader.rs (existence / readability / emptiness probes)
//!     → parser.rs (text → PropertyMap)
//!     → store.rs (Config, data behind ArcSwap)
//!     → access.rs (typed reads, macros.rs expands tokens on every read)
//!     → validation.rs (declarative checks, all failures collected)
//!
//! On reload:
//!     store.rs re-runs loader.rs + parser.rs
//!     → atomic swap of Arc<PropertyMap>
//!     → ReloadDiff of old vs new resolved values
//! ```
//!
//! # Design Decisions
//! - Data is immutable once parsed; changes require a full reload
//! - Typed reads never fail, they degrade to defaults
//! - A failed reload leaves the current data untouched

pub mod access;
pub mod global;
pub mod loader;
pub mod macros;
pub mod parser;
pub mod probe;
pub mod store;
pub mod validation;

pub use access::{FileMode, PropertySource};
pub use parser::parse;
pub use store::{Config, PropertyMap, ReloadDiff};
pub use validation::{Checker, Constraint, Validator};
