//! Typed section/property configuration store.
//!
//! Loads `[section]` / `name: value` files, resolves `{macro:...}`
//! references, reads values as typed data without failing, reports what
//! changed on reload and validates values declaratively.
//!
//! ```no_run
//! use propconf::{Config, PropertySource, Validator};
//! use propconf::config::validation::{empty, greater};
//!
//! let config = Config::load("/etc/app.conf")?;
//! let port = config.get_i_or("server:port", 8080);
//! let errors = config.validate(&[
//!     Validator::new("server:host", empty, ()),
//!     Validator::new("server:port", greater, 65535),
//! ]);
//! # Ok::<(), propconf::LoadError>(())
//! ```

pub mod config;
pub mod error;
pub mod lifecycle;
pub mod observability;

pub use config::{Config, Constraint, FileMode, PropertyMap, PropertySource, ReloadDiff, Validator};
pub use error::{LoadError, ParseError, ValidationError};
