//! Metrics collection.
//!
//! # Metrics
//! - `propconf_loads_total` (counter): loads by outcome (`ok` or error kind)
//! - `propconf_reloads_total` (counter): reloads by outcome
//! - `propconf_changed_keys_total` (counter): keys reported changed by reloads
//! - `propconf_validation_failures_total` (counter): failed validators
//!
//! # Design Decisions
//! - Emitted through the `metrics` facade; no exporter is bundled
//! - Outcome labels reuse `LoadError::kind`

use crate::error::LoadError;

fn outcome(err: Option<&LoadError>) -> &'static str {
    err.map(LoadError::kind).unwrap_or("ok")
}

/// Record the outcome of an initial load.
pub fn record_load(err: Option<&LoadError>) {
    ::metrics::counter!("propconf_loads_total", "outcome" => outcome(err)).increment(1);
}

/// Record the outcome of a reload and how many keys it changed.
pub fn record_reload(err: Option<&LoadError>, changed: usize) {
    ::metrics::counter!("propconf_reloads_total", "outcome" => outcome(err)).increment(1);
    if changed > 0 {
        ::metrics::counter!("propconf_changed_keys_total").increment(changed as u64);
    }
}

/// Record failed validators.
pub fn record_validation_failures(count: usize) {
    ::metrics::counter!("propconf_validation_failures_total").increment(count as u64);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_outcome_labels() {
        assert_eq!(outcome(None), "ok");
        let err = LoadError::Empty {
            path: PathBuf::from("/tmp/x.conf"),
        };
        assert_eq!(outcome(Some(&err)), "empty");
    }

    #[test]
    fn test_recording_without_recorder_is_noop() {
        record_load(None);
        record_reload(Some(&LoadError::NotInitialized), 0);
        record_validation_failures(3);
    }
}
