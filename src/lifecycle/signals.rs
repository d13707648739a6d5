//! OS signal handling.
//!
//! # Responsibilities
//! - Translate SIGHUP into reload requests
//! - Translate Ctrl+C into a stop
//! - Drive `Config::reload` from reload requests
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - SIGHUP triggers config reload, not shutdown
//! - The reload loop takes its triggers from a `ReloadControl` so it can be
//!   driven by anything, not just signals

use std::sync::Arc;

use crate::config::{Config, ReloadDiff};
use crate::error::LoadError;
use crate::lifecycle::{ReloadControl, ReloadTriggers};

/// Turn every SIGHUP into a reload request until stopped.
#[cfg(unix)]
pub fn spawn_hangup_listener(control: ReloadControl) -> std::io::Result<tokio::task::JoinHandle<()>> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut hangup = signal(SignalKind::hangup())?;
    let mut stop = control.subscribe_stop();

    Ok(tokio::spawn(async move {
        loop {
            tokio::select! {
                received = hangup.recv() => {
                    if received.is_none() || !control.request_reload() {
                        break;
                    }
                    tracing::info!("SIGHUP received, reload requested");
                }
                _ = stop.recv() => break,
            }
        }
    }))
}

/// Stop the reload loop on Ctrl+C.
pub fn spawn_interrupt_listener(control: ReloadControl) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Interrupt received, stopping");
                control.stop();
            }
            Err(e) => tracing::error!(error = %e, "Failed to listen for Ctrl+C"),
        }
    })
}

/// Reload `config` once per request until stopped or until every
/// `ReloadControl` is dropped. Every outcome is handed to `on_reload`.
///
/// Returns the number of reloads attempted.
pub async fn run_reload_loop<F>(config: Arc<Config>, triggers: ReloadTriggers, mut on_reload: F) -> usize
where
    F: FnMut(Result<ReloadDiff, LoadError>),
{
    let ReloadTriggers { mut reloads, mut stop } = triggers;
    let mut attempts = 0;

    loop {
        tokio::select! {
            request = reloads.recv() => {
                if request.is_none() {
                    break;
                }
                attempts += 1;
                on_reload(config.reload());
            }
            _ = stop.recv() => break,
        }
    }

    tracing::debug!(attempts, "Reload loop stopped");
    attempts
}
