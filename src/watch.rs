//! Debounced change trigger for vault documents.

use std::path::Path;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use notify::{RecursiveMode, Watcher};
use tracing::{debug, warn};

use crate::error::Result;

/// Default quiet period after the last change before a pass triggers.
pub const WATCH_DEBOUNCE_MS: u64 = 1000;

/// Watch a vault for markdown changes and invoke `on_change` once per quiet
/// period. Blocks the calling thread until the event channel closes.
///
/// Bursts of events (a save producing several notifications, or rapid
/// consecutive edits) collapse into a single trigger: each event pushes the
/// deadline out by `debounce`, and the callback fires only when the vault
/// has been quiet that long.
pub fn watch_vault<F>(root: &Path, debounce: Duration, mut on_change: F) -> Result<()>
where
    F: FnMut(),
{
    let (event_tx, event_rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(move |res| {
        let _ = event_tx.send(res);
    })?;
    watcher.watch(root, RecursiveMode::Recursive)?;

    let mut pending: Option<Instant> = None;
    loop {
        let timeout = pending
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
            .unwrap_or(Duration::from_secs(3600));
        match event_rx.recv_timeout(timeout) {
            Ok(Ok(event)) if touches_markdown(&event) => {
                pending = Some(Instant::now() + debounce);
            }
            Ok(Ok(_)) => {}
            Ok(Err(err)) => {
                warn!(error = %err, "watch error");
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                if pending.take().is_some() {
                    debug!("vault quiet, triggering reconciliation");
                    on_change();
                }
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => return Ok(()),
        }
    }
}

fn touches_markdown(event: &notify::Event) -> bool {
    event
        .paths
        .iter()
        .any(|path| path.extension().and_then(|ext| ext.to_str()) == Some("md"))
}
