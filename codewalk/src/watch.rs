//! Rebuild-on-change watcher
//!
//! Watches the configuration file and the content directories, rerunning
//! the build when something changes. Events are debounced so an editor
//! save burst triggers a single rebuild.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Event, EventKind, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::build::BuildSummary;
use crate::error::{CodewalkError, Result};

/// Quiet period after the last filesystem event before a rebuild runs.
pub const WATCH_DEBOUNCE: Duration = Duration::from_millis(250);

/// Paths the watcher observes.
///
/// Paths should be canonicalized by the caller so that the absolute paths
/// reported by watcher events compare against them reliably.
#[derive(Debug, Clone)]
pub struct WatchTargets {
    /// The site configuration file.
    pub config_file: PathBuf,
    /// Directories watched recursively, such as the content and public
    /// directories.
    pub dirs: Vec<PathBuf>,
}

/// Runs `rebuild` whenever a watched path changes, until cancelled.
///
/// A failed rebuild is logged and the previous output kept; the watcher
/// stays alive so the next save can fix it.
///
/// # Errors
///
/// Returns an error only when the watcher itself cannot be set up.
pub async fn run_watcher<F>(
    targets: WatchTargets,
    cancel: CancellationToken,
    mut rebuild: F,
) -> Result<()>
where
    F: FnMut() -> Result<BuildSummary>,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<()>();

    let filter = targets.clone();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
        Ok(event) if is_relevant(&event, &filter) => {
            let _ = tx.send(());
        }
        Ok(_) => {}
        Err(e) => warn!(error = %e, "watch error"),
    })
    .map_err(|e| CodewalkError::Server(format!("cannot start file watcher: {e}")))?;

    // The config file is watched through its parent directory so that
    // editors replacing the file with a rename are still observed.
    let config_parent = parent_or_dot(&targets.config_file);
    watcher
        .watch(&config_parent, RecursiveMode::NonRecursive)
        .map_err(|e| {
            CodewalkError::Server(format!("cannot watch {}: {e}", config_parent.display()))
        })?;
    for dir in &targets.dirs {
        if dir.is_dir() {
            watcher
                .watch(dir, RecursiveMode::Recursive)
                .map_err(|e| CodewalkError::Server(format!("cannot watch {}: {e}", dir.display())))?;
        } else {
            debug!(path = %dir.display(), "not watching missing directory");
        }
    }

    info!("watching for changes");

    loop {
        tokio::select! {
            () = cancel.cancelled() => break,
            event = rx.recv() => {
                if event.is_none() {
                    break;
                }
                let sleep = tokio::time::sleep(WATCH_DEBOUNCE);
                tokio::pin!(sleep);
                loop {
                    tokio::select! {
                        () = cancel.cancelled() => return Ok(()),
                        () = &mut sleep => break,
                        more = rx.recv() => {
                            if more.is_none() {
                                break;
                            }
                            sleep.as_mut().reset(tokio::time::Instant::now() + WATCH_DEBOUNCE);
                        }
                    }
                }
                match rebuild() {
                    Ok(summary) => info!(posts = summary.posts, "rebuilt site"),
                    Err(e) => warn!(error = %e, "rebuild failed, keeping last good output"),
                }
            }
        }
    }

    Ok(())
}

fn parent_or_dot(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Whether an event should trigger a rebuild.
///
/// Pure reads are ignored; everything else counts when it touches the
/// config file or lands under a watched directory.
fn is_relevant(event: &Event, targets: &WatchTargets) -> bool {
    if matches!(event.kind, EventKind::Access(_)) {
        return false;
    }
    event.paths.iter().any(|path| {
        path == &targets.config_file || targets.dirs.iter().any(|dir| path.starts_with(dir))
    })
}
