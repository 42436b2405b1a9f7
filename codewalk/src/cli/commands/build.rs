//! Build command handler
//!
//! Loads the configuration and runs one full build.

use crate::build;
use crate::cli::args::BuildArgs;
use crate::config;
use crate::error::CodewalkError;

/// Compile the content directory into a static bundle.
///
/// # Errors
///
/// Returns a config error when the configuration cannot be loaded, a
/// content error naming the offending file when compilation fails, or an
/// I/O error when the bundle cannot be written.
#[allow(clippy::unused_async)] // dispatched alongside async commands
pub async fn run(args: &BuildArgs) -> Result<(), CodewalkError> {
    tracing::info!(config = %args.config.display(), "loading configuration");
    let loaded = config::load(&args.config)?;
    for warning in &loaded.warnings {
        tracing::warn!("{warning}");
    }

    let started = std::time::Instant::now();
    let base_dir = config::base_dir(&args.config);
    let summary = build::build_site(&loaded.config, &base_dir, args.output.as_deref())?;

    tracing::info!(
        posts = summary.posts,
        routes = summary.routes,
        elapsed = ?started.elapsed(),
        output = %summary.output_dir.display(),
        "site built"
    );
    Ok(())
}
