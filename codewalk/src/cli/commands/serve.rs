//! Serve command handler
//!
//! Builds the site and serves the bundle for local preview, optionally
//! rebuilding when content or configuration changes.

use std::path::{Path, PathBuf};

use tokio_util::sync::CancellationToken;

use codewalk_core::config::SiteConfig;

use crate::build;
use crate::cli::args::ServeArgs;
use crate::config;
use crate::error::Result;
use crate::server::{PreviewOptions, PreviewServer};
use crate::watch::{self, WatchTargets};

/// Build the site and serve it over HTTP.
///
/// The initial build must succeed; under `--watch`, later rebuild failures
/// are logged and the previous bundle stays up.
///
/// # Errors
///
/// Returns an error when the configuration cannot be loaded, the initial
/// build fails, or the server cannot bind.
pub async fn run(args: &ServeArgs, cancel: CancellationToken) -> Result<()> {
    tracing::info!(config = %args.build.config.display(), "loading configuration");
    let loaded = config::load(&args.build.config)?;
    for warning in &loaded.warnings {
        tracing::warn!("{warning}");
    }

    let base_dir = config::base_dir(&args.build.config);
    let summary = build::build_site(&loaded.config, &base_dir, args.build.output.as_deref())?;
    tracing::info!(
        posts = summary.posts,
        output = %summary.output_dir.display(),
        "initial build complete"
    );

    let options = PreviewOptions {
        root: summary.output_dir,
        base_path: loaded.config.site.base_path.clone(),
    };
    let (server, _addr) =
        PreviewServer::bind(&args.host, args.port, options, cancel.clone()).await?;

    if args.watch {
        let targets = watch_targets(&loaded.config, &args.build.config, &base_dir);
        let config_path = args.build.config.clone();
        let output_override = args.build.output.clone();
        let watch_cancel = cancel.clone();
        tokio::spawn(async move {
            let rebuild = move || -> Result<build::BuildSummary> {
                // Reload so configuration edits take effect on rebuild.
                let loaded = config::load(&config_path)?;
                let base_dir = config::base_dir(&config_path);
                build::build_site(&loaded.config, &base_dir, output_override.as_deref())
            };
            if let Err(e) = watch::run_watcher(targets, watch_cancel, rebuild).await {
                tracing::warn!(error = %e, "file watcher stopped");
            }
        });
    }

    server.run().await
}

/// Canonicalized watch targets for the configuration file and the content
/// inputs it names.
fn watch_targets(config: &SiteConfig, config_path: &Path, base_dir: &Path) -> WatchTargets {
    let canonical = |path: PathBuf| path.canonicalize().unwrap_or(path);
    let mut dirs = vec![canonical(base_dir.join(&config.content_dir))];
    if let Some(public) = &config.public_dir {
        dirs.push(canonical(base_dir.join(public)));
    }
    WatchTargets {
        config_file: canonical(config_path.to_path_buf()),
        dirs,
    }
}
