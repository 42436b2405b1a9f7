//! Check command handler
//!
//! Compiles every content file without writing output and reports all
//! problems in one pass.

use crate::build;
use crate::cli::args::{CheckArgs, OutputFormat};
use crate::config;
use crate::error::CodewalkError;

/// Check content and configuration.
///
/// # Errors
///
/// Returns a config error when the configuration cannot be loaded, or
/// [`CodewalkError::CheckFailed`] when any content problem was found.
#[allow(clippy::unused_async)] // dispatched alongside async commands
pub async fn run(args: &CheckArgs) -> Result<(), CodewalkError> {
    let loaded = config::load(&args.config)?;
    for warning in &loaded.warnings {
        tracing::warn!("{warning}");
    }

    let base_dir = config::base_dir(&args.config);
    let report = build::check_site(&loaded.config, &base_dir, &args.config)?;

    match args.format {
        OutputFormat::Human => {
            for post in &report.posts {
                println!("ok: {} ({}, {} steps)", post.slug, post.title, post.steps);
            }
            for problem in &report.problems {
                println!("error: {}: {}", problem.path.display(), problem.message);
            }
            let count = report.problems.len();
            if count == 0 {
                println!("{} posts checked, no problems", report.posts.len());
            } else {
                println!(
                    "{} posts checked, {count} {}",
                    report.posts.len(),
                    if count == 1 { "problem" } else { "problems" }
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    if report.problems.is_empty() {
        Ok(())
    } else {
        Err(CodewalkError::CheckFailed {
            count: report.problems.len(),
        })
    }
}
