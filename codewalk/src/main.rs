//! `codewalk` — Static site generator for code walkthrough courses

use clap::Parser;
use tokio_util::sync::CancellationToken;

use codewalk::cli::args::Cli;
use codewalk::cli::commands;
use codewalk::error::ExitCode;
use codewalk::observability::{LogFormat, init_logging};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if !cli.quiet {
        let format = match std::env::var("CODEWALK_LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            _ => LogFormat::Human,
        };
        init_logging(format, cli.verbose, cli.color);
    }

    let cancel = CancellationToken::new();

    // Spawn signal handler: first signal requests graceful shutdown,
    // second forces exit
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        let mut sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to register SIGTERM handler");

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }

        signal_cancel.cancel();
        eprintln!("\nShutting down gracefully... (press Ctrl+C again to force)");

        tokio::select! {
            _ = tokio::signal::ctrl_c() => std::process::exit(ExitCode::INTERRUPTED),
            _ = sigterm.recv() => std::process::exit(ExitCode::TERMINATED),
        }
    });

    let result = commands::dispatch(cli, cancel).await;

    match result {
        Ok(()) => std::process::exit(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
