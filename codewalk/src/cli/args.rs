//! CLI argument definitions
//!
//! All Clap derive structs for `codewalk` command-line parsing.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

// ============================================================================
// Root CLI
// ============================================================================

/// Static site generator for code walkthrough courses.
#[derive(Parser, Debug)]
#[command(name = "codewalk", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "CODEWALK_COLOR")]
    pub color: ColorChoice,
}

// ============================================================================
// Top-Level Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile the content directory into a static site bundle.
    Build(BuildArgs),

    /// Build the site and serve the bundle over HTTP.
    Serve(ServeArgs),

    /// Check content and configuration without writing output.
    Check(CheckArgs),

    /// Generate shell completion scripts.
    Completions(CompletionsArgs),

    /// Display version information.
    Version(VersionArgs),
}

// ============================================================================
// Build / Serve / Check
// ============================================================================

/// Arguments for `build`.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Path to the site configuration file.
    #[arg(
        short,
        long,
        default_value = "codewalk.yaml",
        env = "CODEWALK_CONFIG"
    )]
    pub config: PathBuf,

    /// Write the bundle here instead of the configured output directory.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `serve`.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Build options for the initial build and rebuilds.
    #[command(flatten)]
    pub build: BuildArgs,

    /// Address to bind the preview server on.
    #[arg(long, default_value = "127.0.0.1", env = "CODEWALK_HOST")]
    pub host: String,

    /// Port to bind the preview server on (0 picks a free port).
    #[arg(short, long, default_value_t = 8080, env = "CODEWALK_PORT")]
    pub port: u16,

    /// Rebuild automatically when content or configuration changes.
    #[arg(long)]
    pub watch: bool,
}

/// Arguments for `check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to the site configuration file.
    #[arg(
        short,
        long,
        default_value = "codewalk.yaml",
        env = "CODEWALK_CONFIG"
    )]
    pub config: PathBuf,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// Completions / Version
// ============================================================================

/// Arguments for shell completion generation.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script.
    pub shell: Shell,
}

/// Arguments for version display.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Output format for structured output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

/// Shell type for completion generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell.
    Bash,
    /// Zsh shell.
    Zsh,
    /// Fish shell.
    Fish,
    /// `PowerShell`.
    #[value(name = "powershell")]
    PowerShell,
    /// Elvish shell.
    Elvish,
}

// ============================================================================
// Tests
// ============================================================================
