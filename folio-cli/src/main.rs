//! Folio: single-page and multi-page API documentation from a project model.
//!
//! # Usage
//!
//! ```text
//! folio render <project> [--out <dir>] [--theme minimal|default] [--templates <dir>]
//!              [--config <file>] [--name <title>] [--dry-run]
//! folio toc <project> [--json]
//! ```

mod commands;

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{render::RenderArgs, toc::TocArgs};
use folio_core::ThemeName;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "folio",
    version,
    about = "Render API documentation from a reflection model",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render the project and write the output directory.
    Render(RenderArgs),

    /// Print the table of contents the minimal theme builds for a project.
    Toc(TocArgs),
}

// ---------------------------------------------------------------------------
// Shared ThemeName argument
// ---------------------------------------------------------------------------

/// Thin wrapper so clap can parse `ThemeName` from CLI args.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeArg(pub ThemeName);

impl FromStr for ThemeArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "minimal" => Ok(Self(ThemeName::Minimal)),
            "default" => Ok(Self(ThemeName::Default)),
            other => Err(format!("unknown theme '{other}'; expected: minimal, default")),
        }
    }
}

impl fmt::Display for ThemeArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<ThemeArg> for ThemeName {
    fn from(t: ThemeArg) -> Self {
        t.0
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::Render(args) => args.run(),
        Commands::Toc(args) => args.run(),
    }
}
