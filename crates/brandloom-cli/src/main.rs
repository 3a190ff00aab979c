//! brandloom - render brand patterns to SVG and PNG.
//!
//! Usage:
//!   brandloom render <design.yaml> [-o out.svg] [--png out.png]  Render a design document
//!   brandloom patterns                                          List pattern tags
//!   brandloom presets [TAG]                                     List mesh presets
//!   brandloom palette                                           Show the brand palette
//!   brandloom defaults <TAG>                                    Print a default design as YAML

mod cli;

use clap::{Parser, Subcommand};

use cli::{DefaultsArgs, PresetsArgs, RenderArgs};

#[derive(Parser, Debug)]
#[command(name = "brandloom", version, about = "Deterministic brand pattern renderer")]
struct Cli {
    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a design document to SVG and optionally PNG.
    Render(RenderArgs),
    /// List the available pattern tags.
    Patterns,
    /// List the named mesh presets.
    Presets(PresetsArgs),
    /// Show the brand palette and the named brand pairs.
    Palette,
    /// Print a complete default design for a pattern.
    Defaults(DefaultsArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.cmd {
        Command::Render(args) => cli::cmd_render(args),
        Command::Patterns => {
            cli::cmd_patterns();
            Ok(())
        }
        Command::Presets(args) => cli::cmd_presets(args),
        Command::Palette => {
            cli::cmd_palette();
            Ok(())
        }
        Command::Defaults(args) => cli::cmd_defaults(args),
    }
}
