//! Blueprint CLI entry point.
//!
//! Provides command-line tools for working with templates:
//! - `blueprint render` - Render a template with a JSON context
//! - `blueprint check` - Validate template syntax and list references
//! - `blueprint functions` - List the built-in functions

mod commands;
mod output;

use std::io;
use std::process::exit;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use commands::{
    run_check, run_functions, run_render, CheckArgs, FunctionsArgs, RenderArgs,
};
use tracing_subscriber::{fmt, EnvFilter};

/// Blueprint template tools.
#[derive(Debug, Parser)]
#[command(name = "blueprint")]
#[command(about = "Render and check blueprint templates", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Color output control
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto, global = true)]
    pub color: ColorWhen,

    /// Log more detail to stderr (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// When to use colored output.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render a template
    Render(RenderArgs),
    /// Check template syntax and list referenced variables and functions
    Check(CheckArgs),
    /// List the built-in functions
    Functions(FunctionsArgs),
}

/// Set up color output based on user preference.
fn setup_colors(color_when: ColorWhen) {
    match color_when {
        ColorWhen::Auto => {
            // owo-colors automatically checks TTY, NO_COLOR, FORCE_COLOR
        }
        ColorWhen::Always => {
            owo_colors::set_override(true);
        }
        ColorWhen::Never => {
            owo_colors::set_override(false);
        }
    }
}

/// Log to stderr so rendered output on stdout stays clean.
fn setup_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "blueprint=debug",
        _ => "blueprint=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    setup_colors(cli.color);
    setup_logging(cli.verbose);

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))?;

    let result = match cli.command {
        Commands::Render(args) => run_render(args),
        Commands::Check(args) => run_check(args),
        Commands::Functions(args) => run_functions(args),
    };

    match result {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("{:?}", e);
            exit(exitcode::SOFTWARE);
        }
    }
}
