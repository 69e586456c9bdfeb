//! ngpack CLI: incremental builds of shared, server and client package code.
//!
//! Provides `ngpack build` to run every configured architecture pass over
//! the project's packages, and `ngpack clean` to drop fingerprint records.

#![warn(missing_docs)]

mod build;
mod clean;
mod pipeline;
mod sink;

use std::io::IsTerminal;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

/// ngpack: incremental builds for Angular package trees.
#[derive(Parser, Debug)]
#[command(name = "ngpack", version, about = "Incremental package builder")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose output for every package.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a custom `ngpack.toml`, or to the project directory.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build every participating package.
    Build(BuildArgs),
    /// Remove all fingerprint records so the next build starts fresh.
    Clean,
}

/// Arguments for the `ngpack build` subcommand.
#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// Architectures to build for, overriding `project.architectures`.
    #[arg(short, long, num_args = 1..)]
    pub arch: Vec<String>,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether every package builds with verbose compiler options.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => std::io::stderr().is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        config: cli.config,
    };
    init_tracing(&global);

    let result = match cli.command {
        Command::Build(ref args) => build::run(args, &global),
        Command::Clean => clean::run(&global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Installs the stderr subscriber. `RUST_LOG` takes precedence over the flags.
fn init_tracing(global: &GlobalArgs) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(global)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(global.color)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn default_filter(global: &GlobalArgs) -> &'static str {
    if global.quiet {
        "warn"
    } else if global.verbose {
        "debug"
    } else {
        "info"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn global(quiet: bool, verbose: bool) -> GlobalArgs {
        GlobalArgs {
            quiet,
            verbose,
            color: false,
            config: None,
        }
    }

    #[test]
    fn parse_build_default() {
        let cli = Cli::parse_from(["ngpack", "build"]);
        match cli.command {
            Command::Build(ref args) => assert!(args.arch.is_empty()),
            _ => panic!("expected Build command"),
        }
    }

    #[test]
    fn parse_build_with_arches() {
        let cli = Cli::parse_from(["ngpack", "build", "--arch", "os", "web.browser"]);
        match cli.command {
            Command::Build(ref args) => assert_eq!(args.arch, vec!["os", "web.browser"]),
            _ => panic!("expected Build command"),
        }
    }

    #[test]
    fn parse_build_repeated_arch() {
        let cli = Cli::parse_from(["ngpack", "build", "-a", "os", "-a", "web.cordova"]);
        match cli.command {
            Command::Build(ref args) => assert_eq!(args.arch, vec!["os", "web.cordova"]),
            _ => panic!("expected Build command"),
        }
    }

    #[test]
    fn parse_clean() {
        let cli = Cli::parse_from(["ngpack", "clean"]);
        assert!(matches!(cli.command, Command::Clean));
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::parse_from(["ngpack", "--quiet", "--color", "never", "build"]);
        assert!(cli.quiet);
        assert!(!cli.verbose);
        assert_eq!(cli.color, ColorChoice::Never);
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["ngpack", "build", "--verbose"]);
        assert!(cli.verbose);
        assert_eq!(cli.color, ColorChoice::Auto);
    }

    #[test]
    fn parse_config_path() {
        let cli = Cli::parse_from(["ngpack", "--config", "/path/to/ngpack.toml", "clean"]);
        assert_eq!(cli.config.as_deref(), Some("/path/to/ngpack.toml"));
    }

    #[test]
    fn filter_follows_flags() {
        assert_eq!(default_filter(&global(false, false)), "info");
        assert_eq!(default_filter(&global(false, true)), "debug");
        assert_eq!(default_filter(&global(true, true)), "warn");
    }
}
