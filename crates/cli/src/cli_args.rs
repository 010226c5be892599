//! Command-line argument parsing.
//!
//! This module defines the command-line interface structure using the
//! `clap` crate.

use clap::Parser;

/// Command-line arguments for the `qs` binary.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use quickstep_cli::cli_args::Args;
///
/// let args = Args::parse_from(["qs", "--dry-run", "rebase"]);
/// assert_eq!(args.command.as_deref(), Some("rebase"));
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(term_width = 0)] // Just to make testing across clap features easier
pub struct Args {
    /// Path to the settings YAML file.
    ///
    /// If not provided, defaults to `~/.quickstep/config.yml`.
    #[arg(long, short = 'c')]
    pub config_path: Option<String>,

    /// Perform a dry run, which prints the git commands but does not execute them.
    ///
    /// Branches, tags and commit counts are still read from the repositories.
    #[arg(long, short = 'd', action)]
    pub dry_run: bool,

    /// List the available commands and exit.
    #[arg(long, action)]
    pub list: bool,

    /// The command to start, e.g. `fetch` or `rebase`.
    ///
    /// If not provided, a menu of commands is shown.
    #[arg(num_args(1))]
    pub command: Option<String>,
}
