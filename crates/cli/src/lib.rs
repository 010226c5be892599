//! Quickstep CLI Library
//!
//! This crate provides the terminal front end for quickstep. It shows each
//! step a command asks on a full-screen selection list and feeds the answer
//! back to the command until it runs or is abandoned.
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing
//! - [`driver`]: The loop between a step producer and a [`driver::Prompter`]
//! - [`step_selection`]: Interactive UI a step is answered on
//! - [`dry_run`]: Collaborators that print git actions instead of running them
//!
//! # Examples
//!
//! ```bash
//! # Interactive mode - shows the command menu
//! qs
//!
//! # Start a command directly
//! qs rebase
//!
//! # Dry run (walk the steps, print what would run)
//! qs --dry-run fetch
//!
//! # List commands
//! qs --list
//! ```

pub mod cli_args;
pub mod driver;
pub mod dry_run;
pub mod step_selection;
