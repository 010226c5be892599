//! Quickstep Core Library
//!
//! This crate provides the step engine behind quickstep, a terminal wizard
//! that builds git commands (fetch, pull, rebase, merge) one question at a
//! time and runs the result exactly once.
//!
//! # Key Features
//!
//! - **Step Engine**: Resumable, cancelable flows with backtracking
//! - **Commands**: One step machine per git command, sharing target helpers
//! - **Fast Path**: Questions with a single candidate are never asked
//! - **Collaborators**: Git data and execution behind traits, with a `git` executable implementation
//! - **Configuration**: YAML settings for repositories, shell and command template
//!
//! # Examples
//!
//! Driving a command with a scripted driver:
//!
//! ```no_run
//! use quickstep_core::command::QuickCommand;
//! use quickstep_core::commands::FetchCommand;
//! use quickstep_core::git_cli::GitCli;
//! use quickstep_core::step::{Answer, Flow};
//!
//! let git = GitCli::new(vec![], std::env::current_dir()?);
//! let fetch = FetchCommand::new(&git);
//!
//! let mut producer = fetch.steps();
//! let mut answer = None;
//! while let Flow::Ask(step) = producer.next(answer.take())? {
//!     println!("{}", step.title);
//!     answer = Some(Answer::Selected(vec![step.items[0].clone()]));
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod command;
pub mod commands;
pub mod config;
pub mod error;
pub mod execution;
pub mod flows;
pub mod git;
pub mod git_cli;
pub mod state;
pub mod step;
pub mod targets;
pub mod terminal;
