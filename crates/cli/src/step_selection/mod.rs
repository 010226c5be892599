//! Interactive step selection.
//!
//! This module provides the terminal screen every [`Step`] of a command is
//! answered on.
//!
//! # User Interface
//!
//! The interface supports:
//! - Arrow keys or vim-style (j/k) navigation
//! - Enter to accept the highlighted item, or the checked items of a multi-select step
//! - Space to check or uncheck an item of a multi-select step
//! - '/' to filter items (fuzzy search)
//! - Left arrow or Backspace to go back one step
//! - 'q' or Escape to cancel
//!
//! [`Step`]: quickstep_core::step::Step

pub mod types;
pub mod ui;

use quickstep_core::error::Result;
use quickstep_core::step::{Answer, Step};

use crate::driver::Prompter;

pub use types::{CycleDirection, KeyOutcome, UiState};
pub use ui::prompt_for_step;

/// Answers steps on the terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn prompt(&mut self, step: &Step) -> Result<Answer> {
        prompt_for_step(step)
    }
}
