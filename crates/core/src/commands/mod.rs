//! The git commands offered by the wizard, one [`StepMachine`] each.
//!
//! Each command supplies its confirmation variants and its action. The
//! questions before that come from [`crate::flows`].
//!
//! [`StepMachine`]: crate::command::StepMachine

pub mod fetch;
pub mod merge;
pub mod pull;
pub mod rebase;

pub use fetch::FetchCommand;
pub use merge::MergeCommand;
pub use pull::PullCommand;
pub use rebase::RebaseCommand;

use crate::command::QuickCommand;
use crate::error::{Error, Result};
use crate::git::{GitProvider, Terminal};

/// Every command, in menu order.
pub fn all<'a>(git: &'a dyn GitProvider, terminal: &'a dyn Terminal) -> Vec<Box<dyn QuickCommand + 'a>> {
    vec![
        Box::new(FetchCommand::new(git)),
        Box::new(PullCommand::new(git)),
        Box::new(RebaseCommand::new(git, terminal)),
        Box::new(MergeCommand::new(git, terminal)),
    ]
}

/// Finds a command by its key.
///
/// # Errors
///
/// Returns [`Error::CommandNotFound`] if no command has that key.
pub fn find<'c, 'a>(commands: &'c [Box<dyn QuickCommand + 'a>], key: &str) -> Result<&'c (dyn QuickCommand + 'a)> {
    commands
        .iter()
        .find(|c| c.key() == key)
        .map(|c| &**c)
        .ok_or_else(|| Error::CommandNotFound(key.to_string()))
}
