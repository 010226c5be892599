//! Drives a command's step producer with answers from a [`Prompter`].

use log::debug;
use quickstep_core::command::{QuickCommand, StepProducer};
use quickstep_core::error::Result;
use quickstep_core::step::{Answer, Flow, Outcome, Payload, SelectionItem, Step, StepKind};

/// Something that can answer a step, usually a person at a terminal.
pub trait Prompter {
    /// Shows `step` and waits for the answer.
    ///
    /// # Errors
    ///
    /// Returns an error if the step cannot be shown.
    fn prompt(&mut self, step: &Step) -> Result<Answer>;
}

/// Runs `producer` until it is done, returning how the flow ended.
///
/// # Errors
///
/// Returns an error if prompting fails or the producer fails.
pub fn run(producer: &mut dyn StepProducer, prompter: &mut dyn Prompter) -> Result<Outcome> {
    let mut answer = None;

    loop {
        match producer.next(answer.take())? {
            Flow::Ask(step) => {
                debug!("{}: asking `{}`", producer.title(), step.title);
                answer = Some(prompter.prompt(&step)?);
            }
            Flow::Done(outcome) => {
                debug!("{}: {:?}", producer.title(), outcome);
                return Ok(outcome);
            }
        }
    }
}

/// Builds the command menu shown when no command was named.
pub fn command_menu(commands: &[Box<dyn QuickCommand + '_>]) -> Step {
    let items = commands
        .iter()
        .map(|c| {
            let item = SelectionItem::new(c.label(), Payload::Key(c.key().to_string()));
            match c.description() {
                Some(description) => item.with_description(description),
                None => item,
            }
        })
        .collect();

    Step {
        title: "Quickstep".to_string(),
        placeholder: "Choose a git command".to_string(),
        items,
        multiselect: false,
        kind: StepKind::Selection,
        resolve_single: false,
    }
}

/// Lets the user pick a command from the menu.
///
/// Returns `None` when the user backs out of or cancels the menu.
///
/// # Errors
///
/// Returns an error if prompting fails.
pub fn choose_command<'c, 'a>(
    commands: &'c [Box<dyn QuickCommand + 'a>],
    prompter: &mut dyn Prompter,
) -> Result<Option<&'c (dyn QuickCommand + 'a)>> {
    let menu = command_menu(commands);

    let Answer::Selected(items) = prompter.prompt(&menu)? else {
        return Ok(None);
    };

    let key = items.into_iter().find_map(|item| match item.payload {
        Payload::Key(key) => Some(key),
        _ => None,
    });

    Ok(key.and_then(|key| {
        commands
            .iter()
            .find(|c| c.key() == key)
            .map(|c| &**c)
    }))
}
