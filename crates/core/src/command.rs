//! The step engine.
//!
//! A command describes its flow as a [`StepMachine`]: `next_step` runs the
//! flow from the top and stops at the first question that needs an answer,
//! `apply` interprets the answer to that question. [`Wizard`] owns the
//! per-invocation [`WizardState`] and turns the pair into a pull-based
//! producer: the driver calls [`StepProducer::next`] with the previous
//! answer and gets back either the next [`Step`] or the final [`Outcome`].

use std::fmt::Debug;

use log::{debug, info};

use crate::error::Result;
use crate::state::WizardState;
use crate::step::{Answer, Flow, Outcome, Payload, SelectionItem, Step, StepKind};

/// Identity shared by every command, and the step builders that go with it.
#[derive(Debug, Clone)]
pub struct CommandBase {
    pub key: String,
    pub label: String,
    pub description: Option<String>,
}

/// How a confirmation step is built.
#[derive(Debug, Clone, Copy)]
pub struct ConfirmOptions {
    /// Append a `Cancel` entry.
    pub cancellable: bool,
    /// Resolve without asking when exactly one variant is offered.
    pub resolve_single: bool,
}

impl Default for ConfirmOptions {
    fn default() -> Self {
        Self {
            cancellable: true,
            resolve_single: false,
        }
    }
}

impl CommandBase {
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            description: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn create_step(
        &self,
        title: String,
        placeholder: String,
        items: Vec<SelectionItem>,
        multiselect: bool,
    ) -> Step {
        Step {
            title,
            placeholder,
            items,
            multiselect,
            kind: StepKind::Selection,
            resolve_single: false,
        }
    }

    pub fn create_confirm_step(
        &self,
        title: String,
        mut confirmations: Vec<SelectionItem>,
        options: ConfirmOptions,
    ) -> Step {
        if options.cancellable {
            confirmations.push(SelectionItem::new("Cancel", Payload::Cancel));
        }

        Step {
            title,
            placeholder: format!("Confirm {}", self.label),
            items: confirmations,
            multiselect: false,
            kind: StepKind::Confirmation,
            resolve_single: options.resolve_single,
        }
    }

    /// Decides whether `answer` moves the flow forward.
    ///
    /// A non-empty selection advances the counter and is handed back. Going
    /// back, or accepting a multi-select with nothing chosen, regresses the
    /// counter and returns `None`.
    pub fn can_move_next<P>(
        &self,
        step: &Step,
        state: &mut WizardState<P>,
        answer: Answer,
    ) -> Option<Vec<SelectionItem>> {
        match answer {
            Answer::Selected(items) if !items.is_empty() => {
                state.advance();
                Some(items)
            }
            _ => {
                debug!("{}: going back from `{}`", self.key, step.title);
                state.regress();
                None
            }
        }
    }
}

/// Result of running a flow from the top.
#[derive(Debug)]
pub enum Transition<Id> {
    Ask(Id, Step),
    End(Outcome),
}

/// Result of applying an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Run the flow again from the top.
    Continue,
    Stop(Outcome),
}

/// The flow of one command.
pub trait StepMachine {
    type Params: Default;
    type StepId: Copy + Debug;
    /// Fully populated parameters handed to [`StepMachine::execute`].
    type Request;

    fn base(&self) -> &CommandBase;

    /// Runs the flow from the top and returns the first question that needs
    /// an answer, or the end of the flow.
    ///
    /// # Errors
    ///
    /// Returns collaborator errors unchanged.
    fn next_step(&self, state: &mut WizardState<Self::Params>) -> Result<Transition<Self::StepId>>;

    /// Interprets the answer given to step `id`. Never sees a cancellation.
    ///
    /// # Errors
    ///
    /// Returns collaborator and execution errors unchanged.
    fn apply(
        &self,
        state: &mut WizardState<Self::Params>,
        id: Self::StepId,
        step: &Step,
        answer: Answer,
    ) -> Result<Control>;

    /// Performs the configured action.
    ///
    /// # Errors
    ///
    /// Returns the failure of the underlying git command.
    fn execute(&self, request: &Self::Request) -> Result<()>;
}

/// A running flow, as seen by a driver.
pub trait StepProducer {
    fn title(&self) -> &str;

    /// Resumes the flow with the answer to the step last returned (or `None`
    /// to start it) and returns what happens next.
    ///
    /// Once the flow is done every further call returns the same
    /// [`Flow::Done`]. Calling with `None` while a step is pending returns
    /// that step again.
    ///
    /// # Errors
    ///
    /// Returns collaborator and execution errors. The flow is over after an
    /// error.
    fn next(&mut self, answer: Option<Answer>) -> Result<Flow>;
}

/// A command the driver can offer.
pub trait QuickCommand {
    fn key(&self) -> &str;
    fn label(&self) -> &str;
    fn description(&self) -> Option<&str>;

    /// Starts a new, independent flow.
    fn steps(&self) -> Box<dyn StepProducer + '_>;
}

impl<M: StepMachine> QuickCommand for M {
    fn key(&self) -> &str {
        &self.base().key
    }

    fn label(&self) -> &str {
        &self.base().label
    }

    fn description(&self) -> Option<&str> {
        self.base().description.as_deref()
    }

    fn steps(&self) -> Box<dyn StepProducer + '_> {
        Box::new(Wizard::new(self))
    }
}

/// Drives one [`StepMachine`] through one invocation.
pub struct Wizard<'a, M: StepMachine> {
    machine: &'a M,
    state: WizardState<M::Params>,
    pending: Option<(M::StepId, Step)>,
    outcome: Option<Outcome>,
}

impl<'a, M: StepMachine> Wizard<'a, M> {
    pub fn new(machine: &'a M) -> Self {
        Self {
            machine,
            state: WizardState::new(),
            pending: None,
            outcome: None,
        }
    }

    pub fn state(&self) -> &WizardState<M::Params> {
        &self.state
    }

    fn finish(&mut self, outcome: Outcome) -> Flow {
        info!("{}: {:?}", self.machine.base().key, outcome);
        self.pending = None;
        self.outcome = Some(outcome);
        Flow::Done(outcome)
    }

    fn resume(&mut self, answer: Option<Answer>) -> Result<Flow> {
        if let Some((id, step)) = self.pending.take() {
            let Some(answer) = answer else {
                let flow = Flow::Ask(step.clone());
                self.pending = Some((id, step));
                return Ok(flow);
            };

            if answer.is_cancellation() {
                debug!("{}: cancelled at {:?}", self.machine.base().key, id);
                return Ok(self.finish(Outcome::Aborted));
            }

            if let Control::Stop(outcome) = self.machine.apply(&mut self.state, id, &step, answer)? {
                return Ok(self.finish(outcome));
            }
        }

        loop {
            match self.machine.next_step(&mut self.state)? {
                Transition::Ask(id, step) => {
                    if let Some(choice) = step.sole_choice() {
                        debug!("{}: resolving {:?} with its only variant", self.machine.base().key, id);
                        let answer = Answer::Selected(vec![choice.clone()]);
                        if let Control::Stop(outcome) =
                            self.machine.apply(&mut self.state, id, &step, answer)?
                        {
                            return Ok(self.finish(outcome));
                        }
                        continue;
                    }

                    debug!("{}: asking {:?}", self.machine.base().key, id);
                    self.pending = Some((id, step.clone()));
                    return Ok(Flow::Ask(step));
                }
                Transition::End(outcome) => return Ok(self.finish(outcome)),
            }
        }
    }
}

impl<M: StepMachine> StepProducer for Wizard<'_, M> {
    fn title(&self) -> &str {
        &self.machine.base().label
    }

    fn next(&mut self, answer: Option<Answer>) -> Result<Flow> {
        if let Some(outcome) = self.outcome {
            return Ok(Flow::Done(outcome));
        }

        let flow = self.resume(answer);
        if flow.is_err() {
            self.pending = None;
            self.outcome = Some(Outcome::Aborted);
        }
        flow
    }
}
