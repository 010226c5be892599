use log::info;

use crate::command::{CommandBase, ConfirmOptions, Control, StepMachine, Transition};
use crate::error::Result;
use crate::flows::{Comparison, ReferenceFlow, ReferenceParams, ReferenceRequest, ReferenceStep};
use crate::git::{GitProvider, Terminal};
use crate::state::WizardState;
use crate::step::{pluralize, with_dot, Answer, Payload, SelectionItem, Step};

pub struct RebaseCommand<'a> {
    base: CommandBase,
    git: &'a dyn GitProvider,
    terminal: &'a dyn Terminal,
}

impl<'a> RebaseCommand<'a> {
    pub fn new(git: &'a dyn GitProvider, terminal: &'a dyn Terminal) -> Self {
        Self {
            base: CommandBase::new("rebase", "Rebase").with_description("via Terminal"),
            git,
            terminal,
        }
    }

    fn flow(&self) -> ReferenceFlow<'_> {
        ReferenceFlow {
            base: &self.base,
            git: self.git,
            source_placeholder: |destination| format!("Choose a branch or tag to rebase {destination} with"),
        }
    }

    fn confirm_step(&self, comparison: &Comparison<'_>) -> Step {
        let title = &self.base.label;
        let commits = pluralize("commit", comparison.count);
        let (destination, source) = (&comparison.destination.name, comparison.source.name());

        self.base.create_confirm_step(
            format!("Confirm {}", with_dot(title, &comparison.repo.name)),
            vec![
                SelectionItem::new(title.as_str(), Payload::Flags(vec![]))
                    .with_description(format!("{destination} with {source}"))
                    .with_detail(format!(
                        "Will update {destination} by applying {commits} on top of {source}"
                    )),
                SelectionItem::new(
                    format!("Interactive {title}"),
                    Payload::Flags(vec!["--interactive".to_string()]),
                )
                .with_description(format!("--interactive {destination} with {source}"))
                .with_detail(format!(
                    "Will interactively update {destination} by applying {commits} on top of {source}"
                )),
            ],
            ConfirmOptions::default(),
        )
    }
}

impl StepMachine for RebaseCommand<'_> {
    type Params = ReferenceParams;
    type StepId = ReferenceStep;
    type Request = ReferenceRequest;

    fn base(&self) -> &CommandBase {
        &self.base
    }

    fn next_step(&self, state: &mut WizardState<ReferenceParams>) -> Result<Transition<ReferenceStep>> {
        self.flow().next_step(state, |comparison| self.confirm_step(comparison))
    }

    fn apply(
        &self,
        state: &mut WizardState<ReferenceParams>,
        id: ReferenceStep,
        step: &Step,
        answer: Answer,
    ) -> Result<Control> {
        self.flow().apply(state, id, step, answer, |request| self.execute(request))
    }

    fn execute(&self, request: &ReferenceRequest) -> Result<()> {
        info!(
            "Rebasing {} onto {} in `{}`",
            request.destination.name,
            request.source.name(),
            request.repo.name
        );

        let mut args = request.flags.clone();
        args.push(request.source.name().to_string());
        self.terminal.run_git_command("rebase", &args, &request.repo.path, true)
    }
}
