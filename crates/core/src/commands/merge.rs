use log::info;

use crate::command::{CommandBase, ConfirmOptions, Control, StepMachine, Transition};
use crate::error::Result;
use crate::flows::{Comparison, ReferenceFlow, ReferenceParams, ReferenceRequest, ReferenceStep};
use crate::git::{GitProvider, Terminal};
use crate::state::WizardState;
use crate::step::{pluralize, with_dot, Answer, Payload, SelectionItem, Step};

/// `(label prefix, flag, detail verb)` for each merge variant past the
/// plain one.
const VARIANTS: [(&str, &str, &str); 3] = [
    ("Fast-forward", "--ff-only", "fast-forward"),
    ("No Fast-forward", "--no-ff", "create a merge commit and merge"),
    ("Squash", "--squash", "squash and merge"),
];

pub struct MergeCommand<'a> {
    base: CommandBase,
    git: &'a dyn GitProvider,
    terminal: &'a dyn Terminal,
}

impl<'a> MergeCommand<'a> {
    pub fn new(git: &'a dyn GitProvider, terminal: &'a dyn Terminal) -> Self {
        Self {
            base: CommandBase::new("merge", "Merge").with_description("via Terminal"),
            git,
            terminal,
        }
    }

    fn flow(&self) -> ReferenceFlow<'_> {
        ReferenceFlow {
            base: &self.base,
            git: self.git,
            source_placeholder: |destination| format!("Choose a branch or tag to merge into {destination}"),
        }
    }

    fn confirm_step(&self, comparison: &Comparison<'_>) -> Step {
        let title = &self.base.label;
        let commits = pluralize("commit", comparison.count);
        let (destination, source) = (&comparison.destination.name, comparison.source.name());

        let mut confirmations = vec![SelectionItem::new(title.as_str(), Payload::Flags(vec![]))
            .with_description(format!("{source} into {destination}"))
            .with_detail(format!("Will merge {commits} from {source} into {destination}"))];

        confirmations.extend(VARIANTS.iter().map(|(prefix, flag, verb)| {
            SelectionItem::new(format!("{prefix} {title}"), Payload::Flags(vec![(*flag).to_string()]))
                .with_description(format!("{flag} {source} into {destination}"))
                .with_detail(format!("Will {verb} {commits} from {source} into {destination}"))
        }));

        self.base.create_confirm_step(
            format!("Confirm {}", with_dot(title, &comparison.repo.name)),
            confirmations,
            ConfirmOptions::default(),
        )
    }
}

impl StepMachine for MergeCommand<'_> {
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
            "Merging {} into {} in `{}`",
            request.source.name(),
            request.destination.name,
            request.repo.name
        );

        let mut args = request.flags.clone();
        args.push(request.source.name().to_string());
        self.terminal.run_git_command("merge", &args, &request.repo.path, true)
    }
}
