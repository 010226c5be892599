use log::info;

use crate::command::{CommandBase, ConfirmOptions, Control, StepMachine, Transition};
use crate::error::Result;
use crate::flows::{RepositoriesFlow, RepositoriesParams, RepositoriesRequest, RepositoriesStep};
use crate::git::{GitProvider, PullOptions, Repository};
use crate::state::WizardState;
use crate::step::{with_dot, Answer, Payload, SelectionItem, Step};
use crate::targets;

pub struct PullCommand<'a> {
    base: CommandBase,
    git: &'a dyn GitProvider,
}

impl<'a> PullCommand<'a> {
    pub fn new(git: &'a dyn GitProvider) -> Self {
        Self {
            base: CommandBase::new("pull", "Pull"),
            git,
        }
    }

    fn flow(&self) -> RepositoriesFlow<'_> {
        RepositoriesFlow {
            base: &self.base,
            git: self.git,
        }
    }

    fn confirm_step(&self, repos: &[Repository]) -> Step {
        let title = &self.base.label;
        let target = targets::describe_repositories(repos);

        self.base.create_confirm_step(
            format!("Confirm {}", with_dot(title, &target)),
            vec![
                SelectionItem::new(title.as_str(), Payload::Flags(vec![]))
                    .with_detail(format!("Will pull {target}")),
                SelectionItem::new(format!("{title} with Rebase"), Payload::Flags(vec!["--rebase".to_string()]))
                    .with_description("--rebase")
                    .with_detail(format!("Will pull {target} with rebase")),
            ],
            ConfirmOptions::default(),
        )
    }
}

impl StepMachine for PullCommand<'_> {
    type Params = RepositoriesParams;
    type StepId = RepositoriesStep;
    type Request = RepositoriesRequest;

    fn base(&self) -> &CommandBase {
        &self.base
    }

    fn next_step(&self, state: &mut WizardState<RepositoriesParams>) -> Result<Transition<RepositoriesStep>> {
        self.flow().next_step(state, |repos| self.confirm_step(repos))
    }

    fn apply(
        &self,
        state: &mut WizardState<RepositoriesParams>,
        id: RepositoriesStep,
        step: &Step,
        answer: Answer,
    ) -> Result<Control> {
        self.flow().apply(state, id, step, answer, |request| self.execute(request))
    }

    fn execute(&self, request: &RepositoriesRequest) -> Result<()> {
        info!("Pulling {} with {:?}", targets::describe_repositories(&request.repos), request.flags);
        self.git.pull(&request.repos, &PullOptions::from_flags(&request.flags))
    }
}
