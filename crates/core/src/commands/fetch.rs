use log::info;

use crate::command::{CommandBase, ConfirmOptions, Control, StepMachine, Transition};
use crate::error::Result;
use crate::flows::{RepositoriesFlow, RepositoriesParams, RepositoriesRequest, RepositoriesStep};
use crate::git::{FetchOptions, GitProvider, Repository};
use crate::state::WizardState;
use crate::step::{with_dot, Answer, Payload, SelectionItem, Step};
use crate::targets;

pub struct FetchCommand<'a> {
    base: CommandBase,
    git: &'a dyn GitProvider,
}

impl<'a> FetchCommand<'a> {
    pub fn new(git: &'a dyn GitProvider) -> Self {
        Self {
            base: CommandBase::new("fetch", "Fetch"),
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
                    .with_detail(format!("Will fetch {target}")),
                SelectionItem::new(format!("{title} & Prune"), Payload::Flags(vec!["--prune".to_string()]))
                    .with_description("--prune")
                    .with_detail(format!("Will fetch and prune {target}")),
                SelectionItem::new(format!("{title} All"), Payload::Flags(vec!["--all".to_string()]))
                    .with_description("--all")
                    .with_detail(format!("Will fetch all remotes of {target}")),
            ],
            ConfirmOptions::default(),
        )
    }
}

impl StepMachine for FetchCommand<'_> {
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
        info!("Fetching {} with {:?}", targets::describe_repositories(&request.repos), request.flags);
        self.git.fetch(&request.repos, &FetchOptions::from_flags(&request.flags))
    }
}
