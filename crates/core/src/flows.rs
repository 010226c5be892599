//! The two flows the commands are built from.
//!
//! [`RepositoriesFlow`] asks for one or more repositories and then for a
//! confirmation variant (fetch, pull). [`ReferenceFlow`] asks for one
//! repository, reads its current branch, asks for a source branch or tag
//! and compares the two before confirming (rebase, merge). A command keeps
//! its confirmation variants and its `execute` and delegates the rest.

use log::warn;

use crate::command::{CommandBase, ConfirmOptions, Control, Transition};
use crate::error::Result;
use crate::git::{Branch, GitProvider, Reference, Repository};
use crate::state::WizardState;
use crate::step::{with_dot, Answer, Outcome, Payload, SelectionItem, Step};
use crate::targets::{self, ReferenceQuery, RepositoryPrompt, Target};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoriesStep {
    Repositories,
    Confirm,
}

#[derive(Debug, Default)]
pub struct RepositoriesParams {
    pub repos: Option<Vec<Repository>>,
    pub flags: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoriesRequest {
    pub repos: Vec<Repository>,
    pub flags: Vec<String>,
}

/// Repositories, then a confirmation.
pub struct RepositoriesFlow<'a> {
    pub base: &'a CommandBase,
    pub git: &'a dyn GitProvider,
}

impl RepositoriesFlow<'_> {
    /// `confirm` builds the confirmation step for the chosen repositories.
    ///
    /// # Errors
    ///
    /// Returns the provider's error, or [`crate::error::Error::NoRepositories`].
    pub fn next_step(
        &self,
        state: &mut WizardState<RepositoriesParams>,
        confirm: impl FnOnce(&[Repository]) -> Step,
    ) -> Result<Transition<RepositoriesStep>> {
        if state.must_ask(&state.params.repos, 1) {
            // Going back keeps the earlier choice checked.
            let previous = state.params.repos.clone().unwrap_or_default();
            let prompt = RepositoryPrompt {
                title: &self.base.label,
                placeholder: "Choose repositories",
                multiselect: true,
                picked: &previous,
            };

            match targets::repositories(self.base, self.git, state, prompt)? {
                Target::Resolved(repo) => state.params.repos = Some(vec![repo]),
                Target::Ask(step) => {
                    return Ok(Transition::Ask(RepositoriesStep::Repositories, step))
                }
            }
        }

        let Some(repos) = state.params.repos.as_deref() else {
            return Ok(Transition::End(Outcome::Aborted));
        };

        Ok(Transition::Ask(RepositoriesStep::Confirm, confirm(repos)))
    }

    /// `execute` runs once, when a confirmation variant is chosen.
    ///
    /// # Errors
    ///
    /// Returns the error of `execute`.
    pub fn apply(
        &self,
        state: &mut WizardState<RepositoriesParams>,
        id: RepositoriesStep,
        step: &Step,
        answer: Answer,
        execute: impl FnOnce(&RepositoriesRequest) -> Result<()>,
    ) -> Result<Control> {
        let Some(selection) = self.base.can_move_next(step, state, answer) else {
            return Ok(match id {
                RepositoriesStep::Confirm if !state.fast_path => Control::Continue,
                _ => Control::Stop(Outcome::Aborted),
            });
        };

        match id {
            RepositoriesStep::Repositories => {
                state.params.repos = Some(targets::selected_repositories(selection));
                Ok(Control::Continue)
            }
            RepositoriesStep::Confirm => {
                state.params.flags = Some(targets::chosen_flags(selection));

                let request = RepositoriesRequest {
                    repos: state.params.repos.clone().unwrap_or_default(),
                    flags: state.params.flags.clone().unwrap_or_default(),
                };
                execute(&request)?;
                Ok(Control::Stop(Outcome::Executed))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceStep {
    Repository,
    Source,
    UpToDate,
    Confirm,
}

#[derive(Debug, Default)]
pub struct ReferenceParams {
    pub repo: Option<Repository>,
    pub destination: Option<Branch>,
    pub source: Option<Reference>,
    pub flags: Option<Vec<String>>,
}

impl ReferenceParams {
    fn request(&self) -> Option<ReferenceRequest> {
        Some(ReferenceRequest {
            repo: self.repo.clone()?,
            destination: self.destination.clone()?,
            source: self.source.clone()?,
            flags: self.flags.clone().unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceRequest {
    pub repo: Repository,
    /// The current branch, which is the one updated.
    pub destination: Branch,
    pub source: Reference,
    pub flags: Vec<String>,
}

/// What a confirmation step is built from.
#[derive(Debug)]
pub struct Comparison<'a> {
    pub repo: &'a Repository,
    pub destination: &'a Branch,
    pub source: &'a Reference,
    /// Commits in `destination..source`.
    pub count: usize,
}

/// Repository, source reference, then a confirmation, updating the current
/// branch.
pub struct ReferenceFlow<'a> {
    pub base: &'a CommandBase,
    pub git: &'a dyn GitProvider,
    /// Placeholder of the source step, given the destination branch name.
    pub source_placeholder: fn(&str) -> String,
}

impl ReferenceFlow<'_> {
    /// `confirm` builds the confirmation step when `source` has commits
    /// that `destination` lacks. Otherwise an up-to-date step is asked,
    /// which can only end the flow.
    ///
    /// # Errors
    ///
    /// Returns the provider's error, or [`crate::error::Error::NoRepositories`].
    pub fn next_step(
        &self,
        state: &mut WizardState<ReferenceParams>,
        confirm: impl FnOnce(&Comparison<'_>) -> Step,
    ) -> Result<Transition<ReferenceStep>> {
        if state.must_ask(&state.params.repo, 1) {
            let active = match &state.params.repo {
                Some(repo) => Some(repo.clone()),
                None => self.git.active_repository()?,
            };
            let prompt = RepositoryPrompt {
                title: &self.base.label,
                placeholder: "Choose a repository",
                multiselect: false,
                picked: active.as_slice(),
            };

            match targets::repositories(self.base, self.git, state, prompt)? {
                Target::Resolved(repo) => state.params.repo = Some(repo),
                Target::Ask(step) => return Ok(Transition::Ask(ReferenceStep::Repository, step)),
            }
        }

        let Some(repo) = state.params.repo.clone() else {
            return Ok(Transition::End(Outcome::Aborted));
        };

        let Some(destination) = self.git.current_branch(&repo)? else {
            warn!("{}: cannot determine the current branch of `{}`", self.base.key, repo.name);
            return Ok(Transition::End(Outcome::Aborted));
        };
        state.params.destination = Some(destination.clone());

        if state.must_ask(&state.params.source, 2) {
            let query = ReferenceQuery {
                include_tags: true,
                exclude: Some(destination.id.as_str()),
                picked: state.params.source.as_ref().map(Reference::id),
            };
            let step = self.base.create_step(
                format!("{} {}", self.base.label, with_dot(&destination.name, &repo.name)),
                (self.source_placeholder)(&destination.name),
                targets::references(self.git, &repo, &query)?,
                false,
            );
            return Ok(Transition::Ask(ReferenceStep::Source, step));
        }

        let Some(source) = state.params.source.as_ref() else {
            return Ok(Transition::End(Outcome::Aborted));
        };

        let range = format!("{}..{}", destination.name, source.name());
        let count = self.git.commit_count(&repo, &range)?;
        if count == 0 {
            return Ok(Transition::Ask(
                ReferenceStep::UpToDate,
                self.up_to_date_step(&repo, &destination, source),
            ));
        }

        let comparison = Comparison {
            repo: &repo,
            destination: &destination,
            source,
            count,
        };
        Ok(Transition::Ask(ReferenceStep::Confirm, confirm(&comparison)))
    }

    fn up_to_date_step(&self, repo: &Repository, destination: &Branch, source: &Reference) -> Step {
        let title = &self.base.label;

        self.base.create_confirm_step(
            format!("Confirm {}", with_dot(title, &repo.name)),
            vec![SelectionItem::new(format!("Cancel {title}"), Payload::None)
                .with_detail(format!("{} is up to date with {}", destination.name, source.name()))],
            ConfirmOptions {
                cancellable: false,
                resolve_single: false,
            },
        )
    }

    /// `execute` runs once, when a confirmation variant is chosen.
    ///
    /// # Errors
    ///
    /// Returns the error of `execute`.
    pub fn apply(
        &self,
        state: &mut WizardState<ReferenceParams>,
        id: ReferenceStep,
        step: &Step,
        answer: Answer,
        execute: impl FnOnce(&ReferenceRequest) -> Result<()>,
    ) -> Result<Control> {
        // Any answer to the up-to-date step ends the flow.
        if id == ReferenceStep::UpToDate {
            return Ok(Control::Stop(Outcome::Aborted));
        }

        let Some(selection) = self.base.can_move_next(step, state, answer) else {
            return Ok(match id {
                ReferenceStep::Source if !state.fast_path => Control::Continue,
                ReferenceStep::Confirm => Control::Continue,
                _ => Control::Stop(Outcome::Aborted),
            });
        };

        match id {
            ReferenceStep::Repository => {
                state.params.repo = targets::first_repository(selection);
                Ok(Control::Continue)
            }
            ReferenceStep::Source => {
                state.params.source = targets::first_reference(selection);
                Ok(Control::Continue)
            }
            ReferenceStep::UpToDate => Ok(Control::Stop(Outcome::Aborted)),
            ReferenceStep::Confirm => {
                state.params.flags = Some(targets::chosen_flags(selection));

                let Some(request) = state.params.request() else {
                    return Ok(Control::Stop(Outcome::Aborted));
                };
                execute(&request)?;
                Ok(Control::Stop(Outcome::Executed))
            }
        }
    }
}
