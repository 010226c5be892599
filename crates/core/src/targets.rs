//! Candidate lists and the "ask for target" helpers shared by the commands.

use log::debug;

use crate::command::CommandBase;
use crate::error::{Error, Result};
use crate::git::{GitProvider, Reference, Repository};
use crate::state::WizardState;
use crate::step::{Payload, SelectionItem, Step};

/// Either the target is already known or a step must be asked to get it.
#[derive(Debug)]
pub enum Target<T> {
    Resolved(T),
    Ask(Step),
}

/// Filters for [`references`].
#[derive(Debug, Default, Clone)]
pub struct ReferenceQuery<'a> {
    pub include_tags: bool,
    /// Id of a branch to leave out, e.g. the branch being updated.
    pub exclude: Option<&'a str>,
    /// Full ref name of the item to mark as picked.
    pub picked: Option<&'a str>,
}

/// Repository step settings for [`repositories`].
#[derive(Debug, Clone, Copy)]
pub struct RepositoryPrompt<'a> {
    pub title: &'a str,
    pub placeholder: &'a str,
    pub multiselect: bool,
    /// Repositories to mark as picked, e.g. the previous choice.
    pub picked: &'a [Repository],
}

pub fn repository_items(repos: &[Repository], picked: &[Repository]) -> Vec<SelectionItem> {
    repos
        .iter()
        .map(|repo| {
            SelectionItem::new(repo.formatted_name(), Payload::Repository(repo.clone()))
                .with_description(repo.path.display().to_string())
                .with_picked(picked.iter().any(|p| p.id == repo.id))
        })
        .collect()
}

/// Lists the repositories and either resolves the only one or builds the
/// step that asks for them.
///
/// Resolving takes the fast path on `state`: the counter is advanced as if a
/// step had been confirmed.
///
/// # Errors
///
/// Returns [`Error::NoRepositories`] when there is nothing to choose from,
/// or the provider's error.
pub fn repositories<P>(
    base: &CommandBase,
    git: &dyn GitProvider,
    state: &mut WizardState<P>,
    prompt: RepositoryPrompt<'_>,
) -> Result<Target<Repository>> {
    let mut repos = git.repositories()?;

    if repos.is_empty() {
        return Err(Error::NoRepositories);
    }

    if repos.len() == 1 {
        let repo = repos.remove(0);
        debug!("{}: only one repository, using `{}`", base.key, repo.name);
        state.take_fast_path();
        return Ok(Target::Resolved(repo));
    }

    let step = base.create_step(
        prompt.title.to_string(),
        prompt.placeholder.to_string(),
        repository_items(&repos, prompt.picked),
        prompt.multiselect,
    );
    Ok(Target::Ask(step))
}

/// Branches, optionally followed by tags, as selection items.
///
/// # Errors
///
/// Returns the provider's error.
pub fn references(
    git: &dyn GitProvider,
    repo: &Repository,
    query: &ReferenceQuery<'_>,
) -> Result<Vec<SelectionItem>> {
    let mut candidates: Vec<Reference> = git
        .branches(repo)?
        .into_iter()
        .filter(|b| query.exclude != Some(b.id.as_str()))
        .map(Reference::Branch)
        .collect();

    if query.include_tags {
        candidates.extend(git.tags(repo)?.into_iter().map(Reference::Tag));
    }

    Ok(candidates
        .into_iter()
        .map(|reference| {
            let description = match &reference {
                Reference::Branch(branch) if branch.current => "current branch".to_string(),
                Reference::Branch(branch) => branch
                    .upstream
                    .as_ref()
                    .map(|u| format!("tracking {u}"))
                    .unwrap_or_default(),
                Reference::Tag(_) => "tag".to_string(),
            };
            let picked = query.picked == Some(reference.id());

            SelectionItem::new(reference.name(), Payload::Reference(reference.clone()))
                .with_description(description)
                .with_picked(picked)
        })
        .collect())
}

pub fn selected_repositories(selection: Vec<SelectionItem>) -> Vec<Repository> {
    selection
        .into_iter()
        .filter_map(|i| i.payload.into_repository())
        .collect()
}

pub fn first_repository(selection: Vec<SelectionItem>) -> Option<Repository> {
    selected_repositories(selection).into_iter().next()
}

pub fn first_reference(selection: Vec<SelectionItem>) -> Option<Reference> {
    selection
        .into_iter()
        .find_map(|i| i.payload.into_reference())
}

/// Flags carried by the chosen confirmation variant.
pub fn chosen_flags(selection: Vec<SelectionItem>) -> Vec<String> {
    selection
        .into_iter()
        .find_map(|i| i.payload.into_flags())
        .unwrap_or_default()
}

/// `quickstep` for one repository, `3 repositories` otherwise.
pub fn describe_repositories(repos: &[Repository]) -> String {
    match repos {
        [only] => only.formatted_name().to_string(),
        _ => format!("{} repositories", repos.len()),
    }
}
