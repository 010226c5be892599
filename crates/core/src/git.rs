//! Git domain objects and the collaborator traits the command producers
//! depend on.
//!
//! The producers never talk to git directly. Candidate data comes from a
//! [`GitProvider`] and interactive actions are handed to a [`Terminal`], so
//! the step engine can be driven against fakes in tests and against
//! [`crate::git_cli::GitCli`] in the `qs` binary.

use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// A working tree known to the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub id: String,
    pub name: String,
    pub path: PathBuf,
}

impl Repository {
    /// Builds a repository from its top-level directory, naming it after the
    /// last path component.
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        Self {
            id: path.display().to_string(),
            name,
            path: path.to_path_buf(),
        }
    }

    pub fn formatted_name(&self) -> &str {
        &self.name
    }
}

impl Display for Repository {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.formatted_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    /// Full ref name, e.g. `refs/heads/main` or `refs/remotes/origin/main`.
    pub id: String,
    /// Short name, e.g. `main` or `origin/main`.
    pub name: String,
    pub remote: bool,
    pub current: bool,
    pub upstream: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: String,
    pub name: String,
}

/// Anything a rebase or merge can take as its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    Branch(Branch),
    Tag(Tag),
}

impl Reference {
    pub fn id(&self) -> &str {
        match self {
            Reference::Branch(branch) => &branch.id,
            Reference::Tag(tag) => &tag.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Reference::Branch(branch) => &branch.name,
            Reference::Tag(tag) => &tag.name,
        }
    }
}

impl Display for Reference {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.name())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchOptions {
    pub all: bool,
    pub prune: bool,
}

impl FetchOptions {
    pub fn from_flags(flags: &[String]) -> Self {
        Self {
            all: flags.iter().any(|f| f == "--all"),
            prune: flags.iter().any(|f| f == "--prune"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullOptions {
    pub rebase: bool,
}

impl PullOptions {
    pub fn from_flags(flags: &[String]) -> Self {
        Self {
            rebase: flags.iter().any(|f| f == "--rebase"),
        }
    }
}

/// Source of candidate data and of the non-interactive git actions.
pub trait GitProvider {
    /// All repositories, in presentation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the repositories cannot be listed.
    fn repositories(&self) -> Result<Vec<Repository>>;

    /// The repository the user is currently working in, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory cannot be inspected.
    fn active_repository(&self) -> Result<Option<Repository>>;

    /// The checked out branch, or `None` when HEAD is detached.
    ///
    /// # Errors
    ///
    /// Returns an error if git cannot be run.
    fn current_branch(&self, repo: &Repository) -> Result<Option<Branch>>;

    /// Local and remote branches.
    ///
    /// # Errors
    ///
    /// Returns an error if git cannot be run or its output is malformed.
    fn branches(&self, repo: &Repository) -> Result<Vec<Branch>>;

    /// # Errors
    ///
    /// Returns an error if git cannot be run or its output is malformed.
    fn tags(&self, repo: &Repository) -> Result<Vec<Tag>>;

    /// Number of commits in `range` (e.g. `main..feature`).
    ///
    /// # Errors
    ///
    /// Returns an error if git cannot be run or does not print a count.
    fn commit_count(&self, repo: &Repository, range: &str) -> Result<usize>;

    /// # Errors
    ///
    /// Returns an error if fetching any of the repositories fails.
    fn fetch(&self, repos: &[Repository], options: &FetchOptions) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if pulling any of the repositories fails.
    fn pull(&self, repos: &[Repository], options: &PullOptions) -> Result<()>;
}

/// Runs a git command where the user can see it and interact with it.
pub trait Terminal {
    /// Runs `git <command> <args>` in `cwd`.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be started or fails.
    fn run_git_command(
        &self,
        command: &str,
        args: &[String],
        cwd: &Path,
        show_output: bool,
    ) -> Result<()>;
}
