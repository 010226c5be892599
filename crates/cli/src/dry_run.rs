//! Collaborators for `--dry-run`: candidate data is read as usual, but git
//! actions are printed instead of run.

use std::path::Path;

use itertools::Itertools;
use quickstep_core::error::Result;
use quickstep_core::git::{
    Branch, FetchOptions, GitProvider, PullOptions, Repository, Tag, Terminal,
};
use quickstep_core::terminal::ShellTerminal;

/// Reads through to `inner`, prints `fetch` and `pull`.
pub struct DryRunGit<'a> {
    inner: &'a dyn GitProvider,
}

impl<'a> DryRunGit<'a> {
    pub fn new(inner: &'a dyn GitProvider) -> Self {
        Self { inner }
    }
}

/// The command lines `git <command> <flags>` would run in each repository.
pub fn describe_action(command: &str, flags: &[&str], repos: &[Repository]) -> Vec<String> {
    let command_line = std::iter::once("git")
        .chain(std::iter::once(command))
        .chain(flags.iter().copied())
        .join(" ");

    repos
        .iter()
        .map(|repo| format!("{command_line}    ({})", repo.path.display()))
        .collect()
}

fn print_dry_run(lines: &[String]) {
    println!("Dry run is specified, not executing:");
    for line in lines {
        println!("\t{line}");
    }
}

impl GitProvider for DryRunGit<'_> {
    fn repositories(&self) -> Result<Vec<Repository>> {
        self.inner.repositories()
    }

    fn active_repository(&self) -> Result<Option<Repository>> {
        self.inner.active_repository()
    }

    fn current_branch(&self, repo: &Repository) -> Result<Option<Branch>> {
        self.inner.current_branch(repo)
    }

    fn branches(&self, repo: &Repository) -> Result<Vec<Branch>> {
        self.inner.branches(repo)
    }

    fn tags(&self, repo: &Repository) -> Result<Vec<Tag>> {
        self.inner.tags(repo)
    }

    fn commit_count(&self, repo: &Repository, range: &str) -> Result<usize> {
        self.inner.commit_count(repo, range)
    }

    fn fetch(&self, repos: &[Repository], options: &FetchOptions) -> Result<()> {
        let mut flags = Vec::new();
        if options.all {
            flags.push("--all");
        }
        if options.prune {
            flags.push("--prune");
        }

        print_dry_run(&describe_action("fetch", &flags, repos));
        Ok(())
    }

    fn pull(&self, repos: &[Repository], options: &PullOptions) -> Result<()> {
        let flags = if options.rebase { vec!["--rebase"] } else { vec![] };

        print_dry_run(&describe_action("pull", &flags, repos));
        Ok(())
    }
}

/// Prints the command line a [`ShellTerminal`] would hand to the shell.
pub struct DryRunTerminal<'a> {
    inner: &'a ShellTerminal,
}

impl<'a> DryRunTerminal<'a> {
    pub fn new(inner: &'a ShellTerminal) -> Self {
        Self { inner }
    }
}

impl Terminal for DryRunTerminal<'_> {
    fn run_git_command(
        &self,
        command: &str,
        args: &[String],
        cwd: &Path,
        _show_output: bool,
    ) -> Result<()> {
        let command_line = self.inner.render(command, args)?;

        print_dry_run(&[format!("{command_line}    ({})", cwd.display())]);
        Ok(())
    }
}
