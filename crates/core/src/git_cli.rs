//! [`GitProvider`] backed by the `git` executable.

use std::path::{Path, PathBuf};
use std::process::Command;

use itertools::Itertools;
use log::{debug, warn};

use crate::error::{Error, Result};
use crate::execution::{capture_output, execute_command};
use crate::git::{Branch, FetchOptions, GitProvider, PullOptions, Repository, Tag};

const BRANCH_FORMAT: &str = "%(refname)%09%(refname:short)%09%(HEAD)%09%(upstream:short)";
const TAG_FORMAT: &str = "%(refname)%09%(refname:short)";

pub struct GitCli {
    /// Configured repository directories. Empty means "the repository
    /// containing `working_directory`".
    paths: Vec<PathBuf>,
    working_directory: PathBuf,
}

impl GitCli {
    pub fn new(paths: Vec<PathBuf>, working_directory: PathBuf) -> Self {
        Self {
            paths,
            working_directory,
        }
    }

    fn git(cwd: &Path) -> Command {
        let mut command = Command::new("git");
        command.arg("-C").arg(cwd);
        command
    }

    /// Top-level directory of the work tree containing `path`.
    fn toplevel(path: &Path) -> Result<Option<PathBuf>> {
        let mut command = Self::git(path);
        command.args(["rev-parse", "--show-toplevel"]);

        Ok(capture_output(command)?.map(|out| PathBuf::from(out.trim())))
    }

    fn read(repo: &Repository, args: &[&str]) -> Result<String> {
        let mut command = Self::git(&repo.path);
        command.args(args);

        capture_output(command)?.ok_or_else(|| Error::SubProcessExit(format!("git {}", args.join(" "))))
    }
}

impl GitProvider for GitCli {
    fn repositories(&self) -> Result<Vec<Repository>> {
        let candidates = if self.paths.is_empty() {
            vec![self.working_directory.clone()]
        } else {
            self.paths.clone()
        };

        let mut repos = Vec::new();
        for path in candidates {
            match Self::toplevel(&path)? {
                Some(toplevel) => repos.push(Repository::from_path(&toplevel)),
                None => warn!("`{}` is not a git repository, skipping", path.display()),
            }
        }

        Ok(repos
            .into_iter()
            .unique_by(|r| r.id.clone())
            .sorted_by(|a, b| a.name.cmp(&b.name))
            .collect())
    }

    fn active_repository(&self) -> Result<Option<Repository>> {
        Ok(Self::toplevel(&self.working_directory)?.map(|p| Repository::from_path(&p)))
    }

    fn current_branch(&self, repo: &Repository) -> Result<Option<Branch>> {
        let mut command = Self::git(&repo.path);
        command.args(["symbolic-ref", "--quiet", "HEAD"]);

        let Some(refname) = capture_output(command)? else {
            debug!("`{}` has a detached HEAD", repo.name);
            return Ok(None);
        };

        let refname = refname.trim();
        Ok(self
            .branches(repo)?
            .into_iter()
            .find(|b| b.id == refname))
    }

    fn branches(&self, repo: &Repository) -> Result<Vec<Branch>> {
        let format = format!("--format={BRANCH_FORMAT}");
        let output = Self::read(repo, &["for-each-ref", &format, "refs/heads", "refs/remotes"])?;
        parse_branches(&output)
    }

    fn tags(&self, repo: &Repository) -> Result<Vec<Tag>> {
        let format = format!("--format={TAG_FORMAT}");
        let output = Self::read(repo, &["for-each-ref", &format, "refs/tags"])?;
        parse_tags(&output)
    }

    fn commit_count(&self, repo: &Repository, range: &str) -> Result<usize> {
        let output = Self::read(repo, &["rev-list", "--count", range])?;
        parse_count(&output)
    }

    fn fetch(&self, repos: &[Repository], options: &FetchOptions) -> Result<()> {
        for repo in repos {
            let mut command = Self::git(&repo.path);
            command.arg("fetch");
            if options.all {
                command.arg("--all");
            }
            if options.prune {
                command.arg("--prune");
            }
            execute_command(command, true)?;
        }
        Ok(())
    }

    fn pull(&self, repos: &[Repository], options: &PullOptions) -> Result<()> {
        for repo in repos {
            let mut command = Self::git(&repo.path);
            command.arg("pull");
            if options.rebase {
                command.arg("--rebase");
            }
            execute_command(command, true)?;
        }
        Ok(())
    }
}

fn parse_branches(output: &str) -> Result<Vec<Branch>> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let fields: Vec<&str> = line.split('\t').collect();
            let [id, name, head, upstream] = fields.as_slice() else {
                return Some(Err(Error::git_output("for-each-ref", line)));
            };

            // `refs/remotes/origin/HEAD` is an alias, not a branch
            if id.starts_with("refs/remotes/") && id.ends_with("/HEAD") {
                return None;
            }

            Some(Ok(Branch {
                id: (*id).to_string(),
                name: (*name).to_string(),
                remote: id.starts_with("refs/remotes/"),
                current: *head == "*",
                upstream: (!upstream.is_empty()).then(|| (*upstream).to_string()),
            }))
        })
        .collect()
}

fn parse_tags(output: &str) -> Result<Vec<Tag>> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| match line.split_once('\t') {
            Some((id, name)) => Ok(Tag {
                id: id.to_string(),
                name: name.to_string(),
            }),
            None => Err(Error::git_output("for-each-ref", line)),
        })
        .collect()
}

fn parse_count(output: &str) -> Result<usize> {
    output
        .trim()
        .parse::<usize>()
        .map_err(|_| Error::git_output("rev-list --count", output.trim()))
}
