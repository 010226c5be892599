//! Fakes and a scripted driver shared by the integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use quickstep_core::command::StepProducer;
use quickstep_core::error::{Error, Result};
use quickstep_core::git::{
    Branch, FetchOptions, GitProvider, PullOptions, Repository, Tag, Terminal,
};
use quickstep_core::step::{Answer, Flow, Outcome, Step};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Fetch(Vec<String>, FetchOptions),
    Pull(Vec<String>, PullOptions),
    CommitCount(String),
}

/// In-memory repositories. Every repository has the same branches.
pub struct FakeGit {
    pub repos: Vec<Repository>,
    pub active: Option<Repository>,
    pub branches: Vec<Branch>,
    pub tags: Vec<Tag>,
    pub count: usize,
    pub fail_count: bool,
    pub calls: RefCell<Vec<Call>>,
}

impl FakeGit {
    pub fn with_repos(names: &[&str]) -> Self {
        Self {
            repos: names.iter().map(|n| repo(n)).collect(),
            active: None,
            branches: vec![
                branch("main", true),
                branch("feature", false),
                remote_branch("origin/main"),
            ],
            tags: vec![Tag {
                id: "refs/tags/v1.0".to_string(),
                name: "v1.0".to_string(),
            }],
            count: 3,
            fail_count: false,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn actions(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| !matches!(c, Call::CommitCount(_)))
            .collect()
    }
}

impl GitProvider for FakeGit {
    fn repositories(&self) -> Result<Vec<Repository>> {
        Ok(self.repos.clone())
    }

    fn active_repository(&self) -> Result<Option<Repository>> {
        Ok(self.active.clone())
    }

    fn current_branch(&self, _repo: &Repository) -> Result<Option<Branch>> {
        Ok(self.branches.iter().find(|b| b.current).cloned())
    }

    fn branches(&self, _repo: &Repository) -> Result<Vec<Branch>> {
        Ok(self.branches.clone())
    }

    fn tags(&self, _repo: &Repository) -> Result<Vec<Tag>> {
        Ok(self.tags.clone())
    }

    fn commit_count(&self, _repo: &Repository, range: &str) -> Result<usize> {
        self.calls.borrow_mut().push(Call::CommitCount(range.to_string()));
        if self.fail_count {
            return Err(Error::SubProcessExit(format!("git rev-list --count {range}")));
        }
        Ok(self.count)
    }

    fn fetch(&self, repos: &[Repository], options: &FetchOptions) -> Result<()> {
        self.calls.borrow_mut().push(Call::Fetch(
            repos.iter().map(|r| r.name.clone()).collect(),
            options.clone(),
        ));
        Ok(())
    }

    fn pull(&self, repos: &[Repository], options: &PullOptions) -> Result<()> {
        self.calls.borrow_mut().push(Call::Pull(
            repos.iter().map(|r| r.name.clone()).collect(),
            options.clone(),
        ));
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalRun {
    pub command: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    pub show_output: bool,
}

#[derive(Default)]
pub struct FakeTerminal {
    pub runs: RefCell<Vec<TerminalRun>>,
}

impl FakeTerminal {
    pub fn runs(&self) -> Vec<TerminalRun> {
        self.runs.borrow().clone()
    }
}

impl Terminal for FakeTerminal {
    fn run_git_command(
        &self,
        command: &str,
        args: &[String],
        cwd: &Path,
        show_output: bool,
    ) -> Result<()> {
        self.runs.borrow_mut().push(TerminalRun {
            command: command.to_string(),
            args: args.to_vec(),
            cwd: cwd.to_path_buf(),
            show_output,
        });
        Ok(())
    }
}

pub fn repo(name: &str) -> Repository {
    Repository::from_path(&Path::new("/src").join(name))
}

pub fn branch(name: &str, current: bool) -> Branch {
    Branch {
        id: format!("refs/heads/{name}"),
        name: name.to_string(),
        remote: false,
        current,
        upstream: None,
    }
}

pub fn remote_branch(name: &str) -> Branch {
    Branch {
        id: format!("refs/remotes/{name}"),
        name: name.to_string(),
        remote: true,
        current: false,
        upstream: None,
    }
}

pub fn expect_step(flow: Flow) -> Step {
    match flow {
        Flow::Ask(step) => step,
        Flow::Done(outcome) => panic!("Expected a step, but the flow ended with {outcome:?}"),
    }
}

pub fn expect_done(flow: Flow) -> Outcome {
    match flow {
        Flow::Done(outcome) => outcome,
        Flow::Ask(step) => panic!("Expected the flow to end, but it asked `{}`", step.title),
    }
}

pub fn pick(step: &Step, label: &str) -> Answer {
    let item = step
        .items
        .iter()
        .find(|i| i.label == label)
        .unwrap_or_else(|| panic!("No item `{label}` in step `{}`", step.title))
        .clone();
    Answer::Selected(vec![item])
}

pub fn pick_all(step: &Step) -> Answer {
    Answer::Selected(step.items.clone())
}

/// What accepting `step` unchanged returns: the items marked as picked.
pub fn picked(step: &Step) -> Answer {
    Answer::Selected(step.picked_items().map(|(_, i)| i.clone()).collect())
}

pub fn labels(step: &Step) -> Vec<&str> {
    step.items.iter().map(|i| i.label.as_str()).collect()
}

/// Starts the producer and returns its first step.
pub fn start(producer: &mut dyn StepProducer) -> Step {
    expect_step(producer.next(None).unwrap())
}

/// Resumes the producer and returns the next step.
pub fn answer(producer: &mut dyn StepProducer, answer: Answer) -> Step {
    expect_step(producer.next(Some(answer)).unwrap())
}

/// Resumes the producer and returns how the flow ended.
pub fn finish(producer: &mut dyn StepProducer, answer: Answer) -> Outcome {
    expect_done(producer.next(Some(answer)).unwrap())
}
