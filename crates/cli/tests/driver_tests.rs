use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::Path;

use quickstep_cli::driver::{self, Prompter};
use quickstep_cli::dry_run::DryRunGit;
use quickstep_core::command::QuickCommand;
use quickstep_core::commands::{self, FetchCommand};
use quickstep_core::error::{Error, Result};
use quickstep_core::git::{
    Branch, FetchOptions, GitProvider, PullOptions, Repository, Tag, Terminal,
};
use quickstep_core::step::{Answer, Outcome, Step};

type Script = fn(&Step) -> Answer;

/// Answers steps from a script and remembers what it was asked.
struct ScriptedPrompter {
    script: VecDeque<Script>,
    asked: Vec<String>,
}

impl ScriptedPrompter {
    fn new(script: Vec<Script>) -> Self {
        Self {
            script: script.into(),
            asked: Vec::new(),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn prompt(&mut self, step: &Step) -> Result<Answer> {
        self.asked.push(step.title.clone());
        let answer = self
            .script
            .pop_front()
            .ok_or_else(|| Error::Misc(format!("Unexpected step `{}`", step.title)))?;
        Ok(answer(step))
    }
}

#[derive(Default)]
struct RecordingGit {
    repos: Vec<Repository>,
    fetched: RefCell<Vec<(Vec<String>, FetchOptions)>>,
}

impl RecordingGit {
    fn with_repos(names: &[&str]) -> Self {
        Self {
            repos: names
                .iter()
                .map(|n| Repository::from_path(&Path::new("/src").join(n)))
                .collect(),
            fetched: RefCell::default(),
        }
    }
}

impl GitProvider for RecordingGit {
    fn repositories(&self) -> Result<Vec<Repository>> {
        Ok(self.repos.clone())
    }

    fn active_repository(&self) -> Result<Option<Repository>> {
        Ok(None)
    }

    fn current_branch(&self, _repo: &Repository) -> Result<Option<Branch>> {
        Ok(None)
    }

    fn branches(&self, _repo: &Repository) -> Result<Vec<Branch>> {
        Ok(vec![])
    }

    fn tags(&self, _repo: &Repository) -> Result<Vec<Tag>> {
        Ok(vec![])
    }

    fn commit_count(&self, _repo: &Repository, _range: &str) -> Result<usize> {
        Ok(0)
    }

    fn fetch(&self, repos: &[Repository], options: &FetchOptions) -> Result<()> {
        self.fetched.borrow_mut().push((
            repos.iter().map(|r| r.name.clone()).collect(),
            options.clone(),
        ));
        Ok(())
    }

    fn pull(&self, _repos: &[Repository], _options: &PullOptions) -> Result<()> {
        Ok(())
    }
}

struct NoTerminal;

impl Terminal for NoTerminal {
    fn run_git_command(&self, command: &str, _args: &[String], _cwd: &Path, _show_output: bool) -> Result<()> {
        Err(Error::Misc(format!("Unexpected `git {command}`")))
    }
}

fn pick_all(step: &Step) -> Answer {
    Answer::Selected(step.items.clone())
}

fn cancel(_step: &Step) -> Answer {
    Answer::Cancelled
}

fn back(_step: &Step) -> Answer {
    Answer::Back
}

fn pick_fetch_and_prune(step: &Step) -> Answer {
    pick_label(step, "Fetch & Prune")
}

fn pick_rebase(step: &Step) -> Answer {
    pick_label(step, "Rebase")
}

fn pick_label(step: &Step, label: &str) -> Answer {
    let item = step
        .items
        .iter()
        .find(|i| i.label == label)
        .unwrap_or_else(|| panic!("No item `{label}` in step `{}`", step.title));
    Answer::Selected(vec![item.clone()])
}

#[test]
fn test_run_fetches_chosen_repositories_with_prune() {
    let git = RecordingGit::with_repos(&["api", "web"]);
    let fetch = FetchCommand::new(&git);
    let mut prompter = ScriptedPrompter::new(vec![pick_all as Script, pick_fetch_and_prune]);

    let mut producer = fetch.steps();
    let outcome = driver::run(producer.as_mut(), &mut prompter).unwrap();

    assert_eq!(outcome, Outcome::Executed);
    assert_eq!(prompter.asked.len(), 2);
    assert_eq!(
        git.fetched.borrow().clone(),
        vec![(
            vec!["api".to_string(), "web".to_string()],
            FetchOptions {
                all: false,
                prune: true
            }
        )]
    );
}

#[test]
fn test_run_cancelled_does_not_fetch() {
    let git = RecordingGit::with_repos(&["api", "web"]);
    let fetch = FetchCommand::new(&git);
    let mut prompter = ScriptedPrompter::new(vec![pick_all as Script, cancel]);

    let mut producer = fetch.steps();
    let outcome = driver::run(producer.as_mut(), &mut prompter).unwrap();

    assert_eq!(outcome, Outcome::Aborted);
    assert!(git.fetched.borrow().is_empty());
}

#[test]
fn test_run_propagates_prompt_errors() {
    let git = RecordingGit::with_repos(&["api", "web"]);
    let fetch = FetchCommand::new(&git);
    let mut prompter = ScriptedPrompter::new(vec![]);

    let mut producer = fetch.steps();
    assert!(driver::run(producer.as_mut(), &mut prompter).is_err());
    assert!(git.fetched.borrow().is_empty());
}

#[test]
fn test_run_propagates_missing_repositories() {
    let git = RecordingGit::with_repos(&[]);
    let fetch = FetchCommand::new(&git);
    let mut prompter = ScriptedPrompter::new(vec![]);

    let mut producer = fetch.steps();
    let result = driver::run(producer.as_mut(), &mut prompter);

    assert!(matches!(result, Err(Error::NoRepositories)));
    assert!(prompter.asked.is_empty());
}

#[test]
fn test_command_menu_lists_every_command() {
    let git = RecordingGit::default();
    let commands = commands::all(&git, &NoTerminal);

    let menu = driver::command_menu(&commands);
    let labels: Vec<&str> = menu.items.iter().map(|i| i.label.as_str()).collect();

    assert_eq!(labels, vec!["Fetch", "Pull", "Rebase", "Merge"]);
    assert!(!menu.multiselect);
}

#[test]
fn test_choose_command() {
    let git = RecordingGit::default();
    let commands = commands::all(&git, &NoTerminal);
    let mut prompter = ScriptedPrompter::new(vec![pick_rebase as Script]);

    let chosen = driver::choose_command(&commands, &mut prompter).unwrap();
    assert_eq!(chosen.map(|c| c.key()), Some("rebase"));
}

#[test]
fn test_choose_command_cancelled_or_back() {
    let git = RecordingGit::default();
    let commands = commands::all(&git, &NoTerminal);
    let mut prompter = ScriptedPrompter::new(vec![cancel as Script, back]);

    assert!(driver::choose_command(&commands, &mut prompter).unwrap().is_none());
    assert!(driver::choose_command(&commands, &mut prompter).unwrap().is_none());
}

#[test]
fn test_dry_run_git_reads_through_and_skips_actions() {
    let git = RecordingGit::with_repos(&["api"]);
    let dry_run = DryRunGit::new(&git);

    let repos = dry_run.repositories().unwrap();
    assert_eq!(repos.len(), 1);

    dry_run
        .fetch(
            &repos,
            &FetchOptions {
                all: true,
                prune: false,
            },
        )
        .unwrap();
    assert!(git.fetched.borrow().is_empty());
}
