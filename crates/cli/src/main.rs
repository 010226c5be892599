use std::env;
use std::process::ExitCode;

use clap::Parser;
use itertools::Itertools;
use log::{debug, info};
use quickstep_core::command::QuickCommand;
use quickstep_core::commands;
use quickstep_core::config::{self, Settings};
use quickstep_core::error::{Error, Result};
use quickstep_core::git::{GitProvider, Terminal};
use quickstep_core::git_cli::GitCli;
use quickstep_core::step::Outcome;
use quickstep_core::terminal::ShellTerminal;

use quickstep_cli::cli_args::Args;
use quickstep_cli::driver;
use quickstep_cli::dry_run::{DryRunGit, DryRunTerminal};
use quickstep_cli::step_selection::TerminalPrompter;

/// Load settings from the config file given on the command line, or the default one
fn initialize_config(args: &Args) -> Result<Settings> {
    let config_path = config::get_config_path(args.config_path.as_deref());
    debug!("Config path: `{}`", config_path);

    config::load_settings(&config_path)
}

fn print_commands(commands: &[Box<dyn QuickCommand + '_>]) {
    let width = commands.iter().map(|c| c.key().len()).max().unwrap_or(0);

    let lines = commands
        .iter()
        .map(|c| match c.description() {
            Some(description) => format!("{:width$}  {} ({description})", c.key(), c.label()),
            None => format!("{:width$}  {}", c.key(), c.label()),
        })
        .join("\n");

    println!("{lines}");
}

fn run_commands(args: &Args, git: &dyn GitProvider, terminal: &dyn Terminal) -> Result<()> {
    let commands = commands::all(git, terminal);

    if args.list {
        print_commands(&commands);
        return Ok(());
    }

    let mut prompter = TerminalPrompter;

    let command = match &args.command {
        Some(key) => commands::find(&commands, key)?,
        None => match driver::choose_command(&commands, &mut prompter)? {
            Some(command) => command,
            None => {
                info!("No command chosen.");
                return Ok(());
            }
        },
    };

    let mut producer = command.steps();
    match driver::run(producer.as_mut(), &mut prompter)? {
        Outcome::Executed => info!("{} finished.", command.label()),
        Outcome::Aborted => info!("{} cancelled.", command.label()),
    }

    Ok(())
}

fn execute() -> Result<()> {
    let args = Args::parse();
    let settings = initialize_config(&args)?;

    let working_directory = env::current_dir().map_err(|e| {
        Error::io_error("working directory".to_string(), ".".to_string(), e)
    })?;

    let git = GitCli::new(settings.repository_paths(), working_directory);
    let terminal = ShellTerminal::from_settings(&settings);

    if args.dry_run {
        let dry_run_git = DryRunGit::new(&git);
        let dry_run_terminal = DryRunTerminal::new(&terminal);
        run_commands(&args, &dry_run_git, &dry_run_terminal)
    } else {
        run_commands(&args, &git, &terminal)
    }
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
