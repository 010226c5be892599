use std::collections::HashMap;
use std::path::Path;
use std::process::Command;

use leon::Template;
use log::debug;

use crate::config::Settings;
use crate::error::Result;
use crate::execution::execute_command;
use crate::git::Terminal;

/// Runs git commands through the user's interactive shell, so editors opened
/// by `rebase --interactive` and aliases from their profile work.
#[derive(Debug, Clone)]
pub struct ShellTerminal {
    shell: String,
    template: String,
}

impl ShellTerminal {
    pub fn new(shell: String, template: String) -> Self {
        Self { shell, template }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.shell(), settings.git_command_template().to_string())
    }

    /// The command line that [`Terminal::run_git_command`] hands to the
    /// shell. Every argument is shell-quoted, since ref names may contain
    /// `;`, `$` and other metacharacters.
    ///
    /// # Errors
    ///
    /// Returns an error if the template cannot be parsed or rendered.
    pub fn render(&self, command: &str, args: &[String]) -> Result<String> {
        let template = Template::parse(&self.template)?;

        let context: HashMap<&str, String> = HashMap::from([
            ("command", shell_words::quote(command).into_owned()),
            ("args", shell_words::join(args)),
        ]);

        Ok(template.render(&context)?.trim_end().to_string())
    }
}

impl Terminal for ShellTerminal {
    fn run_git_command(
        &self,
        command: &str,
        args: &[String],
        cwd: &Path,
        show_output: bool,
    ) -> Result<()> {
        let command_line = self.render(command, args)?;
        debug!("Running `{}` in `{}`", command_line, cwd.display());

        if show_output {
            println!("Executing command:\n{command_line}");
        }

        let mut shell = Command::new(&self.shell);
        shell.current_dir(cwd);
        // Give `-i` argument to start an interactive shell,
        // which will make it read ~/.rc or ~/.profile or whatever file
        shell.args(["-i", "-c", command_line.as_str()]);

        execute_command(shell, show_output)
    }
}
