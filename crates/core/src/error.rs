use leon::{ParseError, RenderError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("`{}` exited with non-success code.", .0)]
    SubProcessExit(String),

    #[error("Error with sub process: {}", _0)]
    SubProcess(#[from] std::io::Error),

    #[error("Unexpected output from `git {}`: {}", .command, .output)]
    GitOutput { command: String, output: String },

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("Error parsing git command template: {}", .0)]
    Parse(#[from] ParseError),

    #[error("Error rendering git command template: {}", .0)]
    Render(#[from] RenderError),

    #[error("No git repositories were found. Run inside a repository or list some in the config file.")]
    NoRepositories,

    #[error("Unknown command: `{}`", .0)]
    CommandNotFound(String),

    #[error("Misc error: {}", .0)]
    Misc(String),
}

impl Error {
    pub fn git_output(command: &str, output: &str) -> Self {
        Self::GitOutput {
            command: command.to_string(),
            output: output.to_string(),
        }
    }

    pub fn yaml_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }
}
