use std::io;
use std::process::{Command, ExitStatus};
use std::string::FromUtf8Error;

use thiserror::Error;

mod sealed {
    use std::process::Command;
    pub trait Sealed {}
    impl Sealed for Command {}
}

/// Errors from [`CommandExt::trimmed_stdout`].
#[derive(Debug, Error)]
pub enum CommandError {
    /// The program could not be started at all.
    #[error("failed to spawn `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The program ran, but exited unsuccessfully.
    #[error("`{program}` exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: ExitStatus,
        /// Trimmed standard error of the program.
        stderr: String,
    },

    /// The program succeeded, but its standard output is not UTF-8.
    #[error("`{program}` wrote non UTF-8 output")]
    NonUtf8 {
        program: String,
        #[source]
        source: FromUtf8Error,
    },
}

/// Adds [`trimmed_stdout`](CommandExt::trimmed_stdout) to the [`Command`].
pub trait CommandExt: sealed::Sealed {
    /// Run command from `Self` to completion and capture its standard output.
    ///
    /// # Returns
    /// Standard output with leading and trailing whitespace removed, if the command exited
    /// successfully. See [`CommandError`] for the failure cases.
    fn trimmed_stdout(&mut self) -> Result<String, CommandError>;
}

impl CommandExt for Command {
    fn trimmed_stdout(&mut self) -> Result<String, CommandError> {
        let program = self.get_program().to_string_lossy().into_owned();
        let output = self.output().map_err(|source| CommandError::Spawn {
            program: program.clone(),
            source,
        })?;
        if !output.status.success() {
            return Err(CommandError::Failed {
                program,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }
        let stdout = String::from_utf8(output.stdout)
            .map_err(|source| CommandError::NonUtf8 { program, source })?;
        Ok(stdout.trim().to_owned())
    }
}
