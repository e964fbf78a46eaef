use crate::env::Environment;
use crate::error::ShellError;
use anyhow::Result;
use std::ffi::OsStr;
use std::io::Write;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};

/// An OS utility a builtin delegates to, such as `ls` or `df`.
///
/// The utility inherits the terminal and reports its own failures; the shell
/// only cares whether it could be started.
pub struct ExternalTool<'a> {
    program: &'a str,
    args: Vec<&'a str>,
}

impl<'a> ExternalTool<'a> {
    pub fn new(program: &'a str) -> Self {
        Self {
            program,
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: &'a str) -> Self {
        self.args.push(arg);
        self
    }

    pub fn args(mut self, args: impl IntoIterator<Item = &'a str>) -> Self {
        self.args.extend(args);
        self
    }

    fn command(&self, env: &Environment) -> Result<std::process::Command, ShellError> {
        let search_paths = env.get_var("PATH").unwrap_or_default();
        let executable = find_in_path(OsStr::new(search_paths), self.program)
            .ok_or_else(|| ShellError::ExternalInvocation {
                program: self.program.to_string(),
                reason: "command not found".to_string(),
            })?;
        let mut cmd = std::process::Command::new(executable);
        cmd.args(&self.args)
            .env_clear()
            .envs(env.vars.iter())
            .current_dir(&env.current_dir);
        Ok(cmd)
    }

    /// Run the utility with inherited stdio and wait for it.
    ///
    /// Returns the exit code, with signal terminations mapped the way a shell
    /// reports them (128 + signal number).
    pub fn run(&self, env: &Environment) -> Result<i32> {
        let status = self
            .command(env)?
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .spawn()
            .and_then(|mut child| child.wait())
            .map_err(|e| self.spawn_failure(e))?;
        Ok(self.exit_code(status))
    }

    /// Run the utility with `input` written to its standard input.
    pub fn run_with_input(&self, env: &Environment, input: &[u8]) -> Result<i32> {
        let mut child = self
            .command(env)?
            .stdin(Stdio::piped())
            .stdout(Stdio::inherit())
            .spawn()
            .map_err(|e| self.spawn_failure(e))?;
        if let Some(mut stdin) = child.stdin.take() {
            // The pager may quit before reading everything.
            if let Err(e) = stdin.write_all(input) {
                log::debug!("{}: input not fully consumed: {e}", self.program);
            }
        }
        let status = child.wait().map_err(|e| self.spawn_failure(e))?;
        Ok(self.exit_code(status))
    }

    fn spawn_failure(&self, e: std::io::Error) -> ShellError {
        ShellError::ExternalInvocation {
            program: self.program.to_string(),
            reason: e.to_string(),
        }
    }

    fn exit_code(&self, status: ExitStatus) -> i32 {
        let code = match status.code() {
            Some(x) => x,
            None => terminated_by_signal(status),
        };
        if code != 0 {
            log::debug!("{} exited with status {code}", self.program);
        }
        code
    }
}

#[cfg(unix)]
fn terminated_by_signal(exit_status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = ExitStatusExt::signal(&exit_status) {
        128 + signal
    } else if ExitStatusExt::core_dumped(&exit_status) {
        255
    } else {
        -1
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_exit_status: ExitStatus) -> i32 {
    -1
}

/// Find `program` in the first directory of `search_paths` holding a file by
/// that name.
pub fn find_in_path(search_paths: &OsStr, program: &str) -> Option<PathBuf> {
    if program.is_empty() {
        return None;
    }
    std::env::split_paths(search_paths)
        .map(|dir| dir.join(program))
        .find(|path| path.is_file())
}
