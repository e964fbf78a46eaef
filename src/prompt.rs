//! Prompt construction.
//!
//! The prompt is rebuilt before every read so it always reflects the current
//! directory, e.g. `alice@box:/home/alice\myshell -$ `.

use crate::error::ShellError;
use nu_ansi_term::Color;
use std::env;
use std::path::PathBuf;

const DEFAULT_USER: &str = "user";
const DEFAULT_HOST: &str = "hostname";
const UNKNOWN_DIR: &str = "?";

/// Everything the prompt shows, read fresh from the OS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptContext {
    pub working_directory: PathBuf,
    pub host_identity: String,
    pub user_identity: String,
    pub is_privileged: bool,
}

impl PromptContext {
    /// Query the OS for the current prompt context.
    ///
    /// Fails only when the working directory cannot be resolved; a missing
    /// host name or `USER` falls back to a placeholder.
    pub fn capture() -> Result<Self, ShellError> {
        let working_directory =
            env::current_dir().map_err(|source| ShellError::EnvironmentQuery {
                what: "getcwd",
                source,
            })?;
        Ok(Self {
            working_directory,
            host_identity: host_identity(),
            user_identity: user_identity(),
            is_privileged: nix::unistd::geteuid().is_root(),
        })
    }

    /// Like [`PromptContext::capture`], but never fails.
    pub fn capture_or_placeholder() -> Self {
        Self::capture().unwrap_or_else(|err| {
            log::warn!("{err}");
            Self {
                working_directory: PathBuf::from(UNKNOWN_DIR),
                host_identity: host_identity(),
                user_identity: user_identity(),
                is_privileged: nix::unistd::geteuid().is_root(),
            }
        })
    }

    fn sigil(&self) -> char {
        if self.is_privileged { '#' } else { '$' }
    }

    /// Render the prompt, optionally wrapped in ANSI colours.
    pub fn render(&self, color: bool) -> String {
        let identity = format!("{}@{}", self.user_identity, self.host_identity);
        let location = format!(
            "{}\\myshell -{}",
            self.working_directory.display(),
            self.sigil()
        );
        if !color {
            return format!("{identity}:{location} ");
        }
        let identity_color = if self.is_privileged {
            Color::Red
        } else {
            Color::Yellow
        };
        format!(
            "{}:{} ",
            identity_color.bold().paint(identity),
            Color::Blue.bold().paint(location)
        )
    }
}

fn host_identity() -> String {
    match nix::unistd::gethostname() {
        Ok(name) if !name.is_empty() => name.to_string_lossy().into_owned(),
        Ok(_) => DEFAULT_HOST.to_string(),
        Err(errno) => {
            let err = ShellError::EnvironmentQuery {
                what: "gethostname",
                source: errno.into(),
            };
            log::warn!("{err}");
            DEFAULT_HOST.to_string()
        }
    }
}

fn user_identity() -> String {
    match env::var("USER") {
        Ok(user) if !user.is_empty() => user,
        _ => DEFAULT_USER.to_string(),
    }
}
