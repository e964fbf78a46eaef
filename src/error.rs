use thiserror::Error;

/// Failures the shell reports to the user.
///
/// None of them ends the session: the loop prints the message and prompts
/// again. The only fatal path is an [`ShellError::EnvironmentQuery`] raised
/// while building the very first prompt.
#[derive(Debug, Error)]
pub enum ShellError {
    /// The working directory or host name could not be read from the OS.
    #[error("{what}: {source}")]
    EnvironmentQuery {
        what: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// The command word matched no builtin.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// A builtin rejected its argument.
    #[error("{0}")]
    InvalidArgument(String),

    /// An external utility could not be started.
    #[error("{program}: {reason}")]
    ExternalInvocation { program: String, reason: String },
}
