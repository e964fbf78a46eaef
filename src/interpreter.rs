use crate::command::{Arity, Registry};
use crate::env::Environment;
use crate::error::ShellError;
use crate::lexer;
use std::io::{Read, Write};

/// What a call to [`Interpreter::dispatch`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The line held no tokens.
    Empty,
    /// The named builtin ran to completion.
    Ran(&'static str),
    /// The named builtin ran and reported an error.
    Failed(&'static str),
    /// No builtin has this name.
    Unknown(String),
}

/// Maps input lines onto builtins.
///
/// The interpreter owns the builtin [`Registry`] and the shell's
/// [`Environment`]. Handlers run synchronously; whatever they report goes to
/// the writer passed to [`Interpreter::dispatch`].
///
/// Example
/// ```
/// use myshell::Interpreter;
/// let mut sh = Interpreter::default();
/// let mut out = Vec::new();
/// sh.dispatch("MYECHO Hello   World", &mut std::io::empty(), &mut out);
/// assert_eq!(out, b"Hello World\n");
/// ```
pub struct Interpreter {
    env: Environment,
    registry: Registry,
}

impl Interpreter {
    /// Create an interpreter with a custom registry.
    pub fn new(registry: Registry, env: Environment) -> Self {
        Self { env, registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Tokenize `line` and run the builtin its first word names.
    ///
    /// Never fails: unknown commands and handler errors are written to
    /// `stdout` and the outcome says what happened.
    pub fn dispatch(
        &mut self,
        line: &str,
        stdin: &mut dyn Read,
        stdout: &mut dyn Write,
    ) -> Outcome {
        let tokens = lexer::split_into_tokens(line);
        let Some(name) = tokens.command() else {
            return Outcome::Empty;
        };

        let Some(cmd) = self.registry.get(name) else {
            log::debug!("no builtin named {name:?}");
            report(
                stdout,
                &anyhow::Error::new(ShellError::UnknownCommand(name.to_string())),
            );
            return Outcome::Unknown(name.to_string());
        };

        let arg = match cmd.arity() {
            Arity::None => None,
            Arity::Optional | Arity::Required => tokens.argument(),
        };
        log::debug!("running {} with {arg:?}", cmd.name());

        match cmd.execute(arg.as_deref(), stdin, stdout, &mut self.env) {
            Ok(()) => Outcome::Ran(cmd.name()),
            Err(e) => {
                report(stdout, &e);
                Outcome::Failed(cmd.name())
            }
        }
    }
}

fn report(stdout: &mut dyn Write, err: &anyhow::Error) {
    if let Err(e) = writeln!(stdout, "{err:#}") {
        log::warn!("could not report error {err:#}: {e}");
    }
}

impl Default for Interpreter {
    /// The ten builtins over a snapshot of the process environment.
    fn default() -> Self {
        Self::new(Registry::default(), Environment::new())
    }
}
