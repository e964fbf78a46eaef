use crate::interpreter::{Interpreter, Outcome};
use crate::line_source::{LineSource, ReadOutcome};
use crate::prompt::PromptContext;
use crate::signals::INTERRUPT;
use anyhow::{Context, Result};
use std::io::{Read, Write};

/// Name of the builtin end of input is routed to.
const QUIT: &str = "myquit";

/// Where the session loop is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Prompting,
    AwaitingLine,
    Dispatching,
    /// Only reached if the quit handler returns, which the real one never does.
    Terminated,
}

/// One interactive shell session.
///
/// Owns the interpreter (and through it the builtin registry) and the log of
/// every line read. Nothing here is global; a process may host several
/// sessions, though only one can own the terminal.
pub struct Session {
    interpreter: Interpreter,
    color: bool,
    state: State,
    current_prompt: String,
    history: Vec<String>,
}

impl Session {
    pub fn new(interpreter: Interpreter, color: bool) -> Self {
        Self {
            interpreter,
            color,
            state: State::Prompting,
            current_prompt: String::new(),
            history: Vec::new(),
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn current_prompt(&self) -> &str {
        &self.current_prompt
    }

    /// Every line read so far, blank ones included.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    /// Run one prompt-read-dispatch cycle and return the state it ends in.
    ///
    /// Fails only when the line source does.
    pub fn step(
        &mut self,
        source: &mut dyn LineSource,
        stdin: &mut dyn Read,
        stdout: &mut dyn Write,
    ) -> Result<State> {
        if self.state == State::Terminated {
            return Ok(State::Terminated);
        }

        self.state = State::Prompting;
        self.current_prompt = PromptContext::capture_or_placeholder().render(self.color);

        self.state = State::AwaitingLine;
        let outcome = source.read_line(&self.current_prompt)?;

        self.state = match outcome {
            ReadOutcome::Line(line) => {
                self.history.push(line);
                let line = self.history.last().map(String::as_str).unwrap_or_default();
                if line.trim().is_empty() {
                    State::Prompting
                } else {
                    self.state = State::Dispatching;
                    self.interpreter.dispatch(line, stdin, stdout);
                    State::Prompting
                }
            }
            ReadOutcome::Interrupted => {
                stdout.write_all(INTERRUPT.notice().as_bytes())?;
                stdout.flush()?;
                State::Prompting
            }
            ReadOutcome::Eof => {
                log::debug!("end of input");
                self.state = State::Dispatching;
                match self.interpreter.dispatch(QUIT, stdin, stdout) {
                    Outcome::Ran(_) | Outcome::Failed(_) => {}
                    other => log::warn!("end of input could not quit: {other:?}"),
                }
                State::Terminated
            }
        };
        Ok(self.state)
    }

    /// Loop until the session terminates.
    ///
    /// The first prompt must be buildable; afterwards prompt failures only
    /// degrade to placeholders.
    pub fn run_with(
        &mut self,
        source: &mut dyn LineSource,
        stdin: &mut dyn Read,
        stdout: &mut dyn Write,
    ) -> Result<()> {
        PromptContext::capture().context("cannot build the first prompt")?;
        while self.step(source, stdin, stdout)? != State::Terminated {}
        Ok(())
    }

    /// Loop on the process's standard streams.
    pub fn run(&mut self, source: &mut dyn LineSource) -> Result<()> {
        let mut stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        self.run_with(source, &mut stdin, &mut stdout)
    }
}
