use crate::completion::ShellHelper;
use crate::config::Config;
use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use std::collections::VecDeque;

/// Result of asking the user for one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Line(String),
    /// Ctrl-C while editing.
    Interrupted,
    /// Input is closed (Ctrl-D or end of a pipe).
    Eof,
}

/// Where the session loop gets its input.
pub trait LineSource {
    /// Show `prompt` and block until a full line, an interruption or end of input.
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome>;
}

/// Interactive line editor with builtin-name completion and recall history.
pub struct EditorSource {
    editor: Editor<ShellHelper, DefaultHistory>,
}

impl EditorSource {
    pub fn new(names: Vec<&'static str>, config: &Config) -> Result<Self> {
        let rl_config = rustyline::Config::builder()
            .max_history_size(config.history_size)?
            .edit_mode(config.edit_mode)
            .completion_type(config.completion)
            .auto_add_history(false)
            .build();
        let mut editor = Editor::<ShellHelper, DefaultHistory>::with_config(rl_config)?;
        editor.set_helper(Some(ShellHelper::new(names)));
        Ok(Self { editor })
    }
}

impl LineSource for EditorSource {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.editor.add_history_entry(line.as_str())?;
                }
                Ok(ReadOutcome::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
            Err(err) => Err(err.into()),
        }
    }
}

/// Replays prepared outcomes; reports end of input once they run out.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    script: VecDeque<ReadOutcome>,
    prompts: Vec<String>,
}

impl ScriptedSource {
    pub fn new(script: impl IntoIterator<Item = ReadOutcome>) -> Self {
        Self {
            script: script.into_iter().collect(),
            prompts: Vec::new(),
        }
    }

    /// Shorthand for a script made only of lines.
    pub fn lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        Self::new(lines.into_iter().map(|l| ReadOutcome::Line(l.to_string())))
    }

    /// Prompts shown so far, oldest first.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl LineSource for ScriptedSource {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome> {
        self.prompts.push(prompt.to_string());
        Ok(self.script.pop_front().unwrap_or(ReadOutcome::Eof))
    }
}
