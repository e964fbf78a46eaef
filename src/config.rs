use argh::FromArgs;
use rustyline::{CompletionType, EditMode};
use std::io::IsTerminal;

pub const DEFAULT_HISTORY_SIZE: usize = 100;

#[derive(FromArgs, Debug, Clone, PartialEq)]
/// Interactive shell with ten builtin commands; type `myhelp` once inside.
pub struct Config {
    #[argh(switch)]
    /// do not colour the prompt.
    pub no_color: bool,

    #[argh(option, default = "DEFAULT_HISTORY_SIZE")]
    /// maximum number of lines kept for recall (default 100).
    pub history_size: usize,

    #[argh(option, default = "EditMode::Emacs", from_str_fn(parse_edit_mode))]
    /// key bindings: emacs or vi (default emacs).
    pub edit_mode: EditMode,

    #[argh(option, default = "CompletionType::List", from_str_fn(parse_completion))]
    /// how completions are offered: list or circular (default list).
    pub completion: CompletionType,

    #[argh(switch, short = 'V')]
    /// print the version and exit.
    pub version: bool,
}

impl Config {
    /// Whether the prompt should carry ANSI colours.
    pub fn color_enabled(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            no_color: false,
            history_size: DEFAULT_HISTORY_SIZE,
            edit_mode: EditMode::Emacs,
            completion: CompletionType::List,
            version: false,
        }
    }
}

fn parse_edit_mode(value: &str) -> Result<EditMode, String> {
    match value.to_ascii_lowercase().as_str() {
        "emacs" => Ok(EditMode::Emacs),
        "vi" => Ok(EditMode::Vi),
        other => Err(format!("unknown edit mode {other:?}, expected emacs or vi")),
    }
}

fn parse_completion(value: &str) -> Result<CompletionType, String> {
    match value.to_ascii_lowercase().as_str() {
        "list" => Ok(CompletionType::List),
        "circular" => Ok(CompletionType::Circular),
        other => Err(format!(
            "unknown completion style {other:?}, expected list or circular"
        )),
    }
}
