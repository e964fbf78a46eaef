//! Tab completion of builtin names.

use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

/// Yield, in registry order, every name that starts with `partial`.
///
/// The iterator is lazy and cheap to recreate, so each completion request
/// starts over from the first name.
pub fn complete<'a>(names: &'a [&'static str], partial: &'a str) -> impl Iterator<Item = &'static str> + 'a {
    names.iter().copied().filter(move |name| name.starts_with(partial))
}

/// Start of the word that ends at `pos`, and whether it is the line's first word.
fn word_under_cursor(line: &str, pos: usize) -> (usize, bool) {
    let head = &line[..pos];
    let start = head
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    (start, head[..start].trim().is_empty())
}

/// rustyline helper that completes the command word only.
pub struct ShellHelper {
    names: Vec<&'static str>,
}

impl ShellHelper {
    pub fn new(names: Vec<&'static str>) -> Self {
        Self { names }
    }
}

impl Helper for ShellHelper {}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _: &Context<'_>,
    ) -> Result<(usize, Vec<Pair>), ReadlineError> {
        let (start, first_word) = word_under_cursor(line, pos);
        if !first_word {
            return Ok((start, Vec::new()));
        }
        let partial = &line[start..pos];
        let pairs = complete(&self.names, partial)
            .map(|name| Pair {
                display: name.to_string(),
                replacement: name.to_string(),
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for ShellHelper {
    type Hint = String;
}

impl Highlighter for ShellHelper {}

impl Validator for ShellHelper {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Registry;
    use rustyline::history::DefaultHistory;

    fn names() -> Vec<&'static str> {
        Registry::default().names()
    }

    #[test]
    fn test_common_prefix_lists_everything_in_order() {
        let names = names();
        let got: Vec<_> = complete(&names, "my").collect();
        assert_eq!(got, names);
        assert_eq!(got.len(), 10);
    }

    #[test]
    fn test_empty_prefix_lists_everything() {
        let names = names();
        assert_eq!(complete(&names, "").count(), 10);
    }

    #[test]
    fn test_unique_prefix() {
        let names = names();
        assert_eq!(complete(&names, "myq").collect::<Vec<_>>(), vec!["myquit"]);
        assert_eq!(
            complete(&names, "myc").collect::<Vec<_>>(),
            vec!["mycd", "myclr"]
        );
    }

    #[test]
    fn test_no_match() {
        let names = names();
        assert_eq!(complete(&names, "zz").count(), 0);
    }

    #[test]
    fn test_restartable() {
        let names = names();
        let first: Vec<_> = complete(&names, "mye").collect();
        let second: Vec<_> = complete(&names, "mye").collect();
        assert_eq!(first, vec!["myenviron", "myecho"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_helper_completes_first_word_only() {
        let helper = ShellHelper::new(names());
        let history = DefaultHistory::new();
        let ctx = Context::new(&history);

        let (start, pairs) = helper.complete("  myq", 5, &ctx).unwrap();
        assert_eq!(start, 2);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].replacement, "myquit");

        let (_, pairs) = helper.complete("mycd my", 7, &ctx).unwrap();
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_word_under_cursor() {
        assert_eq!(word_under_cursor("", 0), (0, true));
        assert_eq!(word_under_cursor("myd", 3), (0, true));
        assert_eq!(word_under_cursor("mydir sr", 8), (6, false));
        assert_eq!(word_under_cursor("mydir ", 6), (6, false));
    }
}
