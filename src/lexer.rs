//! Splitting an input line into a command word and its argument tokens.

/// Upper bound on tokens kept from one line, command word included.
pub const MAX_TOKENS: usize = 10;

/// Whitespace-delimited tokens of one input line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TokenizedLine {
    tokens: Vec<String>,
}

impl TokenizedLine {
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// The (lowercased) command word.
    pub fn command(&self) -> Option<&str> {
        self.tokens.first().map(String::as_str)
    }

    /// Everything after the command word, joined by single spaces.
    pub fn argument(&self) -> Option<String> {
        match self.tokens.get(1..) {
            Some(rest) if !rest.is_empty() => Some(rest.join(" ")),
            _ => None,
        }
    }
}

/// Lowercase the command word only.
///
/// Characters after the first whitespace keep their case, so directory names
/// and echoed text survive.
pub fn lowercase_command_word(line: &str) -> String {
    let split = line.find(char::is_whitespace).unwrap_or(line.len());
    let (word, rest) = line.split_at(split);
    let mut out = word.to_lowercase();
    out.push_str(rest);
    out
}

/// Tokenize a line: lowercase the command word, split on whitespace and keep
/// at most [`MAX_TOKENS`] tokens.
pub fn split_into_tokens(line: &str) -> TokenizedLine {
    let normalized = lowercase_command_word(line);
    let tokens = normalized
        .split_whitespace()
        .take(MAX_TOKENS)
        .map(str::to_string)
        .collect();
    TokenizedLine { tokens }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_line_has_no_tokens() {
        assert!(split_into_tokens("").is_empty());
        assert!(split_into_tokens(" \t  ").is_empty());
        assert_eq!(split_into_tokens("   ").command(), None);
    }

    #[test]
    fn test_only_the_command_word_is_lowercased() {
        let line = split_into_tokens("MyCd Some/Dir");
        assert_eq!(line.tokens(), &["mycd", "Some/Dir"]);
    }

    // A leading space means the first whitespace comes before the command
    // word, so nothing is lowercased and the word matches no builtin.
    #[test]
    fn test_leading_whitespace_skips_lowercasing() {
        let line = split_into_tokens("  MYQUIT");
        assert_eq!(line.command(), Some("MYQUIT"));
    }

    #[test]
    fn test_argument_joins_remaining_tokens() {
        let line = split_into_tokens("myecho  hello \t  world");
        assert_eq!(line.command(), Some("myecho"));
        assert_eq!(line.argument().as_deref(), Some("hello world"));
        assert_eq!(split_into_tokens("myclr").argument(), None);
    }

    #[test]
    fn test_excess_tokens_are_dropped() {
        let line = split_into_tokens("myecho 1 2 3 4 5 6 7 8 9 10 11 12");
        assert_eq!(line.tokens().len(), MAX_TOKENS);
        assert_eq!(line.argument().as_deref(), Some("1 2 3 4 5 6 7 8 9"));
    }
}
