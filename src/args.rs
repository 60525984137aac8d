use crate::error::{NotesError, Result};

/// Split one shell line into words. Double quotes group words; `\"` and
/// `\\` escape inside quotes.
pub fn split_words(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut in_quotes = false;
    let mut chars = line.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                in_word = true;
            }
            '\\' if in_quotes => match chars.next() {
                Some(next @ ('"' | '\\')) => current.push(next),
                Some(other) => {
                    current.push('\\');
                    current.push(other);
                }
                None => current.push('\\'),
            },
            c if c.is_whitespace() && !in_quotes => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if in_quotes {
        return Err(NotesError::InvalidArgument(
            "Unterminated quote".to_string(),
        ));
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

pub struct ArgParser {
    iter: std::vec::IntoIter<String>,
    command_name: String,
}

impl ArgParser {
    pub fn new(args: Vec<String>, command_name: &str) -> Self {
        Self { iter: args.into_iter(), command_name: command_name.to_string() }
    }

    /// Extract a string value for a flag
    pub fn extract_value(&mut self, flag: &str) -> Result<String> {
        self.iter.next().ok_or_else(|| {
            NotesError::InvalidArgument(format!(
                "Provide a value after {} for {}",
                flag, self.command_name
            ))
        })
    }

    /// Get next positional argument
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<String> {
        self.iter.next()
    }

    /// Collect remaining args
    pub fn collect_remaining(self) -> Vec<String> {
        self.iter.collect()
    }

    pub fn unknown(&self, arg: &str) -> NotesError {
        NotesError::InvalidArgument(format!(
            "Unknown argument for {}: {arg}",
            self.command_name
        ))
    }
}

/// Split `key=value`.
pub fn key_value(arg: &str) -> Result<(&str, &str)> {
    arg.split_once('=').ok_or_else(|| {
        NotesError::InvalidArgument(format!("Expected key=value, got '{arg}'"))
    })
}

pub fn parse_switch(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        other => Err(NotesError::InvalidArgument(format!(
            "Expected on|off, got '{other}'"
        ))),
    }
}

/// Turn the two-character sequence `\n` into a newline so multi-line
/// bodies fit on one shell line.
pub fn unescape_newlines(text: &str) -> String {
    text.replace("\\n", "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace_and_quotes() {
        let words = split_words(r#"set title "Weekly plan"  now"#).unwrap();
        assert_eq!(words, vec!["set", "title", "Weekly plan", "now"]);
        assert_eq!(split_words(r#"search """#).unwrap(), vec!["search", ""]);
        assert_eq!(split_words(r#""say \"hi\"""#).unwrap(), vec![r#"say "hi""#]);
        assert!(split_words("   ").unwrap().is_empty());
    }

    #[test]
    fn unterminated_quote_is_an_error() {
        assert!(split_words(r#"title "oops"#).is_err());
    }

    #[test]
    fn test_arg_parser_extract_value() {
        let args = vec!["--sort".to_string(), "created".to_string()];
        let mut parser = ArgParser::new(args, "test");
        let flag = parser.next().unwrap();
        assert_eq!(flag, "--sort");
        assert_eq!(parser.extract_value("--sort").unwrap(), "created");
        assert!(parser.extract_value("--sort").is_err());
    }

    #[test]
    fn test_arg_parser_collect_remaining() {
        let args = vec!["id1".to_string(), "id2".to_string()];
        let parser = ArgParser::new(args, "test");
        assert_eq!(parser.collect_remaining(), vec!["id1", "id2"]);
    }

    #[test]
    fn switches_and_pairs() {
        assert!(parse_switch("ON").unwrap());
        assert!(!parse_switch("off").unwrap());
        assert!(parse_switch("maybe").is_err());
        assert_eq!(key_value("mode=dark").unwrap(), ("mode", "dark"));
        assert!(key_value("dark").is_err());
    }

    #[test]
    fn newline_escapes() {
        assert_eq!(unescape_newlines("a\\nb"), "a\nb");
    }
}
