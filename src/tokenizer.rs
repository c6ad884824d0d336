//! Command line tokenization for direct processes.
//!
//! Direct processes are launched without a shell, so their command lines must
//! be split into an executable and literal arguments ahead of time. Splitting
//! follows POSIX shell word rules: whitespace separates words, single and
//! double quotes group words and are stripped, and backslash escapes are
//! honoured. No globbing, variable expansion, pipes, redirections or
//! comments are interpreted: a word starting with `#` is an ordinary word.

/// Errors that can occur while splitting a command line
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("unable to parse command line '{command}': {source}")]
    Malformed {
        command: String,
        #[source]
        source: shell_words::ParseError,
    },

    #[error("command line '{command}' does not name an executable")]
    Empty { command: String },
}

impl ParseError {
    /// The command line that failed to parse
    pub fn command(&self) -> &str {
        match self {
            ParseError::Malformed { command, .. } | ParseError::Empty { command } => command,
        }
    }
}

/// Split a command line into its executable and arguments.
///
/// The first word becomes the executable, every following word an argument
/// in original order. A command line with no words at all is rejected since
/// there is nothing to launch.
///
/// # Examples
/// ```
/// use procfile::tokenizer::tokenize;
///
/// let (executable, arguments) = tokenize("java -jar 'my app.jar'").unwrap();
/// assert_eq!(executable, "java");
/// assert_eq!(arguments, vec!["-jar", "my app.jar"]);
/// ```
pub fn tokenize(command_line: &str) -> Result<(String, Vec<String>), ParseError> {
    let mut words = shell_words::split(&escape_comments(command_line))
        .map_err(|source| ParseError::Malformed {
            command: command_line.to_string(),
            source,
        })?
        .into_iter();

    let executable = words.next().ok_or_else(|| ParseError::Empty {
        command: command_line.to_string(),
    })?;

    Ok((executable, words.collect()))
}

/// Escape every unquoted `#` that starts a word.
///
/// `shell_words` treats such a `#` as the start of a comment and drops the
/// rest of the line.
fn escape_comments(command_line: &str) -> String {
    let mut escaped = String::with_capacity(command_line.len());
    let mut chars = command_line.chars();
    let mut quote: Option<char> = None;
    let mut word_start = true;

    while let Some(c) = chars.next() {
        match quote {
            Some('\'') => {
                if c == '\'' {
                    quote = None;
                }
                escaped.push(c);
            }
            Some(_) => {
                escaped.push(c);
                match c {
                    '\\' => escaped.extend(chars.next()),
                    '"' => quote = None,
                    _ => {}
                }
            }
            None if matches!(c, ' ' | '\t' | '\n') => {
                word_start = true;
                escaped.push(c);
            }
            None => {
                if word_start && c == '#' {
                    escaped.push('\\');
                }
                word_start = false;
                escaped.push(c);
                match c {
                    '\\' => escaped.extend(chars.next()),
                    '\'' | '"' => quote = Some(c),
                    _ => {}
                }
            }
        }
    }

    escaped
}
