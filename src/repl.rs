use rustyline::{DefaultEditor, error::ReadlineError};

use crate::interpreter::environment::Environment;

/// Splits a script into statements.
///
/// Everything after `#` on a line is a comment. A line ending in `\` continues
/// on the next one. Blank statements are skipped. Each statement carries the
/// number of the line it starts on.
///
/// # Example
/// ```
/// use operon::repl::statements;
///
/// let source = "x = 1 # one\n\n1 + \\\n  2\n";
/// assert_eq!(statements(source),
///            vec![(1, "x = 1 ".to_string()), (3, "1 + \n  2".to_string())]);
/// ```
#[must_use]
pub fn statements(source: &str) -> Vec<(usize, String)> {
    let mut joiner = Joiner::default();
    let mut statements = source.lines()
                               .enumerate()
                               .filter_map(|(index, line)| joiner.feed(index + 1, line))
                               .collect::<Vec<_>>();
    statements.extend(joiner.finish());
    statements
}

/// Joins physical lines into statements as they arrive.
///
/// # Example
/// ```
/// use operon::repl::Joiner;
///
/// let mut joiner = Joiner::default();
/// assert_eq!(joiner.feed(1, "1 + \\"), None);
/// assert!(joiner.is_pending());
/// assert_eq!(joiner.feed(2, "2"), Some((1, "1 + \n2".to_string())));
/// assert!(!joiner.is_pending());
/// ```
#[derive(Debug, Default)]
pub struct Joiner {
    pending: Option<(usize, String)>,
}

impl Joiner {
    /// Feeds line `number` and returns the statement it completes. Comments
    /// are stripped and blank statements are dropped.
    pub fn feed(&mut self, number: usize, raw: &str) -> Option<(usize, String)> {
        let line = raw.split_once('#').map_or(raw, |(code, _)| code);
        let (text, continues) = match line.trim_end().strip_suffix('\\') {
            Some(text) => (text, true),
            None => (line, false),
        };

        let (number, mut statement) = self.pending.take().unwrap_or((number, String::new()));
        if !statement.is_empty() {
            statement.push('\n');
        }
        statement.push_str(text);

        if continues {
            self.pending = Some((number, statement));
            None
        } else {
            (!statement.trim().is_empty()).then_some((number, statement))
        }
    }

    /// Whether a statement is waiting for its next line.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Ends the input, returning the unfinished statement if there is one.
    pub fn finish(&mut self) -> Option<(usize, String)> {
        self.pending.take().filter(|(_, statement)| !statement.trim().is_empty())
    }

    /// Drops the unfinished statement.
    pub fn discard(&mut self) {
        self.pending = None;
    }
}

/// Runs an interactive session on standard input until end of input.
pub fn run(mut env: Environment) {
    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(err) => {
            eprintln!("Failed to initialize line editor: {err}");
            std::process::exit(1);
        },
    };

    let mut joiner = Joiner::default();
    let mut number = 0;
    loop {
        let prompt = if joiner.is_pending() { "... " } else { "> " };
        match editor.readline(prompt) {
            Ok(line) => {
                number += 1;
                let _ = editor.add_history_entry(&line);
                if let Some(statement) = joiner.feed(number, &line) {
                    execute(&mut env, statement);
                }
            },
            Err(ReadlineError::Interrupted) => joiner.discard(),
            Err(ReadlineError::Eof) => {
                if let Some(statement) = joiner.finish() {
                    execute(&mut env, statement);
                }
                break;
            },
            Err(err) => {
                eprintln!("Error: {err}");
                break;
            },
        }
    }
}

fn execute(env: &mut Environment, (number, statement): (usize, String)) {
    match env.run(&statement) {
        Ok(outcome) => {
            if let Err(err) = env.show(&outcome) {
                eprintln!("Error: {err}");
            }
        },
        Err(err) => eprintln!("Error on line {number}: {err}"),
    }
}
