use crate::error::ParseError;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while running a command.
pub enum CommandError {
    /// No command with this name exists.
    UnknownCommand {
        /// The command name as typed.
        name: String,
    },
    /// The arguments do not have the shape the command expects.
    MalformedArguments {
        /// The command name.
        command: &'static str,
        /// What was wrong.
        details: String,
    },
    /// The entity exists and may not be replaced.
    AlreadyDefined {
        /// Name (and arity, for functions) of the entity.
        name: String,
    },
    /// The entity to delete does not exist.
    NotFound {
        /// Name (and arity, for functions) of the entity.
        name: String,
    },
    /// A body or expression argument failed to parse.
    Parse(ParseError),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownCommand { name } => write!(f, "Unknown command '{name}'."),
            Self::MalformedArguments { command, details } => {
                write!(f, "Malformed arguments for '{command}': {details}.")
            },
            Self::AlreadyDefined { name } => write!(f, "'{name}' is already defined."),
            Self::NotFound { name } => write!(f, "'{name}' is not defined."),
            Self::Parse(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<ParseError> for CommandError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}
