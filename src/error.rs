/// Tokenizer configuration errors.
///
/// Raised when a [`crate::interpreter::tokenizer::Tokenizer`] is constructed
/// from an inconsistent configuration. These are fatal at construction time.
pub mod tokenizer_error;
/// Grammar registry errors.
///
/// Raised while building a [`crate::interpreter::symbols::SymbolIndex`] from
/// precedence tiers.
pub mod symbol_error;
/// Parsing errors.
///
/// Defines all error types that can occur while turning a line of text into
/// an element tree: unrecognized tokens, unbalanced brackets and modifiers
/// missing their operand.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while executing an element
/// tree, such as redefining a constant, factorials outside their domain or
/// division by zero.
pub mod runtime_error;
/// Command errors.
///
/// Errors raised by the command subsystem (`:define`, `:delete`, ...), which
/// shares the error family of the core.
pub mod command_error;

pub use command_error::CommandError;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
pub use symbol_error::SymbolError;
pub use tokenizer_error::TokenizerError;

/// Any error a statement can end with.
///
/// Returned by [`crate::interpreter::environment::Environment::run`], which
/// is the statement boundary: callers print the error and continue with the
/// next line.
#[derive(Debug)]
pub enum Error {
    /// The grammar could not be built.
    Symbol(SymbolError),
    /// The line could not be parsed.
    Parse(ParseError),
    /// The parsed tree failed while executing.
    Runtime(RuntimeError),
    /// A command failed.
    Command(CommandError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Symbol(e) => write!(f, "{e}"),
            Self::Parse(e) => write!(f, "{e}"),
            Self::Runtime(e) => write!(f, "{e}"),
            Self::Command(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Symbol(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Runtime(e) => Some(e),
            Self::Command(e) => Some(e),
        }
    }
}

impl From<SymbolError> for Error {
    fn from(e: SymbolError) -> Self {
        Self::Symbol(e)
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<RuntimeError> for Error {
    fn from(e: RuntimeError) -> Self {
        Self::Runtime(e)
    }
}

impl From<CommandError> for Error {
    fn from(e: CommandError) -> Self {
        Self::Command(e)
    }
}
