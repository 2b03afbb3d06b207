use crate::error::TokenizerError;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while parsing a line.
pub enum ParseError {
    /// A piece of text is neither a literal, a container, a reference, a call
    /// nor a registered symbol.
    UnrecognizedToken {
        /// The offending text.
        token: String,
    },
    /// A modifier has nothing to apply to, e.g. a post-modifier at the start
    /// of a line.
    ElementExpected {
        /// The modifier symbol missing its operand.
        symbol: String,
    },
    /// A bracket was opened but never closed, or closed but never opened.
    UnbalancedBrackets {
        /// The text containing the unbalanced bracket.
        text: String,
    },
    /// Grouping found two operands with nothing between them.
    OperatorExpected {
        /// Rendered form of the pieces that could not be joined.
        context: String,
    },
    /// An internal tokenizer could not be built.
    Tokenizer(TokenizerError),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnrecognizedToken { token } => write!(f, "Unrecognized token: '{token}'."),
            Self::ElementExpected { symbol } => {
                write!(f, "Element expected next to modifier '{symbol}'.")
            },
            Self::UnbalancedBrackets { text } => write!(f, "Unbalanced brackets in '{text}'."),
            Self::OperatorExpected { context } => {
                write!(f, "Operator expected between elements in '{context}'.")
            },
            Self::Tokenizer(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<TokenizerError> for ParseError {
    fn from(e: TokenizerError) -> Self {
        Self::Tokenizer(e)
    }
}
