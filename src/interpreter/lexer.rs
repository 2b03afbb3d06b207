use logos::Logos;
use num_bigint::BigInt;

/// Classifies a whole piece of text as a literal or a label.
///
/// The configurable [`crate::interpreter::tokenizer::Tokenizer`] decides where
/// tokens begin and end; this lexer only answers what an already isolated
/// token *is*. Whitespace is not skipped, so any text containing more than one
/// literal fails to classify.
#[derive(Logos, Debug, PartialEq, Clone)]
pub enum Token {
    /// Floating-point literal tokens, such as `3.14`, `.5`, `2.` or `2.1e-10`.
    #[regex(r"[0-9]+\.[0-9]*([eE][+-]?[0-9]+)?", parse_float)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", parse_float)]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+", parse_float)]
    Real(f64),
    /// Integer literal tokens of any length, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    Integer(BigInt),
    /// Label tokens; names of references and functions such as `x` or
    /// `square`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Label(String),
}

/// Parses a floating-point literal from the current token slice.
fn parse_float(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Parses an arbitrary-precision integer literal from the current token slice.
fn parse_integer(lex: &logos::Lexer<Token>) -> Option<BigInt> {
    lex.slice().parse().ok()
}

/// Returns the token spanning all of `text`, if there is exactly one.
///
/// # Example
/// ```
/// use operon::interpreter::lexer::{Token, classify};
///
/// assert_eq!(classify("1.5"), Some(Token::Real(1.5)));
/// assert_eq!(classify("abc_2"), Some(Token::Label("abc_2".to_string())));
/// assert_eq!(classify("2a"), None);
/// assert_eq!(classify("2 3"), None);
/// ```
#[must_use]
pub fn classify(text: &str) -> Option<Token> {
    let mut lexer = Token::lexer(text);
    let token = lexer.next()?.ok()?;
    if lexer.span() != (0..text.len()) || lexer.next().is_some() {
        return None;
    }
    Some(token)
}

/// Tests whether `text` is a valid reference or function name.
#[must_use]
pub fn is_label(text: &str) -> bool {
    matches!(classify(text), Some(Token::Label(_)))
}
