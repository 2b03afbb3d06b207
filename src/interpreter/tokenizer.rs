/// Greedy longest-match symbol recognition.
///
/// A single automaton over every configured symbol, fed one character at a
/// time.
pub mod symbol_finder;

use crate::{error::TokenizerError, interpreter::tokenizer::symbol_finder::SymbolFinder};

/// Describes how a [`Tokenizer`] splits text.
///
/// Every field is a set of symbols; a symbol may appear in several sets (an
/// open bracket that is also a pre-break, for example).
#[derive(Debug, Clone, Default)]
pub struct TokenizerConfig {
    /// Symbols that end the current token and are emitted on their own.
    pub separators:          Vec<String>,
    /// Symbols that end the current token and are dropped.
    pub delimiters:          Vec<String>,
    /// Opening brackets; paired by position with `close_brackets`.
    pub open_brackets:       Vec<String>,
    /// Closing brackets; paired by position with `open_brackets`.
    pub close_brackets:      Vec<String>,
    /// Symbols that open and close a quoted span.
    pub quotes:              Vec<String>,
    /// Symbols that start a new token.
    pub pre_breaks:          Vec<String>,
    /// Symbols that end the current token, staying part of it.
    pub post_breaks:         Vec<String>,
    /// Trim whitespace around each emitted token.
    pub trim_whitespace:     bool,
    /// Treat whitespace as a break outside brackets and quotes.
    pub break_on_whitespace: bool,
    /// Keep tokens that end up empty.
    pub include_empty:       bool,
}

/// Everything one symbol text was configured as.
#[derive(Debug, Clone, Copy, Default)]
struct SymbolKinds {
    separator:  bool,
    delimiter:  bool,
    open:       Option<usize>,
    close:      Option<usize>,
    quote:      bool,
    pre_break:  bool,
    post_break: bool,
}

/// Splits text into tokens according to a [`TokenizerConfig`].
///
/// Symbols only split while every bracket pair is balanced and no quote is
/// open; inside brackets or quotes they are plain text.
///
/// # Example
/// ```
/// use operon::interpreter::tokenizer::{Tokenizer, TokenizerConfig};
///
/// let config = TokenizerConfig { separators: vec!["+".into(), "++".into()],
///                                open_brackets: vec!["(".into()],
///                                close_brackets: vec![")".into()],
///                                trim_whitespace: true,
///                                ..TokenizerConfig::default() };
/// let tokenizer = Tokenizer::new(config).unwrap();
///
/// assert_eq!(tokenizer.tokenize("a++ + (b+c)"),
///            vec!["a", "++", "+", "(b+c)"]);
/// ```
#[derive(Debug, Clone)]
pub struct Tokenizer {
    config: TokenizerConfig,
    finder: SymbolFinder,
    kinds:  Vec<SymbolKinds>,
}

/// Mutable state of one tokenization run.
struct Scan<'c> {
    config:   &'c TokenizerConfig,
    tokens:   Vec<String>,
    current:  String,
    depths:   Vec<usize>,
    in_quote: bool,
}

impl Tokenizer {
    /// Builds a tokenizer.
    ///
    /// # Errors
    /// Returns [`TokenizerError::MismatchedBrackets`] when the open and close
    /// bracket sets differ in length.
    pub fn new(config: TokenizerConfig) -> Result<Self, TokenizerError> {
        if config.open_brackets.len() != config.close_brackets.len() {
            return Err(TokenizerError::MismatchedBrackets { open:  config.open_brackets.len(),
                                                            close: config.close_brackets.len(), });
        }

        let all = config.separators
                        .iter()
                        .chain(&config.delimiters)
                        .chain(&config.open_brackets)
                        .chain(&config.close_brackets)
                        .chain(&config.quotes)
                        .chain(&config.pre_breaks)
                        .chain(&config.post_breaks);
        let finder = SymbolFinder::new(all);

        let mut kinds = vec![SymbolKinds::default(); finder.symbols().len()];
        for (id, symbol) in finder.symbols().iter().enumerate() {
            let has = |set: &[String]| set.iter().any(|s| s == symbol);
            let position = |set: &[String]| set.iter().position(|s| s == symbol);
            kinds[id] = SymbolKinds { separator:  has(&config.separators),
                                      delimiter:  has(&config.delimiters),
                                      open:       position(&config.open_brackets),
                                      close:      position(&config.close_brackets),
                                      quote:      has(&config.quotes),
                                      pre_break:  has(&config.pre_breaks),
                                      post_break: has(&config.post_breaks), };
        }

        Ok(Self { config,
                  finder,
                  kinds })
    }

    /// Returns the configuration this tokenizer was built from.
    #[must_use]
    pub const fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    /// Splits `text` into tokens.
    #[must_use]
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let mut scan = Scan { config:   &self.config,
                              tokens:   Vec::new(),
                              current:  String::new(),
                              depths:   vec![0; self.config.open_brackets.len()],
                              in_quote: false, };

        let mut position = 0;
        while position < text.len() {
            let rest = &text[position..];
            if let Some((length, id)) = self.finder.longest_match(rest) {
                scan.symbol(&rest[..length], self.kinds[id]);
                position += length;
                continue;
            }

            let Some(c) = rest.chars().next() else {
                break;
            };
            if c.is_whitespace() && self.config.break_on_whitespace && scan.is_free() {
                scan.close();
                scan.finish(c.to_string());
            } else {
                scan.current.push(c);
            }
            position += c.len_utf8();
        }
        scan.close();
        scan.tokens
    }
}

impl Scan<'_> {
    /// No bracket is open and no quote is open.
    fn is_free(&self) -> bool {
        !self.in_quote && self.depths.iter().all(|d| *d == 0)
    }

    /// Filters a finished token through trimming and empty-token rules.
    fn finish(&mut self, token: String) {
        let token = if self.config.trim_whitespace {
            token.trim().to_string()
        } else {
            token
        };
        if !token.is_empty() || self.config.include_empty {
            self.tokens.push(token);
        }
    }

    /// Ends the current token.
    fn close(&mut self) {
        let token = std::mem::take(&mut self.current);
        self.finish(token);
    }

    fn symbol(&mut self, text: &str, kinds: SymbolKinds) {
        if kinds.quote {
            self.in_quote = !self.in_quote;
            self.current.push_str(text);
            return;
        }
        if !self.in_quote {
            if let Some(pair) = kinds.open {
                if self.is_free() && kinds.pre_break {
                    self.close();
                }
                self.depths[pair] += 1;
                self.current.push_str(text);
                return;
            }
            if let Some(pair) = kinds.close {
                self.depths[pair] = self.depths[pair].saturating_sub(1);
                self.current.push_str(text);
                if self.is_free() && kinds.post_break {
                    self.close();
                }
                return;
            }
        }
        if !self.is_free() {
            self.current.push_str(text);
        } else if kinds.separator {
            self.close();
            self.tokens.push(text.to_string());
        } else if kinds.delimiter {
            self.close();
        } else if kinds.pre_break {
            self.close();
            self.current.push_str(text);
        } else if kinds.post_break {
            self.current.push_str(text);
            self.close();
        } else {
            self.current.push_str(text);
        }
    }
}
