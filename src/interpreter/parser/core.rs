use std::rc::Rc;

use crate::{
    ast::{Element, Reference},
    error::ParseError,
    interpreter::{
        environment::{FunctionTable, ReferenceTable},
        parser::items::{Item, Items},
        symbols::SymbolIndex,
        tokenizer::{Tokenizer, TokenizerConfig},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Everything a parse may read or extend.
///
/// The global table is mutable because unknown labels are created as
/// variables the first time they are mentioned. They are added to it only
/// when the whole parse succeeds.
pub struct Scope<'a> {
    /// The grammar.
    pub index:     &'a SymbolIndex,
    /// Functions callable by `(name, arity)`.
    pub functions: &'a FunctionTable,
    /// Global references.
    pub globals:   &'a mut ReferenceTable,
    /// Parameters of the function whose body is being parsed. Consulted
    /// before the globals.
    pub locals:    Option<&'a ReferenceTable>,
    /// Spliced in front of a line starting with an operator (`* 2` is
    /// `ans * 2`).
    pub starter:   Option<Rc<Reference>>,
}

/// The three tokenizers used by the first stages.
pub(crate) struct Tokenizers {
    /// Splits on whitespace outside brackets.
    pub whitespace: Tokenizer,
    /// Splits around every registered symbol outside brackets.
    pub symbols:    Tokenizer,
    /// Splits before each depth-zero `(` and after its matching `)`.
    pub brackets:   Tokenizer,
}

impl Tokenizers {
    fn new(index: &SymbolIndex) -> ParseResult<Self> {
        let brackets = || TokenizerConfig { open_brackets: vec!["(".to_string()],
                                            close_brackets: vec![")".to_string()],
                                            trim_whitespace: true,
                                            ..TokenizerConfig::default() };

        Ok(Self { whitespace: Tokenizer::new(TokenizerConfig { break_on_whitespace: true,
                                                               ..brackets() })?,
                  symbols:    Tokenizer::new(TokenizerConfig { separators: index.symbols()
                                                                                .into_iter()
                                                                                .map(String::from)
                                                                                .collect(),
                                                               ..brackets() })?,
                  brackets:   Tokenizer::new(TokenizerConfig { pre_breaks: vec!["(".to_string()],
                                                               post_breaks: vec![")".to_string()],
                                                               ..brackets() })?, })
    }
}

/// Turns one line of text into an element tree.
///
/// The line goes through six stages:
/// 1. whitespace tokenization, with each token tried as a base element;
/// 2. splitting unresolved tokens around registered symbols;
/// 3. splitting what is left around brackets and linearizing everything into
///    one item sequence;
/// 4. committing every symbol to one role and inserting implicit operators;
/// 5. grouping by precedence, loosest tier first;
/// 6. building the element tree.
///
/// # Example
/// ```
/// use std::collections::HashMap;
///
/// use operon::interpreter::{
///     parser::core::{Parser, Scope},
///     symbols::SymbolIndex,
///     value::core::Number,
/// };
///
/// let index = SymbolIndex::standard();
/// let functions = HashMap::new();
/// let mut globals = HashMap::new();
///
/// let scope = Scope { index:     &index,
///                     functions: &functions,
///                     globals:   &mut globals,
///                     locals:    None,
///                     starter:   None, };
/// let element = Parser::new(scope).parse("2 + 3 * 4").unwrap().unwrap();
///
/// assert_eq!(element.execute().unwrap(), Some(Number::from(14)));
/// assert_eq!(element.to_string(), "(2 + (3 * 4))");
/// ```
pub struct Parser<'a> {
    pub(crate) scope:   Scope<'a>,
    /// Variables first mentioned by the current parse.
    pub(crate) created: ReferenceTable,
}

impl<'a> Parser<'a> {
    #[must_use]
    pub fn new(scope: Scope<'a>) -> Self {
        Self { scope,
               created: ReferenceTable::new() }
    }

    /// Parses a line. An empty line gives `Ok(None)`.
    ///
    /// # Errors
    /// - [`ParseError::UnbalancedBrackets`] for unpaired parentheses.
    /// - [`ParseError::UnrecognizedToken`] for text that is neither a symbol
    ///   nor a base element.
    /// - [`ParseError::ElementExpected`] for a modifier without an operand.
    ///
    /// A failed parse leaves the global table untouched.
    pub fn parse(&mut self, line: &str) -> ParseResult<Option<Element>> {
        self.created.clear();
        check_brackets(line)?;
        let tokenizers = Tokenizers::new(self.scope.index)?;
        let element = match self.parse_text(&tokenizers, line, true) {
            Ok(element) => element,
            Err(err) => {
                self.created.clear();
                return Err(err);
            },
        };

        for (name, reference) in self.created.drain() {
            tracing::debug!(%name, "created variable");
            self.scope.globals.insert(name, reference);
        }
        if let Some(element) = &element {
            tracing::debug!(%element, "parsed");
        }
        Ok(element)
    }

    /// Runs the pipeline on `text`. The starter is only used at the top
    /// level.
    pub(crate) fn parse_text(&mut self,
                             tokenizers: &Tokenizers,
                             text: &str,
                             top_level: bool)
                             -> ParseResult<Option<Element>> {
        let tokens = tokenizers.whitespace.tokenize(text);
        tracing::trace!(?tokens, "whitespace tokens");

        let mut resolved = Vec::with_capacity(tokens.len());
        for token in &tokens {
            resolved.push(self.base_element(tokenizers, token)?);
        }

        match resolved.as_mut_slice() {
            [] => return Ok(None),
            [single @ Some(_)] => return Ok(single.take()),
            _ => {},
        }

        let mut items = Items::default();
        for (token, element) in tokens.iter().zip(resolved) {
            match element {
                Some(element) => {
                    items.push_back(Item::Element(element));
                },
                None => self.split_symbols(tokenizers, token, &mut items)?,
            }
        }

        let starter = if top_level && !text.starts_with(char::is_whitespace) {
            self.scope.starter.clone()
        } else {
            None
        };
        self.commit(&mut items, starter)?;

        let group = self.group(&items, &items.ids())?;
        self.build(&mut items, group).map(Some)
    }

    /// Stage 2: splits a token around registered symbols.
    fn split_symbols(&mut self,
                     tokenizers: &Tokenizers,
                     token: &str,
                     items: &mut Items)
                     -> ParseResult<()> {
        for piece in tokenizers.symbols.tokenize(token) {
            if let Some(roles) = self.scope.index.roles(&piece) {
                items.push_back(Item::Symbol { text:  piece.clone(),
                                               roles: roles.clone(), });
            } else if let Some(element) = self.base_element(tokenizers, &piece)? {
                items.push_back(Item::Element(element));
            } else {
                self.split_brackets(tokenizers, &piece, items)?;
            }
        }
        Ok(())
    }

    /// Stage 3: splits a piece around depth-zero brackets.
    fn split_brackets(&mut self,
                      tokenizers: &Tokenizers,
                      piece: &str,
                      items: &mut Items)
                      -> ParseResult<()> {
        for part in tokenizers.brackets.tokenize(piece) {
            let element = self.base_element(tokenizers, &part)?
                              .ok_or_else(|| ParseError::UnrecognizedToken { token: part.clone() })?;
            items.push_back(Item::Element(element));
        }
        Ok(())
    }
}

/// Fails unless every `(` has a matching `)`.
fn check_brackets(text: &str) -> ParseResult<()> {
    let mut depth = 0usize;
    for c in text.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth.checked_sub(1)
                             .ok_or_else(|| ParseError::UnbalancedBrackets { text: text.to_string() })?;
            },
            _ => {},
        }
    }
    if depth == 0 {
        Ok(())
    } else {
        Err(ParseError::UnbalancedBrackets { text: text.to_string() })
    }
}
