use std::rc::Rc;

use crate::{
    ast::{Element, Reference},
    interpreter::{
        lexer::{Token, classify},
        parser::core::{ParseResult, Parser, Tokenizers},
        value::core::Number,
    },
};

impl Parser<'_> {
    /// Tries `text` as a literal, a container, a reference and a call, in
    /// that order.
    ///
    /// `Ok(None)` means the text is none of these. Errors come from parsing
    /// the inside of a container or the arguments of a call.
    pub(crate) fn base_element(&mut self,
                               tokenizers: &Tokenizers,
                               text: &str)
                               -> ParseResult<Option<Element>> {
        if text.is_empty() {
            return Ok(None);
        }
        if let Some(literal) = literal(text) {
            return Ok(Some(literal));
        }
        if let Some(inner) = enclosed(text) {
            let inner = self.parse_text(tokenizers, inner, false)?.unwrap_or_else(Element::void);
            return Ok(Some(Element::container(inner)));
        }
        if let Some(reference) = self.reference(text) {
            return Ok(Some(Element::Reference(reference)));
        }
        self.call(tokenizers, text)
    }

    /// Looks a label up in the local, then the global table, creating a
    /// variable if it is unknown. New variables reach the globals once the
    /// parse succeeds.
    fn reference(&mut self, text: &str) -> Option<Rc<Reference>> {
        if !matches!(classify(text), Some(Token::Label(_))) || self.scope.index.is_symbol(text) {
            return None;
        }
        if let Some(local) = self.scope.locals.and_then(|locals| locals.get(text)) {
            return Some(Rc::clone(local));
        }
        if let Some(global) = self.scope.globals.get(text) {
            return Some(Rc::clone(global));
        }
        let reference = self.created
                            .entry(text.to_string())
                            .or_insert_with(|| Reference::variable(text));
        Some(Rc::clone(reference))
    }

    /// `name(a, b, ...)` where `(name, arity)` is a known function.
    fn call(&mut self, tokenizers: &Tokenizers, text: &str) -> ParseResult<Option<Element>> {
        let Some(open) = text.find('(') else {
            return Ok(None);
        };
        let (name, rest) = text.split_at(open);
        let Some(inner) = enclosed(rest) else {
            return Ok(None);
        };
        if !matches!(classify(name), Some(Token::Label(_))) {
            return Ok(None);
        }

        let texts = arguments(inner);
        let Some(function) = self.scope.functions.get(&(name.to_string(), texts.len())) else {
            return Ok(None);
        };
        let function = Rc::clone(function);

        let mut arguments = Vec::with_capacity(texts.len());
        for argument in texts {
            arguments.push(self.parse_text(tokenizers, argument, false)?
                               .unwrap_or_else(Element::void));
        }
        Ok(Some(Element::execution(function, arguments)))
    }
}

/// A numeric literal.
fn literal(text: &str) -> Option<Element> {
    match classify(text)? {
        Token::Integer(n) => Some(Element::from(Number::from(n))),
        Token::Real(x) => Some(Element::from(Number::from(x))),
        Token::Label(_) => None,
    }
}

/// The text between an opening `(` at the start and its matching `)` at the
/// very end.
fn enclosed(text: &str) -> Option<&str> {
    let inner = text.strip_prefix('(')?.strip_suffix(')')?;
    let mut depth = 0usize;
    for c in inner.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.checked_sub(1)?,
            _ => {},
        }
    }
    (depth == 0).then_some(inner)
}

/// Splits call arguments on depth-zero commas. `()` has no arguments.
fn arguments(inner: &str) -> Vec<&str> {
    if inner.trim().is_empty() {
        return Vec::new();
    }
    let mut arguments = Vec::new();
    let (mut depth, mut start) = (0usize, 0);
    for (i, c) in inner.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                arguments.push(inner[start..i].trim());
                start = i + 1;
            },
            _ => {},
        }
    }
    arguments.push(inner[start..].trim());
    arguments
}
