use std::collections::HashMap;

/// One state of the shared automaton.
#[derive(Debug, Default, Clone)]
struct Node {
    children: HashMap<char, usize>,
    /// Index of the symbol ending in this state, if any.
    symbol:   Option<usize>,
}

/// Greedy longest-match recognizer over a fixed set of symbols.
///
/// All symbols share one trie-shaped automaton. Text is fed one character at
/// a time; the automaton remembers the longest symbol seen so far and stops as
/// soon as no registered symbol can still match.
///
/// # Example
/// ```
/// use operon::interpreter::tokenizer::symbol_finder::SymbolFinder;
///
/// let finder = SymbolFinder::new(["+", "++", "+="]);
/// let (len, id) = finder.longest_match("++a").unwrap();
/// assert_eq!((len, finder.symbol(id)), (2, "++"));
/// assert!(finder.longest_match("a+").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct SymbolFinder {
    nodes:   Vec<Node>,
    symbols: Vec<String>,
}

/// Incremental matching state over a [`SymbolFinder`].
#[derive(Debug, Clone)]
pub struct Matcher<'a> {
    finder:   &'a SymbolFinder,
    state:    Option<usize>,
    consumed: usize,
    best:     Option<(usize, usize)>,
}

impl SymbolFinder {
    /// Builds the automaton. Duplicate and empty symbols are ignored.
    pub fn new<I, S>(symbols: I) -> Self
        where I: IntoIterator<Item = S>,
              S: AsRef<str>
    {
        let mut finder = Self { nodes:   vec![Node::default()],
                                symbols: Vec::new(), };
        for symbol in symbols {
            finder.insert(symbol.as_ref());
        }
        finder
    }

    fn insert(&mut self, symbol: &str) {
        if symbol.is_empty() {
            return;
        }
        let mut state = 0;
        for c in symbol.chars() {
            state = if let Some(&next) = self.nodes[state].children.get(&c) {
                next
            } else {
                self.nodes.push(Node::default());
                let next = self.nodes.len() - 1;
                self.nodes[state].children.insert(c, next);
                next
            };
        }
        if self.nodes[state].symbol.is_none() {
            self.nodes[state].symbol = Some(self.symbols.len());
            self.symbols.push(symbol.to_string());
        }
    }

    /// Returns the text of the symbol with the given id.
    #[must_use]
    pub fn symbol(&self, id: usize) -> &str {
        &self.symbols[id]
    }

    /// Returns every registered symbol, in registration order.
    #[must_use]
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Starts a fresh match.
    #[must_use]
    pub const fn matcher(&self) -> Matcher<'_> {
        Matcher { finder:   self,
                  state:    Some(0),
                  consumed: 0,
                  best:     None, }
    }

    /// Finds the longest symbol that `text` starts with.
    ///
    /// # Returns
    /// `Some((byte_length, symbol_id))` for the longest match, or `None` when
    /// `text` starts with no symbol.
    #[must_use]
    pub fn longest_match(&self, text: &str) -> Option<(usize, usize)> {
        let mut matcher = self.matcher();
        for c in text.chars() {
            if !matcher.feed(c) {
                break;
            }
        }
        matcher.best()
    }
}

impl Matcher<'_> {
    /// Feeds the next character.
    ///
    /// Returns `false` once no symbol can match any longer; further input is
    /// ignored until [`Matcher::reset`].
    pub fn feed(&mut self, c: char) -> bool {
        let Some(state) = self.state else {
            return false;
        };
        match self.finder.nodes[state].children.get(&c) {
            Some(&next) => {
                self.consumed += c.len_utf8();
                self.state = Some(next);
                if let Some(symbol) = self.finder.nodes[next].symbol {
                    self.best = Some((self.consumed, symbol));
                }
                !self.finder.nodes[next].children.is_empty()
            },
            None => {
                self.state = None;
                false
            },
        }
    }

    /// The longest complete symbol seen so far, as `(byte_length, id)`.
    #[must_use]
    pub const fn best(&self) -> Option<(usize, usize)> {
        self.best
    }

    /// Forgets all input and starts over.
    pub const fn reset(&mut self) {
        self.state = Some(0);
        self.consumed = 0;
        self.best = None;
    }
}
