/// The `:define`, `:delete`, `:list`, `:print` and `:help` commands.
pub mod command;

use std::{
    collections::HashMap,
    f64::consts::{E, PI},
    io::{self, Write},
    rc::Rc,
};

use crate::{
    ast::{Element, Function, Reference},
    error::Error,
    interpreter::{
        evaluator::function::builtins,
        parser::core::{ParseResult, Parser, Scope},
        symbols::SymbolIndex,
        value::core::{Number, Value, display_value},
    },
};

/// Global references by name.
pub type ReferenceTable = HashMap<String, Rc<Reference>>;
/// Functions by `(name, arity)`.
pub type FunctionTable = HashMap<(String, usize), Rc<Function>>;

/// Name of the previous-answer reference.
pub const ANSWER: &str = "ans";

/// User-tunable behavior of an [`Environment`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Lines starting with this text are commands.
    pub command_prefix: String,
    /// Whether a line starting with an operator continues from `ans`.
    pub starter:        bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self { command_prefix: ":".to_string(),
               starter:        true, }
    }
}

/// What a line produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// An expression was executed; `None` is void.
    Value(Value),
    /// A command answered with text.
    Message(String),
    /// The line was empty.
    Empty,
}

/// The mutable state lines are executed against: references, functions,
/// the grammar, the previous answer and the settings.
///
/// # Example
/// ```
/// use operon::interpreter::{
///     environment::{Environment, Outcome},
///     value::core::Number,
/// };
///
/// let mut env = Environment::new();
///
/// env.run("x = 6").unwrap();
/// assert_eq!(env.run("x 7").unwrap(), Outcome::Value(Some(Number::from(42))));
///
/// // A line starting with an operator continues from the previous answer.
/// assert_eq!(env.run("/ 2").unwrap(), Outcome::Value(Some(Number::from(21))));
/// ```
pub struct Environment {
    index:     SymbolIndex,
    globals:   ReferenceTable,
    functions: FunctionTable,
    answer:    Rc<Reference>,
    settings:  Settings,
    output:    Box<dyn Write>,
}

#[allow(clippy::new_without_default)]
impl Environment {
    /// An environment with the standard grammar, default settings and
    /// standard output as its output sink.
    #[must_use]
    pub fn new() -> Self {
        Self::with_index(SymbolIndex::standard())
    }

    /// An environment with a custom grammar.
    #[must_use]
    pub fn with_index(index: SymbolIndex) -> Self {
        let answer = Reference::constant(ANSWER, Element::void());

        let mut globals = ReferenceTable::new();
        for constant in [Reference::constant("pi", Element::from(Number::from(PI))),
                         Reference::constant("e", Element::from(Number::from(E))),
                         Reference::constant("void", Element::void()),
                         Rc::clone(&answer)]
        {
            globals.insert(constant.name().to_string(), constant);
        }

        let functions = builtins().map(|f| ((f.name().to_string(), f.arity()), f))
                                  .collect();

        Self { index,
               globals,
               functions,
               answer,
               settings: Settings::default(),
               output: Box::new(io::stdout()) }
    }

    /// Replaces the settings.
    #[must_use]
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Replaces the output sink.
    #[must_use]
    pub fn with_output(mut self, output: Box<dyn Write>) -> Self {
        self.output = output;
        self
    }

    /// Runs one line: a command if it starts with the command prefix, an
    /// expression otherwise. A present expression result becomes `ans`.
    ///
    /// # Errors
    /// Any parse, runtime or command error. Side effects made before the
    /// failure are kept.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn run(&mut self, line: &str) -> Result<Outcome, Error> {
        if let Some(command) = line.trim_start().strip_prefix(self.settings.command_prefix.as_str())
           && !self.settings.command_prefix.is_empty()
        {
            return Ok(command::run(self, command)?);
        }

        let Some(element) = self.parse(line)? else {
            return Ok(Outcome::Empty);
        };
        let value = element.execute()?;
        if value.is_some() {
            self.answer.store(Element::Literal(value.clone()));
        }
        tracing::debug!(value = %display_value(&value), "executed");
        Ok(Outcome::Value(value))
    }

    /// Parses a line against the global scope without executing it.
    pub fn parse(&mut self, line: &str) -> ParseResult<Option<Element>> {
        let starter = self.settings.starter.then(|| Rc::clone(&self.answer));
        let scope = Scope { index: &self.index,
                            functions: &self.functions,
                            globals: &mut self.globals,
                            locals: None,
                            starter };
        Parser::new(scope).parse(line)
    }

    /// Writes an outcome to the output sink. Void values and empty lines
    /// write nothing.
    pub fn show(&mut self, outcome: &Outcome) -> io::Result<()> {
        match outcome {
            Outcome::Value(Some(value)) => writeln!(self.output, "{value}"),
            Outcome::Message(message) => writeln!(self.output, "{message}"),
            Outcome::Value(None) | Outcome::Empty => Ok(()),
        }
    }

    /// The grammar.
    #[must_use]
    pub const fn index(&self) -> &SymbolIndex {
        &self.index
    }

    /// The settings.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The settings, for changing them.
    pub const fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Global references.
    #[must_use]
    pub const fn globals(&self) -> &ReferenceTable {
        &self.globals
    }

    /// The functions.
    #[must_use]
    pub const fn functions(&self) -> &FunctionTable {
        &self.functions
    }

    /// A global reference by name.
    #[must_use]
    pub fn reference(&self, name: &str) -> Option<Rc<Reference>> {
        self.globals.get(name).cloned()
    }

    /// A function by name and arity.
    #[must_use]
    pub fn function(&self, name: &str, arity: usize) -> Option<Rc<Function>> {
        self.functions.get(&(name.to_string(), arity)).cloned()
    }

    /// The previous present result.
    #[must_use]
    pub fn answer(&self) -> Value {
        self.answer.definition().literal().cloned().flatten()
    }
}
