/// Printing with the minimal parentheses a grammar needs.
pub mod render;

use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::Rc,
};

use crate::interpreter::{
    symbols::{
        modifier::{Modifier, Orientation},
        operator::Operator,
    },
    value::core::{Number, Value, display_value},
};

/// A node of an expression tree.
///
/// Every element resolves to a numeric-or-absent [`Value`]. Elements are
/// built fresh for every parsed line; only [`Reference`]s are shared between
/// trees and the tables that own them.
#[derive(Debug, Clone)]
pub enum Element {
    /// An immutable value, or `None` for void.
    Literal(Value),
    /// A named cell from a global or parameter table.
    Reference(Rc<Reference>),
    /// A binary operator applied to two operands.
    Operation(Operation),
    /// A unary modifier applied to one operand.
    Modification(Modification),
    /// A function call.
    Execution(Execution),
    /// Explicit parentheses. Transparent to evaluation.
    Container(Box<Self>),
    /// Both branches of a ternary, waiting for a condition to pick one.
    Messenger(Messenger),
}

/// A binary node. A missing operand is the void literal.
#[derive(Debug, Clone)]
pub struct Operation {
    /// The operator.
    pub operator: Rc<Operator>,
    /// Left operand.
    pub left:     Box<Element>,
    /// Right operand.
    pub right:    Box<Element>,
}

/// A unary node.
#[derive(Debug, Clone)]
pub struct Modification {
    /// The modifier, which also knows which side it is written on.
    pub modifier: Rc<Modifier>,
    /// The operand.
    pub operand:  Box<Element>,
}

/// A call of a function with a fixed number of arguments.
#[derive(Debug, Clone)]
pub struct Execution {
    /// The called function.
    pub function:  Rc<Function>,
    /// The arguments, in order.
    pub arguments: Vec<Element>,
}

/// The pair built by `:`.
#[derive(Debug, Clone)]
pub struct Messenger {
    /// Chosen when the condition is 1.
    pub then_branch: Box<Element>,
    /// Chosen when the condition is 0.
    pub else_branch: Box<Element>,
}

/// Whether a reference may be redefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// Assignable.
    Variable,
    /// Fixed definition.
    Constant,
}

/// A named cell holding an element as its definition.
///
/// Executing a reference executes its definition, so a reference bound with
/// `:=` re-evaluates the stored expression every time it is read.
pub struct Reference {
    name:             String,
    kind:             ReferenceKind,
    definition:       RefCell<Element>,
    pub(crate) depth: Cell<usize>,
}

impl Reference {
    /// A variable initialized to void.
    ///
    /// # Example
    /// ```
    /// use operon::ast::Reference;
    ///
    /// let x = Reference::variable("x");
    /// assert_eq!(x.name(), "x");
    /// assert_eq!(x.definition().execute().unwrap(), None);
    /// ```
    #[must_use]
    pub fn variable(name: impl Into<String>) -> Rc<Self> {
        Rc::new(Self { name:       name.into(),
                       kind:       ReferenceKind::Variable,
                       definition: RefCell::new(Element::void()),
                       depth:      Cell::new(0), })
    }

    /// A constant bound to `definition`.
    #[must_use]
    pub fn constant(name: impl Into<String>, definition: Element) -> Rc<Self> {
        Rc::new(Self { name:       name.into(),
                       kind:       ReferenceKind::Constant,
                       definition: RefCell::new(definition),
                       depth:      Cell::new(0), })
    }

    /// The name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Variable or constant.
    #[must_use]
    pub const fn kind(&self) -> ReferenceKind {
        self.kind
    }

    /// A copy of the current definition.
    #[must_use]
    pub fn definition(&self) -> Element {
        self.definition.borrow().clone()
    }

    /// Replaces the definition; returns the previous one.
    ///
    /// Ignores constness. Used for the previous-answer cell and for binding
    /// parameters during calls.
    pub(crate) fn store(&self, definition: Element) -> Element {
        self.definition.replace(definition)
    }
}

impl fmt::Debug for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reference")
         .field("name", &self.name)
         .field("kind", &self.kind)
         .finish_non_exhaustive()
    }
}

/// Native routine behind a builtin function.
pub type BuiltinFn = fn(&[Value]) -> crate::interpreter::evaluator::core::EvalResult<Value>;

/// What runs when a function is called.
pub enum FunctionKind {
    /// Defined in the language.
    User {
        /// Parameter cells, bound to the argument values for each call.
        parameters: Vec<Rc<Reference>>,
        /// The body. Filled in after the function is registered so that the
        /// body may call the function itself.
        body:       RefCell<Element>,
    },
    /// Implemented natively.
    Builtin {
        /// Number of arguments.
        arity:   usize,
        /// The routine.
        routine: BuiltinFn,
    },
}

/// A named function. Identity is the pair (name, arity).
pub struct Function {
    name:            String,
    kind:            FunctionKind,
    pub(crate) depth: Cell<usize>,
}

impl Function {
    /// A user function with a void body.
    #[must_use]
    pub fn user(name: impl Into<String>, parameters: Vec<Rc<Reference>>) -> Rc<Self> {
        Rc::new(Self { name:  name.into(),
                       kind:  FunctionKind::User { parameters,
                                                   body: RefCell::new(Element::void()) },
                       depth: Cell::new(0), })
    }

    /// A builtin function.
    #[must_use]
    pub fn builtin(name: impl Into<String>, arity: usize, routine: BuiltinFn) -> Rc<Self> {
        Rc::new(Self { name:  name.into(),
                       kind:  FunctionKind::Builtin { arity, routine },
                       depth: Cell::new(0), })
    }

    /// The name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of arguments.
    #[must_use]
    pub fn arity(&self) -> usize {
        match &self.kind {
            FunctionKind::User { parameters, .. } => parameters.len(),
            FunctionKind::Builtin { arity, .. } => *arity,
        }
    }

    /// User or builtin.
    #[must_use]
    pub const fn kind(&self) -> &FunctionKind {
        &self.kind
    }

    /// Whether the function is implemented natively.
    #[must_use]
    pub const fn is_builtin(&self) -> bool {
        matches!(self.kind, FunctionKind::Builtin { .. })
    }

    /// Parameter cells of a user function; empty for builtins.
    #[must_use]
    pub fn parameters(&self) -> &[Rc<Reference>] {
        match &self.kind {
            FunctionKind::User { parameters, .. } => parameters,
            FunctionKind::Builtin { .. } => &[],
        }
    }

    /// Installs the body of a user function. Builtins are left untouched.
    pub fn set_body(&self, element: Element) {
        if let FunctionKind::User { body, .. } = &self.kind {
            body.replace(element);
        }
    }

    /// A copy of the body of a user function.
    #[must_use]
    pub fn body(&self) -> Option<Element> {
        match &self.kind {
            FunctionKind::User { body, .. } => Some(body.borrow().clone()),
            FunctionKind::Builtin { .. } => None,
        }
    }

    /// `name(p1, p2)` for user functions, `name/arity` for builtins.
    #[must_use]
    pub fn signature(&self) -> String {
        match &self.kind {
            FunctionKind::User { parameters, .. } => {
                let names = parameters.iter().map(|p| p.name()).collect::<Vec<_>>();
                format!("{}({})", self.name, names.join(", "))
            },
            FunctionKind::Builtin { arity, .. } => format!("{}/{arity}", self.name),
        }
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
         .field("name", &self.name)
         .field("arity", &self.arity())
         .finish_non_exhaustive()
    }
}

impl From<Number> for Element {
    fn from(value: Number) -> Self {
        Self::Literal(Some(value))
    }
}

impl From<Value> for Element {
    fn from(value: Value) -> Self {
        Self::Literal(value)
    }
}

impl Element {
    /// The void literal.
    #[must_use]
    pub const fn void() -> Self {
        Self::Literal(None)
    }

    /// Builds an operation node.
    #[must_use]
    pub fn operation(operator: Rc<Operator>, left: Self, right: Self) -> Self {
        Self::Operation(Operation { operator,
                                    left: Box::new(left),
                                    right: Box::new(right) })
    }

    /// Builds a modification node.
    #[must_use]
    pub fn modification(modifier: Rc<Modifier>, operand: Self) -> Self {
        Self::Modification(Modification { modifier,
                                          operand: Box::new(operand) })
    }

    /// Builds a call node.
    #[must_use]
    pub const fn execution(function: Rc<Function>, arguments: Vec<Self>) -> Self {
        Self::Execution(Execution { function,
                                    arguments })
    }

    /// Wraps an element in parentheses.
    #[must_use]
    pub fn container(inner: Self) -> Self {
        Self::Container(Box::new(inner))
    }

    /// Builds a messenger from two branches.
    #[must_use]
    pub fn messenger(then_branch: Self, else_branch: Self) -> Self {
        Self::Messenger(Messenger { then_branch: Box::new(then_branch),
                                    else_branch: Box::new(else_branch), })
    }

    /// The value of a literal, looking through parentheses.
    #[must_use]
    pub fn literal(&self) -> Option<&Value> {
        match self {
            Self::Literal(value) => Some(value),
            Self::Container(inner) => inner.literal(),
            _ => None,
        }
    }

    /// Whether the element is a void literal.
    #[must_use]
    pub fn is_void(&self) -> bool {
        matches!(self, Self::Literal(None))
    }
}

/// Fully parenthesized form; every operation and modification gets its own
/// pair of parentheses. See [`Element::render`] for the minimal form.
impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(Some(number)) if number.is_compound_text() => write!(f, "({number})"),
            Self::Literal(value) => write!(f, "{}", display_value(value)),
            Self::Reference(reference) => write!(f, "{}", reference.name()),
            Self::Operation(Operation { operator, left, right }) => {
                write!(f, "({left} {} {right})", operator.symbol())
            },
            Self::Modification(Modification { modifier, operand }) => {
                match modifier.orientation() {
                    Orientation::Pre => write!(f, "({}{operand})", modifier.symbol()),
                    Orientation::Post => write!(f, "({operand}{})", modifier.symbol()),
                }
            },
            Self::Execution(Execution { function, arguments }) => {
                let arguments = arguments.iter().map(ToString::to_string).collect::<Vec<_>>();
                write!(f, "{}({})", function.name(), arguments.join(", "))
            },
            Self::Container(inner) => write!(f, "({inner})"),
            Self::Messenger(Messenger { then_branch,
                                        else_branch, }) => {
                write!(f, "({then_branch} : {else_branch})")
            },
        }
    }
}
