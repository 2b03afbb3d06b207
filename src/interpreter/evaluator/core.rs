use crate::{
    ast::{Element, Execution, Modification, Operation, Reference, ReferenceKind},
    error::RuntimeError,
    interpreter::{
        symbols::operator::OperandMode,
        value::core::{Value, display_value},
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// An operand as handed to an operator or modifier rule.
///
/// What a rule receives depends on its [`OperandMode`] and on whether it is
/// applied through [`Element::pass`] or [`Element::calc`].
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a> {
    /// Already executed.
    Value(&'a Value),
    /// Not executed yet; the rule may execute it.
    Element(&'a Element),
    /// Taken as it is. Literals provide their value, anything else counts as
    /// void, and nothing is executed.
    Held(&'a Element),
}

impl<'a> Operand<'a> {
    /// The operand's value, executing it if the rule was handed an element.
    pub fn value(&self) -> EvalResult<Value> {
        match self {
            Self::Value(value) => Ok((*value).clone()),
            Self::Element(element) => element.execute(),
            Self::Held(element) => Ok(element.literal().cloned().flatten()),
        }
    }

    /// The operand as an element. Executed operands become literals.
    #[must_use]
    pub fn to_element(&self) -> Element {
        match self {
            Self::Value(value) => Element::Literal((*value).clone()),
            Self::Element(element) | Self::Held(element) => (*element).clone(),
        }
    }

    /// One evaluation step of the operand. Held operands only take the step
    /// when it is free of side effects.
    pub fn pass(&self) -> EvalResult<Element> {
        match self {
            Self::Value(value) => Ok(Element::Literal((*value).clone())),
            Self::Element(element) => element.pass(),
            Self::Held(element) if element.dont_execute() => element.pass(),
            Self::Held(element) => Ok((*element).clone()),
        }
    }

    /// Whether passing the operand has no side effects.
    #[must_use]
    pub fn dont_execute(&self) -> bool {
        match self {
            Self::Value(_) => true,
            Self::Element(element) | Self::Held(element) => element.dont_execute(),
        }
    }

    /// The operand as the target of a mutation.
    ///
    /// # Errors
    /// [`RuntimeError::NotRedefinable`] unless the operand is a variable,
    /// possibly in parentheses.
    pub fn as_target(&self) -> EvalResult<&'a Element> {
        match *self {
            Self::Element(element) | Self::Held(element) if element.is_assignable() => Ok(element),
            Self::Element(element) | Self::Held(element) => {
                Err(RuntimeError::NotRedefinable { name: element.to_string() })
            },
            Self::Value(value) => Err(RuntimeError::NotRedefinable { name: display_value(value) }),
        }
    }
}

/// Deepest nesting of reads of one variable, as in `a := a + 1`, before
/// [`RuntimeError::RecursionLimit`] is raised.
pub const MAX_READ_DEPTH: usize = 128;

/// Marks a variable as being read until dropped.
struct ReadGuard<'a>(&'a Reference);

impl<'a> ReadGuard<'a> {
    fn enter(reference: &'a Reference) -> EvalResult<Self> {
        let depth = reference.depth.get();
        if depth >= MAX_READ_DEPTH {
            return Err(RuntimeError::RecursionLimit { name: reference.name().to_string() });
        }
        reference.depth.set(depth + 1);
        Ok(Self(reference))
    }
}

impl Drop for ReadGuard<'_> {
    fn drop(&mut self) {
        self.0.depth.set(self.0.depth.get().saturating_sub(1));
    }
}

/// Prepares one operand for a rule with the given mode.
fn prepare<'a>(element: &'a Element, execute: bool, slot: &'a mut Value) -> EvalResult<Operand<'a>> {
    if execute {
        *slot = element.execute()?;
        Ok(Operand::Value(slot))
    } else {
        Ok(Operand::Element(element))
    }
}

impl Element {
    /// Fully resolves the element to a value, performing every mutation on
    /// the way.
    ///
    /// A `:=` binding performs its step and yields void.
    ///
    /// # Errors
    /// Any [`RuntimeError`] raised by a rule or a call,
    /// [`RuntimeError::MisplacedMessenger`] when the result is an unpaired
    /// `a : b`, and [`RuntimeError::RecursionLimit`] when a variable's
    /// definition reads the variable more than [`MAX_READ_DEPTH`] times.
    ///
    /// # Example
    /// ```
    /// use operon::{ast::Element, interpreter::value::core::Number};
    ///
    /// let seven = Element::container(Element::from(Number::from(7)));
    /// assert_eq!(seven.execute().unwrap(), Some(Number::from(7)));
    /// assert_eq!(Element::void().execute().unwrap(), None);
    /// ```
    pub fn execute(&self) -> EvalResult<Value> {
        match self {
            Self::Literal(value) => Ok(value.clone()),
            Self::Reference(reference) => {
                let _guard = ReadGuard::enter(reference)?;
                reference.definition().execute()
            },
            Self::Container(inner) => inner.execute(),
            Self::Messenger(_) => Err(RuntimeError::MisplacedMessenger),
            Self::Operation(Operation { operator, .. }) if operator.binds() => {
                self.pass()?;
                Ok(None)
            },
            Self::Operation(_) | Self::Modification(_) | Self::Execution(_) => {
                self.pass()?.execute()
            },
        }
    }

    /// Takes one evaluation step.
    ///
    /// A reference yields its definition. An operation or modification
    /// prepares its operands as its rule's [`OperandMode`] asks (executing
    /// the left operand before the right) and applies the rule once. The
    /// result may itself need executing, like the branch picked by `?`.
    pub fn pass(&self) -> EvalResult<Self> {
        match self {
            Self::Literal(_) | Self::Messenger(_) => Ok(self.clone()),
            Self::Reference(reference) => Ok(reference.definition()),
            Self::Container(inner) => inner.pass(),
            Self::Operation(Operation { operator,
                                        left,
                                        right, }) => {
                let mode = operator.rule().mode();
                let (mut left_value, mut right_value) = (None, None);
                let left = prepare(left,
                                   matches!(mode, OperandMode::Eager | OperandMode::Lazy),
                                   &mut left_value)?;
                let right = prepare(right,
                                    matches!(mode, OperandMode::Eager | OperandMode::Assign),
                                    &mut right_value)?;
                operator.calc(left, right)
            },
            Self::Modification(Modification { modifier, operand }) => {
                let mut value = None;
                let operand = prepare(operand,
                                      matches!(modifier.rule().mode(), OperandMode::Eager),
                                      &mut value)?;
                modifier.calc(operand)
            },
            Self::Execution(Execution { function, arguments }) => {
                let values = arguments.iter().map(Self::execute).collect::<EvalResult<Vec<_>>>()?;
                Ok(Self::Literal(function.call(&values)?))
            },
        }
    }

    /// Applies the element's own rule once to its operands as they are.
    ///
    /// Literal operands provide their value; any other operand counts as
    /// void. No operand is executed.
    ///
    /// # Example
    /// ```
    /// use operon::{
    ///     ast::{Element, Reference},
    ///     interpreter::{symbols::SymbolIndex, value::core::Number},
    /// };
    /// use std::rc::Rc;
    ///
    /// let index = SymbolIndex::standard();
    /// let plus = Rc::clone(&index.roles("+").unwrap().operator.as_ref().unwrap().behavior);
    ///
    /// let x = Reference::variable("x");
    /// let sum = Element::operation(plus, Element::Reference(x), Element::from(Number::from(2)));
    ///
    /// // `x` is not a literal, so it counts as void and `+` acts as unary plus.
    /// assert_eq!(sum.calc().unwrap().execute().unwrap(), Some(Number::from(2)));
    /// ```
    pub fn calc(&self) -> EvalResult<Self> {
        match self {
            Self::Literal(_) | Self::Messenger(_) => Ok(self.clone()),
            Self::Reference(reference) => Ok(reference.definition()),
            Self::Container(inner) => inner.calc(),
            Self::Operation(Operation { operator,
                                        left,
                                        right, }) => {
                operator.calc(Operand::Held(left), Operand::Held(right))
            },
            Self::Modification(Modification { modifier, operand }) => {
                modifier.calc(Operand::Held(operand))
            },
            Self::Execution(Execution { function, arguments }) => {
                let values = arguments.iter()
                                      .map(|a| a.literal().cloned().flatten())
                                      .collect::<Vec<_>>();
                Ok(Self::Literal(function.call(&values)?))
            },
        }
    }

    /// Whether [`Element::pass`] is free of side effects and executes
    /// nothing.
    #[must_use]
    pub fn dont_execute(&self) -> bool {
        match self {
            Self::Literal(_) | Self::Messenger(_) => true,
            Self::Reference(_) | Self::Execution(_) => false,
            Self::Container(inner) => inner.dont_execute(),
            Self::Operation(Operation { operator, .. }) => operator.dont_execute(),
            Self::Modification(Modification { modifier, .. }) => modifier.dont_execute(),
        }
    }

    /// The element's "address-of" view: a reference's definition, any other
    /// element itself.
    #[must_use]
    pub fn definition(&self) -> Self {
        match self {
            Self::Reference(reference) => reference.definition(),
            Self::Container(inner) => inner.definition(),
            _ => self.clone(),
        }
    }

    /// Whether the element is a variable, possibly in parentheses.
    #[must_use]
    pub fn is_assignable(&self) -> bool {
        match self {
            Self::Reference(reference) => reference.kind() == ReferenceKind::Variable,
            Self::Container(inner) => inner.is_assignable(),
            _ => false,
        }
    }

    /// Replaces the definition of the variable this element names.
    ///
    /// # Errors
    /// [`RuntimeError::NotRedefinable`] for anything but a variable.
    pub fn assign(&self, definition: Self) -> EvalResult<()> {
        match self {
            Self::Reference(reference) if reference.kind() == ReferenceKind::Variable => {
                tracing::trace!(name = reference.name(), %definition, "redefine");
                reference.store(definition);
                Ok(())
            },
            Self::Container(inner) => inner.assign(definition),
            _ => Err(RuntimeError::NotRedefinable { name: self.to_string() }),
        }
    }
}
