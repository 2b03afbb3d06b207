#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while executing an element tree.
pub enum RuntimeError {
    /// Tried to assign to, increment or decrement something that is not a
    /// variable.
    NotRedefinable {
        /// Printed form of the target.
        name: String,
    },
    /// Factorial of a negative or non-integral value.
    FactorialDomain {
        /// Printed form of the operand value.
        value: String,
    },
    /// Attempted division by zero.
    DivisionByZero,
    /// A result is too large to be computed exactly.
    Overflow,
    /// A ternary separator `:` was executed without a `?` selecting a branch.
    MisplacedMessenger,
    /// A function called itself, or a variable's definition read the
    /// variable, too deeply.
    RecursionLimit {
        /// Name of the function or variable.
        name: String,
    },
    /// The builtin `assert` received something other than 1.
    AssertionFailed,
    /// An argument was outside the domain of a builtin.
    InvalidArgument {
        /// Details about why the argument is invalid.
        details: String,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotRedefinable { name } => write!(f, "'{name}' is not redefinable."),
            Self::FactorialDomain { value } => write!(f,
                                                      "Factorial is only defined for non-negative integers, but found {value}."),
            Self::DivisionByZero => write!(f, "Division by zero."),
            Self::Overflow => write!(f, "Result is too large to compute."),
            Self::MisplacedMessenger => {
                write!(f, "Ternary separator ':' used without a condition '?'.")
            },
            Self::RecursionLimit { name } => {
                write!(f, "'{name}' exceeded the maximum evaluation depth.")
            },
            Self::AssertionFailed => write!(f, "Assertion failed."),
            Self::InvalidArgument { details } => write!(f, "Invalid argument: {details}."),
        }
    }
}

impl std::error::Error for RuntimeError {}
