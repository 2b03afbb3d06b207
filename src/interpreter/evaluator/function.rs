use std::rc::Rc;

use crate::{
    ast::{Element, Function, FunctionKind, Reference},
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::{Number, Value}},
};

/// Deepest nesting of calls to one function before
/// [`RuntimeError::RecursionLimit`] is raised.
pub const MAX_CALL_DEPTH: usize = 128;

/// Defines the builtin function table.
///
/// Each entry provides a name, a fixed arity and a routine. The macro produces
/// `BUILTIN_TABLE` (used by [`builtins`]) and `BUILTIN_FUNCTIONS` (the public
/// list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        struct BuiltinDef {
            name:  &'static str,
            arity: usize,
            func:  crate::ast::BuiltinFn,
        }
        static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        /// Names of all builtin functions.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "abs"    => { arity: 1, func: |args| Ok(args[0].as_ref().map(Number::abs)) },
    "sign"   => { arity: 1, func: |args| Ok(args[0].as_ref().map(Number::sign)) },
    "floor"  => { arity: 1, func: |args| Ok(args[0].as_ref().map(Number::floor)) },
    "ceil"   => { arity: 1, func: |args| Ok(args[0].as_ref().map(Number::ceil)) },
    "round"  => { arity: 1, func: |args| Ok(args[0].as_ref().map(Number::round)) },
    "sqrt"   => { arity: 1, func: sqrt },
    "min"    => { arity: 2, func: |args| extremum(args, std::cmp::Ordering::Less) },
    "max"    => { arity: 2, func: |args| extremum(args, std::cmp::Ordering::Greater) },
    "assert" => { arity: 1, func: assert },
}

/// Fresh instances of every builtin function.
pub fn builtins() -> impl Iterator<Item = Rc<Function>> {
    BUILTIN_TABLE.iter()
                 .map(|def| Function::builtin(def.name, def.arity, def.func))
}

fn sqrt(args: &[Value]) -> EvalResult<Value> {
    args[0].as_ref().map(Number::sqrt).transpose()
}

/// The operand that compares as `keep` against the other; void if either is
/// void.
fn extremum(args: &[Value], keep: std::cmp::Ordering) -> EvalResult<Value> {
    let (Some(a), Some(b)) = (&args[0], &args[1]) else {
        return Ok(None);
    };
    Ok(match a.compare(b) {
        Some(o) if o == keep => Some(a.clone()),
        Some(_) => Some(b.clone()),
        None => None,
    })
}

/// Fails unless the argument is exactly 1; returns it otherwise.
///
/// # Example (through the builtin table)
/// ```
/// use operon::interpreter::{evaluator::function::builtins, value::core::Number};
///
/// let assert = builtins().find(|f| f.name() == "assert").unwrap();
/// assert!(assert.call(&[Some(Number::from(1))]).is_ok());
/// assert!(assert.call(&[Some(Number::from(2))]).is_err());
/// assert!(assert.call(&[None]).is_err());
/// ```
fn assert(args: &[Value]) -> EvalResult<Value> {
    match args[0].as_ref().and_then(Number::truth) {
        Some(true) => Ok(args[0].clone()),
        _ => Err(RuntimeError::AssertionFailed),
    }
}

/// Restores parameter definitions and the call depth when a call ends, even
/// when the body fails.
struct CallGuard<'a> {
    function: &'a Function,
    saved:    Vec<(Rc<Reference>, Element)>,
}

impl Drop for CallGuard<'_> {
    fn drop(&mut self) {
        for (parameter, definition) in self.saved.drain(..).rev() {
            parameter.store(definition);
        }
        self.function.depth.set(self.function.depth.get().saturating_sub(1));
    }
}

impl Function {
    /// Calls the function with already executed arguments.
    ///
    /// A user function binds each parameter to its argument as a literal,
    /// executes the body and restores the previous parameter definitions.
    ///
    /// # Errors
    /// - [`RuntimeError::InvalidArgument`] when the number of arguments does
    ///   not match the arity.
    /// - [`RuntimeError::RecursionLimit`] beyond [`MAX_CALL_DEPTH`] nested
    ///   calls.
    /// - Anything the body or routine raises.
    #[tracing::instrument(level = "trace", skip_all, fields(function = self.name()))]
    pub fn call(&self, arguments: &[Value]) -> EvalResult<Value> {
        if arguments.len() != self.arity() {
            return Err(RuntimeError::InvalidArgument { details: format!("{} expects {} argument(s), got {}",
                                                                        self.name(),
                                                                        self.arity(),
                                                                        arguments.len()) });
        }

        match self.kind() {
            FunctionKind::Builtin { routine, .. } => routine(arguments),
            FunctionKind::User { parameters, body } => {
                let depth = self.depth.get();
                if depth >= MAX_CALL_DEPTH {
                    return Err(RuntimeError::RecursionLimit { name: self.name().to_string() });
                }
                self.depth.set(depth + 1);

                let mut guard = CallGuard { function: self,
                                            saved:    Vec::with_capacity(parameters.len()), };
                for (parameter, argument) in parameters.iter().zip(arguments) {
                    let previous = parameter.store(Element::Literal(argument.clone()));
                    guard.saved.push((Rc::clone(parameter), previous));
                }

                let body = body.borrow().clone();
                body.execute()
            },
        }
    }
}
