use std::cmp::Ordering;

use crate::{
    ast::Element,
    interpreter::{
        evaluator::core::{EvalResult, Operand},
        symbols::operator::{Operator, OperatorRule},
        value::core::{Number, Value},
    },
};

impl Operator {
    /// Applies the operator's rule once to prepared operands.
    ///
    /// The result is an element: a literal for value, assignment and logic
    /// rules, the bound target for `:=`, the selected branch for `?` and a
    /// messenger for `:`.
    ///
    /// # Errors
    /// Whatever the rule raises, most notably
    /// [`crate::error::RuntimeError::NotRedefinable`] for an assignment to
    /// something other than a variable.
    pub fn calc(&self, left: Operand<'_>, right: Operand<'_>) -> EvalResult<Element> {
        match self.rule() {
            OperatorRule::Values(rules) => {
                Ok(Element::Literal(rules.apply(&left.value()?, &right.value()?)?))
            },
            OperatorRule::Assign => {
                let target = left.as_target()?;
                let value = right.value()?;
                target.assign(Element::Literal(value.clone()))?;
                Ok(Element::Literal(value))
            },
            OperatorRule::Define => {
                let target = left.as_target()?;
                let definition = if right.dont_execute() {
                    right.pass()?
                } else {
                    right.to_element()
                };
                target.assign(definition)?;
                Ok(target.clone())
            },
            OperatorRule::Compound(rules) => {
                let target = left.as_target()?;
                let value = rules.apply(&left.value()?, &right.value()?)?;
                target.assign(Element::Literal(value.clone()))?;
                Ok(Element::Literal(value))
            },
            OperatorRule::And => short_circuit(left, right, false),
            OperatorRule::Or => short_circuit(left, right, true),
            OperatorRule::Select => select(left, right),
            OperatorRule::Pair => Ok(Element::messenger(left.to_element(), right.to_element())),
        }
    }
}

/// `&&` and `||`. The left operand decides alone when its truth equals
/// `decisive`; otherwise the result is the truth of the right operand.
fn short_circuit(left: Operand<'_>, right: Operand<'_>, decisive: bool) -> EvalResult<Element> {
    let truth = |value: Value| value.and_then(|n| n.truth());

    let result = match truth(left.value()?) {
        Some(t) if t == decisive => Some(t),
        Some(_) => truth(right.value()?),
        None => None,
    };
    Ok(Element::Literal(result.map(Number::from)))
}

/// `?`: picks a branch without executing it.
fn select(condition: Operand<'_>, branches: Operand<'_>) -> EvalResult<Element> {
    let Some(choice) = condition.value()?.and_then(|n| n.truth()) else {
        return Ok(Element::void());
    };

    let (then_branch, else_branch) = if branches.dont_execute() {
        match branches.pass()? {
            Element::Messenger(messenger) => (*messenger.then_branch, *messenger.else_branch),
            other => (other, Element::void()),
        }
    } else {
        (branches.to_element(), Element::void())
    };
    Ok(if choice { then_branch } else { else_branch })
}

/// `a + b`.
pub fn add(a: &Number, b: &Number) -> EvalResult<Value> {
    a.add(b).map(Some)
}

/// Unary plus: `+b` with an absent left operand.
pub fn plus(b: &Number) -> EvalResult<Value> {
    Ok(Some(b.clone()))
}

/// `a - b`.
pub fn sub(a: &Number, b: &Number) -> EvalResult<Value> {
    a.sub(b).map(Some)
}

/// Unary minus: `-b` with an absent left operand.
pub fn minus(b: &Number) -> EvalResult<Value> {
    Ok(Some(b.negate()))
}

/// `a * b`.
pub fn mul(a: &Number, b: &Number) -> EvalResult<Value> {
    a.mul(b).map(Some)
}

/// `a / b`, exact for exact operands.
pub fn div(a: &Number, b: &Number) -> EvalResult<Value> {
    a.div(b).map(Some)
}

/// `a // b`.
pub fn floor_div(a: &Number, b: &Number) -> EvalResult<Value> {
    a.floor_div(b).map(Some)
}

/// `a % b`.
pub fn rem(a: &Number, b: &Number) -> EvalResult<Value> {
    a.rem(b).map(Some)
}

/// `a ^ b`.
pub fn pow(a: &Number, b: &Number) -> EvalResult<Value> {
    a.pow(b).map(Some)
}

fn ordering(a: &Number, b: &Number, accept: impl Fn(Ordering) -> bool) -> Value {
    a.compare(b).map(|o| Number::from(accept(o)))
}

/// `a < b` as 1 or 0; void when the operands are not comparable.
pub fn less(a: &Number, b: &Number) -> EvalResult<Value> {
    Ok(ordering(a, b, Ordering::is_lt))
}

/// `a > b`.
pub fn greater(a: &Number, b: &Number) -> EvalResult<Value> {
    Ok(ordering(a, b, Ordering::is_gt))
}

/// `a <= b`.
pub fn less_equal(a: &Number, b: &Number) -> EvalResult<Value> {
    Ok(ordering(a, b, Ordering::is_le))
}

/// `a >= b`.
pub fn greater_equal(a: &Number, b: &Number) -> EvalResult<Value> {
    Ok(ordering(a, b, Ordering::is_ge))
}

/// `a == b`, comparing across representations.
///
/// # Example
/// ```
/// use operon::interpreter::{evaluator::binary::equal, value::core::Number};
///
/// let r = equal(&Number::from(2), &Number::from(2.0)).unwrap();
/// assert_eq!(r, Some(Number::from(1)));
/// ```
pub fn equal(a: &Number, b: &Number) -> EvalResult<Value> {
    Ok(Some(Number::from(a.numeric_eq(b))))
}

/// `a != b`.
pub fn not_equal(a: &Number, b: &Number) -> EvalResult<Value> {
    Ok(Some(Number::from(!a.numeric_eq(b))))
}

/// `==` with exactly one void operand: a value never equals void.
pub fn one_sided_eq(_: &Number) -> EvalResult<Value> {
    Ok(Some(Number::from(false)))
}

/// `!=` with exactly one void operand.
pub fn one_sided_ne(_: &Number) -> EvalResult<Value> {
    Ok(Some(Number::from(true)))
}

/// `void == void`.
pub fn void_eq() -> Value {
    Some(Number::from(true))
}

/// `void != void`.
pub fn void_ne() -> Value {
    Some(Number::from(false))
}
