use crate::{
    ast::Element,
    interpreter::{
        evaluator::core::{EvalResult, Operand},
        symbols::modifier::{Modifier, ModifierRule, Orientation},
        value::core::{Number, Value},
    },
};

impl Modifier {
    /// Applies the modifier's rule once to a prepared operand.
    ///
    /// - `Values`: applied to the operand's value; void stays void.
    /// - `Step`: requires an assignable operand. A void current value is left
    ///   alone; otherwise the stepped value is stored. Pre-modifiers return
    ///   the new value and post-modifiers the old one.
    /// - `Dereference`: the operand's definition, unevaluated.
    ///
    /// # Example
    /// ```
    /// use operon::{
    ///     ast::{Element, Reference},
    ///     interpreter::{evaluator::core::Operand, symbols::SymbolIndex, value::core::Number},
    /// };
    ///
    /// let index = SymbolIndex::standard();
    /// let increment = &index.roles("++").unwrap().postfix.as_ref().unwrap().behavior;
    ///
    /// let x = Element::Reference(Reference::variable("x"));
    /// x.assign(Element::from(Number::from(41))).unwrap();
    ///
    /// let old = increment.calc(Operand::Element(&x)).unwrap();
    /// assert_eq!(old.execute().unwrap(), Some(Number::from(41)));
    /// assert_eq!(x.execute().unwrap(), Some(Number::from(42)));
    /// ```
    pub fn calc(&self, operand: Operand<'_>) -> EvalResult<Element> {
        match self.rule() {
            ModifierRule::Values(rule) => {
                let value = operand.value()?;
                Ok(Element::Literal(value.as_ref().map_or(Ok(None), rule)?))
            },
            ModifierRule::Step(delta) => {
                let target = operand.as_target()?;
                let Some(old) = operand.value()? else {
                    return Ok(Element::void());
                };
                let new = old.add(&Number::from(*delta))?;
                target.assign(Element::from(new.clone()))?;
                Ok(Element::from(match self.orientation() {
                                     Orientation::Pre => new,
                                     Orientation::Post => old,
                                 }))
            },
            ModifierRule::Dereference => operand.pass(),
        }
    }
}

/// `-x`.
pub fn negate(x: &Number) -> EvalResult<Value> {
    Ok(Some(x.negate()))
}

/// `+x`.
pub fn identity(x: &Number) -> EvalResult<Value> {
    Ok(Some(x.clone()))
}

/// `!x`: 1 for 0, 0 for 1, void otherwise.
///
/// # Example
/// ```
/// use operon::interpreter::{evaluator::unary::not, value::core::Number};
///
/// assert_eq!(not(&Number::from(0)).unwrap(), Some(Number::from(1)));
/// assert_eq!(not(&Number::from(7)).unwrap(), None);
/// ```
pub fn not(x: &Number) -> EvalResult<Value> {
    Ok(x.truth().map(|t| Number::from(!t)))
}

/// `x!`.
pub fn factorial(x: &Number) -> EvalResult<Value> {
    x.factorial().map(Some)
}
