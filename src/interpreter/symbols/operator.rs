use crate::interpreter::{
    evaluator::core::EvalResult,
    value::core::{Number, Value},
};

/// Direction in which a chain of same-tier operators folds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    /// `a - b - c` is `(a - b) - c`.
    LeftToRight,
    /// `a = b = c` is `a = (b = c)`.
    RightToLeft,
}

/// How a rule wants its operands prepared before it runs.
///
/// This is a static property of each rule, so callers can tell without
/// evaluating anything whether `pass()` will touch the operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandMode {
    /// Every operand is executed to a value first.
    Eager,
    /// The left (or only) operand is kept as an assignable element; the right
    /// operand is executed.
    Assign,
    /// The left operand is executed; the right one is kept and executed only
    /// if the rule decides to.
    Lazy,
    /// No operand is executed (`DontExecute`).
    Defer,
}

/// Rule applied to two present operands.
pub type BinaryFn = fn(&Number, &Number) -> EvalResult<Value>;
/// Rule applied when exactly one operand is present.
pub type PartialFn = fn(&Number) -> EvalResult<Value>;
/// Rule applied when both operands are absent.
pub type NoneFn = fn() -> Value;

/// Four-way, absence-aware dispatch table of a value operator.
///
/// Every slot but `both` defaults to "absent result", which is what makes
/// void propagate through arithmetic.
#[derive(Debug, Clone, Copy)]
pub struct ValueRules {
    /// Both operands present.
    pub both:         BinaryFn,
    /// Left operand absent; receives the right one.
    pub left_absent:  Option<PartialFn>,
    /// Right operand absent; receives the left one.
    pub right_absent: Option<PartialFn>,
    /// Both operands absent.
    pub none:         Option<NoneFn>,
}

impl ValueRules {
    /// Rules with only the two-operand case defined.
    #[must_use]
    pub const fn new(both: BinaryFn) -> Self {
        Self { both,
               left_absent: None,
               right_absent: None,
               none: None }
    }

    /// Overrides the left-absent slot.
    #[must_use]
    pub const fn left_absent(mut self, rule: PartialFn) -> Self {
        self.left_absent = Some(rule);
        self
    }

    /// Overrides the right-absent slot.
    #[must_use]
    pub const fn right_absent(mut self, rule: PartialFn) -> Self {
        self.right_absent = Some(rule);
        self
    }

    /// Overrides the both-absent slot.
    #[must_use]
    pub const fn none(mut self, rule: NoneFn) -> Self {
        self.none = Some(rule);
        self
    }

    /// Dispatches on operand presence.
    ///
    /// # Example
    /// ```
    /// use operon::interpreter::{
    ///     evaluator::binary::{add, plus},
    ///     symbols::operator::ValueRules,
    ///     value::core::Number,
    /// };
    ///
    /// let rules = ValueRules::new(add).left_absent(plus);
    /// let two = Some(Number::from(2));
    ///
    /// assert_eq!(rules.apply(&two, &two).unwrap(), Some(Number::from(4)));
    /// assert_eq!(rules.apply(&None, &two).unwrap(), two);
    /// assert_eq!(rules.apply(&two, &None).unwrap(), None);
    /// ```
    pub fn apply(&self, left: &Value, right: &Value) -> EvalResult<Value> {
        match (left, right) {
            (Some(a), Some(b)) => (self.both)(a, b),
            (None, Some(b)) => self.left_absent.map_or(Ok(None), |rule| rule(b)),
            (Some(a), None) => self.right_absent.map_or(Ok(None), |rule| rule(a)),
            (None, None) => Ok(self.none.and_then(|rule| rule())),
        }
    }
}

/// What an operator does with its operands.
#[derive(Debug, Clone, Copy)]
pub enum OperatorRule {
    /// Plain arithmetic or comparison over values.
    Values(ValueRules),
    /// `=`: store the right value in the left reference.
    Assign,
    /// `:=`: bind the left reference to the right element, unevaluated.
    Define,
    /// `+=` and friends: combine, then store.
    Compound(ValueRules),
    /// Short-circuit conjunction.
    And,
    /// Short-circuit disjunction.
    Or,
    /// `?`: pick a branch of the messenger on the right.
    Select,
    /// `:`: pair two branches into a messenger.
    Pair,
}

impl OperatorRule {
    /// The operand preparation this rule relies on.
    #[must_use]
    pub const fn mode(&self) -> OperandMode {
        match self {
            Self::Values(_) => OperandMode::Eager,
            Self::Assign | Self::Compound(_) => OperandMode::Assign,
            Self::And | Self::Or | Self::Select => OperandMode::Lazy,
            Self::Define | Self::Pair => OperandMode::Defer,
        }
    }
}

/// A registered binary infix behavior.
///
/// Precedence and associativity are not stored here: they come from the tier
/// of the [`crate::interpreter::symbols::SymbolIndex`] the operator is
/// registered in.
#[derive(Debug, Clone)]
pub struct Operator {
    symbol: String,
    rule:   OperatorRule,
}

impl Operator {
    /// Creates an operator.
    pub fn new(symbol: impl Into<String>, rule: OperatorRule) -> Self {
        Self { symbol: symbol.into(),
               rule }
    }

    /// Shorthand for a value operator.
    pub fn values(symbol: impl Into<String>, rules: ValueRules) -> Self {
        Self::new(symbol, OperatorRule::Values(rules))
    }

    /// The symbol text.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// The rule.
    #[must_use]
    pub const fn rule(&self) -> &OperatorRule {
        &self.rule
    }

    /// Whether this operator leaves its operands unevaluated.
    #[must_use]
    pub const fn dont_execute(&self) -> bool {
        matches!(self.rule.mode(), OperandMode::Defer)
    }

    /// Whether the operator only binds a name. Its one-step result is the
    /// bound target, so `c := b := a` binds `c` to `b`, but executing it
    /// yields void.
    #[must_use]
    pub const fn binds(&self) -> bool {
        matches!(self.rule, OperatorRule::Define)
    }
}
