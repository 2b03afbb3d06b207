use crate::interpreter::symbols::operator::{OperandMode, PartialFn};

/// Side of its operand a modifier is written on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Written before the operand, as in `-x`.
    Pre,
    /// Written after the operand, as in `x!`.
    Post,
}

/// What a modifier does with its operand.
#[derive(Debug, Clone, Copy)]
pub enum ModifierRule {
    /// Applied to the operand's value; an absent value stays absent.
    Values(PartialFn),
    /// Adds the step to an assignable operand and stores the result.
    /// Pre-modifiers return the new value, post-modifiers the old one.
    Step(i64),
    /// Returns the operand's definition without evaluating it.
    Dereference,
}

impl ModifierRule {
    /// The operand preparation this rule relies on.
    #[must_use]
    pub const fn mode(&self) -> OperandMode {
        match self {
            Self::Values(_) => OperandMode::Eager,
            Self::Step(_) => OperandMode::Assign,
            Self::Dereference => OperandMode::Defer,
        }
    }
}

/// A registered unary behavior.
///
/// The same text may be registered once per orientation; `!` is both logical
/// not (pre) and factorial (post) in the standard grammar.
#[derive(Debug, Clone)]
pub struct Modifier {
    symbol:      String,
    orientation: Orientation,
    rule:        ModifierRule,
}

impl Modifier {
    /// Creates a modifier. Its orientation is set by the tier it is
    /// registered in.
    pub fn new(symbol: impl Into<String>, rule: ModifierRule) -> Self {
        Self { symbol: symbol.into(),
               orientation: Orientation::Pre,
               rule }
    }

    pub(crate) fn oriented(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// The symbol text.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Side of the operand this modifier is written on.
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The rule.
    #[must_use]
    pub const fn rule(&self) -> &ModifierRule {
        &self.rule
    }

    /// Whether this modifier leaves its operand unevaluated.
    #[must_use]
    pub const fn dont_execute(&self) -> bool {
        matches!(self.rule.mode(), OperandMode::Defer)
    }
}
