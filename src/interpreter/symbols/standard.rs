use crate::interpreter::{
    evaluator::{binary, unary},
    symbols::{
        SymbolIndex, SymbolIndexBuilder, Tier,
        modifier::{Modifier, ModifierRule},
        operator::{Associativity, Operator, OperatorRule, ValueRules},
    },
};

/// `+`: binary addition, unary plus on an absent left operand.
pub const ADD: ValueRules = ValueRules::new(binary::add).left_absent(binary::plus);
/// `-`: binary subtraction, unary minus on an absent left operand.
pub const SUB: ValueRules = ValueRules::new(binary::sub).left_absent(binary::minus);
pub const MUL: ValueRules = ValueRules::new(binary::mul);
pub const DIV: ValueRules = ValueRules::new(binary::div);
pub const FLOOR_DIV: ValueRules = ValueRules::new(binary::floor_div);
pub const REM: ValueRules = ValueRules::new(binary::rem);
pub const POW: ValueRules = ValueRules::new(binary::pow);
/// `==`: absence is comparable, `void == void` holds.
pub const EQ: ValueRules = ValueRules::new(binary::equal).left_absent(binary::one_sided_eq)
                                                         .right_absent(binary::one_sided_eq)
                                                         .none(binary::void_eq);
pub const NE: ValueRules = ValueRules::new(binary::not_equal).left_absent(binary::one_sided_ne)
                                                             .right_absent(binary::one_sided_ne)
                                                             .none(binary::void_ne);

impl SymbolIndex {
    /// The default grammar.
    ///
    /// | tier | kind                       | symbols                       |
    /// |------|----------------------------|-------------------------------|
    /// | 0    | operators, right-to-left   | `= := += -= *= /= %= ^=`      |
    /// | 1    | operators, right-to-left   | `? :`                         |
    /// | 2    | operators, left-to-right   | `\|\|`                        |
    /// | 3    | operators, left-to-right   | `&&`                          |
    /// | 4    | operators, left-to-right   | `== !=`                       |
    /// | 5    | operators, left-to-right   | `< > <= >=`                   |
    /// | 6    | operators, left-to-right   | `+ -`                         |
    /// | 7    | operators, left-to-right   | `* / // %`                    |
    /// | 8    | pre-modifiers              | `- + !`                       |
    /// | 9    | operators, right-to-left   | `^`                           |
    /// | 10   | pre-modifiers              | `++ -- $`                     |
    /// | 11   | post-modifiers             | `! ++ --`                     |
    ///
    /// Unary minus binds looser than `^`, so `-2^2` is `-4`.
    #[must_use]
    pub fn standard() -> Self {
        match standard_builder().build() {
            Ok(index) => index,
            Err(err) => unreachable!("the standard grammar is valid: {err}"),
        }
    }
}

/// The standard tiers, ready for further customization.
///
/// # Example
/// ```
/// use operon::interpreter::symbols::{
///     Tier,
///     modifier::{Modifier, ModifierRule},
///     standard::standard_builder,
/// };
/// use operon::interpreter::evaluator::unary::negate;
///
/// // A `~` negation that binds tighter than everything else.
/// let index = standard_builder().tier(Tier::prefixes([Modifier::new("~",
///                                                                   ModifierRule::Values(negate))]))
///                               .build()
///                               .unwrap();
/// assert_eq!(index.tiers().len(), 13);
/// ```
#[must_use]
pub fn standard_builder() -> SymbolIndexBuilder {
    use Associativity::{LeftToRight, RightToLeft};

    SymbolIndex::builder()
        .tier(Tier::operators(RightToLeft,
                              [Operator::new("=", OperatorRule::Assign),
                               Operator::new(":=", OperatorRule::Define),
                               Operator::new("+=", OperatorRule::Compound(ADD)),
                               Operator::new("-=", OperatorRule::Compound(SUB)),
                               Operator::new("*=", OperatorRule::Compound(MUL)),
                               Operator::new("/=", OperatorRule::Compound(DIV)),
                               Operator::new("%=", OperatorRule::Compound(REM)),
                               Operator::new("^=", OperatorRule::Compound(POW))]))
        .tier(Tier::operators(RightToLeft,
                              [Operator::new("?", OperatorRule::Select),
                               Operator::new(":", OperatorRule::Pair)]))
        .tier(Tier::operators(LeftToRight, [Operator::new("||", OperatorRule::Or)]))
        .tier(Tier::operators(LeftToRight, [Operator::new("&&", OperatorRule::And)]))
        .tier(Tier::operators(LeftToRight,
                              [Operator::values("==", EQ), Operator::values("!=", NE)]))
        .tier(Tier::operators(LeftToRight,
                              [Operator::values("<", ValueRules::new(binary::less)),
                               Operator::values(">", ValueRules::new(binary::greater)),
                               Operator::values("<=", ValueRules::new(binary::less_equal)),
                               Operator::values(">=", ValueRules::new(binary::greater_equal))]))
        .tier(Tier::operators(LeftToRight,
                              [Operator::values("+", ADD), Operator::values("-", SUB)]))
        .tier(Tier::operators(LeftToRight,
                              [Operator::values("*", MUL),
                               Operator::values("/", DIV),
                               Operator::values("//", FLOOR_DIV),
                               Operator::values("%", REM)]))
        .tier(Tier::prefixes([Modifier::new("-", ModifierRule::Values(unary::negate)),
                              Modifier::new("+", ModifierRule::Values(unary::identity)),
                              Modifier::new("!", ModifierRule::Values(unary::not))]))
        .tier(Tier::operators(RightToLeft, [Operator::values("^", POW)]))
        .tier(Tier::prefixes([Modifier::new("++", ModifierRule::Step(1)),
                              Modifier::new("--", ModifierRule::Step(-1)),
                              Modifier::new("$", ModifierRule::Dereference)]))
        .tier(Tier::postfixes([Modifier::new("!", ModifierRule::Values(unary::factorial)),
                               Modifier::new("++", ModifierRule::Step(1)),
                               Modifier::new("--", ModifierRule::Step(-1))]))
        .default_operator("*")
}
