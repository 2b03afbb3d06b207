/// The environment module owns the state lines are executed against.
///
/// It holds the global references, the function table, the grammar, the
/// previous answer and the settings, and routes each line either to the
/// command subsystem or to the parser and evaluator.
///
/// # Responsibilities
/// - Creates the builtin constants and functions.
/// - Parses and executes lines, storing present results in `ans`.
/// - Implements the `:define`, `:delete`, `:list`, `:print` and `:help`
///   commands.
pub mod environment;
/// The evaluator module executes element trees.
///
/// Every element supports three levels of evaluation: `execute` resolves it
/// completely, `pass` takes one step and `calc` applies the element's own rule
/// to its operands as they are.
///
/// # Responsibilities
/// - Applies operator and modifier rules to operands prepared per rule.
/// - Calls builtin and user functions.
/// - Reports runtime errors such as division by zero or assignments to
///   constants.
pub mod evaluator;
/// The lexer module classifies isolated tokens.
///
/// A `logos` lexer deciding whether a piece of text is an integer literal, a
/// real literal or a label.
pub mod lexer;
/// The parser module builds element trees from lines of text.
///
/// The parser is a six-stage pipeline driven by the grammar in a
/// [`symbols::SymbolIndex`]: nothing about operators is hard-coded.
///
/// # Responsibilities
/// - Splits lines into base elements and symbols.
/// - Commits ambiguous symbols to one role and inserts implicit operators.
/// - Groups by precedence and associativity and builds the tree.
pub mod parser;
/// The symbols module is the grammar registry.
///
/// Operators and modifiers are registered in ordered precedence tiers; a
/// symbol text may be an operator, a pre-modifier and a post-modifier at the
/// same time.
pub mod symbols;
/// The tokenizer module splits text under a configurable symbol set.
///
/// # Responsibilities
/// - Recognizes the longest configured symbol at each position.
/// - Tracks bracket depth and quotes so symbols inside them do not split.
/// - Applies separator, delimiter and break rules.
pub mod tokenizer;
/// The value module defines the numeric tower.
///
/// Values are exact integers, exact fractions or floats, or absent (void).
pub mod value;
