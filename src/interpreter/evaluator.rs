/// The Execute / Pass / Calc contract shared by every element.
///
/// Holds the operand representation handed to rules, the result alias and
/// the dispatch over element kinds.
pub mod core;

/// Binary operator rules.
///
/// Value functions for arithmetic and comparison, and the rules for
/// assignment, short-circuit logic and the ternary.
pub mod binary;

/// Unary modifier rules.
///
/// Negation, logical not, factorial, increment/decrement and dereference.
pub mod unary;

/// Function calls and the builtin function table.
pub mod function;
