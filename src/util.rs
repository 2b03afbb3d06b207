/// Exact integer helpers.
///
/// This module provides the unbounded-precision routines the numeric tower
/// relies on: factorials by repeated multiplication and checked narrowing of
/// big integers to machine exponents.
pub mod num;
