/// The numeric tower.
///
/// Defines [`core::Number`], an auto-promoting integer / fraction / float
/// value, and [`core::Value`], the numeric-or-absent result every element
/// evaluates to.
pub mod core;
