/// The pipeline driver: [`core::Scope`], [`core::Parser`] and the
/// whitespace, symbol and bracket tokenization stages.
pub mod core;

/// Resolution of a single piece of text into a literal, container,
/// reference or call.
pub mod base;

/// The index-linked item sequence the later stages work on.
pub mod items;

/// Role commitment for ambiguous symbols and implicit operator insertion.
pub mod commit;

/// Recursive precedence grouping.
pub mod group;

/// Materialization of grouped items into an element tree.
pub mod build;
