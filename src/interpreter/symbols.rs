/// Binary operators: associativity, operand modes and value rules.
pub mod operator;
/// Unary modifiers: orientation and rules.
pub mod modifier;
/// The grammar every environment starts with.
pub mod standard;

use std::{collections::HashMap, rc::Rc};

use crate::{
    error::SymbolError,
    interpreter::symbols::{
        modifier::{Modifier, Orientation},
        operator::{Associativity, Operator},
    },
};

/// One precedence tier.
///
/// A tier holds either operators sharing one associativity or modifiers
/// sharing one orientation, never a mix.
#[derive(Debug, Clone)]
pub enum Tier {
    /// Binary operators.
    Operators {
        /// Fold direction of chains in this tier.
        associativity: Associativity,
        /// The operators.
        operators:     Vec<Rc<Operator>>,
    },
    /// Unary modifiers.
    Modifiers {
        /// Side of the operand they are written on.
        orientation: Orientation,
        /// The modifiers.
        modifiers:   Vec<Rc<Modifier>>,
    },
}

impl Tier {
    /// A tier of operators.
    pub fn operators(associativity: Associativity,
                     operators: impl IntoIterator<Item = Operator>)
                     -> Self {
        Self::Operators { associativity,
                          operators: operators.into_iter().map(Rc::new).collect() }
    }

    /// A tier of pre-modifiers.
    pub fn prefixes(modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        Self::modifiers(Orientation::Pre, modifiers)
    }

    /// A tier of post-modifiers.
    pub fn postfixes(modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        Self::modifiers(Orientation::Post, modifiers)
    }

    fn modifiers(orientation: Orientation, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        Self::Modifiers { orientation,
                          modifiers: modifiers.into_iter()
                                              .map(|m| Rc::new(m.oriented(orientation)))
                                              .collect() }
    }

    /// Number of symbols in the tier.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Operators { operators, .. } => operators.len(),
            Self::Modifiers { modifiers, .. } => modifiers.len(),
        }
    }

    /// Whether the tier holds no symbols.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Associativity, for operator tiers.
    #[must_use]
    pub const fn associativity(&self) -> Option<Associativity> {
        match self {
            Self::Operators { associativity, .. } => Some(*associativity),
            Self::Modifiers { .. } => None,
        }
    }
}

/// A registered behavior together with the row of its tier.
#[derive(Debug)]
pub struct Role<T> {
    /// Precedence tier; 0 binds loosest.
    pub tier:     usize,
    /// The registered behavior.
    pub behavior: Rc<T>,
}

impl<T> Clone for Role<T> {
    fn clone(&self) -> Self {
        Self { tier:     self.tier,
               behavior: Rc::clone(&self.behavior), }
    }
}

/// Every role one symbol text is registered for.
///
/// An operator, a pre-modifier and a post-modifier may share a text; which
/// one applies is decided by the parser from context.
#[derive(Debug, Clone, Default)]
pub struct SymbolRoles {
    /// Binary role.
    pub operator: Option<Role<Operator>>,
    /// Pre-modifier role.
    pub prefix:   Option<Role<Modifier>>,
    /// Post-modifier role.
    pub postfix:  Option<Role<Modifier>>,
}

/// Registry of every operator and modifier, organized in precedence tiers.
///
/// Precedence is positional: the row index of a tier is its precedence, so
/// reordering the tiers is all it takes to retune the grammar.
///
/// # Example
/// ```
/// use operon::interpreter::symbols::SymbolIndex;
///
/// let index = SymbolIndex::standard();
/// let minus = index.roles("-").unwrap();
///
/// assert!(minus.operator.is_some());
/// assert!(minus.prefix.is_some());
/// assert!(minus.postfix.is_none());
/// assert!(index.operator_tier("*") > index.operator_tier("+"));
/// ```
#[derive(Debug, Clone)]
pub struct SymbolIndex {
    tiers:            Vec<Tier>,
    roles:            HashMap<String, SymbolRoles>,
    default_operator: Role<Operator>,
}

/// Builds a [`SymbolIndex`] tier by tier, loosest first.
#[derive(Debug, Clone)]
pub struct SymbolIndexBuilder {
    tiers:            Vec<Tier>,
    default_operator: String,
}

impl Default for SymbolIndexBuilder {
    fn default() -> Self {
        Self { tiers:            Vec::new(),
               default_operator: "*".to_string(), }
    }
}

impl SymbolIndexBuilder {
    /// Appends a tier binding tighter than every tier so far.
    #[must_use]
    pub fn tier(mut self, tier: Tier) -> Self {
        self.tiers.push(tier);
        self
    }

    /// Inserts a tier at the given row, shifting tighter tiers up.
    #[must_use]
    pub fn insert_tier(mut self, position: usize, tier: Tier) -> Self {
        let position = position.min(self.tiers.len());
        self.tiers.insert(position, tier);
        self
    }

    /// Chooses the operator spliced between adjacent operands.
    #[must_use]
    pub fn default_operator(mut self, symbol: impl Into<String>) -> Self {
        self.default_operator = symbol.into();
        self
    }

    /// Validates the tiers and builds the lookup tables.
    ///
    /// # Errors
    /// - [`SymbolError::EmptyTier`] for a tier without symbols.
    /// - [`SymbolError::DuplicateSymbol`] when a text is registered twice for
    ///   the same role.
    /// - [`SymbolError::UnknownDefaultOperator`] when the default operator is
    ///   not registered.
    pub fn build(self) -> Result<SymbolIndex, SymbolError> {
        let mut roles: HashMap<String, SymbolRoles> = HashMap::new();

        for (row, tier) in self.tiers.iter().enumerate() {
            if tier.is_empty() {
                return Err(SymbolError::EmptyTier { tier: row });
            }
            match tier {
                Tier::Operators { operators, .. } => {
                    for operator in operators {
                        let entry = roles.entry(operator.symbol().to_string()).or_default();
                        if entry.operator.is_some() {
                            return Err(SymbolError::DuplicateSymbol { symbol: operator.symbol()
                                                                              .to_string(),
                                                                      role:   "operator", });
                        }
                        entry.operator = Some(Role { tier:     row,
                                                     behavior: Rc::clone(operator), });
                    }
                },
                Tier::Modifiers { orientation,
                                  modifiers, } => {
                    for modifier in modifiers {
                        let entry = roles.entry(modifier.symbol().to_string()).or_default();
                        let (slot, role) = match orientation {
                            Orientation::Pre => (&mut entry.prefix, "pre-modifier"),
                            Orientation::Post => (&mut entry.postfix, "post-modifier"),
                        };
                        if slot.is_some() {
                            return Err(SymbolError::DuplicateSymbol { symbol: modifier.symbol()
                                                                              .to_string(),
                                                                      role });
                        }
                        *slot = Some(Role { tier:     row,
                                            behavior: Rc::clone(modifier), });
                    }
                },
            }
        }

        let default_operator =
            roles.get(&self.default_operator)
                 .and_then(|r| r.operator.clone())
                 .ok_or_else(|| SymbolError::UnknownDefaultOperator { symbol:
                                                                          self.default_operator
                                                                              .clone() })?;

        tracing::debug!(tiers = self.tiers.len(), symbols = roles.len(), "built symbol index");

        Ok(SymbolIndex { tiers: self.tiers,
                         roles,
                         default_operator })
    }
}

impl SymbolIndex {
    /// Starts an empty grammar.
    #[must_use]
    pub fn builder() -> SymbolIndexBuilder {
        SymbolIndexBuilder::default()
    }

    /// All roles registered for a symbol text.
    #[must_use]
    pub fn roles(&self, symbol: &str) -> Option<&SymbolRoles> {
        self.roles.get(symbol)
    }

    /// Whether `text` is a registered symbol in any role.
    #[must_use]
    pub fn is_symbol(&self, text: &str) -> bool {
        self.roles.contains_key(text)
    }

    /// Every registered symbol text, sorted.
    #[must_use]
    pub fn symbols(&self) -> Vec<&str> {
        let mut symbols: Vec<&str> = self.roles.keys().map(String::as_str).collect();
        symbols.sort_unstable();
        symbols
    }

    /// The tiers, loosest first.
    #[must_use]
    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    /// Tier of the operator registered under `symbol`.
    #[must_use]
    pub fn operator_tier(&self, symbol: &str) -> Option<usize> {
        self.roles(symbol)?.operator.as_ref().map(|r| r.tier)
    }

    /// Tier of the modifier registered under `symbol` with `orientation`.
    #[must_use]
    pub fn modifier_tier(&self, symbol: &str, orientation: Orientation) -> Option<usize> {
        let roles = self.roles(symbol)?;
        match orientation {
            Orientation::Pre => roles.prefix.as_ref(),
            Orientation::Post => roles.postfix.as_ref(),
        }.map(|r| r.tier)
    }

    /// Associativity of the operator registered under `symbol`.
    #[must_use]
    pub fn associativity(&self, symbol: &str) -> Option<Associativity> {
        self.tiers.get(self.operator_tier(symbol)?)?.associativity()
    }

    /// The operator spliced between adjacent operands (`2 3` is `2 * 3`).
    #[must_use]
    pub const fn default_operator(&self) -> &Role<Operator> {
        &self.default_operator
    }
}
