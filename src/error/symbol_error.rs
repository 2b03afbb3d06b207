#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while building a grammar.
pub enum SymbolError {
    /// A precedence tier was declared without any symbols.
    EmptyTier {
        /// Row of the empty tier.
        tier: usize,
    },
    /// The same text was registered twice for the same role.
    DuplicateSymbol {
        /// The symbol text.
        symbol: String,
        /// The role it was registered for (`operator`, `pre-modifier`,
        /// `post-modifier`).
        role:   &'static str,
    },
    /// The default operator is not registered.
    UnknownDefaultOperator {
        /// The symbol text requested as default operator.
        symbol: String,
    },
}

impl std::fmt::Display for SymbolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTier { tier } => write!(f, "Precedence tier {tier} holds no symbols."),
            Self::DuplicateSymbol { symbol, role } => {
                write!(f, "Symbol '{symbol}' is already registered as {role}.")
            },
            Self::UnknownDefaultOperator { symbol } => {
                write!(f, "Default operator '{symbol}' is not a registered operator.")
            },
        }
    }
}

impl std::error::Error for SymbolError {}
