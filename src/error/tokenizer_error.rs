#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents all errors that can occur while configuring a tokenizer.
pub enum TokenizerError {
    /// Every open bracket needs exactly one matching close bracket.
    MismatchedBrackets {
        /// Number of configured open brackets.
        open:  usize,
        /// Number of configured close brackets.
        close: usize,
    },
}

impl std::fmt::Display for TokenizerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MismatchedBrackets { open, close } => write!(f,
                                                               "Tokenizer configured with {open} open brackets but {close} close brackets."),
        }
    }
}

impl std::error::Error for TokenizerError {}
