/// Crate Error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Token that matched neither the keyword list nor the dice grammar
    Parse(String),
    /// Structurally valid dice roll carrying out of bounds values
    Invalid(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "{e}"),
            Self::Invalid(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for Error {}

/// Crate Result type
pub type Result<T> = std::result::Result<T, Error>;
