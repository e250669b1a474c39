use thiserror::Error;

/// Errors raised while building a breakpoint registry.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("breakpoint name must not be empty")]
    EmptyName,
    #[error("breakpoint name `{name}` contains the reserved sigil `{sigil}`")]
    ReservedSigil { name: String, sigil: char },
    #[error("breakpoint `{name}` has an empty range: {from} must be below {to}")]
    EmptyRange { name: String, from: u32, to: u32 },
    #[cfg(feature = "serde")]
    #[error("invalid breakpoint configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while parsing the textual key syntax (`-tablet`, `|mobile+`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyParseError {
    #[error("breakpoint key is empty")]
    Empty,
    #[error("breakpoint key `{0}` has no base name")]
    MissingName(String),
    #[error("breakpoint key `{0}` contains a sigil inside its base name")]
    InvalidName(String),
}
