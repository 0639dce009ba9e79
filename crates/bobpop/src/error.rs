//! Error types for parsing string-named options.
//!
//! None of these ever escape [`Bobpop::open`](crate::Bobpop::open): the resolver falls back
//! to defaults instead. They exist so callers converting user-facing strings can tell a typo
//! from a deliberate choice.

/// Errors produced when parsing a named option from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Theme name is not one of the built-in themes.
    UnknownTheme(String),

    /// Transition preset name is not recognised.
    UnknownTransition(String),

    /// Tail placement is not one of the twelve supported positions.
    UnknownTailPlacement(String),

    /// Text alignment keyword is not recognised.
    UnknownAlignment(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::UnknownTheme(name) => write!(f, "Unknown theme: {}", name),
            ParseError::UnknownTransition(name) => write!(f, "Unknown transition preset: {}", name),
            ParseError::UnknownTailPlacement(name) => {
                write!(f, "Unknown tail placement: '{}'", name)
            }
            ParseError::UnknownAlignment(name) => write!(f, "Unknown text alignment: {}", name),
        }
    }
}

impl std::error::Error for ParseError {}

/// Result type alias for option parsing.
pub type ParseResult<T> = Result<T, ParseError>;
