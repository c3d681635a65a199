//! Crate-level error types.

use std::fmt;

/// Errors produced by the orbis crate.
#[derive(Debug)]
pub enum OrbisError {
    /// A requested view state is missing fields for its interpolation mode
    /// or carries out-of-range values.
    InvalidViewState(String),
    /// An easing family or direction name was not recognized.
    UnknownEasing(String),
    /// A serialized view state could not be parsed or rendered.
    ViewStateParse(String),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Generic I/O failure.
    Io(std::io::Error),
}

impl fmt::Display for OrbisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidViewState(msg) => {
                write!(f, "invalid view state: {msg}")
            }
            Self::UnknownEasing(name) => {
                write!(f, "unknown easing: {name}")
            }
            Self::ViewStateParse(msg) => {
                write!(f, "view state parse error: {msg}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for OrbisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for OrbisError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for OrbisError {
    fn from(e: serde_json::Error) -> Self {
        Self::ViewStateParse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_context() {
        let err = OrbisError::UnknownEasing("Wobble".into());
        assert_eq!(err.to_string(), "unknown easing: Wobble");

        let err = OrbisError::InvalidViewState("radius missing".into());
        assert!(err.to_string().contains("radius missing"));
    }

    #[test]
    fn io_error_exposes_source() {
        use std::error::Error;
        let err = OrbisError::from(std::io::Error::other("disk"));
        assert!(err.source().is_some());
        assert!(OrbisError::OptionsParse("x".into()).source().is_none());
    }
}
