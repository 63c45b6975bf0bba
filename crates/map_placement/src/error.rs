//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! invalid configuration, missing collaborator inputs, field shape mismatches and generic errors.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("missing input: {what}")]
    MissingInput { what: String },

    #[error("shape mismatch for {what}: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        what: String,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub(crate) fn missing(what: impl Into<String>) -> Self {
        Error::MissingInput { what: what.into() }
    }
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_string_uses_other_variant() {
        let err: Error = String::from("boom").into();
        assert!(matches!(err, Error::Other(_)));
    }

    #[test]
    fn missing_input_names_the_field() {
        let err = Error::missing("density field for ecotope 'forest'");
        assert_eq!(
            err.to_string(),
            "missing input: density field for ecotope 'forest'"
        );
    }

    #[test]
    fn shape_mismatch_reports_both_shapes() {
        let err = Error::ShapeMismatch {
            what: "density".into(),
            expected: (4, 4),
            actual: (2, 3),
        };
        assert!(err.to_string().contains("(4, 4)"));
        assert!(err.to_string().contains("(2, 3)"));
    }
}
