use thiserror::Error;

/// Result alias for `gng`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the growing neural gas engine and its clustering front end.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Input was empty.
    #[error("empty input provided")]
    EmptyInput,

    /// Vector dimension disagrees with the graph's feature dimension.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Found dimension.
        found: usize,
    },

    /// A configuration value is structurally invalid.
    #[error("invalid configuration '{name}': {message}")]
    InvalidConfiguration {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: &'static str,
    },

    /// The graph holds fewer nodes than the operation needs.
    #[error("graph has {found} nodes, operation requires at least {required}")]
    InsufficientNodes {
        /// Nodes required.
        required: usize,
        /// Nodes present.
        found: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_parameter() {
        let err = Error::InvalidConfiguration {
            name: "max_age",
            message: "must be positive",
        };
        assert_eq!(
            err.to_string(),
            "invalid configuration 'max_age': must be positive"
        );
    }

    #[test]
    fn display_reports_both_dimensions() {
        let err = Error::DimensionMismatch {
            expected: 3,
            found: 2,
        };
        let s = err.to_string();
        assert!(s.contains('3'));
        assert!(s.contains('2'));
    }
}
