use thiserror::Error;

/// Errors raised while parsing inputs, validating them or exporting results
#[derive(Error, Debug)]
pub enum CaffsimError {
    /// The input text is not a tuple of exactly four finite numbers
    #[error("Invalid input '{input}': {reason}")]
    InvalidInput { input: String, reason: String },

    /// A parsed value lies outside the domain where the model is defined
    #[error("Invalid {param} = {value}: {reason}")]
    InvalidDomain {
        param: String,
        value: f64,
        reason: String,
    },

    /// The time grid cannot be constructed from the given options
    #[error("Invalid time grid: {reason}")]
    InvalidGrid { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl CaffsimError {
    pub(crate) fn domain(param: &str, value: f64, reason: impl Into<String>) -> Self {
        CaffsimError::InvalidDomain {
            param: param.to_string(),
            value,
            reason: reason.into(),
        }
    }

    /// Whether this error came from a malformed input string
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, CaffsimError::InvalidInput { .. })
    }

    /// Whether this error came from a well-formed but out-of-domain value
    pub fn is_invalid_domain(&self) -> bool {
        matches!(self, CaffsimError::InvalidDomain { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_errors_print_their_source_once() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "options.json missing");
        let err = anyhow::Error::from(CaffsimError::from(io)).context("reading options");
        assert_eq!(format!("{err:#}"), "reading options: options.json missing");
    }

    #[test]
    fn domain_errors_name_the_parameter() {
        let err = CaffsimError::domain("ec50", 0.0, "must be greater than zero");
        assert!(err.is_invalid_domain());
        assert_eq!(err.to_string(), "Invalid ec50 = 0: must be greater than zero");
    }
}
