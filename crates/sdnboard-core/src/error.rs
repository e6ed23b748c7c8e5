// ── Core error types ──
//
// User-facing errors from sdnboard-core. Consumers never see HTTP status
// codes or JSON parse failures directly: every API error is flattened into
// a message prefixed with the operation that triggered it.

use thiserror::Error;

use crate::model::Operation;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Transport failure, non-2xx status, or malformed response.
    #[error("{operation} failed: {message}")]
    Network {
        operation: Operation,
        message: String,
    },

    /// The controller answered but reported the operation as failed.
    #[error("{operation} failed: {message}")]
    Rejected {
        operation: Operation,
        message: String,
    },

    /// The controller client could not be built from the configuration.
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Attach the triggering operation to an API error.
    pub fn from_api(operation: Operation, err: sdnboard_api::Error) -> Self {
        match err {
            sdnboard_api::Error::Rejected { message } => Self::Rejected { operation, message },
            other => Self::Network {
                operation,
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_keeps_server_message() {
        let err = CoreError::from_api(
            Operation::AddRule,
            sdnboard_api::Error::Rejected {
                message: "duplicate rule".into(),
            },
        );
        assert!(matches!(err, CoreError::Rejected { .. }));
        assert_eq!(err.to_string(), "add rule failed: duplicate rule");
    }

    #[test]
    fn http_errors_are_network_errors() {
        let err = CoreError::from_api(
            Operation::FetchStats,
            sdnboard_api::Error::Http {
                status: 503,
                message: "unavailable".into(),
            },
        );
        assert!(matches!(err, CoreError::Network { .. }));
        assert_eq!(err.to_string(), "fetch stats failed: HTTP 503: unavailable");
    }
}
