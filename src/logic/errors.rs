use anyhow::Error;

use crate::api::ResponseError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorType {
    NetworkFailure, // DNS, refused, reset, etc.
    Timeout,
    NotFound,          // HTTP 404
    ServerError,       // HTTP 500+
    MalformedResponse, // Body not in the expected shape
    EmptyResult,       // Valid envelope, no data
    Other,
}

/// Classify an error based on its type and error chain
///
/// Fetch failures are never shown to the user; this only feeds the debug log.
pub fn classify_error(error: &Error) -> ErrorType {
    // Payload errors are typed, check the chain for them first
    for cause in error.chain() {
        if let Some(response_err) = cause.downcast_ref::<ResponseError>() {
            return match response_err {
                ResponseError::Malformed(_) => ErrorType::MalformedResponse,
                ResponseError::Empty => ErrorType::EmptyResult,
            };
        }
    }

    // Check for HTTP status codes (via reqwest error chain)
    for cause in error.chain() {
        if let Some(reqwest_err) = cause.downcast_ref::<reqwest::Error>() {
            if reqwest_err.is_timeout() {
                return ErrorType::Timeout;
            }
            if let Some(status) = reqwest_err.status() {
                return match status.as_u16() {
                    404 => ErrorType::NotFound,
                    500..=599 => ErrorType::ServerError,
                    _ => ErrorType::Other,
                };
            }
            if reqwest_err.is_decode() {
                return ErrorType::MalformedResponse;
            }
            return ErrorType::NetworkFailure;
        }
    }

    let error_msg = error.to_string().to_lowercase();
    if error_msg.contains("timeout") || error_msg.contains("timed out") {
        return ErrorType::Timeout;
    }
    if error_msg.contains("connection refused")
        || error_msg.contains("dns")
        || error_msg.contains("network")
    {
        return ErrorType::NetworkFailure;
    }

    ErrorType::Other
}

/// Format error message for the debug log - deepest cause wins
pub fn format_error_message(error: &Error) -> String {
    error
        .chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_malformed() {
        let err = anyhow::Error::new(ResponseError::Malformed("missing data field".to_string()));
        assert_eq!(classify_error(&err), ErrorType::MalformedResponse);
    }

    #[test]
    fn test_classify_empty_through_context() {
        let err = anyhow::Error::new(ResponseError::Empty).context("Failed to parse profile tags");
        assert_eq!(classify_error(&err), ErrorType::EmptyResult);
    }

    #[test]
    fn test_classify_connection_refused() {
        let err = anyhow::anyhow!("Connection Refused (os error 111)");
        assert_eq!(classify_error(&err), ErrorType::NetworkFailure);
    }

    #[test]
    fn test_classify_timeout() {
        let err = anyhow::anyhow!("request timed out");
        assert_eq!(classify_error(&err), ErrorType::Timeout);
    }

    #[test]
    fn test_classify_other_error() {
        let err = anyhow::anyhow!("some random error");
        assert_eq!(classify_error(&err), ErrorType::Other);
    }

    #[test]
    fn test_format_shows_root_cause() {
        let inner = anyhow::anyhow!("tcp connect error");
        let outer = inner.context("Failed to reach http://localhost/profile/nasa/tags");
        assert_eq!(format_error_message(&outer), "tcp connect error");
    }

    #[test]
    fn test_format_preserves_simple_errors() {
        let err = anyhow::anyhow!("custom error message");
        assert_eq!(format_error_message(&err), "custom error message");
    }
}
