//! Payment Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, PaymentError>;

/// Errors from the payment provider call
#[derive(Error, Debug)]
pub enum PaymentError {
    /// Credentials rejected by the provider (401/403)
    #[error("Provider authentication failed: {0}")]
    Auth(String),

    /// Provider rejected the preference payload (4xx with detail)
    #[error("Provider rejected the request: {0}")]
    Rejected(String),

    /// Network failure, timeout, or provider 5xx
    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    /// Provider answered 2xx but the body was not what we expect
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    /// Configuration error (missing token, bad base URL)
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PaymentError {
    /// HTTP status class for the transport adapter
    pub fn status_code(&self) -> u16 {
        match self {
            PaymentError::Unavailable(_) => 503,
            _ => 500,
        }
    }

    /// Sanitized client-facing message
    ///
    /// Full provider detail stays in the server log; the client only learns
    /// which class of failure happened.
    pub fn user_message(&self) -> String {
        match self {
            PaymentError::Auth(_) => {
                "Payment provider rejected our credentials. Please contact support.".into()
            }
            PaymentError::Rejected(detail) => {
                format!("Payment provider rejected the order: {detail}")
            }
            PaymentError::Unavailable(_) => {
                "Payment provider is currently unavailable. Please try again.".into()
            }
            PaymentError::MalformedResponse(_) | PaymentError::Config(_) => {
                "An error occurred creating the payment preference.".into()
            }
        }
    }
}
