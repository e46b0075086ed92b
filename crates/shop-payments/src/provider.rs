//! Preference Provider Seam
//!
//! Abstraction over the external payment API so the transport layer and
//! tests never need a network. Implement this for each provider.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::{PaymentError, Result};
use crate::preference::{PreferenceId, PreferenceRequest};

/// Payment provider trait (Strategy pattern)
#[async_trait]
pub trait PreferenceProvider: Send + Sync {
    /// Submit a preference request; exactly one outbound call, no retries.
    /// A blind retry could mint duplicate preferences, so re-attempts must
    /// come from the client as fresh requests.
    async fn create_preference(&self, request: &PreferenceRequest) -> Result<PreferenceId>;

    /// Provider name for logs
    fn name(&self) -> &str;
}

/// Failure the mock provider should simulate
#[derive(Clone, Debug)]
pub enum MockFailure {
    /// Credentials rejected
    Auth,
    /// Payload rejected with the given detail
    Rejected(String),
    /// Timeout / network failure / provider 5xx
    Unavailable,
}

/// In-memory provider for tests and demos
///
/// Counts outbound calls so tests can assert that validation failures never
/// reach the provider.
pub struct MockPreferenceProvider {
    calls: AtomicUsize,
    failure: Option<MockFailure>,
}

impl Default for MockPreferenceProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPreferenceProvider {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            failure: None,
        }
    }

    /// Create a mock that fails every call the given way
    pub fn failing(failure: MockFailure) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            failure: Some(failure),
        }
    }

    /// Number of create-preference calls received
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PreferenceProvider for MockPreferenceProvider {
    async fn create_preference(&self, request: &PreferenceRequest) -> Result<PreferenceId> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(failure) = &self.failure {
            return Err(match failure {
                MockFailure::Auth => PaymentError::Auth("mock credentials rejected".into()),
                MockFailure::Rejected(detail) => PaymentError::Rejected(detail.clone()),
                MockFailure::Unavailable => PaymentError::Unavailable("mock timeout".into()),
            });
        }

        if request.items.is_empty() {
            return Err(PaymentError::Rejected("items must not be empty".into()));
        }

        Ok(PreferenceId(format!("mock-{}", uuid::Uuid::new_v4())))
    }

    fn name(&self) -> &str {
        "MockProvider"
    }
}
