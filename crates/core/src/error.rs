// crates/core/src/error.rs
use thiserror::Error;

/// Failure reported by an [`OptionStore`](crate::store::OptionStore) implementation.
///
/// Wraps whatever the backing store produced (connection loss, timeout,
/// malformed query) so the assembler can surface it without knowing the
/// concrete backend.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct StoreError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors that end an audit run. No partial result accompanies either variant.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Administrative privilege required to run the options audit")]
    PermissionDenied,

    #[error("Store unavailable while running {query}")]
    StoreUnavailable {
        query: &'static str,
        #[source]
        source: StoreError,
    },
}

impl AuditError {
    pub fn store(query: &'static str, source: StoreError) -> Self {
        Self::StoreUnavailable { query, source }
    }
}
