mod notion;
mod resend;
mod stubs;

use digestly_domain::DigestRow;
pub use notion::NotionRowSource;
pub use resend::ResendEmailSender;
pub use stubs::{InMemoryEmailSender, InMemoryRowSource, SentEmail};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RowSourceError {
    #[error("The row source rejected the provided credential")]
    CredentialInvalid,
    #[error("The row source is unavailable: {0}")]
    SourceUnavailable(String),
}

#[derive(Debug, Error)]
#[error("Failed to send email: {0}")]
pub struct SendFailure(pub String);

/// External collaborator yielding flattened tabular data for a given
/// external database id
#[async_trait::async_trait]
pub trait IRowSource: Send + Sync {
    async fn fetch_rows(
        &self,
        source_id: &str,
        credential: &str,
        limit: usize,
    ) -> Result<Vec<DigestRow>, RowSourceError>;
}

#[async_trait::async_trait]
pub trait IEmailSender: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), SendFailure>;
}
