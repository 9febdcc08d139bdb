use digestly_api_structs::dtos::DispatchResultDTO;
use digestly_domain::{render_digest_table, Schedule, DIGEST_EMAIL_SUBJECT};
use digestly_infra::{DigestlyContext, RowSourceError};
use std::time::Duration;
use tokio::time::timeout;

/// Outcome of one digest dispatch. `Skipped` covers the non-retryable
/// owner-side states (no credential, credential rejected), `Failed`
/// covers transient delivery problems.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchResult {
    Sent,
    Skipped(String),
    Failed(String),
}

impl DispatchResult {
    pub fn into_dto(self) -> DispatchResultDTO {
        match self {
            Self::Sent => DispatchResultDTO {
                status: "sent".into(),
                reason: None,
            },
            Self::Skipped(reason) => DispatchResultDTO {
                status: "skipped".into(),
                reason: Some(reason),
            },
            Self::Failed(reason) => DispatchResultDTO {
                status: "failed".into(),
                reason: Some(reason),
            },
        }
    }
}

/// Fetches the rows for one schedule, renders them and emails the
/// result to the recipient. Never returns an error, every outcome maps
/// onto a `DispatchResult` so a batch caller can keep going.
pub async fn dispatch_schedule(schedule: &Schedule, ctx: &DigestlyContext) -> DispatchResult {
    let call_timeout = Duration::from_secs(ctx.config.external_call_timeout_secs);

    let owner = match timeout(call_timeout, ctx.repos.profiles.find(&schedule.user_id)).await {
        Err(_) => return DispatchResult::Failed("Credential lookup timed out".into()),
        Ok(None) => return DispatchResult::Skipped("Schedule owner not found".into()),
        Ok(Some(owner)) => owner,
    };
    let credential = match &owner.notion_access_token {
        Some(credential) => credential.clone(),
        None => return DispatchResult::Skipped("No credential connected".into()),
    };

    let rows = match timeout(
        call_timeout,
        ctx.row_source
            .fetch_rows(&schedule.source_id, &credential, ctx.config.digest_row_limit),
    )
    .await
    {
        Err(_) => return DispatchResult::Failed("Row source timed out".into()),
        Ok(Err(RowSourceError::CredentialInvalid)) => {
            return DispatchResult::Skipped("Credential rejected by the row source".into())
        }
        Ok(Err(e)) => return DispatchResult::Failed(e.to_string()),
        Ok(Ok(rows)) => rows,
    };

    let html_body = render_digest_table(&rows);

    match timeout(
        call_timeout,
        ctx.email_sender
            .send(&schedule.recipient, DIGEST_EMAIL_SUBJECT, &html_body),
    )
    .await
    {
        Err(_) => DispatchResult::Failed("Email sender timed out".into()),
        Ok(Err(e)) => DispatchResult::Failed(e.to_string()),
        Ok(Ok(())) => DispatchResult::Sent,
    }
}
