use super::{IEmailSender, SendFailure};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::error;

const RESEND_API_URL: &str = "https://api.resend.com/emails";
const FROM_ADDRESS: &str = "Digestly <onboarding@resend.dev>";

/// Email sender backed by the Resend REST API
pub struct ResendEmailSender {
    client: Client,
    api_key: Option<String>,
}

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendEmailErrorResponse {
    error: Option<String>,
}

impl ResendEmailSender {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }
}

#[async_trait::async_trait]
impl IEmailSender for ResendEmailSender {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), SendFailure> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| SendFailure("Missing Resend API key".to_string()))?;

        let res = self
            .client
            .post(RESEND_API_URL)
            .header("authorization", format!("Bearer {}", api_key))
            .json(&SendEmailRequest {
                from: FROM_ADDRESS,
                to,
                subject,
                html: html_body,
            })
            .send()
            .await
            .map_err(|e| {
                error!("[Network Error] Resend API error. Error message: {:?}", e);
                SendFailure(e.to_string())
            })?;

        if res.status().is_success() {
            return Ok(());
        }

        let status = res.status();
        let reason = res
            .json::<SendEmailErrorResponse>()
            .await
            .ok()
            .and_then(|body| body.error)
            .unwrap_or_else(|| format!("Resend API responded with status {}", status));
        Err(SendFailure(reason))
    }
}
