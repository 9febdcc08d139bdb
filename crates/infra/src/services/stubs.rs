use super::{IEmailSender, IRowSource, RowSourceError, SendFailure};
use digestly_domain::DigestRow;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Row source serving canned rows, used when testing without the
/// external API
pub struct InMemoryRowSource {
    rows: Mutex<HashMap<String, Vec<DigestRow>>>,
    failing_sources: Mutex<HashSet<String>>,
}

impl InMemoryRowSource {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(HashMap::new()),
            failing_sources: Mutex::new(HashSet::new()),
        }
    }

    pub fn set_rows(&self, source_id: &str, rows: Vec<DigestRow>) {
        self.rows
            .lock()
            .unwrap()
            .insert(source_id.to_string(), rows);
    }

    pub fn fail_source(&self, source_id: &str) {
        self.failing_sources
            .lock()
            .unwrap()
            .insert(source_id.to_string());
    }
}

impl Default for InMemoryRowSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IRowSource for InMemoryRowSource {
    async fn fetch_rows(
        &self,
        source_id: &str,
        _credential: &str,
        limit: usize,
    ) -> Result<Vec<DigestRow>, RowSourceError> {
        if self.failing_sources.lock().unwrap().contains(source_id) {
            return Err(RowSourceError::SourceUnavailable(
                "injected failure".to_string(),
            ));
        }
        let mut rows = self
            .rows
            .lock()
            .unwrap()
            .get(source_id)
            .cloned()
            .unwrap_or_default();
        rows.truncate(limit);
        Ok(rows)
    }
}

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

/// Email sender that records outgoing mail instead of delivering it
pub struct InMemoryEmailSender {
    sent: Mutex<Vec<SentEmail>>,
    failing_recipients: Mutex<HashSet<String>>,
}

impl InMemoryEmailSender {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failing_recipients: Mutex::new(HashSet::new()),
        }
    }

    pub fn fail_recipient(&self, recipient: &str) {
        self.failing_recipients
            .lock()
            .unwrap()
            .insert(recipient.to_string());
    }

    pub fn sent_emails(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for InMemoryEmailSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IEmailSender for InMemoryEmailSender {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), SendFailure> {
        if self.failing_recipients.lock().unwrap().contains(to) {
            return Err(SendFailure("injected failure".to_string()));
        }
        self.sent.lock().unwrap().push(SentEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            html_body: html_body.to_string(),
        });
        Ok(())
    }
}
