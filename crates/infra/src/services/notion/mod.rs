mod database_api;

use super::{IRowSource, RowSourceError};
use database_api::NotionDatabasesApi;
use digestly_domain::DigestRow;

/// Row source backed by the Notion databases API. One instance serves
/// all users, the per-user credential is passed per call.
pub struct NotionRowSource {
    api: NotionDatabasesApi,
}

impl NotionRowSource {
    pub fn new() -> Self {
        Self {
            api: NotionDatabasesApi::new(),
        }
    }
}

impl Default for NotionRowSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IRowSource for NotionRowSource {
    async fn fetch_rows(
        &self,
        source_id: &str,
        credential: &str,
        limit: usize,
    ) -> Result<Vec<DigestRow>, RowSourceError> {
        self.api.query_database(source_id, credential, limit).await
    }
}
