use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DueWindowDTO {
    pub start: String,
    pub end: String,
}

/// Outcome of dispatching a single schedule
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DispatchResultDTO {
    pub status: String,
    pub reason: Option<String>,
}
