use crate::services::RowSourceError;
use digestly_domain::{CellValue, DigestRow};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::error;

const NOTION_API_BASE_URL: &str = "https://api.notion.com/v1";
const NOTION_API_VERSION: &str = "2022-06-28";

pub struct NotionDatabasesApi {
    client: Client,
}

#[derive(Debug, Serialize)]
struct QueryDatabaseRequest {
    page_size: usize,
}

#[derive(Debug, Deserialize)]
struct QueryDatabaseResponse {
    results: Vec<NotionPage>,
}

#[derive(Debug, Deserialize)]
struct NotionPage {
    #[serde(default)]
    properties: Map<String, Value>,
}

impl NotionDatabasesApi {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    pub async fn query_database(
        &self,
        database_id: &str,
        credential: &str,
        page_size: usize,
    ) -> Result<Vec<DigestRow>, RowSourceError> {
        let url = format!("{}/databases/{}/query", NOTION_API_BASE_URL, database_id);
        let res = self
            .client
            .post(&url)
            .header("authorization", format!("Bearer {}", credential))
            .header("Notion-Version", NOTION_API_VERSION)
            .json(&QueryDatabaseRequest { page_size })
            .send()
            .await
            .map_err(|e| {
                error!(
                    "[Network Error] Notion database query error. Error message: {:?}",
                    e
                );
                RowSourceError::SourceUnavailable(e.to_string())
            })?;

        match res.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(RowSourceError::CredentialInvalid)
            }
            status if !status.is_success() => {
                return Err(RowSourceError::SourceUnavailable(format!(
                    "Notion API responded with status {}",
                    status
                )))
            }
            _ => {}
        }

        let body: QueryDatabaseResponse = res.json().await.map_err(|e| {
            error!(
                "[Unexpected Response] Notion database query error. Error message: {:?}",
                e
            );
            RowSourceError::SourceUnavailable(e.to_string())
        })?;

        Ok(body
            .results
            .iter()
            .map(|page| flatten_page_properties(&page.properties))
            .collect())
    }
}

fn plain_text_of_first(prop: &Value, field: &str) -> CellValue {
    match prop[field]
        .as_array()
        .and_then(|arr| arr.first())
        .and_then(|item| item["plain_text"].as_str())
    {
        Some(text) => CellValue::Text(text.to_string()),
        None => CellValue::Empty,
    }
}

fn joined_names(prop: &Value, field: &str) -> CellValue {
    let names: Vec<&str> = prop[field]
        .as_array()
        .map(|arr| {
            arr.iter()
                .filter_map(|item| item["name"].as_str().or_else(|| item["id"].as_str()))
                .collect()
        })
        .unwrap_or_default();
    CellValue::Text(names.join(", "))
}

fn string_field(prop: &Value, field: &str) -> CellValue {
    match prop[field].as_str() {
        Some(s) => CellValue::Text(s.to_string()),
        None => CellValue::Empty,
    }
}

/// Reduces one page's property map to flat scalar cells. Every known
/// property type yields a string or number, anything unrecognized or
/// malformed falls back to an empty cell.
pub(crate) fn flatten_page_properties(properties: &Map<String, Value>) -> DigestRow {
    let mut row = DigestRow::new();
    for (key, prop) in properties {
        let value = match prop["type"].as_str() {
            Some("title") => plain_text_of_first(prop, "title"),
            Some("rich_text") => plain_text_of_first(prop, "rich_text"),
            Some("select") => string_field(&prop["select"], "name"),
            Some("multi_select") => joined_names(prop, "multi_select"),
            Some("number") => match prop["number"].as_f64() {
                Some(n) => CellValue::Number(n),
                None => CellValue::Empty,
            },
            Some("checkbox") => match prop["checkbox"].as_bool() {
                Some(true) => CellValue::Text("Yes".to_string()),
                Some(false) => CellValue::Text("No".to_string()),
                None => CellValue::Empty,
            },
            Some("date") => string_field(&prop["date"], "start"),
            Some("people") => joined_names(prop, "people"),
            Some("email") => string_field(prop, "email"),
            Some("url") => string_field(prop, "url"),
            Some("phone_number") => string_field(prop, "phone_number"),
            _ => CellValue::Empty,
        };
        row.insert(key.clone(), value);
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn flattens_title_and_rich_text() {
        let row = flatten_page_properties(&props(json!({
            "Name": { "type": "title", "title": [{ "plain_text": "Task 1" }] },
            "Notes": { "type": "rich_text", "rich_text": [{ "plain_text": "hello" }] },
            "EmptyTitle": { "type": "title", "title": [] },
        })));

        assert_eq!(row.get("Name"), Some(&CellValue::Text("Task 1".into())));
        assert_eq!(row.get("Notes"), Some(&CellValue::Text("hello".into())));
        assert_eq!(row.get("EmptyTitle"), Some(&CellValue::Empty));
    }

    #[test]
    fn flattens_selects_and_people() {
        let row = flatten_page_properties(&props(json!({
            "Status": { "type": "select", "select": { "name": "Doing" } },
            "Tags": { "type": "multi_select", "multi_select": [
                { "name": "a" }, { "name": "b" }
            ]},
            "Owners": { "type": "people", "people": [
                { "name": "Ada" }, { "id": "user-2" }
            ]},
        })));

        assert_eq!(row.get("Status"), Some(&CellValue::Text("Doing".into())));
        assert_eq!(row.get("Tags"), Some(&CellValue::Text("a, b".into())));
        assert_eq!(row.get("Owners"), Some(&CellValue::Text("Ada, user-2".into())));
    }

    #[test]
    fn flattens_scalars() {
        let row = flatten_page_properties(&props(json!({
            "Count": { "type": "number", "number": 42 },
            "NoCount": { "type": "number", "number": null },
            "Done": { "type": "checkbox", "checkbox": true },
            "NotDone": { "type": "checkbox", "checkbox": false },
            "When": { "type": "date", "date": { "start": "2024-05-01" } },
            "Mail": { "type": "email", "email": "a@b.com" },
            "Link": { "type": "url", "url": null },
        })));

        assert_eq!(row.get("Count"), Some(&CellValue::Number(42.0)));
        assert_eq!(row.get("NoCount"), Some(&CellValue::Empty));
        assert_eq!(row.get("Done"), Some(&CellValue::Text("Yes".into())));
        assert_eq!(row.get("NotDone"), Some(&CellValue::Text("No".into())));
        assert_eq!(row.get("When"), Some(&CellValue::Text("2024-05-01".into())));
        assert_eq!(row.get("Mail"), Some(&CellValue::Text("a@b.com".into())));
        assert_eq!(row.get("Link"), Some(&CellValue::Empty));
    }

    #[test]
    fn unknown_property_shapes_fall_back_to_empty() {
        let row = flatten_page_properties(&props(json!({
            "Weird": { "type": "rollup", "rollup": { "number": 3 } },
            "Broken": { "no_type": true },
        })));

        assert_eq!(row.get("Weird"), Some(&CellValue::Empty));
        assert_eq!(row.get("Broken"), Some(&CellValue::Empty));
    }

    #[test]
    fn preserves_property_order() {
        let row = flatten_page_properties(&props(json!({
            "Zeta": { "type": "checkbox", "checkbox": true },
            "Alpha": { "type": "number", "number": 1 },
        })));
        let keys: Vec<_> = row.keys().collect();
        assert_eq!(keys, vec!["Zeta", "Alpha"]);
    }
}
