use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub const DIGEST_EMAIL_SUBJECT: &str = "Your Notion Database Digest";

/// A flattened scalar cell. The row source reduces every external
/// property shape to one of these, with `Empty` as the fallback for
/// anything unrecognized or malformed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Empty,
}

impl Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{}", s),
            Self::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            Self::Empty => Ok(()),
        }
    }
}

/// One flattened row of the external database. Cells keep the order in
/// which the source listed its properties, since the first row's key
/// order defines the table columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DigestRow {
    cells: Vec<(String, CellValue)>,
}

impl DigestRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: CellValue) {
        self.cells.push((key.into(), value));
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(k, _)| k.as_str())
    }
}

impl<K: Into<String>> std::iter::FromIterator<(K, CellValue)> for DigestRow {
    fn from_iter<I: IntoIterator<Item = (K, CellValue)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Renders rows as the digest email's HTML table.
///
/// The column set is taken from the keys of the first row, and every
/// later row is rendered against exactly those columns: missing keys
/// become empty cells and extra keys are dropped. An empty row set
/// renders a "no data" placeholder instead of an empty table shell.
pub fn render_digest_table(rows: &[DigestRow]) -> String {
    let first = match rows.first() {
        Some(first) => first,
        None => return "<p>No data found.</p>".to_string(),
    };
    let columns: Vec<&str> = first.keys().collect();

    let header = columns
        .iter()
        .map(|col| format!("<th>{}</th>", escape_html(col)))
        .collect::<String>();

    let body = rows
        .iter()
        .map(|row| {
            let cells = columns
                .iter()
                .map(|col| {
                    let value = row
                        .get(col)
                        .map(|v| v.to_string())
                        .unwrap_or_default();
                    format!("<td>{}</td>", escape_html(&value))
                })
                .collect::<String>();
            format!("<tr>{}</tr>", cells)
        })
        .collect::<String>();

    format!(
        "<table border=\"1\" cellpadding=\"6\" cellspacing=\"0\" \
         style=\"border-collapse:collapse;font-family:sans-serif;font-size:14px;\">\
         <thead><tr>{}</tr></thead><tbody>{}</tbody></table>",
        header, body
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: Vec<(&str, CellValue)>) -> DigestRow {
        cells.into_iter().collect()
    }

    #[test]
    fn empty_rows_render_placeholder() {
        assert_eq!(render_digest_table(&[]), "<p>No data found.</p>");
    }

    #[test]
    fn first_row_defines_columns() {
        let rows = vec![
            row(vec![
                ("a", CellValue::Number(1.0)),
                ("b", CellValue::Number(2.0)),
            ]),
            row(vec![("a", CellValue::Number(3.0))]),
        ];
        let html = render_digest_table(&rows);

        assert!(html.contains("<thead><tr><th>a</th><th>b</th></tr></thead>"));
        assert!(html.contains("<tr><td>1</td><td>2</td></tr>"));
        // Second row has no `b`, rendered as an empty cell
        assert!(html.contains("<tr><td>3</td><td></td></tr>"));
    }

    #[test]
    fn extra_keys_in_later_rows_are_dropped() {
        let rows = vec![
            row(vec![("a", CellValue::Text("x".into()))]),
            row(vec![
                ("a", CellValue::Text("y".into())),
                ("b", CellValue::Text("dropped".into())),
            ]),
        ];
        let html = render_digest_table(&rows);
        assert!(!html.contains("dropped"));
        assert!(!html.contains("<th>b</th>"));
    }

    #[test]
    fn cell_text_is_escaped() {
        let rows = vec![row(vec![(
            "name",
            CellValue::Text("<script>alert('x')</script>".into()),
        )])];
        let html = render_digest_table(&rows);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn number_cells_render_like_the_source() {
        assert_eq!(CellValue::Number(42.0).to_string(), "42");
        assert_eq!(CellValue::Number(1.5).to_string(), "1.5");
        assert_eq!(CellValue::Empty.to_string(), "");
    }

    #[test]
    fn row_preserves_insertion_order() {
        let row = row(vec![
            ("z", CellValue::Empty),
            ("a", CellValue::Empty),
            ("m", CellValue::Empty),
        ]);
        let keys: Vec<_> = row.keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }
}
