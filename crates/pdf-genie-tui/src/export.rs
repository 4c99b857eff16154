//! CSV export: backend-rendered bytes saved to a local file.
//!
//! The backend's `download_csv` endpoint does the rendering; this module
//! rebuilds the wire shape of the full current item list for the
//! `results_json` parameter and writes the returned bytes under the
//! deterministic `pdf_genie_<ISO-date>.csv` name.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde_json::{Value, json};

use pdf_genie_core::{ItemPayload, ResultItem};

pub fn csv_filename(date: NaiveDate) -> String {
    format!("pdf_genie_{}.csv", date.format("%Y-%m-%d"))
}

/// Write CSV bytes into `dir` under today's export filename.
pub fn save_csv(bytes: &[u8], dir: &Path) -> Result<PathBuf, String> {
    let path = dir.join(csv_filename(chrono::Local::now().date_naive()));
    std::fs::write(&path, bytes).map_err(|e| format!("failed to write {}: {e}", path.display()))?;
    Ok(path)
}

/// Serialize the full current item list back into the backend's extraction
/// item shape (`source` / `page_id` / `entities`).
pub fn results_json(items: &[ResultItem]) -> String {
    let values: Vec<Value> = items
        .iter()
        .map(|item| {
            let entities = match &item.payload {
                ItemPayload::Fields(fields) => Value::Object(
                    fields
                        .iter()
                        .map(|(name, value)| (name.clone(), Value::String(value.clone())))
                        .collect(),
                ),
                ItemPayload::Snippet { text, .. } => json!({ "text": text }),
            };
            json!({
                "source": item.source,
                "page_id": item.page,
                "entities": entities,
            })
        })
        .collect();
    Value::Array(values).to_string()
}
