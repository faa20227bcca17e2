use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One raw row of the projects dataset. `fields` keeps every column as read
/// from the file; `start_year` and `duration_months` are the parsed views of
/// the year and duration columns. A project name is not guaranteed unique.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub name: String,
    pub start_year: Option<i32>,
    pub duration_months: Option<f64>,
    pub fields: BTreeMap<String, String>,
}

/// One row per (project, active year) pair. All expansions of one source
/// record share the same `original_year` and `span`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpandedRecord {
    pub name: String,
    pub year: Option<i32>,
    pub original_year: Option<i32>,
    pub span: String,
    pub fields: BTreeMap<String, String>,
}

/// The deduplicated, user-facing projection: one row per project name,
/// filed under its original start year.
#[derive(Debug, Clone, Serialize)]
pub struct DisplayRecord {
    pub name: String,
    pub year: Option<i32>,
    pub span: String,
    pub active: bool,
    pub fields: BTreeMap<String, String>,
}

impl ExpandedRecord {
    pub fn field(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }
}
