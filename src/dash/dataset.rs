use crate::dash::config::DatasetConfig;
use crate::dash::record::ProjectRecord;
use crate::dash::warn;
use crate::error::DashError;
use anyhow::Result;
use chrono::{DateTime, Datelike, NaiveDate};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// The projects dataset as read from disk: trimmed header names, one
/// record per visible row, and the duration column that matched first
/// among the configured aliases (if any).
#[derive(Debug, Clone)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub duration_column: Option<String>,
    pub records: Vec<ProjectRecord>,
}

pub fn load(path: &Path, cfg: &DatasetConfig) -> Result<Dataset> {
    let raw = fs::read_to_string(path)
        .map_err(|err| DashError::DatasetUnreadable(format!("{}: {err}", path.display())))?;
    parse(&raw, cfg)
}

pub fn parse(raw: &str, cfg: &DatasetConfig) -> Result<Dataset> {
    let mut lines = raw.lines();
    let header_line = lines
        .by_ref()
        .find(|line| !line.trim().is_empty())
        .ok_or(DashError::EmptyDataset)?;

    let columns = split_csv_line(header_line);
    if !columns.iter().any(|c| c == &cfg.name_column) {
        return Err(DashError::MissingColumn(cfg.name_column.clone()).into());
    }
    if !columns.iter().any(|c| c == &cfg.year_column) {
        return Err(DashError::MissingColumn(cfg.year_column.clone()).into());
    }

    // First alias present in the header wins.
    let duration_column = cfg
        .duration_aliases
        .iter()
        .find(|alias| columns.iter().any(|c| &c == alias))
        .cloned();

    let has_visibility = columns.iter().any(|c| c == &cfg.visibility_column);
    if !has_visibility {
        warn::emit(
            "W_NO_VISIBILITY",
            "ingest",
            &cfg.visibility_column,
            "visibility column not found; keeping all rows",
        );
    }

    let mut records = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let cells = split_csv_line(line);
        let fields: BTreeMap<String, String> = columns
            .iter()
            .zip(cells.iter().chain(std::iter::repeat(&String::new())))
            .map(|(col, cell)| (col.clone(), cell.clone()))
            .collect();

        let name = fields
            .get(&cfg.name_column)
            .map(String::as_str)
            .unwrap_or_default()
            .to_string();

        if has_visibility && is_hidden(fields.get(&cfg.visibility_column)) {
            continue;
        }

        let raw_year = fields
            .get(&cfg.year_column)
            .map(String::as_str)
            .unwrap_or_default();
        let start_year = coerce_year(raw_year);
        if start_year.is_none() && !raw_year.trim().is_empty() {
            warn::emit("W_BAD_YEAR", "ingest", &name, raw_year);
        }

        let duration_months = match &duration_column {
            Some(col) => {
                let raw_duration = fields.get(col).map(String::as_str).unwrap_or_default();
                let parsed = parse_duration(raw_duration);
                if parsed.is_none() && !raw_duration.trim().is_empty() {
                    warn::emit("W_BAD_DURATION", "ingest", &name, raw_duration);
                }
                parsed
            }
            None => None,
        };

        records.push(ProjectRecord {
            name,
            start_year,
            duration_months,
            fields,
        });
    }

    Ok(Dataset {
        columns,
        duration_column,
        records,
    })
}

fn is_hidden(flag: Option<&String>) -> bool {
    flag.map(|v| v.trim().eq_ignore_ascii_case("no"))
        .unwrap_or(false)
}

fn parse_duration(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Coerce a year-like cell to an integer year: plain integer, numeric
/// float, common date layouts, RFC 3339, then a leading 4-digit token.
pub fn coerce_year(raw: &str) -> Option<i32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(year) = trimmed.parse::<i32>() {
        return Some(year);
    }
    if let Ok(value) = trimmed.parse::<f64>()
        && value.is_finite()
    {
        return Some(value as i32);
    }
    for fmt in ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%m/%d/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(date.year());
        }
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(stamp.year());
    }
    leading_year_token(trimmed)
}

fn leading_year_token(raw: &str) -> Option<i32> {
    let digits: String = raw.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.len() == 4 {
        digits.parse().ok()
    } else {
        None
    }
}

/// Minimal RFC-4180-style field splitter: commas inside double quotes are
/// literal, doubled quotes escape a quote. Values come back trimmed, the
/// way the header names are.
fn split_csv_line(line: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(ch);
            }
        } else {
            match ch {
                '"' => in_quotes = true,
                ',' => {
                    out.push(field.trim().to_string());
                    field.clear();
                }
                _ => field.push(ch),
            }
        }
    }
    out.push(field.trim().to_string());
    out
}
