use crate::dash::config::DashConfig;
use crate::dash::dedupe::{self, SortKey};
use crate::dash::filter::ROLE_COLUMN;
use crate::dash::record::{DisplayRecord, ExpandedRecord};
use crate::dash::roles;
use crate::dash::span;
use serde::Serialize;

pub const SCOPE_COLUMN: &str = "Scope_of_work";
const SCOPE_HEADER: &str = "Scope";
const MISSING_YEAR_CELL: &str = "n/a";

#[derive(Debug, Clone, Serialize)]
pub struct DisplayTable {
    pub headers: Vec<String>,
    pub rows: Vec<DisplayRow>,
    pub metrics: TableMetrics,
}

#[derive(Debug, Clone, Serialize)]
pub struct DisplayRow {
    pub project: String,
    pub cells: Vec<String>,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableMetrics {
    pub unique_projects: usize,
    pub active_in_year: usize,
    pub year_range: Option<(i32, i32)>,
    pub multi_year_projects: usize,
}

/// Assemble the user-facing table from a filtered working set: dedupe to
/// one row per project, mark the rows active in `query_year`, project the
/// configured columns onto what the dataset actually has, and compute the
/// summary metrics.
pub fn build(
    filtered: &[ExpandedRecord],
    dataset_columns: &[String],
    cfg: &DashConfig,
    query_year: i32,
    sort_key: SortKey,
) -> DisplayTable {
    let mut displays = dedupe::deduplicate(filtered, sort_key);
    for display in &mut displays {
        display.active = span::span_is_active(&display.span, display.year, query_year);
    }

    let show_cols: Vec<&str> = cfg
        .table
        .columns
        .iter()
        .filter(|col| dataset_columns.iter().any(|c| c == *col))
        .map(String::as_str)
        .collect();
    let headers = show_cols
        .iter()
        .map(|col| {
            if *col == SCOPE_COLUMN {
                SCOPE_HEADER.to_string()
            } else {
                (*col).to_string()
            }
        })
        .collect();

    let rows = displays
        .iter()
        .map(|display| DisplayRow {
            project: display.name.clone(),
            cells: show_cols
                .iter()
                .map(|&col| cell_value(display, col, cfg))
                .collect(),
            active: display.active,
        })
        .collect();

    let metrics = summarize(&displays);

    DisplayTable {
        headers,
        rows,
        metrics,
    }
}

fn cell_value(display: &DisplayRecord, column: &str, cfg: &DashConfig) -> String {
    if column == cfg.dataset.name_column {
        return display.name.clone();
    }
    if column == cfg.dataset.year_column {
        return year_cell(display, &cfg.table.active_marker);
    }
    if column == ROLE_COLUMN {
        let raw = display.fields.get(column).map(String::as_str).unwrap_or("");
        return roles::clean_role(raw);
    }
    display.fields.get(column).cloned().unwrap_or_default()
}

fn year_cell(display: &DisplayRecord, marker: &str) -> String {
    match display.year {
        Some(year) if display.active => format!("{marker} {year}"),
        Some(year) => year.to_string(),
        None => MISSING_YEAR_CELL.to_string(),
    }
}

fn summarize(displays: &[DisplayRecord]) -> TableMetrics {
    let years: Vec<i32> = displays.iter().filter_map(|d| d.year).collect();
    let year_range = match (years.iter().min(), years.iter().max()) {
        (Some(&min), Some(&max)) => Some((min, max)),
        _ => None,
    };

    TableMetrics {
        unique_projects: displays.len(),
        active_in_year: displays.iter().filter(|d| d.active).count(),
        year_range,
        multi_year_projects: displays.iter().filter(|d| d.span.contains('-')).count(),
    }
}

/// Plain-text rendering with padded columns; the active marker already
/// sits inside the year cell.
pub fn render(table: &DisplayTable) -> String {
    let mut widths: Vec<usize> = table.headers.iter().map(String::len).collect();
    for row in &table.rows {
        for (i, cell) in row.cells.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let mut out = String::new();
    push_row(&mut out, &table.headers, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &rule, &widths);
    for row in &table.rows {
        push_row(&mut out, &row.cells, &widths);
    }
    out
}

fn push_row<S: AsRef<str>>(out: &mut String, cells: &[S], widths: &[usize]) {
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        let cell = cell.as_ref();
        line.push_str(cell);
        let width = widths.get(i).copied().unwrap_or(0);
        for _ in cell.chars().count()..width {
            line.push(' ');
        }
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::{build, render};
    use crate::dash::config::DashConfig;
    use crate::dash::dedupe::SortKey;
    use crate::dash::expand::expand;
    use crate::dash::record::ProjectRecord;
    use std::collections::BTreeMap;

    fn source() -> Vec<ProjectRecord> {
        let fields = |role: &str, scope: &str| {
            BTreeMap::from([
                ("Role".to_string(), role.to_string()),
                ("Scope_of_work".to_string(), scope.to_string()),
            ])
        };
        vec![
            ProjectRecord {
                name: "Bridge A".to_string(),
                start_year: Some(2018),
                duration_months: Some(30.0),
                fields: fields("senior civil engineer", "structural design"),
            },
            ProjectRecord {
                name: "Plaza".to_string(),
                start_year: Some(2021),
                duration_months: None,
                fields: fields("wizard", "landscaping"),
            },
        ]
    }

    fn columns() -> Vec<String> {
        ["Project_Name", "Year", "Role", "Scope_of_work"]
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn table_dedupes_and_marks_the_active_project() {
        let expanded = expand(&source());
        let table = build(
            &expanded,
            &columns(),
            &DashConfig::default(),
            2019,
            SortKey::default(),
        );

        assert_eq!(table.rows.len(), 2);
        let bridge = &table.rows[0];
        assert_eq!(bridge.project, "Bridge A");
        assert!(bridge.active);
        assert_eq!(bridge.cells[1], "* 2018");

        let plaza = &table.rows[1];
        assert!(!plaza.active);
        assert_eq!(plaza.cells[1], "2021");
    }

    #[test]
    fn scope_header_is_renamed_and_roles_cleaned() {
        let expanded = expand(&source());
        let table = build(
            &expanded,
            &columns(),
            &DashConfig::default(),
            2019,
            SortKey::default(),
        );

        assert_eq!(table.headers, vec!["Project_Name", "Year", "Role", "Scope"]);
        assert_eq!(table.rows[0].cells[2], "Civil Engineer");
        assert_eq!(table.rows[1].cells[2], "Other");
    }

    #[test]
    fn metrics_count_active_and_multi_year_projects() {
        let expanded = expand(&source());
        let table = build(
            &expanded,
            &columns(),
            &DashConfig::default(),
            2019,
            SortKey::default(),
        );

        assert_eq!(table.metrics.unique_projects, 2);
        assert_eq!(table.metrics.active_in_year, 1);
        assert_eq!(table.metrics.year_range, Some((2018, 2021)));
        assert_eq!(table.metrics.multi_year_projects, 1);
    }

    #[test]
    fn absent_columns_are_projected_away() {
        let expanded = expand(&source());
        let present = vec!["Project_Name".to_string(), "Year".to_string()];
        let table = build(
            &expanded,
            &present,
            &DashConfig::default(),
            2019,
            SortKey::default(),
        );
        assert_eq!(table.headers, vec!["Project_Name", "Year"]);
    }

    #[test]
    fn render_emits_a_header_rule_and_rows() {
        let expanded = expand(&source());
        let table = build(
            &expanded,
            &columns(),
            &DashConfig::default(),
            2019,
            SortKey::default(),
        );
        let text = render(&table);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines.len() >= 4);
        assert!(lines[0].starts_with("Project_Name"));
        assert!(lines[1].starts_with("---"));
        assert!(text.contains("Bridge A"));
    }
}
