use anyhow::Result;

use crate::commands::CommandReport;
use crate::dash::config::load_config;
use crate::dash::dataset;
use crate::dash::paths::resolve_paths;

pub fn run() -> Result<CommandReport> {
    let paths = resolve_paths()?;
    let cfg = load_config()?;
    let mut report = CommandReport::new("status");

    report.detail(format!("build={}", env!("BUILD_UUID")));
    report.detail(format!("dash_home={}", paths.dash_home.display()));
    report.detail(format!("config_file={}", paths.config_file.display()));
    report.detail(format!("data_file={}", paths.data_file.display()));
    report.detail(format!("name_column={}", cfg.dataset.name_column));
    report.detail(format!("year_column={}", cfg.dataset.year_column));
    report.detail(format!(
        "duration_aliases={}",
        cfg.dataset.duration_aliases.join(",")
    ));
    report.detail(format!(
        "visibility_column={}",
        cfg.dataset.visibility_column
    ));
    report.detail(format!("table_sort_by={}", cfg.table.sort_by));

    if !paths.data_file.exists() {
        report.issue("missing dataset file (~/.projdash/data.csv or PROJDASH_DATA_PATH)");
        return Ok(report);
    }

    match dataset::load(&paths.data_file, &cfg.dataset) {
        Ok(ds) => {
            report.detail(format!("dataset_rows={}", ds.records.len()));
            report.detail(format!("dataset_columns={}", ds.columns.len()));
            report.detail(format!(
                "duration_column={}",
                ds.duration_column.as_deref().unwrap_or("(none)")
            ));
        }
        Err(err) => report.issue(format!("dataset unreadable: {err:#}")),
    }

    Ok(report)
}
