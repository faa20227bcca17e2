use anyhow::Result;
use serde_json::json;
use std::path::PathBuf;

use crate::dash::config::load_config;
use crate::dash::dedupe::SortKey;
use crate::dash::expand::expand;
use crate::dash::filter::{self, FilterMode, FilterSpec};
use crate::dash::paths::resolve_paths;
use crate::dash::{dataset, table};
use crate::error::DashError;

#[derive(Debug, Clone, Default)]
pub struct TableOptions {
    pub data: Option<PathBuf>,
    pub query_year: Option<i32>,
    pub years: Vec<i32>,
    pub industries: Vec<String>,
    pub categories: Vec<String>,
    pub roles: Vec<String>,
    pub mode: FilterMode,
    pub sort_by: Option<SortKey>,
    pub json: bool,
}

pub fn run(opts: &TableOptions) -> Result<()> {
    let paths = resolve_paths()?;
    let cfg = load_config()?;
    let data_file = opts.data.clone().unwrap_or(paths.data_file);

    let ds = dataset::load(&data_file, &cfg.dataset)?;
    let expanded = expand(&ds.records);
    let all_years = filter::dataset_years(&expanded);

    // The dashboard slider defaults to the latest year on file.
    let query_year = match opts.query_year {
        Some(year) => year,
        None => *all_years.iter().next_back().ok_or(DashError::NoUsableYears)?,
    };

    let final_years = filter::resolve_years(&opts.years, &all_years, query_year, opts.mode);
    let spec = FilterSpec {
        years: Some(final_years),
        industries: opts.industries.clone(),
        categories: opts.categories.clone(),
        roles: opts.roles.clone(),
    };
    let working = filter::apply(&expanded, &spec);

    let sort_key = match opts.sort_by {
        Some(key) => key,
        None => cfg.table.sort_by.parse().map_err(anyhow::Error::msg)?,
    };
    let display = table::build(&working, &ds.columns, &cfg, query_year, sort_key);

    if opts.json {
        let payload = json!({
            "query_year": query_year,
            "table": display,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    print!("{}", table::render(&display));
    let metrics = &display.metrics;
    println!();
    println!("unique projects: {}", metrics.unique_projects);
    println!("active in {query_year}: {}", metrics.active_in_year);
    if let Some((min, max)) = metrics.year_range {
        println!("project year range: {min}-{max}");
    }
    println!("multi-year projects: {}", metrics.multi_year_projects);

    Ok(())
}
