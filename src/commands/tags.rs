use anyhow::Result;
use std::path::PathBuf;

use crate::dash::config::load_config;
use crate::dash::expand::expand;
use crate::dash::paths::resolve_paths;
use crate::dash::{dataset, filter, tags};
use crate::error::DashError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagColumn {
    Skills,
    Software,
}

#[derive(Debug, Clone)]
pub struct TagsOptions {
    pub data: Option<PathBuf>,
    pub column: TagColumn,
    pub query_year: Option<i32>,
    pub json: bool,
}

pub fn run(opts: &TagsOptions) -> Result<()> {
    let paths = resolve_paths()?;
    let cfg = load_config()?;
    let data_file = opts.data.clone().unwrap_or(paths.data_file);

    let ds = dataset::load(&data_file, &cfg.dataset)?;
    let expanded = expand(&ds.records);
    let all_years = filter::dataset_years(&expanded);

    let query_year = match opts.query_year {
        Some(year) => year,
        None => *all_years.iter().next_back().ok_or(DashError::NoUsableYears)?,
    };

    let column = match opts.column {
        TagColumn::Skills => &cfg.tags.skills_column,
        TagColumn::Software => &cfg.tags.software_column,
    };
    let summaries = tags::collect(&expanded, column, query_year);

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    for tag in &summaries {
        let marker = if tag.active { " active" } else { "" };
        println!(
            "{} {} projects={}{marker}",
            tag.color_hex, tag.label, tag.projects
        );
    }
    Ok(())
}
