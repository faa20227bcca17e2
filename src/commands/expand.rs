use anyhow::Result;
use std::path::PathBuf;

use crate::dash::config::load_config;
use crate::dash::expand::expand;
use crate::dash::paths::resolve_paths;
use crate::dash::record::ExpandedRecord;
use crate::dash::{dataset, span};

#[derive(Debug, Clone, Default)]
pub struct ExpandOptions {
    pub data: Option<PathBuf>,
    pub active_year: Option<i32>,
}

/// Dump the pre-dedup expanded working set as JSON, the shape the map and
/// gallery views consume. With `--active-year` only the records active in
/// that year are kept.
pub fn run(opts: &ExpandOptions) -> Result<()> {
    let paths = resolve_paths()?;
    let cfg = load_config()?;
    let data_file = opts.data.clone().unwrap_or(paths.data_file);

    let ds = dataset::load(&data_file, &cfg.dataset)?;
    let expanded = expand(&ds.records);

    let selected: Vec<&ExpandedRecord> = match opts.active_year {
        Some(year) => expanded
            .iter()
            .filter(|rec| span::is_active(rec, year))
            .collect(),
        None => expanded.iter().collect(),
    };

    println!("{}", serde_json::to_string_pretty(&selected)?);
    Ok(())
}
