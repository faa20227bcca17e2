use anyhow::Result;
use std::collections::BTreeSet;

use crate::commands::{CommandReport, status};
use crate::dash::config::load_config;
use crate::dash::dedupe::{SortKey, deduplicate};
use crate::dash::expand::expand;
use crate::dash::paths::resolve_paths;
use crate::dash::{dataset, filter};

include!(concat!(env!("OUT_DIR"), "/projdash_env_allowlist.rs"));

#[derive(Debug, Clone, Default)]
pub struct VerifyOptions {
    pub strict: bool,
}

pub fn run(opts: &VerifyOptions) -> Result<CommandReport> {
    let mut report = CommandReport::new("verify");

    check_env_allowlist(&mut report);
    report.merge(status::run()?);
    check_dataset_invariants(&mut report)?;

    if opts.strict && !report.ok {
        report.issue("strict verify failed");
    }

    Ok(report)
}

fn check_env_allowlist(report: &mut CommandReport) {
    for (key, _) in std::env::vars() {
        if key.starts_with("PROJDASH_") && !GENERATED_ENV_ALLOWLIST.contains(&key.as_str()) {
            report.issue(format!("unknown environment variable: {key}"));
        }
    }
}

fn check_dataset_invariants(report: &mut CommandReport) -> Result<()> {
    let paths = resolve_paths()?;
    if !paths.data_file.exists() {
        return Ok(());
    }
    let cfg = load_config()?;
    let Ok(ds) = dataset::load(&paths.data_file, &cfg.dataset) else {
        // Already reported by status.
        return Ok(());
    };

    let expanded = expand(&ds.records);
    let distinct: BTreeSet<&str> = expanded.iter().map(|r| r.name.as_str()).collect();
    let displays = deduplicate(&expanded, SortKey::OriginalYear);

    report.detail(format!("expanded_rows={}", expanded.len()));
    report.detail(format!("distinct_projects={}", distinct.len()));
    report.detail(format!(
        "dataset_years={}",
        filter::dataset_years(&expanded).len()
    ));

    let undated = expanded.iter().filter(|r| r.year.is_none()).count();
    if undated > 0 {
        report.detail(format!("records_without_year={undated}"));
    }

    if displays.len() != distinct.len() {
        report.issue(format!(
            "deduplication drift: {} display rows for {} distinct projects",
            displays.len(),
            distinct.len()
        ));
    }
    if expanded.len() < ds.records.len() {
        report.issue(format!(
            "expansion dropped records: {} in, {} out",
            ds.records.len(),
            expanded.len()
        ));
    }

    Ok(())
}
