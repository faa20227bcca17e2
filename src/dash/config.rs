use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub name_column: String,
    pub year_column: String,
    pub duration_aliases: Vec<String>,
    pub visibility_column: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            name_column: "Project_Name".to_string(),
            year_column: "Year".to_string(),
            duration_aliases: vec![
                "Duration_Months".to_string(),
                "Duration".to_string(),
                "Months".to_string(),
                "Project_Duration".to_string(),
            ],
            visibility_column: "show dashboard".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    pub columns: Vec<String>,
    pub active_marker: String,
    pub sort_by: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            columns: vec![
                "Project_Name".to_string(),
                "Year".to_string(),
                "Role".to_string(),
                "Scope_of_work".to_string(),
                "Functions".to_string(),
                "Client_Company".to_string(),
                "Country".to_string(),
            ],
            active_marker: "*".to_string(),
            sort_by: "original-year".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagsConfig {
    pub skills_column: String,
    pub software_column: String,
}

impl Default for TagsConfig {
    fn default() -> Self {
        Self {
            skills_column: "Skills".to_string(),
            software_column: "Software".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DashConfig {
    pub dataset: DatasetConfig,
    pub table: TableConfig,
    pub tags: TagsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PartialDashConfig {
    dataset: Option<DatasetConfig>,
    table: Option<TableConfig>,
    tags: Option<TagsConfig>,
}

fn env_or_string(var: &str, fallback: &str) -> String {
    match env::var(var) {
        Ok(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => fallback.to_string(),
    }
}

fn env_or_csv(var: &str, fallback: &[String]) -> Vec<String> {
    match env::var(var) {
        Ok(v) => {
            let out = v
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToOwned::to_owned)
                .collect::<Vec<_>>();
            if out.is_empty() { fallback.to_vec() } else { out }
        }
        Err(_) => fallback.to_vec(),
    }
}

fn validate(cfg: &DashConfig) -> Result<()> {
    if cfg.dataset.name_column.trim().is_empty() {
        return Err(anyhow!("invalid dataset name column: cannot be empty"));
    }
    if cfg.dataset.year_column.trim().is_empty() {
        return Err(anyhow!("invalid dataset year column: cannot be empty"));
    }
    if cfg.dataset.duration_aliases.is_empty() {
        return Err(anyhow!(
            "invalid dataset duration aliases: need at least one column name"
        ));
    }
    if cfg.table.columns.is_empty() {
        return Err(anyhow!(
            "invalid table columns: need at least one column name"
        ));
    }
    if cfg.table.sort_by != "original-year" && cfg.table.sort_by != "insertion-order" {
        return Err(anyhow!(
            "invalid table sort key: use `original-year` or `insertion-order`"
        ));
    }
    if cfg.tags.skills_column.trim().is_empty() || cfg.tags.software_column.trim().is_empty() {
        return Err(anyhow!("invalid tags columns: cannot be empty"));
    }
    Ok(())
}

fn resolve_config_path() -> Option<PathBuf> {
    if let Ok(custom) = env::var("PROJDASH_CONFIG_PATH") {
        let trimmed = custom.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }

    if let Ok(home) = env::var("PROJDASH_HOME") {
        let trimmed = home.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed).join("config.toml"));
        }
    }

    let home = dirs::home_dir()?;
    Some(home.join(".projdash").join("config.toml"))
}

fn merge_file_config(base: &mut DashConfig) -> Result<()> {
    let Some(path) = resolve_config_path() else {
        return Ok(());
    };
    if !path.exists() {
        return Ok(());
    }

    let raw = fs::read_to_string(&path)?;
    let parsed: PartialDashConfig = toml::from_str(&raw)
        .map_err(|err| anyhow!("failed to parse dashboard config {}: {err}", path.display()))?;
    if let Some(dataset) = parsed.dataset {
        base.dataset = dataset;
    }
    if let Some(table) = parsed.table {
        base.table = table;
    }
    if let Some(tags) = parsed.tags {
        base.tags = tags;
    }
    Ok(())
}

pub fn load_config() -> Result<DashConfig> {
    let mut cfg = DashConfig::default();
    merge_file_config(&mut cfg)?;

    cfg.dataset.name_column = env_or_string("PROJDASH_NAME_COLUMN", &cfg.dataset.name_column);
    cfg.dataset.year_column = env_or_string("PROJDASH_YEAR_COLUMN", &cfg.dataset.year_column);
    cfg.dataset.duration_aliases =
        env_or_csv("PROJDASH_DURATION_ALIASES", &cfg.dataset.duration_aliases);
    cfg.dataset.visibility_column = env_or_string(
        "PROJDASH_VISIBILITY_COLUMN",
        &cfg.dataset.visibility_column,
    );
    cfg.table.columns = env_or_csv("PROJDASH_TABLE_COLUMNS", &cfg.table.columns);
    cfg.table.active_marker = env_or_string("PROJDASH_ACTIVE_MARKER", &cfg.table.active_marker);
    cfg.table.sort_by = env_or_string("PROJDASH_SORT_BY", &cfg.table.sort_by);
    cfg.tags.skills_column = env_or_string("PROJDASH_SKILLS_COLUMN", &cfg.tags.skills_column);
    cfg.tags.software_column = env_or_string("PROJDASH_SOFTWARE_COLUMN", &cfg.tags.software_column);

    validate(&cfg)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::{DashConfig, validate};

    #[test]
    fn default_config_validates() {
        validate(&DashConfig::default()).expect("defaults are valid");
    }

    #[test]
    fn unknown_sort_key_is_rejected() {
        let mut cfg = DashConfig::default();
        cfg.table.sort_by = "newest".to_string();
        assert!(validate(&cfg).is_err());
    }

    #[test]
    fn empty_duration_aliases_are_rejected() {
        let mut cfg = DashConfig::default();
        cfg.dataset.duration_aliases.clear();
        assert!(validate(&cfg).is_err());
    }
}
