use anyhow::Result;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct DashPaths {
    pub dash_home: PathBuf,
    pub config_file: PathBuf,
    pub data_file: PathBuf,
}

fn required_home_dir() -> Result<PathBuf> {
    if let Some(home) = dirs::home_dir() {
        return Ok(home);
    }
    Err(anyhow::anyhow!("HOME directory could not be resolved"))
}

fn env_or_default_path(var: &str, fallback: PathBuf) -> PathBuf {
    match env::var(var) {
        Ok(v) if !v.trim().is_empty() => PathBuf::from(v.trim()),
        _ => fallback,
    }
}

pub fn resolve_paths() -> Result<DashPaths> {
    let home = required_home_dir()?;
    let dash_home = env_or_default_path("PROJDASH_HOME", home.join(".projdash"));

    let config_file = env_or_default_path("PROJDASH_CONFIG_PATH", dash_home.join("config.toml"));
    let data_file = env_or_default_path("PROJDASH_DATA_PATH", dash_home.join("data.csv"));

    Ok(DashPaths {
        dash_home,
        config_file,
        data_file,
    })
}
