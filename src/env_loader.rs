use std::env;
use std::path::PathBuf;

fn fallback_dotenv_path(dash_home: Option<PathBuf>, home_dir: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(base) = dash_home {
        return Some(base.join(".env"));
    }
    Some(home_dir?.join(".projdash/.env"))
}

pub fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    let fallback = fallback_dotenv_path(
        env::var_os("PROJDASH_HOME").map(PathBuf::from),
        dirs::home_dir(),
    );

    let Some(path) = fallback else {
        return;
    };
    if path.is_file() {
        let _ = dotenvy::from_path(&path);
    }
}
