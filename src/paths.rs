use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DB_ENV_VAR: &str = "SHOWTRACK_DB";

/// Resolves the catalog database: explicit flag, then `SHOWTRACK_DB`, then the
/// platform data directory.
pub fn database_file_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    if let Ok(custom) = env::var(DB_ENV_VAR)
        && !custom.trim().is_empty()
    {
        return Ok(PathBuf::from(custom));
    }

    let base = dirs::data_dir().context("unable to resolve data directory")?;
    Ok(base.join("showtrack").join("showtrack.db"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_wins() {
        let path = database_file_path(Some(PathBuf::from("/tmp/custom.db")))
            .expect("explicit path should resolve");
        assert_eq!(path, PathBuf::from("/tmp/custom.db"));
    }
}
