use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::data_dir;

pub fn log_path() -> PathBuf {
    data_dir().join("taskcard.log")
}

/// Send logs to a file. The dashboard owns the terminal, so nothing goes to stdout.
pub fn init_to_file(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .context("Failed to install log subscriber")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_lines_land_in_a_new_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("taskcard.log");

        init_to_file(&path).unwrap();
        tracing::info!("card sync started");

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("card sync started"));
        assert!(!contents.contains('\u{1b}'));
    }
}
