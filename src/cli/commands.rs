pub mod accounts;
pub mod cards;
pub mod contracts;
pub mod documents;
pub mod excel;
pub mod fiscal_years;
pub mod journal;
pub mod reports;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::api_client::Download;

/// Writes a downloaded file to `output`, or to its served name in the
/// working directory, falling back to `fallback`.
pub(crate) async fn save_download(download: Download, output: Option<PathBuf>, fallback: &str) -> Result<PathBuf> {
    let path = output.unwrap_or_else(|| served_path(download.file_name.as_deref(), fallback));
    tokio::fs::write(&path, &download.bytes)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Saved {} bytes to {}", download.bytes.len(), path.display());
    println!("Saved {}", path.display());
    Ok(path)
}

/// Final component of the served name; directory parts are discarded.
fn served_path(served: Option<&str>, fallback: &str) -> PathBuf {
    let name = served
        .and_then(|name| Path::new(name).file_name())
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| fallback.into());
    PathBuf::from(name)
}

/// Shortens `text` to `width` characters for table columns.
pub(crate) fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut clipped: String = text.chars().take(width.saturating_sub(1)).collect();
        clipped.push('…');
        clipped
    }
}
