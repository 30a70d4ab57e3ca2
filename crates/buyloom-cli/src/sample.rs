use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use buyloom_core::{SAMPLE_CSV_CONTENT, SAMPLE_FILE_NAME};

/// Write the sample import template to `output`, or to
/// [`SAMPLE_FILE_NAME`] in the working directory. Never overwrites.
pub(crate) fn write_sample(output: Option<&Path>) -> anyhow::Result<PathBuf> {
    let path = output.map_or_else(|| PathBuf::from(SAMPLE_FILE_NAME), Path::to_path_buf);

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .with_context(|| format!("cannot create {}", path.display()))?;
    file.write_all(SAMPLE_CSV_CONTENT.as_bytes())
        .with_context(|| format!("failed to write {}", path.display()))?;

    tracing::info!(path = %path.display(), "sample template written");
    Ok(path)
}
