use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use tempfile::{Builder, NamedTempFile};

use crate::record::ItemRecord;

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Written(PathBuf),
    /// Nothing to write; the destination was left alone.
    NoData,
}

/// Write `records` as CSV to `destination`, replacing whatever was there.
///
/// Rows go to a temporary file next to `destination` which is then renamed over it, so a failed
/// write leaves the previous file (or no file) in place.
pub fn write(records: &[ItemRecord], destination: &Path) -> anyhow::Result<Outcome> {
    if records.is_empty() {
        return Ok(Outcome::NoData);
    }

    let dir = match destination.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let tmp = temp_sibling(dir, destination)
        .with_context(|| format!("failed to create temporary file in {}", dir.display()))?;
    {
        let mut w = csv::Writer::from_writer(tmp.as_file());
        for r in records {
            w.serialize(r)?;
        }
        w.flush()?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(destination)
        .map_err(|e| e.error)
        .with_context(|| format!("failed to replace {}", destination.display()))?;

    tracing::info!(path = %destination.display(), rows = records.len(), "wrote csv");
    Ok(Outcome::Written(destination.to_path_buf()))
}

/// Temp file in `dir` carrying the mode the destination will end up with: the existing file's
/// permissions when there is one, else the umask default a plain create would give.
fn temp_sibling(dir: &Path, destination: &Path) -> std::io::Result<NamedTempFile> {
    let mut builder = Builder::new();
    builder.prefix(".journey-scrape");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let tmp = builder.tempfile_in(dir)?;
    if let Ok(meta) = fs::metadata(destination) {
        tmp.as_file().set_permissions(meta.permissions())?;
    }
    Ok(tmp)
}
