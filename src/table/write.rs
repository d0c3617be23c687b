use crate::error::{ConvertError, Result};
use csv::{Terminator, WriterBuilder};
use std::{
    fs,
    io::{self, Write},
    path::Path,
};
use tempfile::NamedTempFile;
use tracing::debug;

use super::{DataRow, HEADER};

/// Serialize the header plus `rows` as `;`-delimited CSV into `out`.
/// Rows end in `\n`; a field is quoted only if it contains `;`, `"` or a newline.
pub fn write_rows<W: Write>(out: W, rows: &[DataRow]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .delimiter(b';')
        .terminator(Terminator::Any(b'\n'))
        .from_writer(out);

    writer.write_record(HEADER)?;
    for row in rows {
        writer.write_record(row.fields())?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Permissions the finished file should carry: those of the file being replaced,
/// or 0644 for a new one. Temp files start out 0600.
fn target_permissions(path: &Path) -> io::Result<Option<fs::Permissions>> {
    match fs::metadata(path) {
        Ok(meta) => Ok(Some(meta.permissions())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(default_permissions()),
        Err(e) => Err(e),
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}

/// Write the table to `path` atomically: to a temp file next to it, then rename over it.
/// If anything fails the temp file is dropped (and deleted) and `path` is left as it was.
pub fn write_csv_atomic(path: &Path, rows: &[DataRow]) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let write_err = |source: io::Error| ConvertError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    debug!(tmp = %tmp.path().display(), "writing csv to temp file");

    write_rows(&mut tmp, rows)?;
    if let Some(perms) = target_permissions(path).map_err(write_err)? {
        tmp.as_file().set_permissions(perms).map_err(write_err)?;
    }
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}
