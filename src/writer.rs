//! Source file writer
//!
//! Files land at `<output_dir>/<package as path>/<file_name>`. The output
//! root has to exist already; package directories below it are created.
//! Contents go to a temporary file in the target directory first and are
//! renamed into place, so a failed write never leaves a partial file.

use crate::error::Result;
use crate::util::package_to_path;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Write `contents` for `package` below `output_dir`, returning the path
pub fn write_source(
    output_dir: &Path,
    package: &str,
    file_name: &str,
    contents: &str,
) -> Result<PathBuf> {
    if !output_dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("output directory {} does not exist", output_dir.display()),
        )
        .into());
    }

    let dir = output_dir.join(package_to_path(package));
    std::fs::create_dir_all(&dir)?;
    let path = dir.join(file_name);

    let mut tmp = NamedTempFile::new_in(&dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.flush()?;
    debug!(tmp = %tmp.path().display(), "staged source file");
    tmp.persist(&path).map_err(|e| e.error)?;

    info!(path = %path.display(), "wrote");
    Ok(path)
}
