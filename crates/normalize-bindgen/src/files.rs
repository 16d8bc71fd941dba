//! Writing binding units to disk.

use std::fs;
use std::path::{Path, PathBuf};

use crate::options::BindgenOptions;

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error(transparent)]
    Translate(#[from] crate::Error),
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Translate `source` and write one file per namespace into `out_dir`.
///
/// Files are named after their namespace. Nothing is written unless the
/// whole document translates. Returns the written paths in namespace order.
pub fn write_bindings(
    source: &str,
    out_dir: &Path,
    options: &BindgenOptions,
) -> Result<Vec<PathBuf>, WriteError> {
    let units = crate::generate(source, options)?;
    fs::create_dir_all(out_dir).map_err(|source| WriteError::Io {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(units.len());
    for unit in units {
        let path = out_dir.join(unit.file_name(&options.extension));
        fs::write(&path, format!("{}\n", unit.code)).map_err(|source| WriteError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), "wrote bindings");
        written.push(path);
    }
    Ok(written)
}
