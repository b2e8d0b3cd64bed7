use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use super::{PersistError, SaveStore};

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> PersistError + '_ {
    move |source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Write a save store as pretty-printed JSON, creating parent directories.
pub fn write_store(store: &SaveStore, path: &Path) -> Result<(), PersistError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_error(parent))?;
    }
    let mut writer = BufWriter::new(File::create(path).map_err(io_error(path))?);
    serde_json::to_writer_pretty(&mut writer, store).map_err(|source| PersistError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    writer.write_all(b"\n").map_err(io_error(path))?;
    writer.flush().map_err(io_error(path))
}

pub fn read_store(path: &Path) -> Result<SaveStore, PersistError> {
    let reader = BufReader::new(File::open(path).map_err(io_error(path))?);
    serde_json::from_reader(reader).map_err(|source| PersistError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Write serializable items to a JSONL file (one JSON object per line).
pub fn write_jsonl<T: Serialize>(
    path: &Path,
    items: impl Iterator<Item = T>,
) -> Result<(), PersistError> {
    let mut writer = BufWriter::new(File::create(path).map_err(io_error(path))?);
    for item in items {
        serde_json::to_writer(&mut writer, &item).map_err(|source| PersistError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        writer.write_all(b"\n").map_err(io_error(path))?;
    }
    writer.flush().map_err(io_error(path))
}
