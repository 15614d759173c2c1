use chrono::NaiveDateTime;
use std::{fs, io, path::Path};

const FOLDER_DATE_FORMAT: &str = "%Y-%m-%d";

pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == extension)
        .unwrap_or(false)
}

pub fn date_folder_name(taken: &NaiveDateTime) -> String {
    taken.format(FOLDER_DATE_FORMAT).to_string()
}

/// Creates `path` unless a directory is already there. Anything else occupying
/// the name is an error.
pub fn create_dir_if_not_exists(path: &Path) -> io::Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    match fs::create_dir(path) {
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
        other => other,
    }
}
