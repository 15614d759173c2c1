use tracing::{debug, info, warn};

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{cli::ConflictPolicy, error::OrganizeError, metadata_handler::TimestampSource, utilities::*};

#[derive(Debug, Clone)]
pub struct OrganizerConfig {
    /// Extension without the leading dot, compared case-sensitively.
    pub extension: String,
    pub on_conflict: ConflictPolicy,
}

impl Default for OrganizerConfig {
    fn default() -> Self {
        Self {
            extension: "DNG".to_string(),
            on_conflict: ConflictPolicy::Skip,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum FileOutcome {
    Moved(PathBuf),
    NoCaptureTime,
    Conflict(PathBuf),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub moved: usize,
    pub skipped: usize,
    pub failed: usize,
}

pub struct Organizer<S> {
    source: S,
    config: OrganizerConfig,
}

impl<S: TimestampSource> Organizer<S> {
    pub fn new(source: S, config: OrganizerConfig) -> Self {
        Self { source, config }
    }

    /// Moves every candidate in `source_dir` into a `YYYY-MM-DD` folder next to it.
    /// Per-file failures are logged and counted, never returned.
    pub fn organize(&self, source_dir: &Path) -> Result<RunSummary, OrganizeError> {
        if !source_dir.exists() {
            return Err(OrganizeError::SourceMissing(source_dir.to_path_buf()));
        }
        if !source_dir.is_dir() {
            warn!("{} is not a directory, nothing to organize", source_dir.display());
            return Ok(RunSummary::default());
        }

        debug!("Processing directory: {}", source_dir.display());

        let mut summary = RunSummary::default();
        for path in self.candidates(source_dir)? {
            match self.organize_file(source_dir, &path) {
                Ok(FileOutcome::Moved(to)) => {
                    debug!("Moved to {}", to.display());
                    summary.moved += 1;
                },
                Ok(FileOutcome::Conflict(existing)) => {
                    warn!("{} already exists, leaving {} in place", existing.display(), path.display());
                    summary.skipped += 1;
                },
                Ok(FileOutcome::NoCaptureTime) => summary.skipped += 1,
                Err(e) => {
                    warn!("{}", e);
                    summary.failed += 1;
                },
            }
        }

        info!(
            "Finished {}: {} moved, {} skipped, {} failed",
            source_dir.display(),
            summary.moved,
            summary.skipped,
            summary.failed
        );
        Ok(summary)
    }

    /// Root-level regular files carrying the configured extension, in directory order.
    pub fn candidates(&self, source_dir: &Path) -> Result<Vec<PathBuf>, OrganizeError> {
        let entries = fs::read_dir(source_dir).map_err(|source| OrganizeError::ReadDir {
            path: source_dir.to_path_buf(),
            source,
        })?;

        Ok(entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| has_extension(path, &self.config.extension) && path.is_file())
            .collect())
    }

    pub fn organize_file(&self, source_dir: &Path, path: &Path) -> Result<FileOutcome, OrganizeError> {
        let file_name = match path.file_name() {
            Some(name) => name,
            None => return Ok(FileOutcome::NoCaptureTime),
        };
        debug!("Processing file: {}", file_name.to_string_lossy());

        let taken = match self.source.read_capture_time(path) {
            Some(taken) => taken,
            None => {
                debug!(
                    "Could not get creation date for {}, skipping...",
                    file_name.to_string_lossy()
                );
                return Ok(FileOutcome::NoCaptureTime);
            },
        };

        let folder = date_folder_name(&taken);
        debug!("Folder name will be: {}", folder);

        let target_dir = source_dir.join(&folder);
        create_dir_if_not_exists(&target_dir).map_err(|source| OrganizeError::CreateDir {
            path: target_dir.clone(),
            source,
        })?;

        let target_path = target_dir.join(file_name);
        if target_path.exists() {
            match self.config.on_conflict {
                ConflictPolicy::Skip => return Ok(FileOutcome::Conflict(target_path)),
                ConflictPolicy::Overwrite => {
                    debug!("Overwriting {}", target_path.display());
                },
            }
        }

        debug!("Moving {} to {}/", file_name.to_string_lossy(), folder);
        fs::rename(path, &target_path).map_err(|source| OrganizeError::Move {
            from: path.to_path_buf(),
            to: target_path.clone(),
            source,
        })?;

        Ok(FileOutcome::Moved(target_path))
    }
}
