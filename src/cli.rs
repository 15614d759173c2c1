use clap::{Parser, ValueEnum};
use std::{fmt, path::PathBuf};

use crate::file_organizer::OrganizerConfig;

/// What to do when the date folder already holds a file with the same name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ConflictPolicy {
    /// Leave the source file where it is.
    #[default]
    Skip,
    /// Replace the file already in the date folder.
    Overwrite,
}

impl fmt::Display for ConflictPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictPolicy::Skip => write!(f, "skip"),
            ConflictPolicy::Overwrite => write!(f, "overwrite"),
        }
    }
}

/// Organize photo files into YYYY-MM-DD folders by their original capture time.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Conf {
    /// Directory containing the photo files to organize
    pub source_dir: PathBuf,

    /// Enable debug output
    #[arg(long, default_value_t = false)]
    pub debug: bool,

    /// File extension to organize, without the dot (matched case-sensitively)
    #[arg(long, env = "PHOTO_ORGANIZER_EXTENSION", default_value = "DNG")]
    pub extension: String,

    /// Metadata tool to run
    #[arg(long, env = "PHOTO_ORGANIZER_EXIFTOOL", default_value = "exiftool")]
    pub exiftool: PathBuf,

    #[arg(long, default_value_t = ConflictPolicy::Skip)]
    pub on_conflict: ConflictPolicy,
}

impl Conf {
    pub fn organizer_config(&self) -> OrganizerConfig {
        OrganizerConfig {
            extension: self.extension.trim_start_matches('.').to_string(),
            on_conflict: self.on_conflict,
        }
    }
}

impl fmt::Display for Conf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source_dir.display())
    }
}
