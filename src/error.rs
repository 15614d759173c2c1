use std::{io, path::PathBuf};

/// Reasons a capture time could not be read. Never escapes the reader.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("failed to run metadata tool: {0}")]
    Spawn(#[source] io::Error),

    #[error("metadata tool exited with {0}")]
    ExitStatus(std::process::ExitStatus),

    #[error("metadata tool printed nothing")]
    EmptyOutput,

    #[error("unexpected metadata line: {0:?}")]
    MalformedLine(String),

    #[error("invalid capture time {value:?}: {source}")]
    BadTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("'{program}' was not found")]
    NotFound { program: PathBuf },

    #[error("failed to run '{program}': {source}")]
    Failed {
        program: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum OrganizeError {
    #[error("Directory '{}' does not exist.", .0.display())]
    SourceMissing(PathBuf),

    #[error("failed to list '{}': {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create folder '{}': {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to move '{}' to '{}': {source}", from.display(), to.display())]
    Move {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}
