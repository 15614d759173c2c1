use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use std::{
    io,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use crate::error::{MetadataError, ProbeError};

const CAPTURE_TIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";
const CAPTURE_TIME_TAG: &str = "-DateTimeOriginal";

/// Anything that can tell when a photo was taken.
pub trait TimestampSource {
    /// Returns `None` when the capture time is missing or cannot be read.
    fn read_capture_time(&self, path: &Path) -> Option<NaiveDateTime>;
}

/// Reads `DateTimeOriginal` by running exiftool once per file.
#[derive(Debug, Clone)]
pub struct ExifTool {
    program: PathBuf,
}

impl ExifTool {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Runs `exiftool -ver` and returns the reported version.
    pub fn probe(&self) -> Result<String, ProbeError> {
        let output = Command::new(&self.program)
            .arg("-ver")
            .stdin(Stdio::null())
            .output()
            .map_err(|source| match source.kind() {
                io::ErrorKind::NotFound => ProbeError::NotFound {
                    program: self.program.clone(),
                },
                _ => ProbeError::Failed {
                    program: self.program.clone(),
                    source,
                },
            })?;

        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        debug!("{} version: {}", self.program.display(), version);
        Ok(version)
    }

    fn capture_time(&self, path: &Path) -> Result<NaiveDateTime, MetadataError> {
        let output = Command::new(&self.program)
            .args([CAPTURE_TIME_TAG, "-d", CAPTURE_TIME_FORMAT])
            .arg(path)
            .stdin(Stdio::null())
            .output()
            .map_err(MetadataError::Spawn)?;

        if !output.status.success() {
            return Err(MetadataError::ExitStatus(output.status));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        debug!("exiftool output for {}: {:?}", path.display(), stdout.trim_end());
        parse_capture_line(&stdout)
    }
}

impl TimestampSource for ExifTool {
    fn read_capture_time(&self, path: &Path) -> Option<NaiveDateTime> {
        match self.capture_time(path) {
            Ok(taken) => {
                debug!("Original photo date: {}", taken);
                Some(taken)
            },
            Err(e) => {
                debug!("Error reading EXIF data from {}: {}", path.display(), e);
                None
            },
        }
    }
}

/// Parses the first `Label : value` line printed by the metadata tool.
pub fn parse_capture_line(stdout: &str) -> Result<NaiveDateTime, MetadataError> {
    // Date/Time Original              : 2023:05:14 10:22:00
    static LINE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^(?P<label>[^:]+?)\s*:\s+(?P<value>.*\S)\s*$").unwrap());

    let line = stdout
        .lines()
        .find(|l| !l.trim().is_empty())
        .ok_or(MetadataError::EmptyOutput)?;

    let value = LINE
        .captures(line)
        .and_then(|c| c.name("value"))
        .map(|m| m.as_str())
        .ok_or_else(|| MetadataError::MalformedLine(line.to_string()))?;

    NaiveDateTime::parse_from_str(value, CAPTURE_TIME_FORMAT).map_err(|source| MetadataError::BadTimestamp {
        value: value.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, s).unwrap()
    }

    #[test]
    fn parses_exiftool_line() {
        let out = "Date/Time Original              : 2023:05:14 10:22:00\n";
        assert_eq!(parse_capture_line(out).unwrap(), at(2023, 5, 14, 10, 22, 0));
    }

    #[test]
    fn ignores_leading_blank_lines_and_trailing_space() {
        let out = "\n\nDate/Time Original : 2021:12:31 23:59:58  \r\n";
        assert_eq!(parse_capture_line(out).unwrap(), at(2021, 12, 31, 23, 59, 58));
    }

    #[test]
    fn empty_output_is_unavailable() {
        assert!(matches!(parse_capture_line(""), Err(MetadataError::EmptyOutput)));
        assert!(matches!(parse_capture_line("  \n"), Err(MetadataError::EmptyOutput)));
    }

    #[test]
    fn line_without_label_is_malformed() {
        let err = parse_capture_line("2023:05:14 10:22:00\n").unwrap_err();
        assert!(matches!(err, MetadataError::MalformedLine(_)));
    }

    #[test]
    fn unparseable_value_is_rejected() {
        for out in [
            "Date/Time Original : 0000:00:00 00:00:00",
            "Date/Time Original : 14.05.2023 10.22",
            "Warning : [minor] Bad format",
        ] {
            let err = parse_capture_line(out).unwrap_err();
            assert!(matches!(err, MetadataError::BadTimestamp { .. }), "{out}");
        }
    }

    #[test]
    fn missing_program_reads_as_unavailable() {
        let tool = ExifTool::new("/nonexistent/exiftool-for-tests");
        assert_eq!(tool.read_capture_time(Path::new("IMG_1.DNG")), None);
        assert!(matches!(tool.probe(), Err(ProbeError::NotFound { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn silent_successful_run_reads_as_unavailable() {
        // `true` exits 0 and prints nothing, like exiftool on a file without the tag.
        let tool = ExifTool::new("true");
        assert_eq!(tool.read_capture_time(Path::new("IMG_1.DNG")), None);
    }

    #[cfg(unix)]
    #[test]
    fn failing_run_reads_as_unavailable() {
        let tool = ExifTool::new("false");
        assert_eq!(tool.read_capture_time(Path::new("IMG_1.DNG")), None);
    }
}
