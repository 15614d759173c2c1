mod cli;
mod error;
mod file_organizer;
mod logging;
mod metadata_handler;
mod utilities;

use clap::Parser;
use std::process::ExitCode;
use tracing::debug;

use crate::{
    cli::Conf,
    error::ProbeError,
    file_organizer::Organizer,
    metadata_handler::ExifTool,
};

fn main() -> ExitCode {
    let conf = Conf::parse();
    logging::init_logger(conf.debug);
    debug!("{:?}", conf);

    let exiftool = ExifTool::new(&conf.exiftool);
    if let Err(e) = exiftool.probe() {
        report_missing_tool(&e);
        return ExitCode::FAILURE;
    }

    if !conf.source_dir.exists() {
        eprintln!("Error: Directory '{}' does not exist.", conf);
        return ExitCode::FAILURE;
    }

    match Organizer::new(exiftool, conf.organizer_config()).organize(&conf.source_dir) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        },
    }
}

fn report_missing_tool(e: &ProbeError) {
    match e {
        ProbeError::NotFound { .. } => {
            eprintln!("Error: exiftool is not installed. Please install it first:");
            eprintln!("  macOS: brew install exiftool");
            eprintln!("  Linux: sudo apt-get install exiftool");
            eprintln!("  Windows: Download from https://exiftool.org");
        },
        ProbeError::Failed { .. } => eprintln!("Error: {}", e),
    }
}
