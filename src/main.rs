use clap::Parser;
use nes_test_manifest::log_processor::{self, ConvertError};
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Convert {
    /// Path to the text log of expected test-ROM results
    log: PathBuf,

    /// Destination path for the JSON manifest
    manifest: PathBuf,

    /// Memory address the runner samples for the status byte
    output_addr: Option<String>,
}

fn convert(args: Convert) -> Result<(), ConvertError> {
    log_processor::process_log_file(&args.log, &args.manifest, args.output_addr.as_deref())?;
    println!("Wrote {}", args.manifest.display());
    Ok(())
}

fn main() {
    if let Err(e) = convert(Convert::parse()) {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}
