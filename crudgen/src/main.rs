use std::path::PathBuf;
use std::process;

use clap::Parser;
use crudgen::{Generator, OUTPUT_FILENAME};

#[derive(Parser)]
#[command(name = "crudgen")]
#[command(version)]
#[command(about = "Generate data-access boilerplate for #[crud]-annotated structs")]
struct Cli {
    /// Directory containing the package to scan.
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Filename of the generated artifact, written inside the scanned
    /// directory.
    #[arg(long, default_value = OUTPUT_FILENAME)]
    output_file: String,

    /// Rust path generated code uses to reach the runtime crate.
    #[arg(long, default_value = "crud")]
    runtime_crate: String,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let result = Generator::new()
        .scan_path(cli.path)
        .output_filename(cli.output_file)
        .runtime_crate(cli.runtime_crate)
        .run();

    match result {
        Ok(report) => {
            if report.written {
                eprintln!(
                    "crudgen: generated {} with {} structs (package `{}`)",
                    report.output.display(),
                    report.structs_rendered,
                    report.package
                );
            } else {
                eprintln!("crudgen: {} already up to date", report.output.display());
            }
        }
        Err(err) => {
            eprintln!("Error: {err}");
            process::exit(1);
        }
    }
}
