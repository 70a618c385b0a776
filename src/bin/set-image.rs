//! set-image - KRM function entry point
//!
//! Reads a ResourceList, rewrites image references according to its function
//! config and writes the ResourceList back with results attached.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use log::debug;

use set_image::{process, Error, ResourceList, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Yaml,
    Json,
}

/// Rewrite container image references in a KRM ResourceList
#[derive(Parser, Debug)]
#[command(name = "set-image", version, about, long_about = None)]
struct Cli {
    /// ResourceList file to read. Use '-' or omit for stdin
    input: Option<PathBuf>,

    /// Output location. Use '-' for stdout
    #[arg(short, long, default_value = "-")]
    output: String,

    /// Output encoding
    #[arg(long, value_enum, default_value_t = Format::Yaml)]
    format: Format,

    /// Log level when RUST_LOG is not set (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .target(env_logger::Target::Stderr)
        .init();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    let input = read_input(cli.input.as_ref())?;
    let mut list = ResourceList::from_yaml(&input)?;
    debug!("read {} item(s)", list.items.len());

    let succeeded = process(&mut list);

    let rendered = match cli.format {
        Format::Yaml => list.to_yaml()?,
        Format::Json => list.to_json()? + "\n",
    };
    write_output(&cli.output, &rendered)?;

    Ok(succeeded && list.results.exit_code() == 0)
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
            .map_err(|e| Error::io(format!("failed to read {:?}", path), e)),
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| Error::io("failed to read stdin", e))?;
            Ok(buf)
        }
    }
}

fn write_output(output: &str, content: &str) -> Result<()> {
    if output == "-" {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(content.as_bytes())
            .map_err(|e| Error::io("failed to write stdout", e))?;
        return Ok(());
    }
    fs::write(output, content).map_err(|e| Error::io(format!("failed to write {:?}", output), e))
}
