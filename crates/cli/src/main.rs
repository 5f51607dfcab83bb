//! go-mockgen CLI: generate a mock for a Go interface declared in a directory.
//!
//! Calls `mockgen-core` directly; all extraction and rendering lives there.

use clap::Parser;
use std::path::PathBuf;
use tracing::error;

use mockgen_core::load_mockgen_config;
use mockgen_core::scan::{find_interface_in_dir, generate_mock_in_dir, ScanError};

/// Generate a mock struct with swappable function fields for a Go interface.
#[derive(Parser, Debug)]
#[command(name = "go-mockgen", version, about)]
struct Cli {
    /// Name of the interface type to mock
    #[arg(long = "type", value_name = "NAME")]
    type_name: String,

    /// File to write the mock to (default: <type>_mock.go inside --dir)
    #[arg(short = 'o', long = "out", value_name = "PATH")]
    out: Option<PathBuf>,

    /// Directory to search for the interface (default: current directory)
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Print the extracted interface as JSON instead of writing a mock
    #[arg(long)]
    json: bool,

    /// Log extraction details
    #[arg(short, long)]
    verbose: bool,
}

/// Run one invocation, returning the line to report on success.
fn run(cli: &Cli) -> Result<String, ScanError> {
    let dir = cli.dir.clone().unwrap_or_else(|| PathBuf::from("."));
    let config = load_mockgen_config(&dir);

    if cli.json {
        let found = find_interface_in_dir(&dir, &cli.type_name, &config)?;
        let report = serde_json::json!({
            "file": found.path.display().to_string(),
            "interface": cli.type_name,
            "type_data": found.data,
        });
        return Ok(serde_json::to_string_pretty(&report).unwrap_or_else(|_| report.to_string()));
    }

    let mock = generate_mock_in_dir(&dir, &cli.type_name, &config, cli.out.as_deref())?;
    Ok(format!(
        "Wrote {} ({} methods, {} embeds) from {}",
        mock.output_path.display(),
        mock.data.methods.len(),
        mock.data.embeds.len(),
        mock.source_path.display()
    ))
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "mockgen=debug" } else { "mockgen=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(level.parse().expect("static directive parses")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(report) if cli.json => println!("{report}"),
        Ok(report) => eprintln!("{report}"),
        Err(e) => {
            error!(interface = cli.type_name.as_str(), error = %e, "Could not generate mock");
            std::process::exit(1);
        }
    }
}
