use std::path::PathBuf;

use clap::Parser;
use libdoxstub::Doxstub;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory containing the generated HTML documentation
    docs: PathBuf,

    /// Directory to write generated stub files to
    #[arg(long, default_value = "stubs")]
    output: PathBuf,

    /// Suppress per-entry progress output
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let summary = Doxstub::new(&cli.docs)
        .with_output_dir(&cli.output)
        .generate_all()?;

    if !cli.quiet {
        println!(
            "generated {} stub(s) in {}",
            summary.generated,
            cli.output.display()
        );
        if !summary.skipped.is_empty() {
            println!("skipped: {}", summary.skipped.join(", "));
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
