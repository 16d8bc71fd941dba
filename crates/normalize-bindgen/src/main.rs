use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use normalize_bindgen::{BindgenOptions, generate, write_bindings};
use tracing_subscriber::EnvFilter;

/// Generate wasm-bindgen bindings from TypeScript declaration files.
#[derive(Parser, Debug)]
#[command(name = "normalize-bindgen", version, about)]
struct Cli {
    /// Declaration file (`.d.ts`) to translate
    input: PathBuf,

    /// Directory for the generated files, one per namespace
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// TOML file with generation options
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print bindings instead of writing files
    #[arg(long)]
    stdout: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let options = match &cli.config {
        Some(path) => BindgenOptions::load(path)?,
        None => BindgenOptions::default(),
    };
    let source = std::fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;

    if cli.stdout {
        let units = generate(&source, &options).map_err(|e| anyhow::anyhow!(e.report()))?;
        for unit in units {
            println!("// {}\n{}\n", unit.name, unit.code);
        }
        return Ok(());
    }

    let written = write_bindings(&source, &cli.out_dir, &options).map_err(|e| match e {
        normalize_bindgen::WriteError::Translate(err) => anyhow::anyhow!(err.report()),
        other => other.into(),
    })?;
    for path in written {
        eprintln!("{}", path.display());
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
