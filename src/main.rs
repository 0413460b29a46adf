use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use authorized_keys_fixtures::{generate_fixtures, GeneratorConfig};

/// Generate randomized authorized_keys fixtures with ssh-keygen.
///
/// Writes 1000 lines to test_keys.txt in the current directory, using
/// tmpkey and tmpkey.pub as scratch files.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = GeneratorConfig::default();
    generate_fixtures(&config).with_context(|| {
        format!(
            "generating fixtures into '{}'",
            config.output_path.display()
        )
    })?;
    Ok(())
}
