use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser as ClapParser;
use strata_core::{LayerStack, StackConfig};
use strata_script::Interpreter;
use tracing_subscriber::EnvFilter;

#[derive(ClapParser, Debug)]
#[command(name = "strata", version, about = "Layered image editor driven by text commands")]
struct Cli {
    /// Script to run. Commands are read interactively from stdin when omitted.
    #[arg(value_name = "SCRIPT")]
    script: Option<PathBuf>,
    /// TOML file with layer stack settings.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Seed for the mosaic random source.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => StackConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => StackConfig::default(),
    };
    let mut interpreter = Interpreter::with_stack(LayerStack::with_config(config)?);
    if let Some(seed) = cli.seed {
        interpreter = interpreter.with_seed(seed);
    }

    let mut out = io::stdout().lock();
    match &cli.script {
        Some(path) => {
            let replies = interpreter
                .run_file(path)
                .with_context(|| format!("running {}", path.display()))?;
            for reply in replies {
                writeln!(out, "{reply}")?;
            }
        }
        None => {
            writeln!(out, "strata: enter commands, `close program` to quit")?;
            for line in io::stdin().lock().lines() {
                for reply in interpreter.execute(&line?) {
                    writeln!(out, "{reply}")?;
                }
                if interpreter.is_closed() {
                    break;
                }
            }
        }
    }
    Ok(())
}
