use std::path::{self, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use imgsplit::{
    AlwaysOverwrite, Chunker, DEFAULT_CHUNK_SIZE, NoProgress, Prompt, SplitConfig, SplitError,
    prepare_output_dir, progress_bar,
};

/// Split a file into fixed-size chunk files named by byte offset.
#[derive(Parser, Debug)]
#[command(name = "imgsplit", version, about)]
struct Cli {
    /// File to split
    #[arg(short = 'f', long = "filename")]
    filename: PathBuf,

    /// Chunk size in bytes
    #[arg(short = 's', long = "step", default_value_t = DEFAULT_CHUNK_SIZE, value_parser = parse_step)]
    step: usize,

    /// Drop all-zero chunks and trim trailing zero bytes
    #[arg(short = 'c', long = "compress")]
    compress: bool,

    /// Minimum digit width of the offset in chunk file names
    #[arg(short = 'r', long = "replace", default_value_t = 0)]
    replace: usize,

    /// Output folder [default: <file dir>/<file name>_out]
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Replace an existing output folder without asking
    #[arg(short = 'y', long = "yes")]
    yes: bool,

    /// Don't draw a progress bar
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,
}

fn parse_step(s: &str) -> Result<usize, String> {
    let step: usize = s
        .trim()
        .parse()
        .map_err(|e| format!("can't set step: {e}"))?;
    if step == 0 {
        return Err("step must be greater than 0".to_string());
    }
    Ok(step)
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Some(SplitError::Aborted { .. }) = err.downcast_ref::<SplitError>() {
                return ExitCode::SUCCESS;
            }
            eprintln!("Error - {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let source = path::absolute(&cli.filename)
        .with_context(|| format!("can't resolve {}", cli.filename.display()))?;

    let mut config = SplitConfig::new(source)?
        .with_chunk_size(cli.step)
        .with_compact(cli.compress)
        .with_index_width(cli.replace);
    if let Some(output) = &cli.output {
        let output = path::absolute(output)
            .with_context(|| format!("can't resolve {}", output.display()))?;
        config = config.with_output_dir(output);
    }
    config.validate()?;

    if cli.yes {
        prepare_output_dir(config.output_dir(), &mut AlwaysOverwrite)?;
    } else {
        prepare_output_dir(config.output_dir(), &mut Prompt::stdio())?;
    }

    let compact = config.compact();
    let chunker = Chunker::new(config);
    let stats = if cli.quiet {
        chunker.run(NoProgress)?
    } else {
        chunker.run(progress_bar())?
    };

    println!("{}", stats.summary(compact));
    Ok(())
}
