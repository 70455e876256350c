use clap::{Parser, Subcommand};
use ltfilter::asset::load_asset_file;
use ltfilter::{Result, diagnostics, ndjson};

use anyhow::Context;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ltfilter")]
#[command(about = "Compile declarative event filters and run NDJSON through them", long_about = None)]
struct Cli {
    /// More log output on stderr (-v debug, -vv trace). RUST_LOG wins if set.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Forward the events that pass every check of the asset.
    Filter {
        #[arg(long)]
        asset: String,

        /// NDJSON input; stdin when omitted.
        #[arg(long)]
        events: Option<String>,

        /// NDJSON output; stdout when omitted.
        #[arg(short = 'o', long)]
        out: Option<String>,
    },
    /// Only compile the asset and report whether it can be activated.
    Check {
        #[arg(long)]
        asset: String,
    },
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
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Commands::Filter { asset, events, out } => {
            // 1) Load + compile the asset; any bad check refuses activation.
            let compiled = load_asset_file(&asset)?.compile(&diagnostics::to_tracing)?;

            // 2) Open input and output.
            let (reader, source) = match &events {
                Some(path) => {
                    let file = File::open(path).with_context(|| {
                        diagnostics::error_message(format!("open events file {}", path))
                    })?;
                    (Box::new(BufReader::new(file)) as Box<dyn BufRead>, path.clone())
                }
                None => (
                    Box::new(io::stdin().lock()) as Box<dyn BufRead>,
                    "<stdin>".to_string(),
                ),
            };
            let mut writer: Box<dyn Write> = match &out {
                Some(path) => {
                    let file = File::create(path).with_context(|| {
                        diagnostics::error_message(format!("create output file {}", path))
                    })?;
                    Box::new(BufWriter::new(file))
                }
                None => Box::new(BufWriter::new(io::stdout().lock())),
            };

            // 3) Stream. A bad input line ends the stream and is reported after.
            let mut failure = None;
            let mut read = 0usize;
            let mut kept = 0usize;
            let upstream = ndjson::read_events(reader, &source)
                .map_while(|r| r.map_err(|e| failure = Some(e)).ok())
                .inspect(|_| read += 1);
            for event in compiled.lift(upstream) {
                ndjson::write_event(&mut writer, &event)?;
                kept += 1;
            }
            writer.flush()?;

            tracing::info!(asset = %compiled.name, read, kept, "stream completed");
            if let Some(err) = failure {
                return Err(err);
            }
        }
        Commands::Check { asset } => {
            let compiled = load_asset_file(&asset)?.compile(&diagnostics::to_tracing)?;
            println!(
                "{}: ok ({} check{})",
                compiled.name,
                compiled.stages.len(),
                if compiled.stages.len() == 1 { "" } else { "s" }
            );
        }
    }

    Ok(())
}
