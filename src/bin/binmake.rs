use binmake::{BinStream, StreamConfig, StreamError, StreamResult};
use clap::Parser;
use std::{
    fs::{self, File},
    io::{self, Write},
    path::PathBuf,
};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Generates binary data from a text human readable description.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Text description to read (stdin when omitted)
    input: Option<PathBuf>,

    /// Binary file to write (stdout when omitted)
    #[arg(value_name = "OUTPUT")]
    target: Option<PathBuf>,

    /// Write the binary output to this file
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Path to a JSON config with the initial mode
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug mode
    #[arg(short, long)]
    verbose: bool,
}

fn run(cli: &Cli) -> StreamResult<()> {
    let config = match &cli.config {
        Some(path) => StreamConfig::from_file(path)?,
        None => StreamConfig::default(),
    };
    debug!("config: {:?}", config);

    let mut stream = BinStream::with_config(&config)?;

    match &cli.input {
        Some(path) => {
            debug!("Reading description from {:?}", path);
            stream.feed_reader(File::open(path)?)?;
        }
        None => {
            debug!("Reading description from stdin");
            stream.feed_reader(io::stdin().lock())?;
        }
    }

    if !stream.diagnostics().is_empty() {
        info!("{} token(s) skipped", stream.diagnostics().len());
    }

    match cli.output.as_ref().or(cli.target.as_ref()) {
        Some(path) => {
            fs::write(path, stream.output()?)?;
            info!("{} bytes written to {:?}", stream.len(), path);
        }
        None => {
            let mut stdout = io::stdout().lock();
            stream.write_output(&mut stdout)?;
            stdout.flush()?;
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    if let Err(e) = run(&cli) {
        match e {
            StreamError::NoOutputAvailable => eprintln!("Error: no output generated"),
            e => eprintln!("Error: {}", e),
        }
        std::process::exit(1);
    }
}
