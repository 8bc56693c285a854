//! hcasl: "head -c N, then shift one byte" loop.
//!
//! Usage: hcasl [OPTIONS] [FILE]...

use clap::error::ErrorKind;
use clap::{ArgAction, CommandFactory, Parser};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process;

use hcasl::commands::SlideCommand;
use hcasl::config::{parse_window_size, Config};
use hcasl::error::SlideError;

const PROGRAM: &str = env!("CARGO_BIN_NAME");

#[derive(Parser)]
#[command(name = "hcasl")]
#[command(version)]
#[command(about = "Print N bytes per line, shifting the window by one byte each line", long_about = None)]
#[command(disable_version_flag = true)]
struct Cli {
    /// Print N bytes per line (N >= 1; accepts 0x.. hex and 0.. octal)
    #[arg(short = 'n', long = "bytes", value_name = "N", default_value = "8", value_parser = parse_window_size)]
    bytes: usize,

    /// Place output in FILE (use - for stdout)
    #[arg(short = 'o', long, value_name = "FILE", default_value = "-")]
    output: PathBuf,

    /// Start a fresh window for every input file instead of
    /// letting windows span file boundaries
    #[arg(long)]
    reset_per_source: bool,

    /// Print run statistics to stderr
    #[arg(long)]
    stats: bool,

    /// Print version
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: Option<bool>,

    /// Input files (use - for stdin; stdin if none given)
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,
}

impl Cli {
    fn into_config(self) -> Config {
        Config {
            window: self.bytes,
            output: self.output,
            inputs: self.files,
            reset_per_source: self.reset_per_source,
            stats: self.stats,
        }
    }
}

/// Parse arguments, exiting on error.
///
/// clap omits the usage line for rejected option values, so it is added
/// here to keep every configuration error paired with usage text.
fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::ValueValidation | ErrorKind::InvalidValue) => {
            let _ = e.print();
            eprintln!("\n{}", Cli::command().render_usage());
            process::exit(e.exit_code());
        }
        Err(e) => e.exit(),
    }
}

fn main() {
    let cli = parse_cli();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let config = cli.into_config();

    match run(&config) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        // Reader went away (e.g. `| head`); nothing left to report to.
        Err(e) if e.is_broken_pipe() => process::exit(0),
        Err(e) => {
            eprintln!("{}: {}", PROGRAM, e);
            process::exit(1);
        }
    }
}

/// Run the transform; returns whether every input source was fully read.
fn run(config: &Config) -> Result<bool, SlideError> {
    let cmd = SlideCommand::from_config(config);
    let sources = config.sources();
    let report = |e: SlideError| eprintln!("{}: {}", PROGRAM, e);

    log::debug!(
        "window={} output={} sources={}",
        config.window,
        config.output.display(),
        sources.len()
    );

    let stats = if config.output_is_stdout() {
        let stdout = io::stdout();
        let handle = stdout.lock();
        cmd.run_sources(&sources, handle, report)?
    } else {
        let file = File::create(&config.output).map_err(|source| SlideError::OpenOutput {
            path: config.output.clone(),
            source,
        })?;
        cmd.run_sources(&sources, file, report)?
    };

    if config.stats {
        eprintln!("{} stats: {}", PROGRAM, stats);
    }

    Ok(stats.all_sources_ok())
}
