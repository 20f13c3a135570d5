
pub use rustfft::num_complex as num_complex;

use std::fs::File;
use std::io;
use std::os::fd::AsFd;
use std::path::Path;
use std::process::ExitCode;

mod configuration;
use configuration::Parser;
mod constants;
mod decimator;
mod error;
mod pipeline;
mod reader;
mod realtime;
mod sink;
mod utilities;
#[cfg(test)]
mod testing;

use decimator::{Encoding, Narrow, Wide};
use error::{Error, Result};


fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = configuration::Cli::parse();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.category() {
                Some(category) => log::error!("{:?} failure: {}", category, err),
                None => log::error!("{}", err),
            }
            ExitCode::from(&err)
        }
    }
}

fn run(command: configuration::Command) -> Result<()> {
    match command {
        configuration::Command::Acquire(args) => acquire(&args),
        configuration::Command::Widen(args) => {
            let buffers = utilities::widen::run(
                open_input(args.input.as_deref())?,
                open_output(args.output.as_deref())?,
            )?;
            log::info!("Widened {} buffers", buffers);
            Ok(())
        },
        configuration::Command::Tuneup(args) => {
            match utilities::power_meter::run(open_input(args.input.as_deref())?, io::stdout().lock())? {}
        },
    }
}

fn acquire(args: &configuration::AcquireArgs) -> Result<()> {
    log::info!(
        "Sampling at {} Hz ({} ns), LO {} Hz, {} Hz bins, {} bins of {} samples per buffer, {:?} output",
        constants::SAMPLE_HZ,
        constants::SAMPLE_NS,
        constants::SIGNAL_HZ,
        constants::BIN_HZ,
        constants::BINS_PER_BUFFER,
        constants::SAMPLES_PER_BIN,
        args.encoding,
    );

    let source = open_input(args.input.as_deref())?;
    let sink = open_output(args.output.as_deref())?;

    if args.no_realtime {
        log::warn!("Real-time setup skipped, samples may be lost under load");
    } else {
        realtime::setup(constants::RT_PRIORITY)?;
    }

    let health = pipeline::HealthLog::new(io::stderr(), constants::LOG_BUFFERS);
    match args.encoding {
        Encoding::Narrow => {
            match pipeline::Pipeline::<_, _, _, Narrow>::new(source, sink, health).run()? {}
        },
        Encoding::Wide => {
            match pipeline::Pipeline::<_, _, _, Wide>::new(source, sink, health).run()? {}
        },
    }
}

/// Open a file, or duplicate standard input so reads go straight
/// to the file descriptor without buffering.
fn open_input(path: Option<&Path>) -> Result<File> {
    match path {
        Some(path) => File::open(path).map_err(|source| Error::Open {
            path: path.display().to_string(),
            source,
        }),
        None => io::stdin().as_fd().try_clone_to_owned().map(File::from).map_err(|source| Error::Open {
            path: "standard input".to_string(),
            source,
        }),
    }
}

/// Create a file, or duplicate standard output so every buffer
/// is a single write to the file descriptor.
fn open_output(path: Option<&Path>) -> Result<File> {
    match path {
        Some(path) => File::create(path).map_err(|source| Error::Open {
            path: path.display().to_string(),
            source,
        }),
        None => io::stdout().as_fd().try_clone_to_owned().map(File::from).map_err(|source| Error::Open {
            path: "standard output".to_string(),
            source,
        }),
    }
}
