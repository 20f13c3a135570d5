
use std::path::PathBuf;

pub use clap::Parser;
use clap::{Args, Subcommand};

use crate::decimator::Encoding;

/// Synchronous detection of a 60 kHz time code signal sampled at 80 kHz.
///
/// Sample rates, buffer sizes and the real-time priority are fixed
/// at build time. Acquisition hardware must be configured externally.
#[derive(Parser)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Mix and decimate raw ADC samples into complex baseband, forever.
    Acquire(AcquireArgs),
    /// Convert a narrow decimated stream to 32-bit floats.
    Widen(StreamArgs),
    /// Print received power of a narrow decimated stream for tuning.
    Tuneup(TuneupArgs),
}

#[derive(Args)]
pub struct AcquireArgs {
    /// Source of raw 16-bit samples, for example an already
    /// configured DAQ device node.
    /// Standard input is used if not given.
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Destination of decimated I/Q buffers.
    /// Standard output is used if not given.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Representation of decimated I/Q values.
    #[arg(long, value_enum, default_value_t = Encoding::Narrow)]
    pub encoding: Encoding,

    /// Do not request real-time priority or lock memory.
    /// Useful for processing recorded samples without privileges.
    #[arg(long)]
    pub no_realtime: bool,
}

#[derive(Args)]
pub struct StreamArgs {
    /// Narrow I/Q input. Standard input is used if not given.
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Float I/Q output. Standard output is used if not given.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct TuneupArgs {
    /// Narrow I/Q input. Standard input is used if not given.
    #[arg(long)]
    pub input: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_acquire_defaults() {
        let cli = Cli::parse_from(["lfiq", "acquire"]);
        match cli.command {
            Command::Acquire(args) => {
                assert_eq!(args.encoding, Encoding::Narrow);
                assert!(!args.no_realtime);
                assert!(args.input.is_none() && args.output.is_none());
            }
            _ => panic!("expected acquire"),
        }
    }

    #[test]
    fn test_acquire_wide() {
        let cli = Cli::parse_from(["lfiq", "acquire", "--encoding", "wide", "--no-realtime", "--input", "/dev/comedi0"]);
        match cli.command {
            Command::Acquire(args) => {
                assert_eq!(args.encoding, Encoding::Wide);
                assert!(args.no_realtime);
                assert_eq!(args.input, Some(PathBuf::from("/dev/comedi0")));
            }
            _ => panic!("expected acquire"),
        }
    }
}
