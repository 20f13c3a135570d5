//! Fatal error conditions and their process exit statuses.

use std::io;
use std::process::ExitCode;

/// Broad classes of failure. None of them are recovered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// The execution environment rejected real-time setup.
    Setup,
    /// The sample source failed, ended or delivered misframed data.
    Source,
    /// The output or diagnostic channel failed or truncated a write.
    Sink,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to set real-time scheduling priority {priority}: {source}")]
    Scheduling {
        priority: i32,
        #[source]
        source: io::Error,
    },

    #[error("Failed to lock memory: {0}")]
    MemoryLock(#[source] io::Error),

    #[error("Reading from DAQ: {0}")]
    Read(#[source] io::Error),

    #[error("Unexpected EOF from DAQ after {received} of {expected} bytes")]
    UnexpectedEof { received: usize, expected: usize },

    #[error("Odd count from DAQ: read returned {bytes} bytes")]
    OddCount { bytes: usize },

    #[error("Writing output: {0}")]
    Write(#[source] io::Error),

    #[error("Short write to output: {written} of {expected} bytes")]
    ShortWrite { written: usize, expected: usize },

    #[error("Writing diagnostics: {0}")]
    Diagnostic(#[source] io::Error),
}

impl Error {
    pub fn category(&self) -> Option<Category> {
        match self {
            Error::Open { .. } => None,
            Error::Scheduling { .. } | Error::MemoryLock(_) => Some(Category::Setup),
            Error::Read(_) | Error::UnexpectedEof { .. } | Error::OddCount { .. } => {
                Some(Category::Source)
            }
            Error::Write(_) | Error::ShortWrite { .. } | Error::Diagnostic(_) => {
                Some(Category::Sink)
            }
        }
    }

    /// Process exit status reported for this error.
    /// Kept clear of 2, which clap uses for usage errors.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Open { .. } => 1,
            Error::Scheduling { .. } => 3,
            Error::MemoryLock(_) => 4,
            Error::Read(_) | Error::UnexpectedEof { .. } | Error::OddCount { .. } => 5,
            Error::Write(_) | Error::ShortWrite { .. } | Error::Diagnostic(_) => 6,
        }
    }
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        ExitCode::from(err.exit_code())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
