//! Writing whole buffers to the output stream.

use std::io::{self, Write};

use crate::error::{Error, Result};

/// Write `bytes` with a single write call.
///
/// Output framing is positional, so a truncated buffer would shift every
/// later bin. A short write is therefore an error and is not retried.
pub fn emit<W: Write>(sink: &mut W, bytes: &[u8]) -> Result<()> {
    loop {
        match sink.write(bytes) {
            Ok(written) if written == bytes.len() => return Ok(()),
            Ok(written) => {
                return Err(Error::ShortWrite {
                    written,
                    expected: bytes.len(),
                })
            }
            // Nothing was written, so the same write can be issued again.
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(Error::Write(err)),
        }
    }
}
