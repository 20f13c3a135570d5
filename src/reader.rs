//! Filling sample buffers from a byte stream that may return short reads.

use std::io::{self, Read};

use byteorder::{ByteOrder, NativeEndian};

use crate::error::{Error, Result};

/// Bytes per sample on the wire. Raw ADC samples and narrow
/// decimated values are both 16-bit.
pub const SAMPLE_BYTES: usize = std::mem::size_of::<i16>();

/// Reads whole buffers of 16-bit samples.
///
/// A single read from the source may return fewer bytes than asked for,
/// for example when reading from a pipe or a DAQ device node.
/// Reads are repeated from the exact byte offset reached until the
/// buffer is complete. End of stream, read errors and reads that do not
/// return a whole number of samples are all fatal.
pub struct SampleReader<R> {
    source: R,
    /// Staging area for bytes before they are converted to samples.
    /// Sized on first use and then reused for every buffer.
    bytes: Vec<u8>,
}

impl<R: Read> SampleReader<R> {
    /// Create a reader with staging space for `samples` samples
    /// already allocated, so filling buffers of that size never allocates.
    pub fn new(source: R, samples: usize) -> Self {
        Self {
            source,
            bytes: vec![0; samples * SAMPLE_BYTES],
        }
    }

    /// Fill the whole buffer or fail.
    pub fn fill(&mut self, buffer: &mut [i16]) -> Result<()> {
        self.read_samples(buffer, false).map(|_| ())
    }

    /// Fill the whole buffer, or return `Ok(false)` if the stream
    /// ended cleanly before the first byte of the buffer.
    /// End of stream in the middle of a buffer is still an error.
    pub fn fill_or_end(&mut self, buffer: &mut [i16]) -> Result<bool> {
        self.read_samples(buffer, true)
    }

    fn read_samples(&mut self, buffer: &mut [i16], end_allowed: bool) -> Result<bool> {
        let n_bytes = buffer.len() * SAMPLE_BYTES;
        if self.bytes.len() < n_bytes {
            self.bytes.resize(n_bytes, 0);
        }

        let mut total = 0;
        while total < n_bytes {
            let nr = match self.source.read(&mut self.bytes[total..n_bytes]) {
                Ok(nr) => nr,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(Error::Read(err)),
            };
            if nr == 0 {
                if end_allowed && total == 0 {
                    return Ok(false);
                }
                return Err(Error::UnexpectedEof {
                    received: total,
                    expected: n_bytes,
                });
            }
            if nr % SAMPLE_BYTES != 0 {
                return Err(Error::OddCount { bytes: nr });
            }
            total += nr;
        }

        NativeEndian::read_i16_into(&self.bytes[..n_bytes], buffer);
        Ok(true)
    }
}
