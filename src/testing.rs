//! Test doubles for sample sources and output sinks.

use std::io::{self, Read, Write};

use byteorder::{ByteOrder, NativeEndian};

pub fn samples_to_bytes(samples: &[i16]) -> Vec<u8> {
    let mut bytes = vec![0u8; samples.len() * 2];
    NativeEndian::write_i16_into(samples, &mut bytes);
    bytes
}

pub fn bytes_to_samples(bytes: &[u8]) -> Vec<i16> {
    let mut samples = vec![0i16; bytes.len() / 2];
    NativeEndian::read_i16_into(bytes, &mut samples);
    samples
}

pub fn bytes_to_floats(bytes: &[u8]) -> Vec<f32> {
    let mut values = vec![0f32; bytes.len() / 4];
    NativeEndian::read_f32_into(bytes, &mut values);
    values
}

/// Source returning its data in reads of limited size,
/// cycling through the given chunk sizes.
/// An empty chunk list returns as much as asked for.
pub struct ChunkedSource {
    data: Vec<u8>,
    position: usize,
    chunks: Vec<usize>,
    reads: usize,
    interrupt_after: Option<usize>,
}

impl ChunkedSource {
    pub fn new(data: Vec<u8>, chunks: &[usize]) -> Self {
        Self {
            data,
            position: 0,
            chunks: chunks.to_vec(),
            reads: 0,
            interrupt_after: None,
        }
    }

    /// Fail one read with `Interrupted` after this many successful reads.
    pub fn interrupt_after(&mut self, reads: usize) {
        self.interrupt_after = Some(reads);
    }
}

impl Read for ChunkedSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.interrupt_after == Some(self.reads) {
            self.interrupt_after = None;
            return Err(io::ErrorKind::Interrupted.into());
        }
        let remaining = self.data.len() - self.position;
        let mut n = buf.len().min(remaining);
        if !self.chunks.is_empty() {
            n = n.min(self.chunks[self.reads % self.chunks.len()]);
        }
        buf[..n].copy_from_slice(&self.data[self.position..self.position + n]);
        self.position += n;
        self.reads += 1;
        Ok(n)
    }
}

/// Source returning zeros for a number of bytes and then failing.
pub struct FailingSource {
    good_bytes: usize,
}

impl FailingSource {
    pub fn new(good_bytes: usize) -> Self {
        Self { good_bytes }
    }
}

impl Read for FailingSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.good_bytes == 0 {
            return Err(io::Error::new(io::ErrorKind::Other, "DAQ overrun"));
        }
        let n = buf.len().min(self.good_bytes);
        buf[..n].fill(0);
        self.good_bytes -= n;
        Ok(n)
    }
}

/// Sink recording the size of every write call.
#[derive(Default)]
pub struct RecordingSink {
    pub data: Vec<u8>,
    pub writes: Vec<usize>,
    /// Accept at most this many bytes per write.
    pub limit: Option<usize>,
    /// Fail every write with this error kind.
    pub fail: Option<io::ErrorKind>,
}

impl Write for RecordingSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(kind) = self.fail {
            return Err(kind.into());
        }
        let n = self.limit.map_or(buf.len(), |limit| buf.len().min(limit));
        self.data.extend_from_slice(&buf[..n]);
        self.writes.push(n);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
