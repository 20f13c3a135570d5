use std::convert::Infallible;
use std::io::{Read, Write};
use std::marker::PhantomData;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::constants::{SAMPLES_PER_BUFFER, VALUES_PER_BUFFER};
use crate::decimator::{self, OutputEncoding};
use crate::error::{Error, Result};
use crate::reader::SampleReader;
use crate::sink;

/// Periodic wall clock records for drift and health monitoring.
///
/// A line `count\tseconds\tmicroseconds` is written for buffer 0
/// and every `period` buffers after that.
pub struct HealthLog<D> {
    output: D,
    period: u64,
}

impl<D: Write> HealthLog<D> {
    pub fn new(output: D, period: u64) -> Self {
        Self {
            output,
            period: period.max(1),
        }
    }

    pub fn record(&mut self, count: u64) -> Result<()> {
        if count % self.period != 0 {
            return Ok(());
        }
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        writeln!(self.output, "{}\t{}\t{}", count, now.as_secs(), now.subsec_micros())
            .map_err(Error::Diagnostic)
    }
}

/// Acquire, decimate and emit loop.
///
/// Each step fills one raw buffer, decimates it and writes the result
/// before the next buffer is read. All buffers are allocated here once
/// and reused for every step.
pub struct Pipeline<R, W, D, E: OutputEncoding> {
    reader: SampleReader<R>,
    sink: W,
    health: HealthLog<D>,
    raw: Vec<i16>,
    values: Vec<E::Value>,
    bytes: Vec<u8>,
    /// Number of buffers emitted so far.
    count: u64,
    encoding: PhantomData<E>,
}

impl<R: Read, W: Write, D: Write, E: OutputEncoding> Pipeline<R, W, D, E> {
    pub fn new(source: R, sink: W, health: HealthLog<D>) -> Self {
        Self {
            reader: SampleReader::new(source, SAMPLES_PER_BUFFER),
            sink,
            health,
            raw: vec![0; SAMPLES_PER_BUFFER],
            values: vec![E::Value::default(); VALUES_PER_BUFFER],
            bytes: vec![0; VALUES_PER_BUFFER * E::VALUE_BYTES],
            count: 0,
            encoding: PhantomData,
        }
    }

    /// Process one buffer.
    pub fn step(&mut self) -> Result<()> {
        self.reader.fill(&mut self.raw)?;

        decimator::mix_decimate::<E>(&self.raw, &mut self.values);
        E::write_bytes(&self.values, &mut self.bytes);
        sink::emit(&mut self.sink, &self.bytes)?;

        self.health.record(self.count)?;
        self.count += 1;
        Ok(())
    }

    /// Run until something fails.
    pub fn run(mut self) -> Result<Infallible> {
        loop {
            self.step()?;
        }
    }
}
