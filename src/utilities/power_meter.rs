//! Received power readout for tuning the receiver by hand.
//!
//! The narrow I/Q stream is summed over RESAMP bins to get one coarse
//! sample at RESAMP_HZ. The power of PWRSUM coarse samples is averaged
//! into one printed reading.

use std::convert::Infallible;
use std::io::{Read, Write};

use crate::constants::{PWRSUM, RESAMP};
use crate::error::{Error, Result};
use crate::num_complex::Complex;
use crate::reader::SampleReader;

/// Sum of interleaved I/Q pairs.
pub fn coarse_sample(block: &[i16]) -> Complex<i32> {
    block.chunks_exact(2).fold(Complex::new(0, 0), |acc, iq| {
        acc + Complex::new(i32::from(iq[0]), i32::from(iq[1]))
    })
}

#[derive(Default)]
pub struct PowerMeter {
    /// Power summed over the current window.
    sum: f64,
    /// Coarse samples in the current window.
    count: usize,
}

impl PowerMeter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one block of RESAMP interleaved bins.
    /// Returns the average power when a window is complete.
    pub fn push(&mut self, block: &[i16]) -> Option<f64> {
        let sample = coarse_sample(block);
        self.sum += Complex::new(f64::from(sample.re), f64::from(sample.im)).norm_sqr();
        self.count += 1;
        if self.count < PWRSUM {
            return None;
        }
        let average = self.sum / PWRSUM as f64;
        self.sum = 0.0;
        self.count = 0;
        Some(average)
    }
}

/// Print power readings until the source fails or ends.
pub fn run<R: Read, W: Write>(source: R, mut output: W) -> Result<Infallible> {
    let mut reader = SampleReader::new(source, 2 * RESAMP);
    let mut block = vec![0i16; 2 * RESAMP];
    let mut meter = PowerMeter::new();
    loop {
        reader.fill(&mut block)?;
        if let Some(power) = meter.push(&block) {
            writeln!(output, "{:.6}", power).map_err(Error::Write)?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{samples_to_bytes, ChunkedSource};

    fn constant_block(i: i16, q: i16) -> Vec<i16> {
        [i, q].repeat(RESAMP)
    }

    #[test]
    fn test_coarse_sample() {
        assert_eq!(coarse_sample(&constant_block(3, -2)), Complex::new(3 * RESAMP as i32, -2 * RESAMP as i32));
        assert_eq!(coarse_sample(&[1, 2, -1, -2]), Complex::new(0, 0));
    }

    #[test]
    fn test_window_average_and_reset() {
        let mut meter = PowerMeter::new();
        let block = constant_block(1, 1);
        for _ in 0..PWRSUM - 1 {
            assert_eq!(meter.push(&block), None);
        }
        let expected = 2.0 * (RESAMP * RESAMP) as f64;
        assert_eq!(meter.push(&block), Some(expected));

        // Next window starts from zero.
        let zero = constant_block(0, 0);
        for _ in 0..PWRSUM - 1 {
            assert_eq!(meter.push(&zero), None);
        }
        assert_eq!(meter.push(&zero), Some(0.0));
    }

    #[test]
    fn test_full_scale_does_not_overflow() {
        let mut meter = PowerMeter::new();
        let block = constant_block(i16::MIN, i16::MIN);
        let power = (0..PWRSUM).filter_map(|_| meter.push(&block)).next().unwrap();
        let coarse = 32768.0 * RESAMP as f64;
        assert_eq!(power, 2.0 * coarse * coarse);
    }

    #[test]
    fn test_prints_one_line_per_window() {
        let samples = constant_block(2, 0).repeat(2 * PWRSUM + 3);
        let mut output = Vec::new();
        let err = run(ChunkedSource::new(samples_to_bytes(&samples), &[64]), &mut output).unwrap_err();
        assert!(matches!(err, Error::UnexpectedEof { received: 0, .. }));
        let text = String::from_utf8(output).unwrap();
        let expected = format!("{:.6}", 4.0 * (RESAMP * RESAMP) as f64);
        assert_eq!(text.lines().collect::<Vec<_>>(), vec![expected.as_str(); 2]);
    }
}
