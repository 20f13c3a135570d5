//! Quadrature mixer and decimator.
//!
//! Each bin correlates 8 consecutive raw samples against two periods of
//! a local oscillator at a quarter of the sample rate. The oscillator
//! only takes the values 1, -j, -1 and +j, so the correlation reduces
//! to additions and subtractions:
//!
//! ```text
//! I =  s0 - s2 + s4 - s6
//! Q = -s1 + s3 - s5 + s7
//! ```

use byteorder::{ByteOrder, NativeEndian};

use crate::constants::{SAMPLES_PER_BIN, SUMSHIFT};
use crate::num_complex::Complex;

/// Sum of one bin before any normalization.
pub type Accumulator = Complex<i32>;

/// One period of the local oscillator, exp(-j*pi*n/2).
pub const LO_SEQUENCE: [Accumulator; 4] = [
    Complex { re: 1, im: 0 },
    Complex { re: 0, im: -1 },
    Complex { re: -1, im: 0 },
    Complex { re: 0, im: 1 },
];

/// Mix and sum one bin of raw samples.
/// `octet` must hold exactly SAMPLES_PER_BIN samples.
#[inline]
pub const fn mix_bin(octet: &[i16]) -> Accumulator {
    let s0 = octet[0] as i32;
    let s1 = octet[1] as i32;
    let s2 = octet[2] as i32;
    let s3 = octet[3] as i32;
    let s4 = octet[4] as i32;
    let s5 = octet[5] as i32;
    let s6 = octet[6] as i32;
    let s7 = octet[7] as i32;
    Complex {
        re: s0 - s2 + s4 - s6,
        im: -s1 + s3 - s5 + s7,
    }
}

// The impulse response of mix_bin must be the LO sequence, repeated.
const _: () = {
    let mut n = 0;
    while n < SAMPLES_PER_BIN {
        let mut impulse = [0i16; SAMPLES_PER_BIN];
        impulse[n] = 1;
        let response = mix_bin(&impulse);
        let lo = LO_SEQUENCE[n % LO_SEQUENCE.len()];
        assert!(response.re == lo.re && response.im == lo.im);
        n += 1;
    }
};

/// How bin sums are represented in the output stream.
pub trait OutputEncoding {
    /// Scalar type of the interleaved I and Q values.
    type Value: Copy + Default;
    /// Size of one value in the byte stream.
    const VALUE_BYTES: usize;

    fn encode(sum: i32) -> Self::Value;

    /// Serialize values in host byte order.
    /// `bytes` must be exactly `values.len() * VALUE_BYTES` long.
    fn write_bytes(values: &[Self::Value], bytes: &mut [u8]);
}

/// 16-bit output, sums divided by 4 to keep the input's dynamic range.
pub struct Narrow;

/// 32-bit float output holding unshifted sums.
pub struct Wide;

impl OutputEncoding for Narrow {
    type Value = i16;
    const VALUE_BYTES: usize = 2;

    #[inline]
    fn encode(sum: i32) -> i16 {
        // Four i16 terms shifted right by 2 always fit in i16.
        (sum >> SUMSHIFT) as i16
    }

    fn write_bytes(values: &[i16], bytes: &mut [u8]) {
        NativeEndian::write_i16_into(values, bytes);
    }
}

impl OutputEncoding for Wide {
    type Value = f32;
    const VALUE_BYTES: usize = 4;

    #[inline]
    fn encode(sum: i32) -> f32 {
        sum as f32
    }

    fn write_bytes(values: &[f32], bytes: &mut [u8]) {
        NativeEndian::write_f32_into(values, bytes);
    }
}

/// Output encoding selected at startup.
#[derive(Copy, Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Encoding {
    /// Interleaved i16, bin sums divided by 4
    Narrow,
    /// Interleaved f32, full-precision bin sums
    Wide,
}

/// Decimate a buffer of raw samples into interleaved I and Q values.
///
/// `input.len()` must be a multiple of SAMPLES_PER_BIN and
/// `output.len()` must be `2 * input.len() / SAMPLES_PER_BIN`.
pub fn mix_decimate<E: OutputEncoding>(input: &[i16], output: &mut [E::Value]) {
    debug_assert_eq!(input.len() % SAMPLES_PER_BIN, 0);
    debug_assert_eq!(output.len() * SAMPLES_PER_BIN, input.len() * 2);

    for (octet, out) in input.chunks_exact(SAMPLES_PER_BIN).zip(output.chunks_exact_mut(2)) {
        let sum = mix_bin(octet);
        out[0] = E::encode(sum.re);
        out[1] = E::encode(sum.im);
    }
}
