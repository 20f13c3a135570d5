//! Convert narrow i16 I/Q buffers to f32 for numeric tools.

use std::io::{Read, Write};

use crate::constants::VALUES_PER_BUFFER;
use crate::decimator::{OutputEncoding, Wide};
use crate::error::Result;
use crate::reader::SampleReader;
use crate::sink;

pub fn widen_values(narrow: &[i16], wide: &mut [f32]) {
    for (out, &value) in wide.iter_mut().zip(narrow) {
        *out = f32::from(value);
    }
}

/// Widen buffers until the source ends on a buffer boundary.
/// Returns the number of buffers converted.
pub fn run<R: Read, W: Write>(source: R, mut output: W) -> Result<u64> {
    let mut reader = SampleReader::new(source, VALUES_PER_BUFFER);
    let mut narrow = vec![0i16; VALUES_PER_BUFFER];
    let mut wide = vec![0f32; VALUES_PER_BUFFER];
    let mut bytes = vec![0u8; VALUES_PER_BUFFER * Wide::VALUE_BYTES];

    let mut buffers = 0;
    while reader.fill_or_end(&mut narrow)? {
        widen_values(&narrow, &mut wide);
        Wide::write_bytes(&wide, &mut bytes);
        sink::emit(&mut output, &bytes)?;
        buffers += 1;
    }
    Ok(buffers)
}
