//! Sample rate and buffer geometry.
//!
//! The receiver is sampled at 80 kHz and mixed against an aliased 60 kHz
//! local oscillator. With a 4/3 ratio of sample rate to LO frequency the
//! sampled LO only takes the values +1, -1 and 0, so mixing needs no
//! multiplications. Averaging 8 samples per bin gives a 10 kHz complex
//! baseband signal with an integer number of LO cycles per bin,
//! which makes the decimation filter reject DC exactly.

/// Frequency of the received signal in Hertz.
pub const SIGNAL_HZ: u32 = 60_000;
/// Local oscillator cycles per decimated bin.
pub const CYCLES_PER_BIN: u32 = 6;
/// Raw samples summed into one bin.
pub const SAMPLES_PER_BIN: usize = 8;
/// Decimated bins per buffer.
pub const BINS_PER_BUFFER: usize = 1250;
/// Raw samples per buffer.
pub const SAMPLES_PER_BUFFER: usize = SAMPLES_PER_BIN * BINS_PER_BUFFER;
/// Scalars (interleaved I and Q) per output buffer.
pub const VALUES_PER_BUFFER: usize = 2 * BINS_PER_BUFFER;
/// Raw sample rate in Hertz.
pub const SAMPLE_HZ: u32 = SAMPLES_PER_BIN as u32 * SIGNAL_HZ / CYCLES_PER_BIN;
/// Decimated bin rate in Hertz.
pub const BIN_HZ: u32 = SIGNAL_HZ / CYCLES_PER_BIN;
/// Buffers per second.
pub const BUFFER_HZ: u32 = BIN_HZ / BINS_PER_BUFFER as u32;
/// Sample period programmed into the acquisition hardware.
pub const SAMPLE_NS: u32 = 1_000_000_000 / SAMPLE_HZ;

/// Right shift applied to bin sums for narrow output (divide by 4).
pub const SUMSHIFT: u32 = 2;

/// Seconds between health records.
pub const LOG_PERIOD: u32 = 300;
/// Buffers between health records.
pub const LOG_BUFFERS: u64 = BUFFER_HZ as u64 * LOG_PERIOD as u64;

/// SCHED_FIFO priority requested for acquisition.
pub const RT_PRIORITY: i32 = 49;
/// Stack touched before entering the real-time loop.
pub const STACK_PREFAULT_BYTES: usize = 256 * 1024;

/// Coarse sample rate of the power meter.
pub const RESAMP_HZ: u32 = 50;
/// Bins summed into one coarse power meter sample.
pub const RESAMP: usize = (SAMPLE_HZ / SAMPLES_PER_BIN as u32 / RESAMP_HZ) as usize;
/// Coarse samples averaged into one power reading.
pub const PWRSUM: usize = 20;

const _: () = assert!(SAMPLE_HZ == 80_000);
// The LO must alias to a quarter of the sample rate.
const _: () = assert!(3 * SAMPLE_HZ == 4 * SIGNAL_HZ);
// Whole LO periods (4 samples) per bin.
const _: () = assert!(SAMPLES_PER_BIN % 4 == 0);
const _: () = assert!(SAMPLES_PER_BIN as u32 * SIGNAL_HZ == SAMPLE_HZ * CYCLES_PER_BIN);
const _: () = assert!(BUFFER_HZ as usize * SAMPLES_PER_BUFFER == SAMPLE_HZ as usize);
const _: () = assert!(LOG_BUFFERS > 0);
const _: () = assert!(RESAMP > 0 && PWRSUM > 0);
