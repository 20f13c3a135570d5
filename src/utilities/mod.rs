//! Tools consuming the decimated narrow stream.

pub mod power_meter;
pub mod widen;
