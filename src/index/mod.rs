pub mod constants;
mod decode;
mod encode;
mod path;
mod schedule;

pub use constants::{
    CELLS_PER_LEVEL, DEFAULT_EPSILON, DEFAULT_MAX_LEVEL, GLOBE_EXTENTS, MAX_LEVELS,
    NARROW_DIVISOR, WIDE_DIVISOR,
};
pub use decode::decode;
pub use encode::{encode, encode_coord};
pub use path::GridPath;
pub use schedule::{DivisorPair, divisors_for_level};
