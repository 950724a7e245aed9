/// Number of cells every level splits its parent into.
pub const CELLS_PER_LEVEL: u16 = 2048;

/// The finer of the two per-level divisors.
pub const WIDE_DIVISOR: u32 = 64;

/// The coarser of the two per-level divisors.
pub const NARROW_DIVISOR: u32 = 32;

/// Globe extents [min_lon, min_lat, max_lon, max_lat]
pub const GLOBE_EXTENTS: [f64; 4] = [-180.0, -90.0, 180.0, 90.0];

/// Deepest path `encode` produces. Cells past this are narrower than f64 resolution.
pub const MAX_LEVELS: u32 = 16;

/// Deepest level enumerated when the caller gives no limit.
pub const DEFAULT_MAX_LEVEL: u32 = 4;

/// Tolerance used when comparing decoded bounds against source coordinates.
pub const DEFAULT_EPSILON: f64 = 1e-9;
