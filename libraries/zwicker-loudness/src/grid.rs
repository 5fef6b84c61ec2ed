//! Critical-band-rate grid
//!
//! Specific loudness is reported on a fixed 0.1 Bark grid from 0.1 to
//! 24.0 Bark (240 points). The 20 approximated critical bands the
//! loudness procedure works with are bounded by [`CRITICAL_BAND_UPPER_EDGES`].

use std::sync::OnceLock;

/// Grid resolution (Bark)
pub const BARK_STEP: f64 = 0.1;

/// Number of grid points between 0.1 and 24.0 Bark
pub const BARK_GRID_POINTS: usize = 240;

/// Number of approximated critical bands
pub const NUM_CRITICAL_BANDS: usize = 20;

/// Upper edges (Bark) of the approximated critical bands
///
/// The extra last entry closes the pattern at 24 Bark; that band never
/// carries main loudness of its own, only the tail of the upper slope.
pub const CRITICAL_BAND_UPPER_EDGES: [f64; NUM_CRITICAL_BANDS + 1] = [
    0.9, 1.8, 2.8, 3.5, 4.4, 5.4, 6.6, 7.9, 9.2, 10.6, 12.3, 13.8, 15.2, 16.7, 18.1, 19.3, 20.6,
    21.8, 22.7, 23.6, 24.0,
];

/// Tolerance used when comparing grid positions with band edges (Bark)
pub(crate) const BARK_TOLERANCE: f64 = 1e-6;

static BARK_AXIS: OnceLock<[f64; BARK_GRID_POINTS]> = OnceLock::new();

/// Shared, read-only critical-band-rate axis
///
/// Built on first use; concurrent first calls all observe the same array.
pub fn bark_axis() -> &'static [f64; BARK_GRID_POINTS] {
    BARK_AXIS.get_or_init(|| std::array::from_fn(bark_at))
}

/// Critical band rate of grid point `k` (Bark)
///
/// Computed from the index rather than accumulated, so 0.1 steps never drift.
pub fn bark_at(k: usize) -> f64 {
    (k + 1) as f64 / 10.0
}

/// Grid index closest to `z` Bark, `None` outside 0.1-24.0
pub fn index_of(z: f64) -> Option<usize> {
    if !z.is_finite() {
        return None;
    }
    let k = (z * 10.0).round() as i64 - 1;
    (0..BARK_GRID_POINTS as i64)
        .contains(&k)
        .then_some(k as usize)
}
