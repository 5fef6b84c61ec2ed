//! Spread of masking
//!
//! Builds the specific loudness pattern over the critical-band-rate axis.
//! Inside each approximated critical band the pattern holds the band's main
//! loudness; towards higher critical band rates it decays along the upper
//! masking slope until it meets a louder band or reaches zero. The lower
//! flank of a band is vertical.
//!
//! The steepness of the upper slope (sone/Bark per Bark) is tabulated by
//! specific loudness range (rows of [`USL`], bounded by [`RNS`]) and by
//! critical band position (columns). Louder patterns and lower bands decay
//! faster; following the table row by row is what makes the slope shallower
//! as the pattern gets quieter.
//!
//! The pattern is kept as exact linear segments so it can be integrated
//! without sampling error and sampled on any grid afterwards.

use crate::grid::{bark_at, BARK_GRID_POINTS, BARK_TOLERANCE, CRITICAL_BAND_UPPER_EDGES};
use crate::loudness_law::MainLoudness;
use tracing::trace;

/// Number of specific loudness ranges
const NUM_RANGES: usize = 18;

/// Number of critical band columns in the slope table
const NUM_SLOPE_COLUMNS: usize = 8;

/// Lower bounds (sone/Bark) of the specific loudness ranges
const RNS: [f64; NUM_RANGES] = [
    21.5, 18.0, 15.1, 11.5, 9.0, 6.1, 4.4, 3.1, 2.13, 1.36, 0.82, 0.42, 0.30, 0.22, 0.15, 0.10,
    0.035, 0.0,
];

/// Upper slope steepness per specific loudness range and critical band group
const USL: [[f64; NUM_SLOPE_COLUMNS]; NUM_RANGES] = [
    [13.00, 8.20, 5.70, 5.00, 5.00, 5.00, 5.00, 5.00],
    [9.00, 7.50, 6.00, 5.10, 4.50, 4.50, 4.50, 4.50],
    [7.80, 6.70, 5.60, 4.90, 4.40, 3.90, 3.90, 3.90],
    [6.20, 5.40, 4.60, 4.00, 3.50, 3.20, 3.20, 3.20],
    [4.50, 3.80, 3.60, 3.20, 2.90, 2.70, 2.70, 2.70],
    [3.70, 3.00, 2.80, 2.35, 2.20, 2.20, 2.20, 2.20],
    [2.90, 2.30, 2.10, 1.90, 1.80, 1.70, 1.70, 1.70],
    [2.40, 1.70, 1.50, 1.35, 1.30, 1.30, 1.30, 1.30],
    [1.95, 1.45, 1.30, 1.15, 1.10, 1.10, 1.10, 1.10],
    [1.50, 1.20, 0.94, 0.86, 0.82, 0.82, 0.82, 0.82],
    [0.72, 0.67, 0.64, 0.63, 0.62, 0.62, 0.62, 0.62],
    [0.59, 0.53, 0.51, 0.50, 0.42, 0.42, 0.42, 0.42],
    [0.40, 0.33, 0.26, 0.24, 0.24, 0.22, 0.22, 0.22],
    [0.27, 0.21, 0.20, 0.18, 0.17, 0.17, 0.17, 0.17],
    [0.16, 0.15, 0.14, 0.12, 0.11, 0.11, 0.11, 0.11],
    [0.12, 0.11, 0.10, 0.08, 0.08, 0.08, 0.08, 0.08],
    [0.09, 0.08, 0.07, 0.06, 0.06, 0.06, 0.06, 0.05],
    [0.06, 0.05, 0.03, 0.02, 0.02, 0.02, 0.02, 0.02],
];

/// One linear piece of the specific loudness pattern
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Start of the segment (Bark)
    pub z_start: f64,
    /// End of the segment (Bark)
    pub z_end: f64,
    /// Specific loudness at `z_start` (sone/Bark)
    pub n_start: f64,
    /// Specific loudness at `z_end` (sone/Bark)
    pub n_end: f64,
}

impl Segment {
    /// Width of the segment (Bark)
    pub fn width(&self) -> f64 {
        self.z_end - self.z_start
    }

    /// Loudness under the segment (sone)
    pub fn area(&self) -> f64 {
        self.width() * (self.n_start + self.n_end) / 2.0
    }

    /// Whether the segment is a plateau of main loudness
    pub fn is_flat(&self) -> bool {
        self.n_start == self.n_end
    }

    /// Linear interpolation inside the segment
    pub fn value_at(&self, z: f64) -> f64 {
        let width = self.width();
        if width <= 0.0 {
            return self.n_end;
        }
        let t = (z - self.z_start) / width;
        (self.n_start + (self.n_end - self.n_start) * t).max(0.0)
    }
}

/// Specific loudness pattern after spreading, as contiguous linear segments
#[derive(Debug, Clone, PartialEq)]
pub struct LoudnessPattern {
    segments: Vec<Segment>,
}

impl LoudnessPattern {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Specific loudness at critical band rate `z` (0 outside the pattern)
    pub fn value_at(&self, z: f64) -> f64 {
        self.segments
            .iter()
            .find(|s| z <= s.z_end + BARK_TOLERANCE && z >= s.z_start - BARK_TOLERANCE)
            .map(|s| s.value_at(z))
            .unwrap_or(0.0)
    }

    /// Sample the pattern on the 0.1 Bark grid
    ///
    /// A grid point on a segment boundary takes the value of the segment
    /// ending there.
    pub fn sample(&self) -> [f64; BARK_GRID_POINTS] {
        let mut profile = [0.0; BARK_GRID_POINTS];
        let mut segments = self.segments.iter().peekable();

        for (k, value) in profile.iter_mut().enumerate() {
            let z = bark_at(k);
            while let Some(segment) = segments.peek() {
                if z > segment.z_end + BARK_TOLERANCE {
                    segments.next();
                } else {
                    *value = segment.value_at(z);
                    break;
                }
            }
        }

        profile
    }

    /// Critical band rate and value of the pattern maximum
    pub fn peak(&self) -> (f64, f64) {
        self.segments
            .iter()
            .map(|s| (s.z_start, s.n_start.max(s.n_end)))
            .fold((0.0, 0.0), |best, cur| if cur.1 > best.1 { cur } else { best })
    }
}

/// First specific loudness range whose lower bound does not exceed `loudness`
fn loudness_range(loudness: f64) -> usize {
    (0..NUM_RANGES - 1)
        .find(|&j| RNS[j] <= loudness)
        .unwrap_or(NUM_RANGES - 1)
}

/// Spread main loudness into the full specific loudness pattern
pub fn spread_masking(main: &MainLoudness) -> LoudnessPattern {
    let mut segments = Vec::with_capacity(64);
    let mut z1 = 0.0_f64;
    let mut n1 = 0.0_f64;
    let mut range = NUM_RANGES - 1;

    for (band, (&upper, &band_loudness)) in CRITICAL_BAND_UPPER_EDGES
        .iter()
        .zip(main.values().iter())
        .enumerate()
    {
        let column = band.saturating_sub(1).min(NUM_SLOPE_COLUMNS - 1);

        loop {
            let segment = if n1 <= band_loudness {
                // Band is louder than the incoming slope: plateau to the edge
                if n1 < band_loudness {
                    range = loudness_range(band_loudness);
                }
                Segment {
                    z_start: z1,
                    z_end: upper,
                    n_start: band_loudness,
                    n_end: band_loudness,
                }
            } else {
                // Band is (partly) masked by the slope coming from below
                let steepness = USL[range][column];
                let mut n2 = RNS[range].max(band_loudness);
                let mut z2 = z1 + (n1 - n2) / steepness;
                if z2 > upper {
                    z2 = upper;
                    n2 = n1 - (z2 - z1) * steepness;
                }
                Segment {
                    z_start: z1,
                    z_end: z2,
                    n_start: n1,
                    n_end: n2,
                }
            };

            while range < NUM_RANGES - 1 && segment.n_end <= RNS[range] {
                range += 1;
            }

            z1 = segment.z_end;
            n1 = segment.n_end;
            segments.push(segment);

            if z1 >= upper {
                break;
            }
        }
    }

    trace!("Loudness pattern has {} segments", segments.len());

    LoudnessPattern { segments }
}
