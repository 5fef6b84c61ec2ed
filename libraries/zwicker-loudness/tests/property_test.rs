//! Property-based tests for zwicker-loudness
//!
//! Invariants checked over random third-octave spectra:
//! - Loudness is never negative and always finite
//! - Raising any band never lowers total loudness
//! - Identical input gives identical output
//! - The specific loudness profile has the fixed grid shape

use proptest::prelude::*;
use zwicker_loudness::{
    compute_stationary_loudness, FieldType, StationaryLoudness, ThirdOctaveSpectrum,
    BARK_GRID_POINTS, NEGLIGIBLE_LEVEL_DB, NUM_CRITICAL_BANDS, NUM_THIRD_OCTAVE_BANDS,
};

// ========== Strategies ==========

/// Band levels between the negligible floor and the top of the correction tables
fn band_level() -> impl Strategy<Value = f64> {
    prop_oneof![
        1 => Just(NEGLIGIBLE_LEVEL_DB),
        4 => NEGLIGIBLE_LEVEL_DB..120.0,
    ]
}

fn spectrum() -> impl Strategy<Value = ThirdOctaveSpectrum> {
    prop::collection::vec(band_level(), NUM_THIRD_OCTAVE_BANDS)
        .prop_map(|levels| ThirdOctaveSpectrum::try_from(levels).unwrap())
}

fn field_type() -> impl Strategy<Value = FieldType> {
    prop_oneof![Just(FieldType::Free), Just(FieldType::Diffuse)]
}

// ========== Properties ==========

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Total and specific loudness are finite and non-negative
    #[test]
    fn loudness_is_finite_and_non_negative(spectrum in spectrum(), field in field_type()) {
        let result = StationaryLoudness::new(field).compute(&spectrum).unwrap();

        prop_assert!(result.total_sone.is_finite());
        prop_assert!(result.total_sone >= 0.0);
        prop_assert!(result.loudness_level_phon.is_finite());
        prop_assert!(result.specific_loudness.iter().all(|n| n.is_finite() && *n >= 0.0));
        prop_assert!(result.main_loudness.iter().all(|n| n.is_finite() && *n >= 0.0));
    }

    /// Raising one band never makes the sound quieter
    #[test]
    fn loudness_is_monotonic_in_band_level(
        spectrum in spectrum(),
        field in field_type(),
        band in 0..NUM_THIRD_OCTAVE_BANDS,
        increase in 0.0f64..40.0,
    ) {
        let raised_level = (spectrum.levels()[band] + increase).min(120.0);
        let raised = spectrum.with_band_level(band, raised_level).unwrap();

        let calculator = StationaryLoudness::new(field);
        let before = calculator.compute(&spectrum).unwrap();
        let after = calculator.compute(&raised).unwrap();

        prop_assert!(
            after.total_sone >= before.total_sone,
            "band {} raised by {:.2} dB: {} -> {} sone",
            band, increase, before.total_sone, after.total_sone
        );
    }

    /// Same input, same output
    #[test]
    fn computation_is_deterministic(spectrum in spectrum(), field in field_type()) {
        let first = compute_stationary_loudness(spectrum.levels(), field).unwrap();
        let second = compute_stationary_loudness(spectrum.levels(), field).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Output sizes do not depend on the input
    #[test]
    fn profile_shape_is_fixed(spectrum in spectrum()) {
        let result = StationaryLoudness::free_field().compute(&spectrum).unwrap();

        prop_assert_eq!(result.specific_loudness.len(), BARK_GRID_POINTS);
        prop_assert_eq!(result.bark_axis.len(), BARK_GRID_POINTS);
        prop_assert_eq!(result.main_loudness.len(), NUM_CRITICAL_BANDS);
        prop_assert!(result.bark_axis.windows(2).all(|w| w[1] > w[0]));
    }

    /// Sharpness stays inside the weighted Bark range
    #[test]
    fn sharpness_is_bounded(spectrum in spectrum()) {
        let result = StationaryLoudness::free_field().compute(&spectrum).unwrap();
        let sharpness = result.sharpness_acum();

        prop_assert!(sharpness >= 0.0);
        // 0.11 * 24 Bark * g(24)
        prop_assert!(sharpness < 15.0, "sharpness {}", sharpness);
    }

    /// Any slice that is not 28 levels long is rejected
    #[test]
    fn wrong_length_is_rejected(levels in prop::collection::vec(-60.0f64..120.0, 0..64)) {
        let outcome = compute_stationary_loudness(&levels, FieldType::Free);
        prop_assert_eq!(outcome.is_ok(), levels.len() == NUM_THIRD_OCTAVE_BANDS);
    }
}
