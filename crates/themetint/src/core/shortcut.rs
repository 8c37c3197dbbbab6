//! The red shortcuts.
//!
//! The general conversion is lossy enough that brand reds drift visibly when
//! going back and forth between sRGB and Oklch. These shortcuts pin them to
//! fixed values in both directions. The thresholds are part of the contract.

use super::conversion::normalize_hue;
use crate::Float;

/// The Oklch coordinates substituted for missing or not-a-number coordinates.
pub(crate) const DEFAULT_OKLCH: [Float; 3] = [0.637, 0.237, 25.331];

/// The Oklch coordinates of canonical red.
pub(crate) const RED_OKLCH: [Float; 3] = [0.627, 0.277, 27.0];

/// The hue forced onto visually red colors.
pub(crate) const RED_HUE: Float = 27.0;

/// Canonical red as 24-bit sRGB.
pub(crate) const RED: [u8; 3] = [0xff, 0x00, 0x00];

const RED_HUES: std::ops::RangeInclusive<Float> = 20.0..=35.0;
const RED_MIN_CHROMA: Float = 0.2;

/// Determine whether the 24-bit color is pure red, which converts to
/// [`RED_OKLCH`] without further ado.
pub(crate) fn is_pure_red(rgb: &[u8; 3], srgb: &[Float; 3]) -> bool {
    *rgb == RED || (srgb[0] > 0.9 && srgb[1] < 0.1 && srgb[2] < 0.1)
}

/// Determine whether the gamma-corrected sRGB color looks red enough to have
/// its hue forced to [`RED_HUE`].
pub(crate) fn looks_red(srgb: &[Float; 3]) -> bool {
    srgb[0] > 0.8 && srgb[1] < 0.2 && srgb[2] < 0.2
}

/// Map a strongly chromatic red Oklch color to one of three fixed shades.
///
/// If the normalized hue is within `20..=35` degrees and chroma exceeds 0.2,
/// this function returns `#ff0000` for lightness above 0.6, `#cc0000` for
/// lightness above 0.4, and `#990000` otherwise. For all other colors, it
/// returns `None`.
pub(crate) fn red_shade(lightness: Float, chroma: Float, hue: Float) -> Option<[u8; 3]> {
    if !RED_HUES.contains(&normalize_hue(hue)) || chroma <= RED_MIN_CHROMA {
        return None;
    }

    Some(if lightness > 0.6 {
        RED
    } else if lightness > 0.4 {
        [0xcc, 0x00, 0x00]
    } else {
        [0x99, 0x00, 0x00]
    })
}
