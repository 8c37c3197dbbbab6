//! Hexadecimal and Oklch colors, plus the string-level conversion API.
//!
//! The string-level functions never fail. Every malformed input degrades to a
//! documented fallback color, since their output feeds live UI colors and must
//! always be renderable. The typed API, i.e., [`HexColor`] and [`OklchColor`],
//! instead reports malformed input as a
//! [`ColorFormatError`](crate::error::ColorFormatError).

#[cfg(feature = "pyffi")]
use pyo3::prelude::*;

use crate::core::{
    format_oklch, from_24bit, is_pure_red, looks_red, normalize_hue, oklab_to_oklch,
    oklab_to_srgb, oklch_to_oklab, parse_hex, parse_number, parse_oklch, parse_rgb, red_shade,
    split_oklch, srgb_to_oklab, to_24bit, DEFAULT_OKLCH, RED, RED_HUE, RED_OKLCH,
};
use crate::error::ColorFormatError;
use crate::style::{computed_hex, NativeStyle};
use crate::Float;

/// The `oklch()` string returned for malformed hexadecimal input.
pub const DEFAULT_OKLCH_STRING: &str = "oklch(0.637 0.237 25.331)";

/// The hexadecimal string returned for malformed `oklch()` input.
pub const FALLBACK_HEX_STRING: &str = "#ff0000";

// ====================================================================================================================

/// A 24-bit sRGB color.
///
/// Hexadecimal colors parse from six hexadecimal digits or the three-digit
/// shorthand, with or without leading `#` and ignoring surrounding white space.
/// They display as `#rrggbb` in lower case.
///
/// # Examples
///
/// ```
/// # use themetint::HexColor;
/// # use themetint::error::ColorFormatError;
/// let purple: HexColor = " 83C ".parse()?;
/// assert_eq!(purple.to_string(), "#8833cc");
/// assert_eq!(purple, HexColor::new(0x88, 0x33, 0xcc));
/// # Ok::<(), ColorFormatError>(())
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct HexColor([u8; 3]);

impl HexColor {
    /// Create a new hexadecimal color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Parse a CSS `rgb()` or `rgba()` color, as produced by a styling
    /// context's computed style, into a hexadecimal color. Alpha is dropped.
    pub fn from_css_rgb(s: &str) -> Result<Self, ColorFormatError> {
        parse_rgb(s).map(Self)
    }

    /// Get the red, green, and blue channels.
    pub const fn channels(&self) -> [u8; 3] {
        self.0
    }

    /// Get the gamma-corrected channels scaled to `0..=1`, as rendering
    /// surfaces expect for tinting geometry.
    pub fn to_float_rgb(&self) -> [f32; 3] {
        let [r, g, b] = self.0;
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0]
    }

    /// Convert this color to Oklch.
    ///
    /// Pure red and near-pure red map to the fixed `oklch(0.627 0.277 27)`.
    /// Other colors go through the general conversion, with lightness
    /// clamped to `0..=1` and the hue forced to 27 degrees for colors that
    /// look red. Not-a-number coordinates are replaced with the defaults
    /// `0.637`, `0.237`, and `25.331`.
    #[allow(non_snake_case)]
    pub fn to_oklch(&self) -> OklchColor {
        let [r, g, b] = self.0;
        let srgb = from_24bit(r, g, b);
        if is_pure_red(&self.0, &srgb) {
            let [L, C, h] = RED_OKLCH;
            return OklchColor::new(L, C, h);
        }

        let [L, C, h] = oklab_to_oklch(&srgb_to_oklab(&srgb));
        let L = L.clamp(0.0, 1.0);
        let h = if looks_red(&srgb) { RED_HUE } else { h };

        let pick = |value: Float, default: Float| if value.is_nan() { default } else { value };
        OklchColor::new(
            pick(L, DEFAULT_OKLCH[0]),
            pick(C, DEFAULT_OKLCH[1]),
            pick(h, DEFAULT_OKLCH[2]),
        )
    }
}

impl From<[u8; 3]> for HexColor {
    fn from(value: [u8; 3]) -> Self {
        Self(value)
    }
}

impl AsRef<[u8; 3]> for HexColor {
    fn as_ref(&self) -> &[u8; 3] {
        &self.0
    }
}

impl std::str::FromStr for HexColor {
    type Err = ColorFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex(s).map(Self)
    }
}

impl TryFrom<&str> for HexColor {
    type Error = ColorFormatError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::fmt::Display for HexColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [r, g, b] = self.0;
        f.write_fmt(format_args!("#{:02x}{:02x}{:02x}", r, g, b))
    }
}

// ====================================================================================================================

/// An Oklch color with optional alpha.
///
/// Lightness is nominally in `0..=1` but not checked; conversion clamps it.
/// Chroma is nominally non-negative. Hue is in degrees and may be any finite
/// number; hue-dependent decisions use its value normalized to `0..360`. Alpha
/// is carried along but never affects conversion.
///
/// # Examples
///
/// ```
/// # use themetint::OklchColor;
/// # use themetint::error::ColorFormatError;
/// let teal: OklchColor = "oklch(0.5 0.1 200)".parse()?;
/// assert_eq!(teal.to_hex().to_string(), "#00767b");
/// assert_eq!(teal.to_string(), "oklch(0.500 0.100 200.000)");
/// # Ok::<(), ColorFormatError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OklchColor {
    lightness: Float,
    chroma: Float,
    hue: Float,
    alpha: Option<Float>,
}

impl OklchColor {
    /// Create a new, opaque Oklch color.
    pub const fn new(lightness: Float, chroma: Float, hue: Float) -> Self {
        Self {
            lightness,
            chroma,
            hue,
            alpha: None,
        }
    }

    /// Create a new Oklch color with the given alpha.
    #[must_use = "method returns a new color and does not mutate the original value"]
    pub const fn with_alpha(self, alpha: Float) -> Self {
        Self {
            alpha: Some(alpha),
            ..self
        }
    }

    /// Get the lightness.
    pub const fn lightness(&self) -> Float {
        self.lightness
    }

    /// Get the chroma.
    pub const fn chroma(&self) -> Float {
        self.chroma
    }

    /// Get the hue in degrees, as given.
    pub const fn hue(&self) -> Float {
        self.hue
    }

    /// Get the alpha, if any.
    pub const fn alpha(&self) -> Option<Float> {
        self.alpha
    }

    /// Replace not-a-number coordinates with the defaults and clamp lightness.
    fn sanitized(&self) -> [Float; 3] {
        let pick = |value: Float, default: Float| if value.is_nan() { default } else { value };
        [
            pick(self.lightness, DEFAULT_OKLCH[0]).clamp(0.0, 1.0),
            pick(self.chroma, DEFAULT_OKLCH[1]),
            pick(self.hue, DEFAULT_OKLCH[2]),
        ]
    }

    /// Map this color to one of the three fixed red shades, if it is a
    /// strongly chromatic red with hue in `20..=35` and chroma above 0.2.
    pub fn red_shade(&self) -> Option<HexColor> {
        let [lightness, chroma, hue] = self.sanitized();
        red_shade(lightness, chroma, hue).map(HexColor)
    }

    /// Convert this color to a 24-bit sRGB color.
    ///
    /// Strongly chromatic reds map to one of three fixed shades, see
    /// [`OklchColor::red_shade`]. All other colors go through the general
    /// conversion and are clamped to the sRGB gamut.
    pub fn to_hex(&self) -> HexColor {
        if let Some(shade) = self.red_shade() {
            return shade;
        }

        let oklab = oklch_to_oklab(&self.sanitized());
        HexColor(to_24bit(&oklab_to_srgb(&oklab)))
    }

    /// Get the hue normalized to `0..360`.
    pub fn normalized_hue(&self) -> Float {
        normalize_hue(self.hue)
    }
}

impl std::str::FromStr for OklchColor {
    type Err = ColorFormatError;

    /// Parse an `oklch(L C H)` or `oklch(L C H / A)` color. The function name
    /// is case-insensitive and tokens may be separated by arbitrary white
    /// space. All three coordinates must be finite numbers. An unparsable
    /// alpha is treated as absent.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ([lightness, chroma, hue], alpha) = parse_oklch(s)?;
        Ok(Self {
            lightness,
            chroma,
            hue,
            alpha,
        })
    }
}

impl TryFrom<&str> for OklchColor {
    type Error = ColorFormatError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::fmt::Display for OklchColor {
    /// Format this color as `oklch(L C H)` or `oklch(L C H / A)` with three
    /// digits past the decimal for every component.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        format_oklch(&[self.lightness, self.chroma, self.hue], self.alpha, f)
    }
}

// ====================================================================================================================

/// Determine whether the string is a syntactically valid `oklch()` color.
///
/// This function accepts `oklch(L C H)` and `oklch(L C H / A)` with arbitrary
/// white space and a case-insensitive function name, as long as the three
/// coordinates are finite numbers. It does not check ranges. Alpha does not
/// affect validity.
///
/// # Examples
///
/// ```
/// # use themetint::is_valid_oklch;
/// assert!(is_valid_oklch("oklch(0.5 0.1 200)"));
/// assert!(is_valid_oklch("OKLCH( 1.5 0.4 -30 / 0.5 )"));
/// assert!(!is_valid_oklch("oklch(a b c)"));
/// assert!(!is_valid_oklch("rgb(1,2,3)"));
/// ```
#[cfg_attr(feature = "pyffi", pyfunction)]
pub fn is_valid_oklch(input: &str) -> bool {
    parse_oklch(input).is_ok()
}

/// Convert a hexadecimal color to an `oklch()` string.
///
/// The result always has three digits past the decimal. Malformed input
/// produces [`DEFAULT_OKLCH_STRING`].
///
/// # Examples
///
/// ```
/// # use themetint::hex_to_oklch;
/// assert_eq!(hex_to_oklch("#3178ea"), "oklch(0.591 0.187 259.667)");
/// assert_eq!(hex_to_oklch("#f00"), "oklch(0.627 0.277 27.000)");
/// assert_eq!(hex_to_oklch("not-a-color"), "oklch(0.637 0.237 25.331)");
/// ```
#[cfg_attr(feature = "pyffi", pyfunction)]
pub fn hex_to_oklch(hex: &str) -> String {
    match hex.parse::<HexColor>() {
        Ok(color) => color.to_oklch().to_string(),
        Err(_) => DEFAULT_OKLCH_STRING.to_owned(),
    }
}

/// Convert an `oklch()` string to a hexadecimal color.
///
/// This function is equivalent to [`oklch_to_hex_with`] without a native
/// styling context. Malformed input produces [`FALLBACK_HEX_STRING`].
///
/// # Examples
///
/// ```
/// # use themetint::oklch_to_hex;
/// assert_eq!(oklch_to_hex("oklch(0.627 0.277 27.000)"), "#ff0000");
/// assert_eq!(oklch_to_hex("oklch(0.5 0.25 30)"), "#cc0000");
/// assert_eq!(oklch_to_hex("oklch(0.7 0.15 250)"), "#00b3f6");
/// assert_eq!(oklch_to_hex("papayawhip"), "#ff0000");
/// ```
#[cfg_attr(feature = "pyffi", pyfunction)]
pub fn oklch_to_hex(oklch: &str) -> String {
    oklch_to_hex_with(oklch, None)
}

/// Convert an `oklch()` string to a hexadecimal color, falling back on the
/// native styling context.
///
/// If the string has the structure of an `oklch()` color, any coordinate that
/// is not a finite number is replaced with its default, i.e., `0.637`,
/// `0.237`, and `25.331` for lightness, chroma, and hue. Otherwise, the native
/// styling context, if available, gets to compute the color. If that fails as
/// well, this function returns [`FALLBACK_HEX_STRING`].
pub fn oklch_to_hex_with(oklch: &str, native: Option<&dyn NativeStyle>) -> String {
    if let Ok(tokens) = split_oklch(oklch) {
        let [lightness, chroma, hue] = tokens
            .coordinates
            .map(|t| parse_number(t).unwrap_or(Float::NAN));
        return OklchColor::new(lightness, chroma, hue).to_hex().to_string();
    }

    native
        .and_then(|native| computed_hex(native, oklch).ok().flatten())
        .unwrap_or(HexColor(RED))
        .to_string()
}

// ====================================================================================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_validity() {
        assert!(is_valid_oklch("oklch(0.5 0.1 200)"));
        assert!(is_valid_oklch("  oklch(0.5 0.1 200 / 0.3)  "));
        assert!(is_valid_oklch("oklch(0.5 0.1 200 / whatever)"));
        assert!(is_valid_oklch("oklch(2 -1 720)"));
        assert!(!is_valid_oklch("oklch(a b c)"));
        assert!(!is_valid_oklch("rgb(1,2,3)"));
        assert!(!is_valid_oklch("oklch(0.5 0.1)"));
        assert!(!is_valid_oklch(""));
    }

    #[test]
    fn test_hex_to_oklch() {
        assert_eq!(hex_to_oklch("#3178ea"), "oklch(0.591 0.187 259.667)");
        assert_eq!(hex_to_oklch("ffca00"), "oklch(0.861 0.176 89.441)");
        assert_eq!(hex_to_oklch("#8033cc"), "oklch(0.511 0.220 301.805)");
        assert_eq!(hex_to_oklch("#cc0000"), "oklch(0.531 0.218 29.234)");
        assert!(hex_to_oklch("#000000").starts_with("oklch(0.000 0.000 "));
    }

    #[test]
    fn test_red_stability() {
        assert_eq!(hex_to_oklch("#ff0000"), "oklch(0.627 0.277 27.000)");
        assert_eq!(hex_to_oklch("#f00"), hex_to_oklch("#ff0000"));
        assert_eq!(hex_to_oklch("#FF0000"), "oklch(0.627 0.277 27.000)");
        assert_eq!(oklch_to_hex("oklch(0.627 0.277 27.000)"), "#ff0000");

        // Near-pure red takes the same shortcut.
        assert_eq!(hex_to_oklch("#e60000"), "oklch(0.627 0.277 27.000)");

        // Visually red colors keep their lightness and chroma, not their hue.
        assert!(hex_to_oklch("#d62828").ends_with(" 27.000)"));

        // Brand red survives the round trip.
        assert_eq!(oklch_to_hex(&hex_to_oklch("#cc0000")), "#cc0000");
    }

    #[test]
    fn test_malformed_hex() {
        assert_eq!(hex_to_oklch("not-a-color"), DEFAULT_OKLCH_STRING);
        assert_eq!(hex_to_oklch(""), DEFAULT_OKLCH_STRING);
        assert_eq!(hex_to_oklch("#12345"), DEFAULT_OKLCH_STRING);
        assert_eq!(hex_to_oklch("#ggg"), DEFAULT_OKLCH_STRING);
    }

    #[test]
    fn test_oklch_to_hex() {
        assert_eq!(oklch_to_hex("oklch(0.5 0.1 200)"), "#00767b");
        assert_eq!(oklch_to_hex("oklch(0.5 0.1 385)"), "#a94848");
        assert_eq!(oklch_to_hex("oklch(0 0 0)"), "#000000");
        assert_eq!(oklch_to_hex("oklch(1.5 0 0)"), oklch_to_hex("oklch(1 0 0)"));
        assert_eq!(oklch_to_hex("oklch(0.5 0.25 30)"), "#cc0000");
        assert_eq!(oklch_to_hex("oklch(0.3 0.25 390)"), "#990000");
        assert_eq!(oklch_to_hex("oklch(0.7 0.25 27 / 0.5)"), "#ff0000");
    }

    #[test]
    fn test_oklch_to_hex_fallbacks() {
        assert_eq!(oklch_to_hex("papayawhip"), FALLBACK_HEX_STRING);
        assert_eq!(oklch_to_hex("oklch(0.5 0.1"), FALLBACK_HEX_STRING);

        // Structurally sound but numerically broken coordinates get defaults,
        // which happen to be a strongly chromatic red.
        assert_eq!(oklch_to_hex("oklch(x y z)"), "#ff0000");
        assert_eq!(oklch_to_hex("oklch(0.3 y z)"), "#990000");
    }

    #[test]
    fn test_typed_api() -> Result<(), ColorFormatError> {
        let color: OklchColor = "oklch(0.5 0.1 -160 / 50%)".parse()?;
        assert_eq!(color.lightness(), 0.5);
        assert_eq!(color.chroma(), 0.1);
        assert_eq!(color.hue(), -160.0);
        assert_eq!(color.normalized_hue(), 200.0);
        assert_eq!(color.alpha(), Some(0.5));
        assert_eq!(color.to_string(), "oklch(0.500 0.100 -160.000 / 0.500)");
        assert_eq!(color.to_hex(), HexColor::new(0x00, 0x76, 0x7b));

        let hex = HexColor::try_from("#00767B")?;
        assert_eq!(hex.channels(), [0x00, 0x76, 0x7b]);
        assert_eq!(hex.to_float_rgb(), [0.0, 118.0 / 255.0, 123.0 / 255.0]);
        assert_eq!(HexColor::from_css_rgb("rgb(0, 118, 123)")?, hex);

        assert_eq!(
            "oklch(nope)".parse::<OklchColor>(),
            Err(ColorFormatError::MissingCoordinate)
        );
        Ok(())
    }

    #[test]
    fn test_nan_defaults() {
        let color = OklchColor::new(Float::NAN, Float::NAN, Float::NAN);
        assert_eq!(color.to_hex(), HexColor::new(0xff, 0, 0));
        assert_eq!(color.red_shade(), Some(HexColor::new(0xff, 0, 0)));
    }
}
