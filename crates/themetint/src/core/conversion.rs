use crate::Float;

/// Convert the given 24-bit RGB coordinates to floating point coordinates.
#[inline]
pub(crate) fn from_24bit(r: u8, g: u8, b: u8) -> [Float; 3] {
    [r as Float / 255.0, g as Float / 255.0, b as Float / 255.0]
}

/// Convert the color coordinates to 24-bit representation.
///
/// This function clamps the gamma-corrected coordinates to `0..=1` before
/// scaling and rounding them. Not-a-number coordinates become zero.
pub(crate) fn to_24bit(coordinates: &[Float; 3]) -> [u8; 3] {
    #[inline]
    fn convert(value: Float) -> u8 {
        if value.is_nan() {
            0
        } else {
            (value.clamp(0.0, 1.0) * 255.0).round() as u8
        }
    }

    [
        convert(coordinates[0]),
        convert(coordinates[1]),
        convert(coordinates[2]),
    ]
}

// --------------------------------------------------------------------------------------------------------------------

/// Multiply the 3 by 3 matrix and 3-element vector with each other, producing a
/// new 3-element vector.
///
/// The products are summed strictly left to right without fused
/// multiply-adds, which keeps results bit-compatible with hosts that evaluate
/// the same expressions in plain double precision.
#[inline]
fn multiply(matrix: &[[Float; 3]; 3], vector: &[Float; 3]) -> [Float; 3] {
    let [row1, row2, row3] = matrix;

    [
        row1[0] * vector[0] + row1[1] * vector[1] + row1[2] * vector[2],
        row2[0] * vector[0] + row2[1] * vector[1] + row2[2] * vector[2],
        row3[0] * vector[0] + row3[1] * vector[1] + row3[2] * vector[2],
    ]
}

// --------------------------------------------------------------------------------------------------------------------

/// Convert coordinates from gamma-corrected sRGB to linear sRGB. This is a
/// one-hop, direct conversion.
fn rgb_to_linear_rgb(value: &[Float; 3]) -> [Float; 3] {
    #[inline]
    fn convert(value: Float) -> Float {
        if value <= 0.04045 {
            value / 12.92
        } else {
            ((value + 0.055) / 1.055).powf(2.4)
        }
    }

    [convert(value[0]), convert(value[1]), convert(value[2])]
}

/// Convert coordinates from linear sRGB to gamma-corrected sRGB. This is a
/// one-hop, direct conversion.
fn linear_rgb_to_rgb(value: &[Float; 3]) -> [Float; 3] {
    #[inline]
    fn convert(value: Float) -> Float {
        if value <= 0.0031308 {
            value * 12.92
        } else {
            1.055 * value.powf(1.0 / 2.4) - 0.055
        }
    }

    [convert(value[0]), convert(value[1]), convert(value[2])]
}

// --------------------------------------------------------------------------------------------------------------------
// The forward path goes straight from linear sRGB to the cone responses.

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const LINEAR_SRGB_TO_LMS: [[Float; 3]; 3] = [
    [ 0.4122214708, 0.5363325363, 0.0514459929 ],
    [ 0.2119034982, 0.6806995451, 0.1073969566 ],
    [ 0.0883024619, 0.2817188376, 0.6299787005 ],
];

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const LMS_TO_OKLAB: [[Float; 3]; 3] = [
    [ 0.2104542553,  0.7936177850, -0.0040720468 ],
    [ 1.9779984951, -2.4285922050,  0.4505937099 ],
    [ 0.0259040371,  0.7827717662, -0.8086757660 ],
];

/// Convert coordinates for linear sRGB to Oklab. This is a one-hop, direct
/// conversion, even though it requires two matrix multiplications and a
/// coordinate-wise cube root. Negative cone responses are clamped to zero
/// before taking the root.
fn linear_srgb_to_oklab(value: &[Float; 3]) -> [Float; 3] {
    let [l, m, s] = multiply(&LINEAR_SRGB_TO_LMS, value);
    multiply(
        &LMS_TO_OKLAB,
        &[l.max(0.0).cbrt(), m.max(0.0).cbrt(), s.max(0.0).cbrt()],
    )
}

// --------------------------------------------------------------------------------------------------------------------
// The inverse path detours through XYZ. Its matrices do not exactly invert the
// forward path; the red shortcuts were tuned against precisely these values.

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const OKLAB_TO_LMS: [[Float; 3]; 3] = [
    [ 1.0,  0.3963377774,  0.2158037573 ],
    [ 1.0, -0.1055613458, -0.0638541728 ],
    [ 1.0, -0.0894841775, -1.2914855480 ],
];

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const LMS_TO_XYZ: [[Float; 3]; 3] = [
    [  1.9242264358, -1.0047923126,  0.0376514040 ],
    [  0.3503167621,  0.7264811939, -0.0653844229 ],
    [ -0.0909828110, -0.3127282905,  1.5227665613 ],
];

#[rustfmt::skip]
#[allow(clippy::excessive_precision)]
const XYZ_TO_LINEAR_SRGB: [[Float; 3]; 3] = [
    [  3.2404542, -1.5371385, -0.4985314 ],
    [ -0.969266,   1.8760108,  0.041556  ],
    [  0.0556434, -0.2040259,  1.0572252 ],
];

/// Convert coordinates for Oklab to XYZ. The cube-rooted cone responses are
/// clamped to `0..=1` before cubing them again.
fn oklab_to_xyz(value: &[Float; 3]) -> [Float; 3] {
    let [l, m, s] = multiply(&OKLAB_TO_LMS, value);
    let [l, m, s] = [l.clamp(0.0, 1.0), m.clamp(0.0, 1.0), s.clamp(0.0, 1.0)];
    multiply(&LMS_TO_XYZ, &[l * l * l, m * m * m, s * s * s])
}

/// Convert coordinates for XYZ to linear sRGB. This is a one-hop, direct
/// conversion.
fn xyz_to_linear_srgb(value: &[Float; 3]) -> [Float; 3] {
    multiply(&XYZ_TO_LINEAR_SRGB, value)
}

// --------------------------------------------------------------------------------------------------------------------

/// Normalize the hue to `0..360`.
///
/// Tiny negative hues wrap around to exactly 360 in floating point, which is
/// mapped back to zero.
#[inline]
pub(crate) fn normalize_hue(hue: Float) -> Float {
    let h = hue.rem_euclid(360.0);
    if h >= 360.0 {
        0.0
    } else {
        h
    }
}

/// Convert coordinates for Oklch to Oklab. This is a one-hop, direct
/// conversion.
#[allow(non_snake_case)]
pub(crate) fn oklch_to_oklab(value: &[Float; 3]) -> [Float; 3] {
    let [L, C, h] = *value;
    let hue_radian = h * (std::f64::consts::PI as Float) / 180.0;
    [L, C * hue_radian.cos(), C * hue_radian.sin()]
}

/// Convert coordinates for Oklab to Oklch. This is a one-hop, direct
/// conversion. Unlike the usual formulation, there is no epsilon for
/// achromatic colors; the hue of a gray is whatever `atan2` makes of the
/// residual noise.
#[allow(non_snake_case)]
pub(crate) fn oklab_to_oklch(value: &[Float; 3]) -> [Float; 3] {
    let [L, a, b] = *value;
    let C = (a * a + b * b).sqrt();
    let h = normalize_hue(b.atan2(a).to_degrees());
    [L, C, h]
}

// --------------------------------------------------------------------------------------------------------------------

/// Convert coordinates for gamma-corrected sRGB to Oklab. This is a two-hop
/// conversion.
#[inline]
pub(crate) fn srgb_to_oklab(value: &[Float; 3]) -> [Float; 3] {
    let linear_srgb = rgb_to_linear_rgb(value);
    linear_srgb_to_oklab(&linear_srgb)
}

/// Convert coordinates for Oklab to gamma-corrected sRGB. This is a three-hop
/// conversion. The result is not clamped.
#[inline]
pub(crate) fn oklab_to_srgb(value: &[Float; 3]) -> [Float; 3] {
    let xyz = oklab_to_xyz(value);
    let linear_srgb = xyz_to_linear_srgb(&xyz);
    linear_rgb_to_rgb(&linear_srgb)
}
