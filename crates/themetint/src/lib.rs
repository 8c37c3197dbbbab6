//! # Theme 🎨 Tint
//!
//! Themetint converts theme colors between CSS Oklch notation and 24-bit
//! hexadecimal sRGB, and it keeps a theme color property resolved into a
//! renderable `#rrggbb` color as the styling context changes.
#![cfg_attr(
    not(feature = "pyffi"),
    doc = " This version of the API documentation **covers native Rust interfaces
only**. Enable the `pyffi` feature for the Python module."
)]
#![cfg_attr(
    feature = "pyffi",
    doc = " This version of the API documentation **covers both Rust and Python
interfaces**."
)]
//!
//!
//! ## 1. Overview
//!
//! Themetint's main abstractions are:
//!
//!   * [`HexColor`] and [`OklchColor`] are the **typed colors**. They parse
//!     from and format as CSS strings, reporting malformed input as
//!     [`ColorFormatError`](error::ColorFormatError).
//!   * [`is_valid_oklch`], [`hex_to_oklch`], and [`oklch_to_hex`] are the
//!     **string-level conversion API**. They never fail. Instead, malformed
//!     input degrades to well-known fallback colors.
//!   * The [`style`] module abstracts over the **styling context**, with
//!     [`StyleSource`](style::StyleSource) providing raw property values and
//!     [`NativeStyle`](style::NativeStyle) computing effective colors through
//!     transient probes. [`StyleSheet`](style::StyleSheet) is an in-memory
//!     implementation.
//!   * The [`resolve`] module implements the **theme color resolver**, with
//!     [`ThemeColorResolver`] turning raw values into published colors and
//!     [`subscribe`] returning a [`Subscription`] that polls and reacts to
//!     mutations.
//!   * The [`opt`] module provides the resolver's **options**, which may also
//!     be read from the environment.
//!
//!
//! ## 2. Conversions
//!
//! Conversions go through linear sRGB, LMS, and Oklab. Lightness is clamped to
//! `0..=1`, hue is normalized to `0..360`, and results are rounded to three
//! digits past the decimal. Reds are special: Pure red always converts to
//! `oklch(0.627 0.277 27.000)` and strongly chromatic reds always convert to
//! one of `#ff0000`, `#cc0000`, and `#990000`, so that a theme's red survives
//! repeated round trips.
//!
//! ```
//! # use themetint::{hex_to_oklch, oklch_to_hex};
//! assert_eq!(hex_to_oklch("#3178ea"), "oklch(0.591 0.187 259.667)");
//! assert_eq!(oklch_to_hex("oklch(0.5 0.1 200)"), "#00767b");
//!
//! assert_eq!(hex_to_oklch("#ff0000"), "oklch(0.627 0.277 27.000)");
//! assert_eq!(oklch_to_hex("oklch(0.627 0.277 27.000)"), "#ff0000");
//! ```
//!
//!
//! ## 3. Feature Flags
//!
//! Themetint supports two feature flags:
//!
//!   - `f64` selects the eponymous type as floating point type [`Float`]
//!     instead of `f32`. This feature is enabled by default.
//!   - `pyffi` enables the Python module `themetint`, exposing the
//!     string-level conversion API.

/// The floating point type in use.
#[cfg(feature = "f64")]
pub type Float = f64;
/// The floating point type in use.
#[cfg(not(feature = "f64"))]
pub type Float = f32;

mod color;
mod core;
pub mod error;
pub mod opt;
pub mod resolve;
pub mod style;
mod util;

pub use color::{
    hex_to_oklch, is_valid_oklch, oklch_to_hex, oklch_to_hex_with, HexColor, OklchColor,
    DEFAULT_OKLCH_STRING, FALLBACK_HEX_STRING,
};
pub use opt::DEFAULT_THEME_COLOR;
pub use resolve::{subscribe, Subscription, ThemeColorResolver};

#[cfg(feature = "pyffi")]
use pyo3::prelude::*;

#[doc(hidden)]
#[cfg(feature = "pyffi")]
#[pymodule]
pub fn themetint(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(is_valid_oklch, m)?)?;
    m.add_function(wrap_pyfunction!(hex_to_oklch, m)?)?;
    m.add_function(wrap_pyfunction!(oklch_to_hex, m)?)?;

    m.add("DEFAULT_OKLCH", DEFAULT_OKLCH_STRING)?;
    m.add("FALLBACK_HEX", FALLBACK_HEX_STRING)?;
    m.add("DEFAULT_THEME_COLOR", DEFAULT_THEME_COLOR.to_string())?;
    Ok(())
}
