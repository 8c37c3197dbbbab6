//! Utility module with themetint's errors.
//!
//! None of these errors ever reach the string-level conversion API or a
//! subscriber's callback. They exist for the typed API, i.e., the `FromStr`
//! implementations of [`HexColor`](crate::HexColor) and
//! [`OklchColor`](crate::OklchColor), and for the styling context's probes.

/// An erroneous color format.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ColorFormatError {
    /// A color format that does not start with a known prefix such as `#`,
    /// `oklch`, or `rgb`.
    #[error("color format should be hexadecimal, `oklch()`, `rgb()`, or `rgba()`")]
    UnknownFormat,

    /// A color format with unexpected characters or an unexpected number of
    /// characters. For example, `#00` is missing a hexadecimal digit, whereas
    /// `#💩00` has the correct length but contains an unsuitable character.
    #[error("color format should contain 3 or 6 hexadecimal digits")]
    UnexpectedCharacters,

    /// A parenthesized color format without the opening parenthesis, e.g.,
    /// `oklch 0.5 0.1 200)`.
    #[error("color format should include an opening parenthesis but has none")]
    NoOpeningParenthesis,

    /// A parenthesized color format without the closing parenthesis, e.g.,
    /// `oklch(0.5 0.1 200`.
    #[error("color format should include a closing parenthesis but has none")]
    NoClosingParenthesis,

    /// A color format that is missing a coordinate, e.g., `oklch(0.5 0.1)`.
    #[error("color format should have 3 coordinates but is missing one")]
    MissingCoordinate,

    /// A color format with a malformed hexadecimal digit, e.g., `#efg`.
    #[error("color format coordinates should be hexadecimal integers but are not")]
    MalformedHex,

    /// A color format with a malformed or non-finite number, e.g.,
    /// `oklch(a b c)`.
    #[error("color format coordinates should be finite numbers but are not")]
    MalformedFloat,

    /// A color format with more coordinates than it admits, e.g.,
    /// `oklch(1 2 3 4)` or `rgb(1 2 3 / 4 5)`.
    #[error("color format has more coordinates than it should")]
    TooManyCoordinates,
}

// ====================================================================================================================

/// An error while probing the native styling context.
///
/// Probes are transient, invisible elements the styling context creates so
/// that it can compute the effective color for an arbitrary color value. Their
/// failures are never fatal; the resolver falls back to its last published
/// color.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    /// The styling context cannot create probes at all, e.g., because there is
    /// no document.
    #[error("styling context cannot create a probe")]
    Unavailable,

    /// The probe was removed from the styling context before its computed
    /// color could be read.
    #[error("probe was detached before its color could be computed")]
    Detached,
}
