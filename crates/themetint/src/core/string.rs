use crate::error::ColorFormatError;
use crate::Float;

/// Parse a 24-bit color in hexadecimal format. If successful, this function
/// returns the three coordinates as unsigned bytes.
///
/// The leading `#` is optional and surrounding white space is ignored. This
/// function transparently expands three-digit shorthand.
pub(crate) fn parse_hex(s: &str) -> Result<[u8; 3], ColorFormatError> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    if s.len() != 3 && s.len() != 6 {
        return Err(ColorFormatError::UnexpectedCharacters);
    }

    fn parse_coordinate(s: &str, index: usize) -> Result<u8, ColorFormatError> {
        let factor = s.len() / 3;
        let t = s
            .get(factor * index..factor * (index + 1))
            .ok_or(ColorFormatError::UnexpectedCharacters)?;
        if !t.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorFormatError::MalformedHex);
        }
        let n = u8::from_str_radix(t, 16).map_err(|_| ColorFormatError::MalformedHex)?;

        Ok(if factor == 1 { 16 * n + n } else { n })
    }

    let c1 = parse_coordinate(s, 0)?;
    let c2 = parse_coordinate(s, 1)?;
    let c3 = parse_coordinate(s, 2)?;
    Ok([c1, c2, c3])
}

// --------------------------------------------------------------------------------------------------------------------

/// Strip the case-insensitive function name and the parentheses from a CSS
/// color function, returning the body.
fn strip_function<'a>(s: &'a str, name: &str) -> Result<&'a str, ColorFormatError> {
    let rest = s
        .get(..name.len())
        .filter(|prefix| prefix.eq_ignore_ascii_case(name))
        .and_then(|_| s.get(name.len()..))
        .ok_or(ColorFormatError::UnknownFormat)?;

    rest.trim_start()
        .strip_prefix('(')
        .ok_or(ColorFormatError::NoOpeningParenthesis)
        .and_then(|rest| {
            rest.trim_end()
                .strip_suffix(')')
                .ok_or(ColorFormatError::NoClosingParenthesis)
        })
}

/// Parse a finite number.
#[inline]
pub(crate) fn parse_number(s: &str) -> Result<Float, ColorFormatError> {
    s.parse::<Float>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or(ColorFormatError::MalformedFloat)
}

/// Parse an alpha value, which may be a number or a percentage.
pub(crate) fn parse_alpha(s: &str) -> Result<Float, ColorFormatError> {
    match s.strip_suffix('%') {
        Some(percent) => parse_number(percent).map(|n| n / 100.0),
        None => parse_number(s),
    }
}

/// The unparsed tokens of an `oklch()` color.
#[derive(Debug, PartialEq)]
pub(crate) struct OklchTokens<'a> {
    pub coordinates: [&'a str; 3],
    pub alpha: Option<&'a str>,
}

/// Split an `oklch()` color into its tokens.
///
/// This function recognizes `oklch(L C H)` and `oklch(L C H / A)` with
/// arbitrary white space between tokens and a case-insensitive function name.
/// It checks the structure only; the tokens may or may not be numbers.
pub(crate) fn split_oklch(s: &str) -> Result<OklchTokens<'_>, ColorFormatError> {
    let body = strip_function(s.trim(), "oklch")?;

    let (body, alpha) = match body.split_once('/') {
        Some((coordinates, alpha)) => {
            let alpha = alpha.trim();
            if alpha.is_empty() {
                return Err(ColorFormatError::MissingCoordinate);
            }
            (coordinates, Some(alpha))
        }
        None => (body, None),
    };

    let mut iter = body.split_whitespace();
    let mut next = || iter.next().ok_or(ColorFormatError::MissingCoordinate);
    let coordinates = [next()?, next()?, next()?];
    if iter.next().is_some() {
        return Err(ColorFormatError::TooManyCoordinates);
    }

    Ok(OklchTokens { coordinates, alpha })
}

/// Parse an `oklch()` color into its three coordinates and optional alpha.
///
/// The three coordinates must be finite numbers. An alpha value that does not
/// parse is dropped, since alpha never affects validity.
pub(crate) fn parse_oklch(s: &str) -> Result<([Float; 3], Option<Float>), ColorFormatError> {
    let tokens = split_oklch(s)?;
    let [t1, t2, t3] = tokens.coordinates;
    let coordinates = [parse_number(t1)?, parse_number(t2)?, parse_number(t3)?];
    let alpha = tokens.alpha.and_then(|t| parse_alpha(t).ok());
    Ok((coordinates, alpha))
}

// --------------------------------------------------------------------------------------------------------------------

/// Parse a color in CSS `rgb()` or `rgba()` format.
///
/// This function accepts both the legacy comma-separated syntax, with an
/// optional fourth alpha argument, and the modern space-separated syntax with
/// an optional alpha after a slash. Channels are numbers between 0 and 255 or
/// percentages. They are clamped and rounded. Alpha is ignored.
pub(crate) fn parse_rgb(s: &str) -> Result<[u8; 3], ColorFormatError> {
    let s = s.trim();
    let body = strip_function(s, "rgba").or_else(|_| strip_function(s, "rgb"))?;
    let body = match body.split_once('/') {
        Some((channels, _)) => channels,
        None => body,
    };

    fn parse_channel(s: Option<&str>) -> Result<u8, ColorFormatError> {
        let t = s.ok_or(ColorFormatError::MissingCoordinate)?;
        let value = match t.strip_suffix('%') {
            Some(percent) => parse_number(percent)? / 100.0 * 255.0,
            None => parse_number(t)?,
        };
        Ok(value.clamp(0.0, 255.0).round() as u8)
    }

    let mut iter = body
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty());
    let c1 = parse_channel(iter.next())?;
    let c2 = parse_channel(iter.next())?;
    let c3 = parse_channel(iter.next())?;
    // Legacy syntax puts alpha in fourth position.
    let _ = iter.next();
    if iter.next().is_some() {
        return Err(ColorFormatError::TooManyCoordinates);
    }

    Ok([c1, c2, c3])
}

// --------------------------------------------------------------------------------------------------------------------

/// Format a coordinate with exactly three digits past the decimal, never
/// producing a negative zero.
pub(crate) fn format_coordinate(
    value: Float,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    let rounded = (value * 1000.0).round() / 1000.0;
    // Adding zero turns -0.0 into 0.0.
    f.write_fmt(format_args!("{:.3}", rounded + 0.0))
}

/// Format the Oklch coordinates and optional alpha as an `oklch()` color.
pub(crate) fn format_oklch(
    coordinates: &[Float; 3],
    alpha: Option<Float>,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    f.write_str("oklch(")?;
    for (index, coordinate) in coordinates.iter().enumerate() {
        if index > 0 {
            f.write_str(" ")?;
        }
        format_coordinate(*coordinate, f)?;
    }
    if let Some(alpha) = alpha {
        f.write_str(" / ")?;
        format_coordinate(alpha, f)?;
    }
    f.write_str(")")
}

// ====================================================================================================================
