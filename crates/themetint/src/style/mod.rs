//! The styling context supplying theme colors.
//!
//! A styling context has two faces. As a [`StyleSource`], it provides the raw
//! value of named style properties, e.g., the custom property `--primary`
//! resolved against the document root. As a [`NativeStyle`], it computes the
//! effective color for arbitrary color values by way of transient, invisible
//! [`Probe`] elements. The latter is the fallback for runtimes whose own color
//! parsing does not understand Oklch, or for values that are not Oklch in the
//! first place.
//!
//! [`StyleSheet`] is an in-memory styling context, suitable for headless hosts
//! and tests.

mod sheet;

pub use sheet::StyleSheet;

use crate::error::ProbeError;
use crate::resolve::MutationNotifier;
use crate::HexColor;

/// A source of raw style property values.
pub trait StyleSource {
    /// Read the current, raw value of the named style property. This method
    /// returns `None` if the property is not set.
    fn read_property(&self, name: &str) -> Option<String>;

    /// Get the native styling context, if the source has one.
    fn native_style(&self) -> Option<&dyn NativeStyle> {
        None
    }

    /// Register the notifier with the source's mutation observer, if the
    /// source has one. Sources should stop notifying once
    /// [`MutationNotifier::notify`] returns `false`.
    fn observe(&self, notifier: MutationNotifier) {
        let _ = notifier;
    }
}

/// A transient, invisible element for computing effective colors.
pub trait Probe {
    /// Apply the color value to the probe, e.g., as its `color` property.
    fn apply_color(&mut self, value: &str);

    /// Read back the probe's computed color, typically in `rgb()` or `rgba()`
    /// format. A value the styling context does not understand results in
    /// some other, unparsable string.
    fn computed_color(&self) -> Result<String, ProbeError>;

    /// Remove the probe from the styling context. Calling this method more
    /// than once has no further effect.
    fn remove(&mut self);
}

/// A native styling context that can compute effective colors.
pub trait NativeStyle {
    /// Create a new probe attached to the styling context.
    fn create_probe(&self) -> Result<Box<dyn Probe + '_>, ProbeError>;
}

/// A probe that is removed when dropped.
///
/// Wrapping every probe in a guard ensures that the probe is removed again on
/// all paths, including early returns and errors.
pub struct ProbeGuard<'a> {
    probe: Box<dyn Probe + 'a>,
}

impl<'a> ProbeGuard<'a> {
    /// Guard the given probe.
    pub fn new(probe: Box<dyn Probe + 'a>) -> Self {
        Self { probe }
    }
}

impl<'a> std::ops::Deref for ProbeGuard<'a> {
    type Target = dyn Probe + 'a;

    fn deref(&self) -> &Self::Target {
        &*self.probe
    }
}

impl<'a> std::ops::DerefMut for ProbeGuard<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.probe
    }
}

impl Drop for ProbeGuard<'_> {
    fn drop(&mut self) {
        self.probe.remove();
    }
}

/// Have the native styling context compute the color value as a hexadecimal
/// color.
///
/// This function returns `Ok(None)` if the probe's computed color is not a
/// parsable `rgb()` or `rgba()` color, and an error if the probe could not be
/// created or read. Either way, the probe has been removed by the time this
/// function returns.
pub fn computed_hex(
    native: &dyn NativeStyle,
    value: &str,
) -> Result<Option<HexColor>, ProbeError> {
    let mut probe = ProbeGuard::new(native.create_probe()?);
    probe.apply_color(value);
    let computed = probe.computed_color()?;
    Ok(HexColor::from_css_rgb(&computed).ok())
}
