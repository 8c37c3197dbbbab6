use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use super::{NativeStyle, Probe, StyleSource};
use crate::error::ProbeError;
use crate::resolve::MutationNotifier;
use crate::{HexColor, OklchColor};

/// The CSS named colors the in-memory styling context understands.
const NAMED_COLORS: [(&str, [u8; 3]); 20] = [
    ("aqua", [0, 255, 255]),
    ("black", [0, 0, 0]),
    ("blue", [0, 0, 255]),
    ("cyan", [0, 255, 255]),
    ("fuchsia", [255, 0, 255]),
    ("gray", [128, 128, 128]),
    ("green", [0, 128, 0]),
    ("grey", [128, 128, 128]),
    ("lime", [0, 255, 0]),
    ("magenta", [255, 0, 255]),
    ("maroon", [128, 0, 0]),
    ("navy", [0, 0, 128]),
    ("olive", [128, 128, 0]),
    ("orange", [255, 165, 0]),
    ("purple", [128, 0, 128]),
    ("rebeccapurple", [102, 51, 153]),
    ("red", [255, 0, 0]),
    ("silver", [192, 192, 192]),
    ("teal", [0, 128, 128]),
    ("white", [255, 255, 255]),
];

/// An in-memory styling context.
///
/// A style sheet holds named properties and acts as its own mutation
/// observer: Every [`StyleSheet::set_property`] and
/// [`StyleSheet::remove_property`] notifies the registered
/// [`MutationNotifier`]s. Its probes compute colors given in hexadecimal,
/// `rgb()`/`rgba()`, or as one of a few named colors. Whether they also
/// understand `oklch()` depends on how the style sheet was created, which
/// makes it possible to emulate runtimes without native Oklch support.
///
/// # Examples
///
/// ```
/// # use themetint::style::{StyleSheet, StyleSource};
/// let sheet = StyleSheet::new();
/// sheet.set_property("--primary", "oklch(0.5 0.1 200)");
/// assert_eq!(
///     sheet.read_property("--primary").as_deref(),
///     Some("oklch(0.5 0.1 200)")
/// );
/// ```
#[derive(Debug)]
pub struct StyleSheet {
    properties: RefCell<HashMap<String, String>>,
    observers: RefCell<Vec<MutationNotifier>>,
    oklch_support: bool,
    probing: Cell<bool>,
    live_probes: Cell<usize>,
}

impl StyleSheet {
    /// Create a new, empty style sheet whose probes understand `oklch()`.
    pub fn new() -> Self {
        Self::with_oklch_support(true)
    }

    /// Create a new, empty style sheet whose probes may or may not understand
    /// `oklch()`.
    pub fn with_oklch_support(oklch_support: bool) -> Self {
        Self {
            properties: RefCell::new(HashMap::new()),
            observers: RefCell::new(Vec::new()),
            oklch_support,
            probing: Cell::new(true),
            live_probes: Cell::new(0),
        }
    }

    /// Set the named property and notify observers.
    pub fn set_property(&self, name: impl Into<String>, value: impl Into<String>) {
        self.properties
            .borrow_mut()
            .insert(name.into(), value.into());
        self.notify();
    }

    /// Remove the named property and notify observers.
    pub fn remove_property(&self, name: &str) {
        if self.properties.borrow_mut().remove(name).is_some() {
            self.notify();
        }
    }

    /// Enable or disable probe creation. With probing disabled, every attempt
    /// at creating a probe fails with [`ProbeError::Unavailable`].
    pub fn set_probing(&self, enabled: bool) {
        self.probing.set(enabled);
    }

    /// Get the number of probes that have been created but not yet removed.
    pub fn live_probes(&self) -> usize {
        self.live_probes.get()
    }

    /// Get the number of connected observers.
    pub fn observer_count(&self) -> usize {
        let mut observers = self.observers.borrow_mut();
        observers.retain(MutationNotifier::is_connected);
        observers.len()
    }

    fn notify(&self) {
        // Disconnected notifiers belong to torn-down subscriptions.
        self.observers.borrow_mut().retain(MutationNotifier::notify);
    }

    /// Compute the color value the way a probe does.
    fn compute(&self, value: &str) -> String {
        let value = value.trim();
        let lowercase = value.to_ascii_lowercase();

        let rgb = value
            .parse::<HexColor>()
            .ok()
            .filter(|_| value.starts_with('#'))
            .or_else(|| {
                NAMED_COLORS
                    .iter()
                    .find(|(name, _)| *name == lowercase)
                    .map(|(_, rgb)| HexColor::from(*rgb))
            })
            .or_else(|| HexColor::from_css_rgb(value).ok())
            .or_else(|| {
                if self.oklch_support {
                    value.parse::<OklchColor>().ok().as_ref().map(OklchColor::to_hex)
                } else {
                    None
                }
            });

        match rgb {
            Some(color) => {
                let [r, g, b] = color.channels();
                format!("rgb({}, {}, {})", r, g, b)
            }
            // An invalid value leaves the probe without color.
            None => String::new(),
        }
    }
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleSource for StyleSheet {
    fn read_property(&self, name: &str) -> Option<String> {
        self.properties.borrow().get(name).cloned()
    }

    fn native_style(&self) -> Option<&dyn NativeStyle> {
        Some(self)
    }

    fn observe(&self, notifier: MutationNotifier) {
        self.observers.borrow_mut().push(notifier);
    }
}

impl NativeStyle for StyleSheet {
    fn create_probe(&self) -> Result<Box<dyn Probe + '_>, ProbeError> {
        if !self.probing.get() {
            return Err(ProbeError::Unavailable);
        }

        self.live_probes.set(self.live_probes.get() + 1);
        Ok(Box::new(SheetProbe {
            sheet: self,
            value: None,
            attached: true,
        }))
    }
}

/// A probe of a [`StyleSheet`].
struct SheetProbe<'a> {
    sheet: &'a StyleSheet,
    value: Option<String>,
    attached: bool,
}

impl Probe for SheetProbe<'_> {
    fn apply_color(&mut self, value: &str) {
        self.value = Some(value.to_owned());
    }

    fn computed_color(&self) -> Result<String, ProbeError> {
        if !self.attached {
            return Err(ProbeError::Detached);
        }

        Ok(self
            .value
            .as_deref()
            .map(|value| self.sheet.compute(value))
            .unwrap_or_default())
    }

    fn remove(&mut self) {
        if self.attached {
            self.attached = false;
            self.sheet.live_probes.set(self.sheet.live_probes.get() - 1);
        }
    }
}
