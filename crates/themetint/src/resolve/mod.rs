//! Resolving a theme color property into a renderable hexadecimal color.
//!
//! [`ThemeColorResolver`] is the pure handler: Given the raw value of a style
//! property, it determines the corresponding `#rrggbb` color and reports
//! whether that color differs from the one published last. [`Subscription`]
//! is the scheduling adapter around a resolver. It reads the property from a
//! [`StyleSource`](crate::style::StyleSource) whenever the poll interval has
//! elapsed or the source signalled a mutation through its
//! [`MutationNotifier`], and it invokes the subscriber's callback with every
//! change.

mod watch;

pub use watch::{subscribe, Subscription};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::error::ProbeError;
use crate::opt::ResolverOptions;
use crate::style::{computed_hex, NativeStyle};
use crate::{HexColor, OklchColor};

/// A handle for signalling mutations of the styling root.
///
/// A notifier is cheap to clone and may be sent to other threads, since an
/// observer of the styling root need not live on the same thread as the
/// [`Subscription`]. Once the subscription has been torn down, the notifier
/// is disconnected and [`MutationNotifier::notify`] returns `false`.
#[derive(Clone, Debug)]
pub struct MutationNotifier {
    pending: Arc<AtomicBool>,
    connected: Arc<AtomicBool>,
}

impl MutationNotifier {
    pub(crate) fn new() -> Self {
        Self {
            pending: Arc::new(AtomicBool::new(false)),
            connected: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Signal a mutation. This method returns `false` if the subscription has
    /// been torn down, in which case observers should stop notifying.
    pub fn notify(&self) -> bool {
        if !self.is_connected() {
            return false;
        }

        self.pending.store(true, Ordering::Release);
        true
    }

    /// Determine whether the subscription is still live.
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    /// Consume a pending mutation signal.
    pub(crate) fn take_pending(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }

    pub(crate) fn disconnect(&self) {
        self.connected.store(false, Ordering::Release);
        self.pending.store(false, Ordering::Release);
    }
}

// ====================================================================================================================

/// The pure handler turning raw property values into published colors.
///
/// A resolver starts out publishing the fallback color. It remembers the raw
/// value it resolved last, so that repeated reads of an unchanged property
/// cost one string comparison. It also remembers the color it published last,
/// so that [`ThemeColorResolver::resolve`] reports each distinct color only
/// once.
///
/// # Examples
///
/// ```
/// # use themetint::resolve::ThemeColorResolver;
/// # use themetint::opt::ResolverOptions;
/// let mut resolver = ThemeColorResolver::new(&ResolverOptions::default());
/// assert_eq!(resolver.current(), "#8033cc");
///
/// let hex = resolver.resolve(Some("oklch(0.5 0.1 200)"), None);
/// assert_eq!(hex.as_deref(), Some("#00767b"));
/// assert_eq!(resolver.resolve(Some("oklch(0.5 0.1 200)"), None), None);
/// assert_eq!(resolver.current(), "#00767b");
/// ```
#[derive(Clone, Debug)]
pub struct ThemeColorResolver {
    fallback: HexColor,
    last_raw: Option<String>,
    current: String,
}

impl ThemeColorResolver {
    /// Create a new resolver publishing the options' fallback color.
    pub fn new(options: &ResolverOptions) -> Self {
        let fallback = options.fallback();
        Self {
            fallback,
            last_raw: None,
            current: fallback.to_string(),
        }
    }

    /// Get the color published last.
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Resolve the raw property value.
    ///
    /// This method returns the new `#rrggbb` color if it differs from the one
    /// published last and `None` otherwise. An unset or empty property leaves
    /// the published color as is. A valid `oklch()` value is converted
    /// directly. Any other value is computed by the native styling context,
    /// falling back on the configured fallback color when there is no such
    /// context or it does not understand the value. If the native styling
    /// context fails transiently, the published color stays the same and the
    /// next call tries again.
    pub fn resolve(&mut self, raw: Option<&str>, native: Option<&dyn NativeStyle>) -> Option<String> {
        let raw = raw.map(str::trim).unwrap_or_default();
        if raw.is_empty() {
            trace!("theme color is unset");
            return None;
        } else if self.last_raw.as_deref() == Some(raw) {
            trace!(value = raw, "theme color is unchanged");
            return None;
        }

        let color = match self.convert(raw, native) {
            Ok(color) => color,
            Err(error) => {
                warn!(value = raw, %error, "could not compute theme color");
                return None;
            }
        };

        self.last_raw = Some(raw.to_owned());
        let hex = color.to_string();
        if hex == self.current {
            return None;
        }

        debug!(value = raw, %hex, "publishing theme color");
        self.current.clone_from(&hex);
        Some(hex)
    }

    fn convert(&self, raw: &str, native: Option<&dyn NativeStyle>) -> Result<HexColor, ProbeError> {
        if let Ok(oklch) = raw.parse::<OklchColor>() {
            if let Some(shade) = oklch.red_shade() {
                debug!(value = raw, hex = %shade, "taking red shortcut");
                return Ok(shade);
            }
            return Ok(oklch.to_hex());
        }

        let Some(native) = native else {
            debug!(value = raw, "no native styling context, using fallback");
            return Ok(self.fallback);
        };

        match computed_hex(native, raw)? {
            Some(color) => Ok(color),
            None => {
                debug!(value = raw, "native styling context does not understand value, using fallback");
                Ok(self.fallback)
            }
        }
    }
}

impl Default for ThemeColorResolver {
    fn default() -> Self {
        Self::new(&ResolverOptions::default())
    }
}

// ====================================================================================================================
