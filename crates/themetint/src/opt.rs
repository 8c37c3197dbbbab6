//! Helper module with the options for resolving theme colors.
//!
//! This module provides the options for a
//! [`ThemeColorResolver`](crate::resolve::ThemeColorResolver) and its
//! [`Subscription`](crate::resolve::Subscription), along with the
//! corresponding builder.
//!
//!
//! # Example
//!
//! ```
//! # use std::time::Duration;
//! # use themetint::HexColor;
//! # use themetint::opt::ResolverOptions;
//! let options = ResolverOptions::builder()
//!     .poll_interval(Duration::from_millis(250))
//!     .fallback(HexColor::new(0x33, 0x33, 0x33))
//!     .build();
//!
//! assert_eq!(options.poll_interval(), Duration::from_millis(250));
//! assert_eq!(options.fallback().to_string(), "#333333");
//! ```

use std::time::Duration;

use crate::util::{Env, Environment};
use crate::HexColor;

/// The environment variable overriding the poll interval in milliseconds.
pub const POLL_INTERVAL_VARIABLE: &str = "THEMETINT_POLL_MS";

/// The environment variable overriding the fallback color.
pub const FALLBACK_VARIABLE: &str = "THEMETINT_FALLBACK";

/// The default theme color, a medium purple.
pub const DEFAULT_THEME_COLOR: HexColor = HexColor::new(0x80, 0x33, 0xcc);

/// The default poll interval.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Clone, Debug)]
struct OptionData {
    poll_interval: Duration,
    fallback: HexColor,
}

impl OptionData {
    pub const fn new() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            fallback: DEFAULT_THEME_COLOR,
        }
    }
}

/// A builder of options objects.
#[derive(Debug)]
pub struct ResolverOptionBuilder(OptionData);

impl ResolverOptionBuilder {
    /// Set the poll interval.
    ///
    /// A zero interval is replaced with one millisecond, so that a host's
    /// event loop never spins.
    pub fn poll_interval(&mut self, interval: Duration) -> &mut Self {
        self.0.poll_interval = interval.max(Duration::from_millis(1));
        self
    }

    /// Set the fallback color, which is published before the first
    /// resolution and whenever a value cannot be converted at all.
    pub fn fallback(&mut self, color: HexColor) -> &mut Self {
        self.0.fallback = color;
        self
    }

    /// Instantiate the options.
    pub fn build(&self) -> ResolverOptions {
        ResolverOptions(self.0.clone())
    }
}

/// An options object.
#[derive(Clone, Debug)]
pub struct ResolverOptions(OptionData);

impl Default for ResolverOptions {
    fn default() -> Self {
        ResolverOptions(OptionData::new())
    }
}

impl ResolverOptions {
    /// Create a new builder with the default option values.
    pub fn builder() -> ResolverOptionBuilder {
        ResolverOptionBuilder(OptionData::new())
    }

    /// Instantiate the default options, overridden by the process
    /// environment.
    ///
    /// [`POLL_INTERVAL_VARIABLE`] may hold a positive number of milliseconds
    /// and [`FALLBACK_VARIABLE`] a hexadecimal color. Malformed values are
    /// ignored.
    pub fn from_environment() -> Self {
        Self::with_environment(&Env::default())
    }

    pub(crate) fn with_environment(env: &impl Environment) -> Self {
        let mut builder = Self::builder();

        if let Some(millis) = env
            .read_non_empty(POLL_INTERVAL_VARIABLE)
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|millis| *millis > 0)
        {
            builder.poll_interval(Duration::from_millis(millis));
        }

        if let Some(color) = env
            .read_non_empty(FALLBACK_VARIABLE)
            .and_then(|v| v.parse::<HexColor>().ok())
        {
            builder.fallback(color);
        }

        builder.build()
    }

    /// Get the poll interval.
    pub fn poll_interval(&self) -> Duration {
        self.0.poll_interval
    }

    /// Get the fallback color.
    pub fn fallback(&self) -> HexColor {
        self.0.fallback
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::util::FakeEnv;

    #[test]
    fn test_defaults() {
        let options = ResolverOptions::default();
        assert_eq!(options.poll_interval(), Duration::from_millis(500));
        assert_eq!(options.fallback().to_string(), "#8033cc");

        let options = ResolverOptions::builder()
            .poll_interval(Duration::ZERO)
            .build();
        assert_eq!(options.poll_interval(), Duration::from_millis(1));
    }

    #[test]
    fn test_environment() {
        let mut env = FakeEnv::new();
        env.set(POLL_INTERVAL_VARIABLE, " 125 ")
            .set(FALLBACK_VARIABLE, "#333");
        let options = ResolverOptions::with_environment(&env);
        assert_eq!(options.poll_interval(), Duration::from_millis(125));
        assert_eq!(options.fallback(), HexColor::new(0x33, 0x33, 0x33));

        let mut env = FakeEnv::new();
        env.set(POLL_INTERVAL_VARIABLE, "0")
            .set(FALLBACK_VARIABLE, "purple-ish");
        let options = ResolverOptions::with_environment(&env);
        assert_eq!(options.poll_interval(), DEFAULT_POLL_INTERVAL);
        assert_eq!(options.fallback(), DEFAULT_THEME_COLOR);
    }
}
