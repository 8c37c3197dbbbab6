use std::rc::Rc;
use std::time::{Duration, Instant};

use tracing::{debug, debug_span, trace};

use super::{MutationNotifier, ThemeColorResolver};
use crate::opt::ResolverOptions;
use crate::style::StyleSource;

/// A live subscription to a theme color property.
///
/// The subscription does not own a timer or thread. Instead, the host's event
/// loop calls [`Subscription::tick`], which reads the property only if the
/// source signalled a mutation or the poll deadline has passed, and which
/// returns the next deadline. Dropping the subscription tears it down.
pub struct Subscription<S: StyleSource + ?Sized> {
    source: Rc<S>,
    variable: String,
    resolver: ThemeColorResolver,
    on_change: Box<dyn FnMut(&str)>,
    poll_interval: Duration,
    next_poll: Instant,
    notifier: MutationNotifier,
}

/// Subscribe to the theme color stored in the named property of the source.
///
/// This function registers a [`MutationNotifier`] with the source, resolves
/// the property, and immediately invokes the callback with the best-known
/// color, i.e., either the resolved color or the fallback. Thereafter, the
/// callback is invoked from [`Subscription::tick`] whenever the color changes.
///
/// # Examples
///
/// ```
/// # use std::cell::RefCell;
/// # use std::rc::Rc;
/// # use std::time::Instant;
/// # use themetint::opt::ResolverOptions;
/// # use themetint::style::StyleSheet;
/// # use themetint::subscribe;
/// let sheet = Rc::new(StyleSheet::new());
/// sheet.set_property("--primary", "oklch(0.5 0.1 200)");
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&seen);
/// let mut subscription = subscribe(
///     Rc::clone(&sheet),
///     "--primary",
///     move |hex| sink.borrow_mut().push(hex.to_owned()),
///     &ResolverOptions::default(),
/// );
///
/// sheet.set_property("--primary", "#ffca00");
/// subscription.tick(Instant::now());
/// subscription.unsubscribe();
///
/// assert_eq!(*seen.borrow(), ["#00767b", "#ffca00"]);
/// ```
pub fn subscribe<S, F>(
    source: Rc<S>,
    variable: impl Into<String>,
    on_change: F,
    options: &ResolverOptions,
) -> Subscription<S>
where
    S: StyleSource + ?Sized,
    F: FnMut(&str) + 'static,
{
    let notifier = MutationNotifier::new();
    source.observe(notifier.clone());

    let poll_interval = options.poll_interval();
    let mut subscription = Subscription {
        source,
        variable: variable.into(),
        resolver: ThemeColorResolver::new(options),
        on_change: Box::new(on_change),
        poll_interval,
        next_poll: Instant::now() + poll_interval,
        notifier,
    };

    {
        let _span = debug_span!("theme_color", variable = %subscription.variable).entered();
        debug!("subscribing");
        let raw = subscription.source.read_property(&subscription.variable);
        subscription
            .resolver
            .resolve(raw.as_deref(), subscription.source.native_style());
    }

    // Always publish once, even if that is the fallback.
    (subscription.on_change)(subscription.resolver.current());
    subscription
}

impl<S: StyleSource + ?Sized> Subscription<S> {
    /// Get the name of the property.
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Get the color published last.
    pub fn current(&self) -> &str {
        self.resolver.current()
    }

    /// Get a notifier for signalling mutations of the styling root.
    pub fn notifier(&self) -> MutationNotifier {
        self.notifier.clone()
    }

    /// Run the subscription.
    ///
    /// If a mutation has been signalled since the last tick or the poll
    /// deadline has passed, this method reads and resolves the property,
    /// invoking the callback if the color changed. It returns the next poll
    /// deadline. Calling this method more often than necessary is harmless.
    pub fn tick(&mut self, now: Instant) -> Instant {
        let _span = debug_span!("theme_color", variable = %self.variable).entered();

        let mutated = self.notifier.take_pending();
        let due = self.next_poll <= now;
        if due {
            self.next_poll = now + self.poll_interval;
        }

        if mutated || due {
            self.refresh();
        } else {
            trace!("skipping tick");
        }

        self.next_poll
    }

    /// Tear down the subscription. No further callbacks happen.
    pub fn unsubscribe(self) {}

    fn refresh(&mut self) {
        let raw = self.source.read_property(&self.variable);
        if let Some(hex) = self
            .resolver
            .resolve(raw.as_deref(), self.source.native_style())
        {
            (self.on_change)(&hex);
        }
    }
}

impl<S: StyleSource + ?Sized> Drop for Subscription<S> {
    fn drop(&mut self) {
        if self.notifier.is_connected() {
            debug!(variable = %self.variable, "unsubscribing");
            self.notifier.disconnect();
        }
    }
}

impl<S: StyleSource + ?Sized> std::fmt::Debug for Subscription<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("variable", &self.variable)
            .field("resolver", &self.resolver)
            .field("poll_interval", &self.poll_interval)
            .field("next_poll", &self.next_poll)
            .finish_non_exhaustive()
    }
}

// ====================================================================================================================

#[cfg(test)]
mod test {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::{Duration, Instant};

    use super::subscribe;
    use crate::opt::ResolverOptions;
    use crate::style::{StyleSheet, StyleSource};

    /// A source without mutation observer or native styling context.
    struct PlainSource(RefCell<Option<String>>);

    impl StyleSource for PlainSource {
        fn read_property(&self, _name: &str) -> Option<String> {
            self.0.borrow().clone()
        }
    }

    fn recorder() -> (Rc<RefCell<Vec<String>>>, impl FnMut(&str) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        (seen, move |hex: &str| sink.borrow_mut().push(hex.to_owned()))
    }

    #[test]
    fn test_immediate_publication() {
        let sheet = Rc::new(StyleSheet::new());
        let (seen, on_change) = recorder();
        let subscription = subscribe(
            Rc::clone(&sheet),
            "--primary",
            on_change,
            &ResolverOptions::default(),
        );

        assert_eq!(*seen.borrow(), ["#8033cc"]);
        assert_eq!(subscription.current(), "#8033cc");
        assert_eq!(subscription.variable(), "--primary");
    }

    #[test]
    fn test_mutation_and_dedupe() {
        let sheet = Rc::new(StyleSheet::new());
        sheet.set_property("--primary", "oklch(0.5 0.1 200)");
        let (seen, on_change) = recorder();
        let mut subscription = subscribe(
            Rc::clone(&sheet),
            "--primary",
            on_change,
            &ResolverOptions::default(),
        );

        let now = Instant::now();
        for _ in 0..5 {
            subscription.tick(now);
        }
        sheet.set_property("--primary", "oklch(0.5 0.1 200)");
        subscription.tick(now);
        assert_eq!(*seen.borrow(), ["#00767b"]);

        sheet.set_property("--primary", "oklch(0.627 0.277 27.000)");
        sheet.set_property("--secondary", "navy");
        subscription.tick(now);
        subscription.tick(now);
        assert_eq!(*seen.borrow(), ["#00767b", "#ff0000"]);
    }

    #[test]
    fn test_poll_deadline() {
        let source = Rc::new(PlainSource(RefCell::new(Some("#3178ea".to_owned()))));
        let (seen, on_change) = recorder();
        let options = ResolverOptions::builder()
            .poll_interval(Duration::from_millis(100))
            .build();
        let mut subscription = subscribe(Rc::clone(&source), "--primary", on_change, &options);

        // Without native styling context, non-Oklch values resolve to the
        // fallback.
        assert_eq!(*seen.borrow(), ["#8033cc"]);

        *source.0.borrow_mut() = Some("oklch(0.5 0.1 200)".to_owned());
        let start = Instant::now();
        let deadline = subscription.tick(start);
        assert!(deadline <= start + Duration::from_millis(100));
        assert_eq!(seen.borrow().len(), 1);

        let later = start + Duration::from_millis(150);
        let next = subscription.tick(later);
        assert_eq!(next, later + Duration::from_millis(100));
        assert_eq!(*seen.borrow(), ["#8033cc", "#00767b"]);
    }

    #[test]
    fn test_legacy_runtime() {
        let sheet = Rc::new(StyleSheet::with_oklch_support(false));
        sheet.set_property("--primary", "not-a-color");
        let (seen, on_change) = recorder();
        let mut subscription = subscribe(
            Rc::clone(&sheet),
            "--primary",
            on_change,
            &ResolverOptions::default(),
        );
        assert_eq!(*seen.borrow(), ["#8033cc"]);

        sheet.set_property("--primary", "rgba(255, 202, 0, 0.5)");
        subscription.tick(Instant::now());
        assert_eq!(*seen.borrow(), ["#8033cc", "#ffca00"]);

        // Oklch values never need the legacy runtime's help.
        sheet.set_property("--primary", "oklch(0.7 0.15 250)");
        subscription.tick(Instant::now());
        assert_eq!(*seen.borrow(), ["#8033cc", "#ffca00", "#00b3f6"]);
        assert_eq!(sheet.live_probes(), 0);
    }

    #[test]
    fn test_teardown() {
        let sheet = Rc::new(StyleSheet::new());
        let (seen, on_change) = recorder();
        let subscription = subscribe(
            Rc::clone(&sheet),
            "--primary",
            on_change,
            &ResolverOptions::default(),
        );
        let notifier = subscription.notifier();
        assert!(notifier.notify());
        assert_eq!(sheet.observer_count(), 1);

        subscription.unsubscribe();
        assert!(!notifier.notify());
        assert_eq!(sheet.observer_count(), 0);

        sheet.set_property("--primary", "teal");
        assert_eq!(*seen.borrow(), ["#8033cc"]);
    }
}
