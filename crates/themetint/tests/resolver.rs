//! Integration tests for theme color subscriptions.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

use themetint::error::ProbeError;
use themetint::opt::ResolverOptions;
use themetint::resolve::MutationNotifier;
use themetint::style::{NativeStyle, Probe, StyleSheet, StyleSource};
use themetint::{oklch_to_hex_with, subscribe, HexColor};

/// A styling context whose probes can be made to fail after creation.
#[derive(Default)]
struct FlakySource {
    value: RefCell<Option<String>>,
    broken: Cell<bool>,
    created: Cell<usize>,
    removed: Cell<usize>,
}

struct FlakyProbe<'a> {
    source: &'a FlakySource,
    value: String,
    removed: bool,
}

impl StyleSource for FlakySource {
    fn read_property(&self, _name: &str) -> Option<String> {
        self.value.borrow().clone()
    }

    fn native_style(&self) -> Option<&dyn NativeStyle> {
        Some(self)
    }
}

impl NativeStyle for FlakySource {
    fn create_probe(&self) -> Result<Box<dyn Probe + '_>, ProbeError> {
        self.created.set(self.created.get() + 1);
        Ok(Box::new(FlakyProbe {
            source: self,
            value: String::new(),
            removed: false,
        }))
    }
}

impl Probe for FlakyProbe<'_> {
    fn apply_color(&mut self, value: &str) {
        self.value = value.to_owned();
    }

    fn computed_color(&self) -> Result<String, ProbeError> {
        if self.source.broken.get() {
            Err(ProbeError::Detached)
        } else if self.value == "hotpink" {
            Ok("rgb(255, 105, 180)".to_owned())
        } else {
            Ok("transparent".to_owned())
        }
    }

    fn remove(&mut self) {
        if !self.removed {
            self.removed = true;
            self.source.removed.set(self.source.removed.get() + 1);
        }
    }
}

fn recorder() -> (Rc<RefCell<Vec<String>>>, impl FnMut(&str) + 'static) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    (seen, move |hex: &str| sink.borrow_mut().push(hex.to_owned()))
}

#[test]
fn probes_are_removed_on_every_path() {
    let source = Rc::new(FlakySource::default());
    *source.value.borrow_mut() = Some("hotpink".to_owned());

    let (seen, on_change) = recorder();
    let options = ResolverOptions::builder()
        .poll_interval(Duration::from_millis(10))
        .build();
    let mut subscription = subscribe(Rc::clone(&source), "--accent", on_change, &options);
    assert_eq!(*seen.borrow(), ["#ff69b4"]);

    source.broken.set(true);
    *source.value.borrow_mut() = Some("papayawhip".to_owned());
    let mut now = Instant::now();
    for _ in 0..3 {
        now += Duration::from_millis(20);
        subscription.tick(now);
    }
    assert_eq!(subscription.current(), "#ff69b4");

    source.broken.set(false);
    now += Duration::from_millis(20);
    subscription.tick(now);
    assert_eq!(*seen.borrow(), ["#ff69b4", "#8033cc"]);

    assert_eq!(source.created.get(), 5);
    assert_eq!(source.created.get(), source.removed.get());
}

#[test]
fn notifier_crosses_threads() {
    let sheet = Rc::new(StyleSheet::new());
    sheet.set_property("--primary", "#3178ea");

    let (seen, on_change) = recorder();
    let mut subscription = subscribe(
        Rc::clone(&sheet),
        "--primary",
        on_change,
        &ResolverOptions::default(),
    );

    let notifier: MutationNotifier = subscription.notifier();
    let handle = std::thread::spawn(move || notifier.notify());
    assert!(handle.join().unwrap());

    // The signal triggers a read even though the deadline has not passed.
    subscription.tick(Instant::now());
    assert_eq!(*seen.borrow(), ["#3178ea"]);

    let notifier = subscription.notifier();
    drop(subscription);
    let handle = std::thread::spawn(move || notifier.notify());
    assert!(!handle.join().unwrap());
}

#[test]
fn subscriptions_are_independent() {
    let sheet = Rc::new(StyleSheet::new());
    sheet.set_property("--primary", "oklch(0.5 0.1 200)");
    sheet.set_property("--secondary", "oklch(0.5 0.1 385)");

    let (primary, on_primary) = recorder();
    let (secondary, on_secondary) = recorder();
    let options = ResolverOptions::default();
    let mut first = subscribe(Rc::clone(&sheet), "--primary", on_primary, &options);
    let second = subscribe(Rc::clone(&sheet), "--secondary", on_secondary, &options);
    assert_eq!(sheet.observer_count(), 2);

    second.unsubscribe();
    assert_eq!(sheet.observer_count(), 1);

    sheet.set_property("--secondary", "teal");
    sheet.set_property("--primary", "oklch(0.7 0.15 250)");
    first.tick(Instant::now());

    assert_eq!(*primary.borrow(), ["#00767b", "#00b3f6"]);
    assert_eq!(*secondary.borrow(), ["#a94848"]);
}

#[test]
fn native_context_rescues_other_formats() {
    let sheet = StyleSheet::with_oklch_support(false);
    assert_eq!(oklch_to_hex_with("rgb(255 202 0)", Some(&sheet)), "#ffca00");
    assert_eq!(oklch_to_hex_with("bogus", Some(&sheet)), "#ff0000");
    assert_eq!(oklch_to_hex_with("oklch(0.5 0.1 200)", Some(&sheet)), "#00767b");
    assert_eq!(sheet.live_probes(), 0);
    assert!("rgb(255 202 0)".parse::<HexColor>().is_err());
}
