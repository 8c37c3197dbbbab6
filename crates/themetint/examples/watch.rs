//! Watch a theme color change, with diagnostics.
//!
//! Run with `RUST_LOG=themetint=trace cargo run --example watch` to see every
//! resolution decision.

use std::rc::Rc;
use std::time::{Duration, Instant};

use themetint::opt::ResolverOptions;
use themetint::style::StyleSheet;
use themetint::{hex_to_oklch, subscribe};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Emulate a runtime without native Oklch support.
    let sheet = Rc::new(StyleSheet::with_oklch_support(false));
    let options = ResolverOptions::from_environment();
    let mut subscription = subscribe(
        Rc::clone(&sheet),
        "--primary",
        |hex| println!("--primary is now {} aka {}", hex, hex_to_oklch(hex)),
        &options,
    );

    let values = [
        "oklch(0.591 0.187 259.667)",
        "oklch(0.591 0.187 259.667)",
        "oklch(0.55 0.25 27)",
        "rebeccapurple",
        "rgb(255 202 0 / 50%)",
        "",
        "color-mix(in oklch, red, blue)",
    ];

    let mut now = Instant::now();
    for value in values {
        println!("\nsetting --primary to {:?}", value);
        sheet.set_property("--primary", value);
        now = subscription.tick(now);
    }

    // A poll without mutation finds nothing new.
    now += Duration::from_millis(1);
    subscription.tick(now);
    subscription.unsubscribe();
}
