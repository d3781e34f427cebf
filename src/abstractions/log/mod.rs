/*!

Threshold-filtered logging built on the `tracing` ecosystem.

Every message is logged at a numeric threshold, a verbosity level: higher
thresholds are chattier. A message is emitted only if its threshold is at most
the global logging threshold, so a threshold of 0 is always emitted. The level
macros (`critical!`, `error!`, `warning!`, `info!`, `debug!`, `trace!`) accept
an optional leading threshold argument, defaulting to 0:

```
use formlib::log::*;

set_global_logging_threshold(1);
warning!("always emitted");
debug!(2, "only emitted when the threshold is at least {}", 2);
```

The logger initializes itself on first use; no explicit setup is required. The
global threshold is an atomic, so adjusting it is safe from any thread.

*/
mod formatter;
mod macros;
mod threshold_filter;

use std::sync::atomic::{AtomicU8, Ordering};

use once_cell::sync::Lazy;
use tracing_subscriber::{fmt, layer::SubscriberExt, Registry};

use formatter::ThresholdFieldFormatter;
pub use macros::*;
use threshold_filter::ThresholdFilterLayer;

/// Used for implicit initialization.
static INIT_LOGGER: Lazy<()> = Lazy::new(|| {
  let subscriber = Registry::default()
      .with(ThresholdFilterLayer)
      .with(
        fmt::layer()
            .fmt_fields(ThresholdFieldFormatter)
            .with_target(false)
            .without_time()
            .with_writer(std::io::stdout),
      );

  tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");
});

/// This does not need to be called directly. Initializes the logging system.
pub fn init_logger() {
  Lazy::force(&INIT_LOGGER);
}

static GLOBAL_LOGGING_THRESHOLD: AtomicU8 = AtomicU8::new(3); // Default threshold

/// Sets the global threshold. Messages logged at a greater threshold are not emitted.
pub fn set_global_logging_threshold(new_threshold: u8) {
  GLOBAL_LOGGING_THRESHOLD.store(new_threshold, Ordering::SeqCst);
}

/// Retrieves the global threshold.
pub fn get_global_logging_threshold() -> u8 {
  GLOBAL_LOGGING_THRESHOLD.load(Ordering::SeqCst)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn threshold_round_trip() {
    set_global_logging_threshold(3);
    assert_eq!(get_global_logging_threshold(), 3);

    // Emitted: threshold 2 <= global 3.
    info!(2, "processing value: {}", 42);
    // Not emitted: threshold 4 > global 3.
    debug!(4, "not emitted: {}", 42);
    // Default threshold of 0 is always emitted.
    warning!("an unexpected condition occurred");

    set_global_logging_threshold(5);
    info!(5, "emitted after raising the threshold");
  }
}
