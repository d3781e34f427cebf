use std::fmt::Debug;

use tracing::{
  field::{Field, Visit},
  Event,
  Subscriber,
};
use tracing_subscriber::{layer::Context, registry::LookupSpan, Layer};

use super::get_global_logging_threshold;

/// A "layer" that causes the logging system to only log messages at or below the global logging threshold.
/// This baroque machinery is specific to the `tracing` crate.
pub(crate) struct ThresholdFilterLayer;

impl<S> Layer<S> for ThresholdFilterLayer
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
{
  fn event_enabled(&self, event: &Event<'_>, _ctx: Context<'_, S>) -> bool {
    let mut visitor = ThresholdVisitor { threshold: None };
    event.record(&mut visitor);

    match visitor.threshold {
      // Emit only when at or below the global threshold.
      Some(threshold) => threshold <= get_global_logging_threshold(),
      // No threshold recorded; treat as threshold 0 and emit.
      None => true,
    }
  }
}

/// A "visitor" used for extracting the threshold from log records. Used by `ThresholdFilterLayer`, this is how
/// the `tracing` crate does things.
struct ThresholdVisitor {
  threshold: Option<u8>,
}

impl Visit for ThresholdVisitor {
  fn record_i64(&mut self, field: &Field, value: i64) {
    if field.name() == "threshold" {
      if value >= 0 && value <= u8::MAX as i64 {
        self.threshold = Some(value as u8);
      } else {
        panic!("Invalid threshold value supplied to the logger: {:?}", value);
      }
    }
  }

  fn record_u64(&mut self, field: &Field, value: u64) {
    if field.name() == "threshold" {
      if value <= u8::MAX as u64 {
        self.threshold = Some(value as u8);
      } else {
        panic!("Invalid threshold value supplied to the logger: {:?}", value);
      }
    }
  }

  fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
    if field.name() == "threshold" {
      panic!("Invalid threshold value supplied to the logger: {:?}", value);
    }
  }
}
