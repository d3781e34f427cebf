/*!

The level macros. Each takes an optional leading numeric threshold; the
no-threshold form delegates to the threshold form with a threshold of 0, so
`warning!("...")` is always emitted. `critical!` additionally tags the event so
the formatter can render its `[CRITICAL]` prefix.

*/

#[macro_export]
macro_rules! critical {
  ($threshold:expr, $($arg:tt)+) => {{
    $crate::log::init_logger();
    tracing::event!(
      tracing::Level::ERROR,
      critical  = true,
      threshold = $threshold,
      message   = format_args!($($arg)+)
    );
  }};
  ($($arg:tt)+) => { $crate::critical!(0, $($arg)+) };
}

#[macro_export]
macro_rules! error {
  ($threshold:expr, $($arg:tt)+) => {{
    $crate::log::init_logger();
    tracing::event!(
      tracing::Level::ERROR,
      threshold = $threshold,
      message   = format_args!($($arg)+)
    );
  }};
  ($($arg:tt)+) => { $crate::error!(0, $($arg)+) };
}

#[macro_export]
macro_rules! warning {
  ($threshold:expr, $($arg:tt)+) => {{
    $crate::log::init_logger();
    tracing::event!(
      tracing::Level::WARN,
      threshold = $threshold,
      message   = format_args!($($arg)+)
    );
  }};
  ($($arg:tt)+) => { $crate::warning!(0, $($arg)+) };
}

#[macro_export]
macro_rules! info {
  ($threshold:expr, $($arg:tt)+) => {{
    $crate::log::init_logger();
    tracing::event!(
      tracing::Level::INFO,
      threshold = $threshold,
      message   = format_args!($($arg)+)
    );
  }};
  ($($arg:tt)+) => { $crate::info!(0, $($arg)+) };
}

#[macro_export]
macro_rules! debug {
  ($threshold:expr, $($arg:tt)+) => {{
    $crate::log::init_logger();
    tracing::event!(
      tracing::Level::DEBUG,
      threshold = $threshold,
      message   = format_args!($($arg)+)
    );
  }};
  ($($arg:tt)+) => { $crate::debug!(0, $($arg)+) };
}

#[macro_export]
macro_rules! trace {
  ($threshold:expr, $($arg:tt)+) => {{
    $crate::log::init_logger();
    tracing::event!(
      tracing::Level::TRACE,
      threshold = $threshold,
      message   = format_args!($($arg)+)
    );
  }};
  ($($arg:tt)+) => { $crate::trace!(0, $($arg)+) };
}

// Makes the macros importable from the `log` module as well as the crate root.
pub use {critical, debug, error, info, trace, warning};
