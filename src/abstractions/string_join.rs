use std::fmt::Display;
use std::iter::once;

/// Interleave a separator between the items of an iterator. The separator is
/// produced by a closure so that it can depend on the following item.
pub fn join_iter<T>(mut iter: impl Iterator<Item = T>, sep: impl Fn(&T) -> T) -> impl Iterator<Item = T> {
  iter
      .next()
      .into_iter()
      .chain(iter.flat_map(move |item| once(sep(&item)).chain(once(item))))
}

/// Join displayable items with a fixed separator. Defers to `join_iter`.
pub fn join_string<T: Display>(iter: impl Iterator<Item = T>, sep: &str) -> String {
  join_iter(iter.map(|t| t.to_string()), |_| sep.to_string()).collect::<String>()
}
