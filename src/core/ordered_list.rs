/*!

A cursor-based sequence with a lazy "ordered" flag.

The list does not sort eagerly. Mutations that could place an element out of
order merely clear the flag; any operation that needs order calls `order()`
first. `order()` runs a stable merge sort built from a size-doubling cascade of
accumulator runs, so input that is already mostly ordered merges cheaply.

The cursor addresses the element reads and deletions operate on. A cursor equal
to the length is "beyond" the sequence. Sorting and draining reset the cursor
to the beginning; callers re-position explicitly.

*/

use std::cmp::Ordering;

/// The comparison the list sorts by. Distinct from `Ord` because list elements
/// are shared handles whose ordering lives behind run-time checked borrows.
pub trait Ordered {
  fn compare(&self, other: &Self) -> Ordering;
}

pub struct OrderedList<T: Ordered> {
  items:   Vec<T>,
  cursor:  usize,
  ordered: bool,
}

impl<T: Ordered> Default for OrderedList<T> {
  fn default() -> Self {
    OrderedList {
      items:   Vec::new(),
      cursor:  0,
      ordered: true,
    }
  }
}

impl<T: Ordered> OrderedList<T> {
  pub fn new() -> Self {
    Self::default()
  }

  // region Accessors

  #[inline(always)]
  pub fn len(&self) -> usize {
    self.items.len()
  }

  #[inline(always)]
  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  #[inline(always)]
  pub fn is_ordered(&self) -> bool {
    self.ordered
  }

  #[inline(always)]
  pub fn first(&self) -> Option<&T> {
    self.items.first()
  }

  #[inline(always)]
  pub fn last(&self) -> Option<&T> {
    self.items.last()
  }

  #[inline(always)]
  pub fn current(&self) -> Option<&T> {
    self.items.get(self.cursor)
  }

  /// The element after the cursor.
  #[inline(always)]
  pub fn next(&self) -> Option<&T> {
    self.items.get(self.cursor + 1)
  }

  /// The element before the cursor.
  #[inline(always)]
  pub fn previous(&self) -> Option<&T> {
    if self.cursor == 0 {
      None
    } else {
      self.items.get(self.cursor - 1)
    }
  }

  #[inline(always)]
  pub fn get(&self, index: usize) -> Option<&T> {
    self.items.get(index)
  }

  pub fn iter(&self) -> std::slice::Iter<'_, T> {
    self.items.iter()
  }

  // endregion

  // region Cursor movement

  #[inline(always)]
  pub fn to_begin(&mut self) {
    self.cursor = 0;
  }

  #[inline(always)]
  pub fn to_next(&mut self) {
    if self.cursor < self.items.len() {
      self.cursor += 1;
    }
  }

  #[inline(always)]
  pub fn to_previous(&mut self) {
    if self.cursor > 0 {
      self.cursor -= 1;
    }
  }

  #[inline(always)]
  pub fn at_begin(&self) -> bool {
    self.cursor == 0
  }

  /// The cursor addresses the last element.
  #[inline(always)]
  pub fn at_end(&self) -> bool {
    !self.items.is_empty() && self.cursor + 1 == self.items.len()
  }

  /// The cursor has moved past the last element.
  #[inline(always)]
  pub fn beyond(&self) -> bool {
    self.cursor >= self.items.len()
  }

  // endregion

  // region Mutation

  /// Pushes `item` at the end. Keeps the ordered flag only when the new item
  /// does not sort before the current last element.
  pub fn append(&mut self, item: T) {
    if self.ordered {
      if let Some(last) = self.items.last() {
        if last.compare(&item) == Ordering::Greater {
          self.ordered = false;
        }
      }
    }
    self.items.push(item);
  }

  /// Inserts `item` before the cursor. Unordered-safe: the flag is cleared
  /// because the caller chose the position.
  pub fn insert(&mut self, item: T) {
    let at = self.cursor.min(self.items.len());
    self.items.insert(at, item);
    self.ordered = false;
  }

  /// Ordered insertion. The cursor keeps addressing the element it addressed
  /// before the call (insertion before the cursor shifts it along).
  pub fn insert_into(&mut self, item: T) {
    self.order_preserving_cursor();
    // Upper bound keeps insertion stable with respect to equal elements.
    let at = self
        .items
        .partition_point(|probe| probe.compare(&item) != Ordering::Greater);
    self.items.insert(at, item);
    if at <= self.cursor && self.cursor < self.items.len() {
      self.cursor += 1;
    }
  }

  /// Transfers the whole content of `other` to the position before the cursor,
  /// draining `other`.
  pub fn insert_from(&mut self, other: &mut Self) {
    if other.is_empty() {
      return;
    }
    let at = self.cursor.min(self.items.len());
    let drained: Vec<T> = other.items.drain(..).collect();
    other.cursor = 0;
    other.ordered = true;
    let tail: Vec<T> = self.items.split_off(at);
    self.items.extend(drained);
    self.items.extend(tail);
    self.ordered = false;
  }

  /// Appends the whole content of `other`, draining it.
  pub fn concatenate(&mut self, other: &mut Self) {
    if other.is_empty() {
      return;
    }
    let still_ordered = self.ordered
        && other.ordered
        && match (self.items.last(), other.items.first()) {
          (Some(a), Some(b)) => a.compare(b) != Ordering::Greater,
          _ => true,
        };
    self.items.extend(other.items.drain(..));
    other.cursor = 0;
    other.ordered = true;
    self.ordered = still_ordered;
  }

  /// Stable ordered merge, draining `other`. Both lists are ordered first.
  /// On ties, elements of `self` precede elements of `other`.
  pub fn merge(&mut self, other: &mut Self) {
    self.order();
    other.order();
    let a = std::mem::take(&mut self.items);
    let b = std::mem::take(&mut other.items);
    self.items = merge_runs(a, b);
    self.cursor = 0;
    other.cursor = 0;
  }

  /// Removes and returns the element at the cursor. The cursor then addresses
  /// the following element.
  pub fn delete(&mut self) -> Option<T> {
    if self.cursor < self.items.len() {
      Some(self.items.remove(self.cursor))
    } else {
      None
    }
  }

  /// Removes and returns the element after the cursor.
  pub fn delete_next(&mut self) -> Option<T> {
    if self.cursor + 1 < self.items.len() {
      Some(self.items.remove(self.cursor + 1))
    } else {
      None
    }
  }

  /// Removes and returns the element at `index`. Removal never disturbs the
  /// relative order, so the ordered flag stands.
  pub fn remove_at(&mut self, index: usize) -> Option<T> {
    if index < self.items.len() {
      if self.cursor > index {
        self.cursor -= 1;
      }
      Some(self.items.remove(index))
    } else {
      None
    }
  }

  /// Ordered membership scan.
  pub fn contains(&mut self, item: &T) -> bool {
    self.order();
    self
        .items
        .binary_search_by(|probe| probe.compare(item))
        .is_ok()
  }

  /// Drops adjacent duplicates, returning the dropped elements so the caller
  /// can release them.
  pub fn reduce(&mut self) -> Vec<T> {
    self.order();
    let mut dropped = Vec::new();
    let mut index = 1;
    while index < self.items.len() {
      if self.items[index - 1].compare(&self.items[index]) == Ordering::Equal {
        dropped.push(self.items.remove(index));
      } else {
        index += 1;
      }
    }
    dropped
  }

  /// Removes every element, resetting the cursor. The result preserves the
  /// list order (ordered only if the list was).
  pub fn drain_all(&mut self) -> Vec<T> {
    self.cursor = 0;
    self.ordered = true;
    std::mem::take(&mut self.items)
  }

  /// Installs content known to be ordered (typically the output of a merge
  /// scan over ordered inputs).
  pub fn restore_ordered(&mut self, items: Vec<T>) {
    debug_assert!(
      items.windows(2).all(|w| w[0].compare(&w[1]) != Ordering::Greater),
      "restore_ordered received unordered content"
    );
    self.items = items;
    self.cursor = 0;
    self.ordered = true;
  }

  // endregion

  // region Ordering

  /// Lazily re-sorts the list. No-op when the ordered flag is set. The sort is
  /// stable: elements comparing equal keep their arrival order. The cursor is
  /// reset to the beginning.
  ///
  /// Each element is detached into a size-doubling cascade of accumulator
  /// runs; an accumulator absorbs the carried run once both reach the same
  /// size, and the surviving runs merge pairwise at the end. O(n log n), with
  /// already-ordered stretches surviving as cheap merges.
  pub fn order(&mut self) {
    if self.ordered {
      return;
    }

    let items = std::mem::take(&mut self.items);
    // accumulators[k] is empty or holds an ordered run of 2^k elements, the
    // run at level k+1 holding earlier arrivals than the run at level k.
    let mut accumulators: Vec<Vec<T>> = Vec::new();

    for item in items {
      let mut carry = vec![item];
      let mut level = 0;
      loop {
        if level == accumulators.len() {
          accumulators.push(carry);
          break;
        }
        if accumulators[level].is_empty() {
          accumulators[level] = carry;
          break;
        }
        // The resident run arrived earlier, so it is the left operand.
        let resident = std::mem::take(&mut accumulators[level]);
        carry = merge_runs(resident, carry);
        level += 1;
      }
    }

    // Merge the surviving runs smallest-first; the higher level is always the
    // earlier (left) operand to preserve stability.
    let mut result: Vec<T> = Vec::new();
    for run in accumulators {
      if run.is_empty() {
        continue;
      }
      result = if result.is_empty() {
        run
      } else {
        merge_runs(run, result)
      };
    }

    self.items = result;
    self.cursor = 0;
    self.ordered = true;
  }

  fn order_preserving_cursor(&mut self) {
    // The cursor is only meaningful for ordered content; when a re-sort is
    // actually needed the saved position is the beginning.
    self.order();
  }

  // endregion
}

/// Stable merge of two ordered runs. Ties take from `left`.
fn merge_runs<T: Ordered>(left: Vec<T>, right: Vec<T>) -> Vec<T> {
  let mut merged = Vec::with_capacity(left.len() + right.len());
  let mut left = left.into_iter().peekable();
  let mut right = right.into_iter().peekable();

  loop {
    match (left.peek(), right.peek()) {
      (Some(a), Some(b)) => {
        if a.compare(b) == Ordering::Greater {
          merged.push(right.next().unwrap());
        } else {
          merged.push(left.next().unwrap());
        }
      }
      (Some(_), None) => merged.push(left.next().unwrap()),
      (None, Some(_)) => merged.push(right.next().unwrap()),
      (None, None) => break,
    }
  }

  merged
}

#[cfg(test)]
mod tests {
  use super::*;

  impl Ordered for i32 {
    fn compare(&self, other: &Self) -> Ordering {
      self.cmp(other)
    }
  }

  // Key/tag pairs ordered by key only, for stability checks.
  #[derive(Clone, Debug, PartialEq)]
  struct Tagged(i32, usize);

  impl Ordered for Tagged {
    fn compare(&self, other: &Self) -> Ordering {
      self.0.cmp(&other.0)
    }
  }

  fn from_values<T: Ordered>(values: Vec<T>) -> OrderedList<T> {
    let mut list = OrderedList::new();
    for v in values {
      list.append(v);
    }
    list
  }

  #[test]
  fn order_sorts_and_sets_flag() {
    let mut list = from_values(vec![5, 1, 4, 2, 3]);
    assert!(!list.is_ordered());
    list.order();
    assert!(list.is_ordered());
    let collected: Vec<i32> = list.iter().cloned().collect();
    assert_eq!(collected, vec![1, 2, 3, 4, 5]);
  }

  #[test]
  fn order_is_stable() {
    let mut list = from_values(vec![
      Tagged(2, 0),
      Tagged(1, 1),
      Tagged(2, 2),
      Tagged(1, 3),
      Tagged(2, 4),
    ]);
    list.order();
    let collected: Vec<Tagged> = list.iter().cloned().collect();
    assert_eq!(
      collected,
      vec![Tagged(1, 1), Tagged(1, 3), Tagged(2, 0), Tagged(2, 2), Tagged(2, 4)]
    );
  }

  #[test]
  fn append_in_order_keeps_flag() {
    let mut list = OrderedList::new();
    list.append(1);
    list.append(2);
    list.append(2);
    list.append(7);
    assert!(list.is_ordered());
    list.append(3);
    assert!(!list.is_ordered());
  }

  #[test]
  fn insert_into_preserves_cursor() {
    let mut list = from_values(vec![1, 3, 5, 7]);
    list.to_begin();
    list.to_next();
    list.to_next(); // cursor on 5
    assert_eq!(list.current(), Some(&5));
    list.insert_into(2);
    assert_eq!(list.current(), Some(&5));
    list.insert_into(6);
    assert_eq!(list.current(), Some(&5));
    let collected: Vec<i32> = list.iter().cloned().collect();
    assert_eq!(collected, vec![1, 2, 3, 5, 6, 7]);
  }

  #[test]
  fn merge_drains_source() {
    let mut a = from_values(vec![1, 4, 6]);
    let mut b = from_values(vec![2, 3, 7]);
    a.merge(&mut b);
    assert!(b.is_empty());
    let collected: Vec<i32> = a.iter().cloned().collect();
    assert_eq!(collected, vec![1, 2, 3, 4, 6, 7]);
    assert!(a.is_ordered());
  }

  #[test]
  fn reduce_drops_adjacent_duplicates() {
    let mut list = from_values(vec![3, 1, 3, 2, 1]);
    let dropped = list.reduce();
    assert_eq!(dropped.len(), 2);
    let collected: Vec<i32> = list.iter().cloned().collect();
    assert_eq!(collected, vec![1, 2, 3]);
  }

  #[test]
  fn delete_at_cursor() {
    let mut list = from_values(vec![1, 2, 3]);
    list.to_begin();
    list.to_next();
    assert_eq!(list.delete(), Some(2));
    assert_eq!(list.current(), Some(&3));
    assert_eq!(list.delete_next(), None);
  }

  #[test]
  fn concatenate_and_insert_from_drain_the_source() {
    let mut a = from_values(vec![1, 2]);
    let mut b = from_values(vec![3, 4]);
    a.concatenate(&mut b);
    assert!(b.is_empty());
    // An ordered tail appended to an ordered head keeps the flag.
    assert!(a.is_ordered());

    let mut c = from_values(vec![9, 8]);
    a.to_begin();
    a.to_next();
    a.insert_from(&mut c);
    assert!(c.is_empty());
    assert!(!a.is_ordered());
    let collected: Vec<i32> = a.iter().cloned().collect();
    assert_eq!(collected, vec![1, 9, 8, 2, 3, 4]);
  }

  #[test]
  fn cursor_predicates() {
    let mut list = from_values(vec![1, 2, 3]);
    list.to_begin();
    assert!(list.at_begin());
    assert!(!list.at_end());
    list.to_next();
    list.to_next();
    assert!(list.at_end());
    assert!(!list.beyond());
    list.to_next();
    assert!(list.beyond());
    list.to_previous();
    assert_eq!(list.current(), Some(&3));
  }

  #[test]
  fn contains_uses_ordered_scan() {
    let mut list = from_values(vec![9, 2, 5]);
    assert!(list.contains(&5));
    assert!(!list.contains(&4));
    assert!(list.is_ordered());
  }

  // Ordering stability property: interleaved inserts followed by `order()`
  // give the same sequence as inserting in final sorted order directly.
  #[test]
  fn order_matches_direct_sorted_insertion() {
    use rand::Rng;

    let mut rng = rand::rng();
    for _ in 0..32 {
      let count = rng.random_range(0..64);
      let values: Vec<i32> = (0..count).map(|_| rng.random_range(-50..50)).collect();

      let mut lazy = OrderedList::new();
      for (step, v) in values.iter().enumerate() {
        if step % 3 == 0 {
          // Interleave reads with the inserts.
          let _ = lazy.first();
          let _ = lazy.last();
        }
        lazy.append(*v);
      }
      lazy.order();

      let mut sorted = values.clone();
      sorted.sort();
      let mut direct = OrderedList::new();
      for v in sorted {
        direct.append(v);
      }
      assert!(direct.is_ordered());

      let a: Vec<i32> = lazy.iter().cloned().collect();
      let b: Vec<i32> = direct.iter().cloned().collect();
      assert_eq!(a, b);
    }
  }
}
