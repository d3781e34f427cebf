/*!

A set of natural numbers backed by a bit set. Sorts are assigned small registry
indices at creation, so sets of sorts (the component sorts of a disjunctive
sort, for instance) are represented as sets of indices.

*/

use std::fmt::{Debug, Formatter};

use bit_set::BitSet;

#[derive(Clone, Default, Eq, PartialEq)]
pub struct NatSet(BitSet);

impl NatSet {
  pub fn new() -> Self {
    Self::default()
  }

  #[inline(always)]
  pub fn insert(&mut self, value: usize) -> bool {
    self.0.insert(value)
  }

  #[inline(always)]
  pub fn contains(&self, value: usize) -> bool {
    self.0.contains(value)
  }

  #[inline(always)]
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  #[inline(always)]
  pub fn len(&self) -> usize {
    self.0.len()
  }

  /// Computes the union in place, `self = self ∪ other`.
  #[inline(always)]
  pub fn union_in_place(&mut self, other: &NatSet) {
    self.0.union_with(&other.0);
  }

  #[inline(always)]
  pub fn is_subset(&self, other: &NatSet) -> bool {
    self.0.is_subset(&other.0)
  }

  pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
    self.0.iter()
  }
}

impl FromIterator<usize> for NatSet {
  fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
    let mut set = NatSet::new();
    for value in iter {
      set.insert(value);
    }
    set
  }
}

impl Debug for NatSet {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_set().entries(self.0.iter()).finish()
  }
}
