use std::collections::hash_map::{Entry, Iter};
use std::collections::HashMap;
use std::iter::Map;
use std::rc::Rc;

use crate::abstractions::IString;
use crate::core::sort::{FormCategory, Sort, SortPtr, SortPtrs};

/// The registry of unique sorts, and the only way to create them. Assigns the
/// registry index that serves as sort identity.
#[derive(Default)]
pub struct SortCollection {
  sorts: HashMap<IString, SortPtr>,
  next_index: usize,
}

impl SortCollection {
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns the sort registered under `name`, creating it if necessary.
  /// Re-registering an existing name with a different category is a caller
  /// bug and fails loudly.
  pub fn get_or_create_sort(&mut self, name: IString, category: FormCategory) -> SortPtr {
    match self.sorts.entry(name.clone()) {
      Entry::Occupied(entry) => {
        let existing = entry.get().clone();
        assert_eq!(
          existing.category, category,
          "sort {} re-registered with category {:?}, already {:?}",
          name, category, existing.category
        );
        existing
      }
      Entry::Vacant(slot) => {
        let sort = Rc::new(Sort::new(name, self.next_index, category));
        self.next_index += 1;
        slot.insert(sort.clone());
        sort
      }
    }
  }

  /// Registers a disjunctive sort over the given component sorts. The
  /// components must already be registered here.
  pub fn create_disjunctive_sort(&mut self, name: IString, components: SortPtrs) -> SortPtr {
    assert!(
      !self.sorts.contains_key(&name),
      "disjunctive sort {} already registered",
      name
    );
    for component in components.iter() {
      assert!(
        self.sorts.contains_key(&component.name),
        "component sort {} of {} is not registered",
        component.name,
        name
      );
    }
    let sort = Rc::new(Sort::new_disjunctive(name.clone(), self.next_index, components));
    self.next_index += 1;
    self.sorts.insert(name, sort.clone());
    sort
  }

  pub fn get(&self, name: &IString) -> Option<SortPtr> {
    self.sorts.get(name).cloned()
  }

  #[inline(always)]
  pub fn len(&self) -> usize {
    self.sorts.len()
  }

  #[inline(always)]
  pub fn is_empty(&self) -> bool {
    self.sorts.is_empty()
  }

  /// Creates and returns an iterator over the `SortCollection`.
  pub fn iter(&self) -> Map<Iter<'_, IString, SortPtr>, fn((&IString, &SortPtr)) -> (IString, SortPtr)> {
    self.sorts.iter().map(|(name, sort)| (name.clone(), sort.clone()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn registration_is_idempotent() {
    let mut sorts = SortCollection::new();
    let a = sorts.get_or_create_sort(IString::from("number"), FormCategory::Discrete);
    let b = sorts.get_or_create_sort(IString::from("number"), FormCategory::Discrete);
    assert!(Rc::ptr_eq(&a, &b));
    assert_eq!(sorts.len(), 1);
  }

  #[test]
  #[should_panic]
  fn category_conflict_fails() {
    let mut sorts = SortCollection::new();
    sorts.get_or_create_sort(IString::from("number"), FormCategory::Discrete);
    sorts.get_or_create_sort(IString::from("number"), FormCategory::Interval);
  }

  #[test]
  fn disjunctive_components() {
    let mut sorts = SortCollection::new();
    let n = sorts.get_or_create_sort(IString::from("number"), FormCategory::Discrete);
    let i = sorts.get_or_create_sort(IString::from("span"), FormCategory::Interval);
    let u = sorts.create_disjunctive_sort(IString::from("number|span"), vec![n.clone(), i.clone()]);

    assert!(u.is_disjunctive());
    assert!(u.has_component(&n));
    assert!(u.has_component(&i));
    assert!(Rc::ptr_eq(u.component_for(&n).unwrap(), &n));

    let other = sorts.get_or_create_sort(IString::from("word"), FormCategory::Discrete);
    assert!(!u.has_component(&other));
  }
}
