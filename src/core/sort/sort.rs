/*!

A `Sort` is a named type descriptor: it fixes the behavioral category of forms of that sort and
the total order over its individuals. See the module level documentation for
[`sort`](crate::core::sort) for how sorts are registered and compared.

*/

use std::fmt::{Debug, Display};
use std::rc::Rc;

use crate::abstractions::{IString, NatSet};
use crate::api::form::Form;

/// A shared handle to a sort. Sorts are immutable once registered.
pub type SortPtr  = Rc<Sort>;
/// A vector of sort handles.
pub type SortPtrs = Vec<SortPtr>;

/// The behavioral category a sort assigns to its forms, fixed at registration
/// and selected once at form creation, never re-derived per call.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum FormCategory {
  /// Set algebra: elements are identical or disjoint.
  Discrete,
  /// One-dimensional interval algebra with splitting and merging.
  Interval,
  /// Set algebra plus bidirectional associate consistency.
  Relational,
  /// Singly-associated: a form holds at most one individual.
  Ordinal,
  /// Disjoint union over the component sorts of a disjunctive sort.
  Meta,
}

pub struct Sort {
  pub name: IString,
  /// Registry index within the owning `SortCollection`. Sort identity.
  pub index: usize,
  pub category: FormCategory,

  /// Component sorts of a disjunctive sort; empty otherwise.
  pub components: SortPtrs,
  /// Registry indices of `components`, for O(1) membership tests.
  pub component_indices: NatSet,
}

impl Sort {
  pub(crate) fn new(name: IString, index: usize, category: FormCategory) -> Sort {
    Sort {
      name,
      index,
      category,
      components: SortPtrs::default(),
      component_indices: NatSet::default(),
    }
  }

  pub(crate) fn new_disjunctive(name: IString, index: usize, components: SortPtrs) -> Sort {
    let component_indices = components.iter().map(|c| c.index).collect();
    Sort {
      name,
      index,
      category: FormCategory::Meta,
      components,
      component_indices,
    }
  }

  #[inline(always)]
  pub fn is_disjunctive(&self) -> bool {
    self.category == FormCategory::Meta
  }

  /// Is `other` a declared component of this disjunctive sort?
  #[inline(always)]
  pub fn has_component(&self, other: &Sort) -> bool {
    self.component_indices.contains(other.index)
  }

  /// The declared component handle matching `other`, if any.
  pub fn component_for(&self, other: &Sort) -> Option<&SortPtr> {
    if !self.has_component(other) {
      return None;
    }
    self.components.iter().find(|c| c.index == other.index)
  }

  /// The sort factory: an empty form of this sort's category.
  pub fn make_form(this: &SortPtr) -> Form {
    Form::new(this.clone())
  }
}

impl PartialEq for Sort {
  fn eq(&self, other: &Self) -> bool {
    self.index == other.index
  }
}

impl Eq for Sort {}

impl Display for Sort {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.name)
  }
}

impl Debug for Sort {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}#{}({:?})", self.name, self.index, self.category)
  }
}
