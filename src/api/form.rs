/*!

A `Form` is an ordered collection of individuals of one sort. The sort fixes
the behavioral category once, at creation; every operation dispatches on that
stored category, one implementation module per variant.

## The maximal invariant

The cached `Maximal` flag asserts the canonical representation: the collection
is internally ordered, no two adjacent elements are combinable under the
category's merge rule, and every element's attribute form is itself maximal.
All six algebra operators leave their result maximal. Mutating entry points
(`add`, the raw insert wrappers) clear the flag; `maximalize` restores it
lazily.

## Ownership

Inserting an element bumps its use counter, removing it decrements the counter
and purges the element once no collection holds it. A form installed as an
individual's attribute records that individual as its `associate`; the
relational category leans on that back-reference to locate mirror forms.

*/

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

use enumflags2::{bitflags, BitFlags};

use crate::{
  abstractions::join_string,
  api::{
    discrete,
    individual::{Individual, RcIndividual, WeakIndividual},
    interval,
    meta,
    ordinal,
    relational,
    form_error::FormError,
  },
  core::{
    converter,
    ordered_list::OrderedList,
    sort::{FormCategory, SortPtr},
  },
  trace,
};

#[bitflags]
#[repr(u8)]
#[derive(Copy, Clone, Eq, PartialEq)]
pub enum FormFlag {
  /// Ordered, no adjacent combinable pair, every attribute form maximal.
  Maximal,
  /// Owned as another individual's attribute value.
  Attribute,
  /// Owned as a component sub-form of a disjoint-union form.
  Component,
}

pub type FormFlags = BitFlags<FormFlag, u8>;

/// The two-operand operators that recurse through attribute forms.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) enum AlgebraOp {
  Sum,
  Difference,
  Product,
  SymDifference,
}

pub struct Form {
  pub(crate) sort:       SortPtr,
  pub(crate) elements:   OrderedList<RcIndividual>,
  pub(crate) flags:      FormFlags,
  /// The individual whose attribute value this form is. Non-owning.
  pub(crate) associate:  Option<WeakIndividual>,
  /// Forward references awaiting `resolve` (relational category).
  pub(crate) unresolved: u32,
  pub(crate) pending:    Vec<RcIndividual>,
}

impl Form {
  /// An empty form of the sort's category. An empty form is maximal.
  pub fn new(sort: SortPtr) -> Form {
    Form {
      sort,
      elements:   OrderedList::new(),
      flags:      FormFlag::Maximal.into(),
      associate:  None,
      unresolved: 0,
      pending:    Vec::new(),
    }
  }

  // region Accessors

  #[inline(always)]
  pub fn sort(&self) -> &SortPtr {
    &self.sort
  }

  #[inline(always)]
  pub fn category(&self) -> FormCategory {
    self.sort.category
  }

  #[inline(always)]
  pub fn size(&self) -> usize {
    self.elements.len()
  }

  #[inline(always)]
  pub fn is_empty(&self) -> bool {
    self.elements.is_empty()
  }

  #[inline(always)]
  pub fn is_maximal(&self) -> bool {
    self.flags.contains(FormFlag::Maximal)
  }

  #[inline(always)]
  pub fn unresolved(&self) -> usize {
    self.unresolved as usize
  }

  pub fn iter(&self) -> std::slice::Iter<'_, RcIndividual> {
    self.elements.iter()
  }

  #[inline(always)]
  pub(crate) fn set_flag(&mut self, flag: FormFlag) {
    self.flags.insert(flag);
  }

  #[inline(always)]
  pub(crate) fn clear_maximal(&mut self) {
    self.flags.remove(FormFlag::Maximal);
  }

  #[inline(always)]
  pub(crate) fn set_associate(&mut self, associate: WeakIndividual) {
    self.associate = Some(associate);
  }

  /// The individual this form is the attribute of, if still alive.
  pub fn associate(&self) -> Option<RcIndividual> {
    self.associate.as_ref().and_then(|weak| weak.upgrade())
  }

  pub(crate) fn check_same_sort(&self, other: &Form) -> Result<(), FormError> {
    if self.sort.index == other.sort.index {
      Ok(())
    } else {
      Err(FormError::SortMismatch {
        expected: self.sort.name.clone(),
        found:    other.sort.name.clone(),
      })
    }
  }

  // endregion

  // region Cursor

  #[inline(always)]
  pub fn to_begin(&mut self) {
    self.elements.to_begin();
  }

  #[inline(always)]
  pub fn to_next(&mut self) {
    self.elements.to_next();
  }

  #[inline(always)]
  pub fn beyond(&self) -> bool {
    self.elements.beyond()
  }

  pub fn current(&self) -> Option<RcIndividual> {
    self.elements.current().cloned()
  }

  pub fn next(&self) -> Option<RcIndividual> {
    self.elements.next().cloned()
  }

  pub fn previous(&self) -> Option<RcIndividual> {
    self.elements.previous().cloned()
  }

  pub fn first(&self) -> Option<RcIndividual> {
    self.elements.first().cloned()
  }

  pub fn last(&self) -> Option<RcIndividual> {
    self.elements.last().cloned()
  }

  // endregion

  // region Insertion and removal wrappers

  /// Appends, bumping the element's use counter. Canonicalization is deferred.
  pub(crate) fn append_element(&mut self, element: RcIndividual) {
    element.borrow_mut().add_use();
    self.elements.append(element);
    self.clear_maximal();
  }

  /// Ordered insertion, bumping the use counter.
  pub(crate) fn insert_element(&mut self, element: RcIndividual) {
    element.borrow_mut().add_use();
    self.elements.insert_into(element);
    self.clear_maximal();
  }

  /// Removes `element` from this form's bookkeeping: unlinks the relational
  /// mirror where applicable, decrements the use counter, and purges the
  /// element once nothing holds it.
  pub(crate) fn release(&mut self, element: RcIndividual) -> Result<(), FormError> {
    if self.category() == FormCategory::Relational {
      relational::unlink_mirror(self, &element)?;
    }
    element.borrow_mut().del_use();
    let unused = !element.borrow().used();
    if unused {
      element.borrow_mut().purge()?;
    }
    Ok(())
  }

  /// Transfers `element` from `source` into this form's bookkeeping. The use
  /// counter is unchanged: the element leaves one collection and enters
  /// another.
  pub(crate) fn adopt(&mut self, element: &RcIndividual, source: &mut Form) -> Result<(), FormError> {
    if source.category() == FormCategory::Relational {
      relational::unlink_mirror(source, element)?;
    }
    if self.category() == FormCategory::Relational {
      relational::mirror_on_insert(self, element)?;
    }
    Ok(())
  }

  /// Removes and releases the element at the cursor, returning its handle.
  pub fn delete_current(&mut self) -> Result<Option<RcIndividual>, FormError> {
    match self.elements.delete() {
      Some(element) => {
        self.release(element.clone())?;
        Ok(Some(element))
      }
      None => Ok(None),
    }
  }

  /// Ordered membership scan.
  pub fn contains(&mut self, element: &RcIndividual) -> bool {
    self.elements.contains(element)
  }

  // endregion

  // region The algebra

  /// Inserts an element, converting it first when its sort differs. Dispatches
  /// to the category's combination rule.
  pub fn add(&mut self, element: RcIndividual) -> Result<(), FormError> {
    if self.category() == FormCategory::Meta {
      return meta::add(self, element);
    }
    let element = if *element.borrow().sort() == *self.sort() {
      element
    } else {
      converter::convert(&self.sort, &element)?
    };
    match self.category() {
      FormCategory::Discrete => discrete::add(self, element),
      FormCategory::Interval => interval::add(self, element),
      FormCategory::Relational => relational::add(self, element),
      FormCategory::Ordinal => ordinal::add(self, element),
      FormCategory::Meta => unreachable!("handled above"),
    }
  }

  /// Restores the canonical representation. No-op when the cached flag holds.
  pub fn maximalize(&mut self) -> Result<(), FormError> {
    if self.is_maximal() {
      return Ok(());
    }
    trace!(5, "maximalizing a {:?} form of sort {}", self.category(), self.sort.name);
    match self.category() {
      FormCategory::Discrete | FormCategory::Relational => discrete::maximalize(self)?,
      FormCategory::Interval => interval::maximalize(self)?,
      FormCategory::Ordinal => ordinal::maximalize(self)?,
      FormCategory::Meta => {
        discrete::maximalize(self)?;
        meta::prune_empty(self)?;
      }
    }
    self.set_flag(FormFlag::Maximal);
    Ok(())
  }

  pub fn sum(&mut self, mut other: Form) -> Result<(), FormError> {
    self.check_same_sort(&other)?;
    match self.category() {
      FormCategory::Discrete | FormCategory::Relational => {
        discrete::merge_scan(self, &mut other, AlgebraOp::Sum)?
      }
      FormCategory::Interval => interval::sum(self, &mut other)?,
      FormCategory::Ordinal => ordinal::sum(self, &mut other)?,
      FormCategory::Meta => {
        discrete::merge_scan(self, &mut other, AlgebraOp::Sum)?;
        meta::prune_empty(self)?;
      }
    }
    self.maximalize()
  }

  pub fn difference(&mut self, mut other: Form) -> Result<(), FormError> {
    self.check_same_sort(&other)?;
    match self.category() {
      FormCategory::Discrete | FormCategory::Relational => {
        discrete::merge_scan(self, &mut other, AlgebraOp::Difference)?
      }
      FormCategory::Interval => interval::merge_scan(self, &mut other, AlgebraOp::Difference)?,
      FormCategory::Ordinal => ordinal::difference(self, &mut other)?,
      FormCategory::Meta => {
        discrete::merge_scan(self, &mut other, AlgebraOp::Difference)?;
        meta::prune_empty(self)?;
      }
    }
    self.maximalize()
  }

  pub fn product(&mut self, mut other: Form) -> Result<(), FormError> {
    self.check_same_sort(&other)?;
    match self.category() {
      FormCategory::Discrete | FormCategory::Relational => {
        discrete::merge_scan(self, &mut other, AlgebraOp::Product)?
      }
      FormCategory::Interval => interval::merge_scan(self, &mut other, AlgebraOp::Product)?,
      FormCategory::Ordinal => ordinal::product(self, &mut other)?,
      FormCategory::Meta => {
        discrete::merge_scan(self, &mut other, AlgebraOp::Product)?;
        meta::prune_empty(self)?;
      }
    }
    self.maximalize()
  }

  pub fn sym_difference(&mut self, mut other: Form) -> Result<(), FormError> {
    self.check_same_sort(&other)?;
    match self.category() {
      FormCategory::Discrete | FormCategory::Relational => {
        discrete::merge_scan(self, &mut other, AlgebraOp::SymDifference)?
      }
      FormCategory::Interval => interval::merge_scan(self, &mut other, AlgebraOp::SymDifference)?,
      FormCategory::Ordinal => ordinal::sym_difference(self, &mut other)?,
      FormCategory::Meta => {
        discrete::merge_scan(self, &mut other, AlgebraOp::SymDifference)?;
        meta::prune_empty(self)?;
      }
    }
    self.maximalize()
  }

  /// Three-way split: the shared content moves into `common`, `self` keeps
  /// what only it held, `other` keeps what only it held.
  pub fn partition(&mut self, other: &mut Form, common: &mut Form) -> Result<(), FormError> {
    self.check_same_sort(other)?;
    self.check_same_sort(common)?;
    match self.category() {
      FormCategory::Discrete | FormCategory::Relational => discrete::partition(self, other, common)?,
      FormCategory::Interval => interval::partition(self, other, common)?,
      FormCategory::Ordinal => ordinal::partition(self, other, common)?,
      FormCategory::Meta => {
        discrete::partition(self, other, common)?;
        meta::prune_empty(self)?;
        meta::prune_empty(other)?;
        meta::prune_empty(common)?;
      }
    }
    self.maximalize()?;
    other.maximalize()?;
    common.maximalize()
  }

  /// Is every element of `self` covered by `other`?
  pub fn part_of(&mut self, other: &mut Form) -> Result<bool, FormError> {
    self.check_same_sort(other)?;
    match self.category() {
      | FormCategory::Discrete
      | FormCategory::Relational
      | FormCategory::Meta => discrete::part_of(self, other),
      FormCategory::Interval => interval::part_of(self, other),
      FormCategory::Ordinal => ordinal::part_of(self, other),
    }
  }

  /// Completes pending forward references that name `individual`.
  pub fn resolve(&mut self, individual: &RcIndividual) -> Result<(), FormError> {
    match self.category() {
      FormCategory::Relational => relational::resolve(self, individual),
      FormCategory::Meta => meta::resolve(self, individual),
      _ => Ok(()),
    }
  }

  // endregion

  // region Equality, comparison, duplication, purge

  pub fn equals(&mut self, other: &mut Form) -> Result<bool, FormError> {
    Ok(self.compare(other)? == Ordering::Equal)
  }

  /// Maximalizes both operands, then compares element by element.
  pub fn compare(&mut self, other: &mut Form) -> Result<Ordering, FormError> {
    if self.sort.index != other.sort.index {
      return Ok(self.sort.index.cmp(&other.sort.index));
    }
    self.maximalize()?;
    other.maximalize()?;

    let shared = self.elements.len().min(other.elements.len());
    for index in 0..shared {
      // Handles cloned so the recursion does not hold list borrows.
      let a = self.elements.get(index).cloned();
      let b = other.elements.get(index).cloned();
      if let (Some(a), Some(b)) = (a, b) {
        let order = compare_elements(&a, &b)?;
        if order != Ordering::Equal {
          return Ok(order);
        }
      }
    }
    Ok(self.elements.len().cmp(&other.elements.len()))
  }

  /// Deep copy: every element is converted into this form's sort, attribute
  /// forms included. The copy shares no handles with the original and carries
  /// no relational bookkeeping.
  pub fn duplicate(&self) -> Form {
    let mut copy = Form::new(self.sort.clone());
    for element in self.elements.iter() {
      copy.append_element(Individual::duplicate(element, &self.sort));
    }
    // Appending in iteration order preserves sortedness, so a maximal
    // original yields a maximal copy.
    if self.is_maximal() {
      copy.set_flag(FormFlag::Maximal);
    }
    copy
  }

  /// Empties the form, releasing every element (mirrors of departing
  /// relations included). Fails while forward references remain unresolved:
  /// that is an inconsistency, not a state to silently discard.
  pub fn purge(&mut self) -> Result<(), FormError> {
    if self.unresolved > 0 {
      return Err(FormError::UnresolvedRelations {
        count: self.unresolved as usize,
      });
    }
    // `pending` is empty here: every entry is counted by `unresolved`.
    for element in self.elements.drain_all() {
      self.release(element)?;
    }
    self.set_flag(FormFlag::Maximal);
    Ok(())
  }

  // endregion
}

impl Display for Form {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "{{{}}}",
      join_string(self.elements.iter().map(|e| e.borrow().to_string()), ", ")
    )
  }
}

// region Shared element-level helpers

/// Value-level comparison of two elements.
pub(crate) fn compare_values(a: &RcIndividual, b: &RcIndividual) -> Ordering {
  if Rc::ptr_eq(a, b) {
    return Ordering::Equal;
  }
  a.borrow().compare(&b.borrow())
}

/// Deep comparison: value order first, attribute forms break ties. An absent
/// attribute orders before a present one.
pub(crate) fn compare_elements(a: &RcIndividual, b: &RcIndividual) -> Result<Ordering, FormError> {
  let value_order = compare_values(a, b);
  if value_order != Ordering::Equal || Rc::ptr_eq(a, b) {
    return Ok(value_order);
  }

  let attr_a = a.borrow_mut().take_attribute();
  let attr_b = b.borrow_mut().take_attribute();
  let (mut attr_a, mut attr_b) = (attr_a, attr_b);

  let verdict = match (attr_a.as_mut(), attr_b.as_mut()) {
    (None, None) => Ok(Ordering::Equal),
    (None, Some(_)) => Ok(Ordering::Less),
    (Some(_), None) => Ok(Ordering::Greater),
    (Some(fa), Some(fb)) => fa.compare(fb),
  };

  if let Some(form) = attr_a {
    a.borrow_mut().put_attribute(form);
  }
  if let Some(form) = attr_b {
    b.borrow_mut().put_attribute(form);
  }
  verdict
}

/// Maximalizes an element's attribute form in place.
pub(crate) fn maximalize_attribute(element: &RcIndividual) -> Result<(), FormError> {
  let attribute = element.borrow_mut().take_attribute();
  if let Some(mut form) = attribute {
    let result = form.maximalize();
    element.borrow_mut().put_attribute(form);
    result?;
  }
  Ok(())
}

/// A detached deep copy of an element's attribute form.
pub(crate) fn dup_attribute(element: &RcIndividual) -> Option<Form> {
  element.borrow().attribute().map(|form| form.duplicate())
}

/// Combines two optional attribute forms under `op`. Returns the surviving
/// attribute and whether the carrying element survives at all. Elements
/// without an attribute behave as plain set members: sum and product keep
/// them, difference and symmetric difference cancel them.
pub(crate) fn combine_attr_forms(
  op: AlgebraOp,
  a: Option<Form>,
  b: Option<Form>,
) -> Result<(Option<Form>, bool), FormError> {
  match op {
    AlgebraOp::Sum => match (a, b) {
      (None, None) => Ok((None, true)),
      (Some(fa), None) => Ok((Some(fa), true)),
      (None, Some(fb)) => Ok((Some(fb), true)),
      (Some(mut fa), Some(fb)) => {
        fa.sum(fb)?;
        Ok((Some(fa), true))
      }
    },

    AlgebraOp::Difference => match (a, b) {
      (None, None) => Ok((None, false)),
      // Subtracting a plain element removes the refined one entirely.
      (Some(mut fa), None) => {
        fa.purge()?;
        Ok((None, false))
      }
      // A refinement cannot be subtracted from a plain element.
      (None, Some(mut fb)) => {
        fb.purge()?;
        Ok((None, true))
      }
      (Some(mut fa), Some(fb)) => {
        fa.difference(fb)?;
        if fa.is_empty() {
          Ok((None, false))
        } else {
          Ok((Some(fa), true))
        }
      }
    },

    AlgebraOp::Product => match (a, b) {
      (None, None) => Ok((None, true)),
      (Some(fa), None) => Ok((Some(fa), true)),
      (None, Some(fb)) => Ok((Some(fb), true)),
      (Some(mut fa), Some(fb)) => {
        fa.product(fb)?;
        if fa.is_empty() {
          Ok((None, false))
        } else {
          Ok((Some(fa), true))
        }
      }
    },

    AlgebraOp::SymDifference => match (a, b) {
      (None, None) => Ok((None, false)),
      (Some(mut fa), None) => {
        fa.purge()?;
        Ok((None, false))
      }
      (None, Some(mut fb)) => {
        fb.purge()?;
        Ok((None, false))
      }
      (Some(mut fa), Some(fb)) => {
        fa.sym_difference(fb)?;
        if fa.is_empty() {
          Ok((None, false))
        } else {
          Ok((Some(fa), true))
        }
      }
    },
  }
}

/// EQUAL-case combination for a pair of elements: combines `other`'s
/// attribute into `this` under `op`. Returns whether `this` survives.
pub(crate) fn combine_attribute_pair(
  op: AlgebraOp,
  this: &RcIndividual,
  other: &RcIndividual,
) -> Result<bool, FormError> {
  let a = this.borrow_mut().take_attribute();
  let b = other.borrow_mut().take_attribute();
  let (result, keep) = combine_attr_forms(op, a, b)?;
  if let Some(form) = result {
    Individual::install_attribute(this, form);
  }
  Ok(keep)
}

/// Is `this`'s attribute covered by `other`'s? A plain counterpart covers
/// everything; a plain element is not covered by a refined one (consistent
/// with how `product` treats mixed pairs).
pub(crate) fn attr_part_of(this: &RcIndividual, other: &RcIndividual) -> Result<bool, FormError> {
  if Rc::ptr_eq(this, other) {
    return Ok(true);
  }
  let attr_a = this.borrow_mut().take_attribute();
  let attr_b = other.borrow_mut().take_attribute();
  let (mut attr_a, mut attr_b) = (attr_a, attr_b);

  let verdict = match (attr_a.as_mut(), attr_b.as_mut()) {
    (None, None) => Ok(true),
    (None, Some(_)) => Ok(false),
    (Some(_), None) => Ok(true),
    (Some(fa), Some(fb)) => fa.part_of(fb),
  };

  if let Some(form) = attr_a {
    this.borrow_mut().put_attribute(form);
  }
  if let Some(form) = attr_b {
    other.borrow_mut().put_attribute(form);
  }
  verdict
}

/// Both attributes absent, or present and equal.
pub(crate) fn attrs_equal_or_absent(a: &RcIndividual, b: &RcIndividual) -> Result<bool, FormError> {
  if Rc::ptr_eq(a, b) {
    return Ok(true);
  }
  let attr_a = a.borrow_mut().take_attribute();
  let attr_b = b.borrow_mut().take_attribute();
  let (mut attr_a, mut attr_b) = (attr_a, attr_b);

  let verdict = match (attr_a.as_mut(), attr_b.as_mut()) {
    (None, None) => Ok(true),
    (Some(fa), Some(fb)) => fa.equals(fb),
    _ => Ok(false),
  };

  if let Some(form) = attr_a {
    a.borrow_mut().put_attribute(form);
  }
  if let Some(form) = attr_b {
    b.borrow_mut().put_attribute(form);
  }
  verdict
}

// endregion
