/*!

An `Individual` is a single-valued element: a comparison key drawn from the
value universe, the sort it belongs to (set once, never reassigned), an
optional owned attribute form, an optional associate back-reference, and a use
counter.

## Ownership

Collections hold individuals through strong `RcIndividual` handles; the use
counter tracks how many collections currently hold the element, independently
of the handle count, so a bookkeeping bug surfaces as a loud underflow instead
of silent corruption. The associate is a non-owning back-reference — either
resolved to a weak handle or still pending under an interned key — and never
participates in use counting, which is what breaks the cycle between an
individual and the form that is its attribute.

An element with a positive use count must only be mutated through the owning
collection's sanctioned operations.

*/

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

use crate::{
  abstractions::{rc_cell, IString, RcCell, WeakCell},
  api::{
    form::{Form, FormFlag},
    form_error::FormError,
    value::Value,
  },
  core::sort::SortPtr,
};

pub type RcIndividual   = RcCell<Individual>;
pub type WeakIndividual = WeakCell<Individual>;

/// The associate back-reference: the individual for whom this element is an
/// attribute value, or — for relations — the counterpart individual. A pending
/// reference names an individual not yet seen (a forward reference) and is
/// upgraded exactly once by `resolve`.
#[derive(Clone)]
pub enum AssociateRef {
  Resolved(WeakIndividual),
  Pending(IString),
}

pub struct Individual {
  value:     Value,
  sort:      SortPtr,
  attribute: Option<Form>,
  associate: Option<AssociateRef>,
  in_use:    u32,
}

impl Individual {
  pub fn new(sort: SortPtr, value: Value) -> RcIndividual {
    rc_cell(Individual {
      value,
      sort,
      attribute: None,
      associate: None,
      in_use: 0,
    })
  }

  /// An individual carrying an attribute form. The form is installed with the
  /// proper back-reference, as `install_attribute` does.
  pub fn with_attribute(sort: SortPtr, value: Value, attribute: Form) -> RcIndividual {
    let this = Individual::new(sort, value);
    Individual::install_attribute(&this, attribute);
    this
  }

  /// A relation: an individual whose associate names its counterpart.
  pub fn relation(sort: SortPtr, value: Value, associate: AssociateRef) -> RcIndividual {
    let this = Individual::new(sort, value);
    this.borrow_mut().set_associate(associate);
    this
  }

  // region Accessors

  #[inline(always)]
  pub fn value(&self) -> &Value {
    &self.value
  }

  /// Sanctioned mutation during canonicalization (interval splitting).
  #[inline(always)]
  pub(crate) fn set_value(&mut self, value: Value) {
    self.value = value;
  }

  #[inline(always)]
  pub fn sort(&self) -> &SortPtr {
    &self.sort
  }

  #[inline(always)]
  pub fn attr_defined(&self) -> bool {
    self.attribute.is_some()
  }

  #[inline(always)]
  pub fn attribute(&self) -> Option<&Form> {
    self.attribute.as_ref()
  }

  /// Detaches the attribute form for an operation that needs it by value;
  /// pair with `put_attribute`.
  #[inline(always)]
  pub(crate) fn take_attribute(&mut self) -> Option<Form> {
    self.attribute.take()
  }

  #[inline(always)]
  pub(crate) fn put_attribute(&mut self, attribute: Form) {
    self.attribute = Some(attribute);
  }

  /// Installs `attribute` as the owned attribute form of `this`, recording
  /// `this` as the form's associate.
  pub fn install_attribute(this: &RcIndividual, mut attribute: Form) {
    attribute.set_associate(Rc::downgrade(this));
    attribute.set_flag(FormFlag::Attribute);
    this.borrow_mut().attribute = Some(attribute);
  }

  /// The resolved associate, if any.
  pub fn associate(&self) -> Option<RcIndividual> {
    match &self.associate {
      Some(AssociateRef::Resolved(weak)) => weak.upgrade(),
      _ => None,
    }
  }

  #[inline(always)]
  pub fn associate_ref(&self) -> Option<&AssociateRef> {
    self.associate.as_ref()
  }

  /// Binds the associate. The resolved binding happens at most once; the only
  /// permitted rebinding is the upgrade of a pending reference.
  pub fn set_associate(&mut self, associate: AssociateRef) {
    match (&self.associate, &associate) {
      (None, _) => {}
      (Some(AssociateRef::Pending(_)), AssociateRef::Resolved(_)) => {}
      _ => panic!("associate may only be bound once"),
    }
    self.associate = Some(associate);
  }

  /// The interned key this individual answers to when matched against a
  /// pending (forward) reference.
  pub fn key(&self) -> IString {
    self.value.key()
  }

  // endregion

  // region Use counting

  #[inline(always)]
  pub fn add_use(&mut self) {
    self.in_use += 1;
  }

  /// Use counter underflow signals a bookkeeping bug, not a recoverable
  /// state.
  #[inline(always)]
  pub fn del_use(&mut self) {
    assert!(self.in_use > 0, "use counter underflow on {}", self.value);
    self.in_use -= 1;
  }

  #[inline(always)]
  pub fn used(&self) -> bool {
    self.in_use > 0
  }

  /// Releases the owned attribute form, propagating down the ownership tree.
  /// Legal only when no collection holds this element any more.
  pub fn purge(&mut self) -> Result<(), FormError> {
    assert!(!self.used(), "purge of an element still in use: {}", self.value);
    if let Some(mut attribute) = self.attribute.take() {
      attribute.purge()?;
    }
    Ok(())
  }

  // endregion

  /// The order individuals of one sort respect: the value order.
  #[inline(always)]
  pub fn compare(&self, other: &Individual) -> Ordering {
    self.value.compare(&other.value)
  }

  /// Deep copy converted into `target`: fresh handle, duplicated attribute,
  /// shared (non-owning) associate, zero use count.
  pub fn duplicate(this: &RcIndividual, target: &SortPtr) -> RcIndividual {
    let source = this.borrow();
    let copy = Individual::new(target.clone(), source.value.clone());
    if let Some(attribute) = &source.attribute {
      Individual::install_attribute(&copy, attribute.duplicate());
    }
    if let Some(associate) = &source.associate {
      copy.borrow_mut().associate = Some(associate.clone());
    }
    copy
  }
}

impl Display for Individual {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match &self.attribute {
      Some(attribute) => write!(f, "{} -> {}", self.value, attribute),
      None => write!(f, "{}", self.value),
    }
  }
}

impl crate::core::ordered_list::Ordered for RcIndividual {
  fn compare(&self, other: &Self) -> Ordering {
    if Rc::ptr_eq(self, other) {
      return Ordering::Equal;
    }
    self.borrow().compare(&other.borrow())
  }
}
