/*!

The singly-associated category: a form holds at most one individual, and every
operator degenerates to a case analysis on the single pair. Incoming values
fold into the held one through `Value::combine` (quantities add, symbols
dominate, segments take the hull), with attributes summed; difference and
product fall back to the geometric `complement`/`common` tests and purge the
form to empty when nothing survives.

*/

use std::rc::Rc;

use crate::api::{
  form::{
    attr_part_of,
    combine_attr_forms,
    combine_attribute_pair,
    dup_attribute,
    maximalize_attribute,
    AlgebraOp,
    Form,
  },
  form_error::FormError,
  individual::{Individual, RcIndividual},
};

/// Combine-or-adopt with attribute sum.
pub(crate) fn add(form: &mut Form, element: RcIndividual) -> Result<(), FormError> {
  form.maximalize()?;
  let held = match form.first() {
    Some(held) => held,
    None => {
      form.insert_element(element);
      return Ok(());
    }
  };
  if Rc::ptr_eq(&held, &element) {
    return Ok(());
  }
  fold(&held, &element)?;
  let unused = !element.borrow().used();
  if unused {
    element.borrow_mut().purge()?;
  }
  form.clear_maximal();
  Ok(())
}

/// Combines `incoming` into `held`: values combine, attributes sum.
fn fold(held: &RcIndividual, incoming: &RcIndividual) -> Result<(), FormError> {
  combine_attribute_pair(AlgebraOp::Sum, held, incoming)?;
  let hv = held.borrow().value().clone();
  let iv = incoming.borrow().value().clone();
  if !hv.equals(&iv) {
    held.borrow_mut().set_value(hv.combine(&iv));
  }
  Ok(())
}

/// Removes and releases the held individual.
fn drop_held(form: &mut Form) -> Result<(), FormError> {
  if let Some(held) = form.elements.remove_at(0) {
    form.release(held)?;
  }
  Ok(())
}

/// Folds any extra elements into the first and maximalizes its attribute.
pub(crate) fn maximalize(form: &mut Form) -> Result<(), FormError> {
  form.elements.order();
  let mut drained = form.elements.drain_all().into_iter();
  let first = match drained.next() {
    Some(first) => first,
    None => return Ok(()),
  };
  for extra in drained {
    if !Rc::ptr_eq(&first, &extra) {
      fold(&first, &extra)?;
    }
    form.release(extra)?;
  }
  maximalize_attribute(&first)?;
  form.elements.restore_ordered(vec![first]);
  Ok(())
}

pub(crate) fn sum(this: &mut Form, other: &mut Form) -> Result<(), FormError> {
  this.maximalize()?;
  other.maximalize()?;
  for incoming in other.elements.drain_all() {
    match this.elements.first().cloned() {
      None => {
        this.adopt(&incoming, other)?;
        this.elements.restore_ordered(vec![incoming]);
      }
      Some(held) => {
        fold(&held, &incoming)?;
        other.release(incoming)?;
      }
    }
  }
  this.clear_maximal();
  Ok(())
}

/// Coincident values cancel through the attribute rule; differing values
/// combine-or-adopt, as for sum.
pub(crate) fn sym_difference(this: &mut Form, other: &mut Form) -> Result<(), FormError> {
  this.maximalize()?;
  other.maximalize()?;
  for incoming in other.elements.drain_all() {
    match this.elements.first().cloned() {
      None => {
        this.adopt(&incoming, other)?;
        this.elements.restore_ordered(vec![incoming]);
      }
      Some(held) => {
        let coincident = {
          let held_ref = held.borrow();
          let incoming_ref = incoming.borrow();
          held_ref.value().equals(incoming_ref.value())
        };
        if coincident {
          let keep = combine_attribute_pair(AlgebraOp::SymDifference, &held, &incoming)?;
          other.release(incoming)?;
          if !keep {
            drop_held(this)?;
          }
        } else {
          fold(&held, &incoming)?;
          other.release(incoming)?;
        }
      }
    }
  }
  this.clear_maximal();
  Ok(())
}

pub(crate) fn difference(this: &mut Form, other: &mut Form) -> Result<(), FormError> {
  this.maximalize()?;
  other.maximalize()?;
  for incoming in other.elements.drain_all() {
    if let Some(held) = this.elements.first().cloned() {
      let hv = held.borrow().value().clone();
      let iv = incoming.borrow().value().clone();
      if hv.equals(&iv) {
        let keep = combine_attribute_pair(AlgebraOp::Difference, &held, &incoming)?;
        if !keep {
          drop_held(this)?;
        }
      } else {
        // The left fragment wins when the removal splits the extent in two.
        let (below, above) = hv.complement(&iv);
        match below.or(above) {
          Some(rest) => held.borrow_mut().set_value(rest),
          None => drop_held(this)?,
        }
      }
    }
    other.release(incoming)?;
  }
  this.clear_maximal();
  Ok(())
}

pub(crate) fn product(this: &mut Form, other: &mut Form) -> Result<(), FormError> {
  this.maximalize()?;
  other.maximalize()?;
  if other.elements.is_empty() {
    drop_held(this)?;
  }
  for incoming in other.elements.drain_all() {
    if let Some(held) = this.elements.first().cloned() {
      let hv = held.borrow().value().clone();
      let iv = incoming.borrow().value().clone();
      if hv.equals(&iv) {
        let keep = combine_attribute_pair(AlgebraOp::Product, &held, &incoming)?;
        if !keep {
          drop_held(this)?;
        }
      } else {
        match hv.common(&iv) {
          Some(shared) => {
            let keep = combine_attribute_pair(AlgebraOp::Product, &held, &incoming)?;
            if keep {
              held.borrow_mut().set_value(shared);
            } else {
              drop_held(this)?;
            }
          }
          None => drop_held(this)?,
        }
      }
    }
    other.release(incoming)?;
  }
  this.clear_maximal();
  Ok(())
}

pub(crate) fn partition(this: &mut Form, other: &mut Form, common: &mut Form) -> Result<(), FormError> {
  this.maximalize()?;
  other.maximalize()?;
  common.maximalize()?;

  let (x, y) = match (this.elements.first().cloned(), other.elements.first().cloned()) {
    (Some(x), Some(y)) => (x, y),
    _ => return Ok(()),
  };
  let xv = x.borrow().value().clone();
  let yv = y.borrow().value().clone();

  if xv.equals(&yv) {
    let attr_x = x.borrow_mut().take_attribute();
    let attr_y = y.borrow_mut().take_attribute();
    match (attr_x, attr_y) {
      (None, None) => {
        common.insert_element(Individual::new(common.sort().clone(), xv));
        drop_held(this)?;
        drop_held(other)?;
      }
      (Some(fa), None) => {
        Individual::install_attribute(&x, fa);
        let shared = Individual::duplicate(&x, common.sort());
        common.insert_element(shared);
        drop_held(this)?;
        drop_held(other)?;
      }
      (None, Some(fb)) => {
        Individual::install_attribute(&y, fb);
        let shared = Individual::duplicate(&y, common.sort());
        common.insert_element(shared);
        drop_held(this)?;
        drop_held(other)?;
      }
      (Some(mut fa), Some(mut fb)) => {
        let mut shared_attr = Form::new(fa.sort().clone());
        fa.partition(&mut fb, &mut shared_attr)?;
        if !shared_attr.is_empty() {
          let shared = Individual::new(common.sort().clone(), xv);
          Individual::install_attribute(&shared, shared_attr);
          common.insert_element(shared);
        }
        if fa.is_empty() {
          drop_held(this)?;
        } else {
          Individual::install_attribute(&x, fa);
        }
        if fb.is_empty() {
          drop_held(other)?;
        } else {
          Individual::install_attribute(&y, fb);
        }
      }
    }
  } else if let Some(shared_value) = xv.common(&yv) {
    // Overlapping extents: the overlap moves to common with the product of
    // the attributes; each side keeps its remainder.
    let (shared_attr, survives) =
        combine_attr_forms(AlgebraOp::Product, dup_attribute(&x), dup_attribute(&y))?;
    if survives {
      let piece = match shared_attr {
        Some(attribute) => {
          Individual::with_attribute(common.sort().clone(), shared_value, attribute)
        }
        None => Individual::new(common.sort().clone(), shared_value),
      };
      common.insert_element(piece);
    }
    let (below, above) = xv.complement(&yv);
    match below.or(above) {
      Some(rest) => x.borrow_mut().set_value(rest),
      None => drop_held(this)?,
    }
    let (below, above) = yv.complement(&xv);
    match below.or(above) {
      Some(rest) => y.borrow_mut().set_value(rest),
      None => drop_held(other)?,
    }
  }
  // Disjoint extents share nothing.
  Ok(())
}

pub(crate) fn part_of(this: &mut Form, other: &mut Form) -> Result<bool, FormError> {
  this.maximalize()?;
  other.maximalize()?;
  let x = match this.elements.first().cloned() {
    Some(x) => x,
    None => return Ok(true),
  };
  let y = match other.elements.first().cloned() {
    Some(y) => y,
    None => return Ok(false),
  };
  let covered = {
    let x_ref = x.borrow();
    let y_ref = y.borrow();
    y_ref.value().contains(x_ref.value())
  };
  if !covered {
    return Ok(false);
  }
  attr_part_of(&x, &y)
}
