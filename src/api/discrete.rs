/*!

Set algebra for the discrete category: elements are identical or disjoint, so
every operator reduces to an ordered merge-scan over both operands comparing
current keys, with the EQUAL case recursing into the attribute forms. The
relational and disjoint-union categories reuse these scans; their extra
bookkeeping rides on the form's `release`/`adopt` hooks.

*/

use std::cmp::Ordering;
use std::rc::Rc;

use crate::api::{
  form::{
    attr_part_of,
    combine_attribute_pair,
    compare_values,
    maximalize_attribute,
    AlgebraOp,
    Form,
  },
  form_error::FormError,
  individual::{Individual, RcIndividual},
};

/// Ordered insertion. Equal keys are left adjacent and folded by the next
/// `maximalize`.
pub(crate) fn add(form: &mut Form, element: RcIndividual) -> Result<(), FormError> {
  form.insert_element(element);
  Ok(())
}

/// Orders the list, folds adjacent equal keys by summing their attribute
/// forms, and maximalizes every surviving attribute.
pub(crate) fn maximalize(form: &mut Form) -> Result<(), FormError> {
  form.elements.order();
  let drained = form.elements.drain_all();
  let mut kept: Vec<RcIndividual> = Vec::with_capacity(drained.len());

  for element in drained {
    let duplicate_key = match kept.last() {
      Some(last) => compare_values(last, &element) == Ordering::Equal,
      None => false,
    };
    if duplicate_key {
      if let Some(last) = kept.last().cloned() {
        if !Rc::ptr_eq(&last, &element) {
          combine_attribute_pair(AlgebraOp::Sum, &last, &element)?;
        }
      }
      form.release(element)?;
    } else {
      kept.push(element);
    }
  }

  for element in &kept {
    maximalize_attribute(element)?;
  }
  form.elements.restore_ordered(kept);
  Ok(())
}

/// The four two-operand operators share one scan; only the per-case action
/// differs:
///
/// | case    | sum    | difference | product | symdifference |
/// |---------|--------|------------|---------|---------------|
/// | LESS    | keep   | keep       | drop    | keep          |
/// | GREATER | insert | skip       | drop    | insert        |
/// | EQUAL   | attribute combination decides survival          |
///
/// `other` is left empty.
pub(crate) fn merge_scan(this: &mut Form, other: &mut Form, op: AlgebraOp) -> Result<(), FormError> {
  this.maximalize()?;
  other.maximalize()?;

  let mut left = this.elements.drain_all().into_iter().peekable();
  let mut right = other.elements.drain_all().into_iter().peekable();
  let mut kept: Vec<RcIndividual> = Vec::new();

  loop {
    let order = match (left.peek(), right.peek()) {
      (Some(x), Some(y)) => compare_values(x, y),
      (Some(_), None) => Ordering::Less,
      (None, Some(_)) => Ordering::Greater,
      (None, None) => break,
    };

    match order {
      Ordering::Less => {
        let x = match left.next() {
          Some(x) => x,
          None => break,
        };
        if op == AlgebraOp::Product {
          this.release(x)?;
        } else {
          kept.push(x);
        }
      }

      Ordering::Greater => {
        let y = match right.next() {
          Some(y) => y,
          None => break,
        };
        match op {
          AlgebraOp::Sum | AlgebraOp::SymDifference => {
            this.adopt(&y, other)?;
            kept.push(y);
          }
          AlgebraOp::Difference | AlgebraOp::Product => other.release(y)?,
        }
      }

      Ordering::Equal => {
        let (x, y) = match (left.next(), right.next()) {
          (Some(x), Some(y)) => (x, y),
          _ => break,
        };
        let keep = combine_attribute_pair(op, &x, &y)?;
        other.release(y)?;
        if keep {
          kept.push(x);
        } else {
          this.release(x)?;
        }
      }
    }
  }

  this.elements.restore_ordered(kept);
  Ok(())
}

/// Three-way merge-scan: `this` keeps its exclusive part, `other` keeps its
/// exclusive part, and `common` receives the shared part. For an EQUAL pair
/// the attribute forms are themselves partitioned; an element survives on a
/// side only while its residual attribute is non-empty.
pub(crate) fn partition(this: &mut Form, other: &mut Form, common: &mut Form) -> Result<(), FormError> {
  this.maximalize()?;
  other.maximalize()?;
  common.maximalize()?;

  let mut left = this.elements.drain_all().into_iter().peekable();
  let mut right = other.elements.drain_all().into_iter().peekable();
  let mut kept_left: Vec<RcIndividual> = Vec::new();
  let mut kept_right: Vec<RcIndividual> = Vec::new();

  loop {
    let order = match (left.peek(), right.peek()) {
      (Some(x), Some(y)) => compare_values(x, y),
      (Some(_), None) => Ordering::Less,
      (None, Some(_)) => Ordering::Greater,
      (None, None) => break,
    };

    match order {
      Ordering::Less => {
        if let Some(x) = left.next() {
          kept_left.push(x);
        }
      }

      Ordering::Greater => {
        if let Some(y) = right.next() {
          kept_right.push(y);
        }
      }

      Ordering::Equal => {
        let (x, y) = match (left.next(), right.next()) {
          (Some(x), Some(y)) => (x, y),
          _ => break,
        };
        let attr_x = x.borrow_mut().take_attribute();
        let attr_y = y.borrow_mut().take_attribute();

        match (attr_x, attr_y) {
          (None, None) => {
            let shared = Individual::new(common.sort().clone(), x.borrow().value().clone());
            common.insert_element(shared);
            this.release(x)?;
            other.release(y)?;
          }

          // A plain counterpart is wholly shared; the refined copy moves to
          // `common` intact (consistent with the mixed-pair product rule).
          (Some(fa), None) => {
            Individual::install_attribute(&x, fa);
            let shared = Individual::duplicate(&x, common.sort());
            shared.borrow_mut().add_use();
            common.elements.insert_into(shared);
            common.clear_maximal();
            this.release(x)?;
            other.release(y)?;
          }
          (None, Some(fb)) => {
            Individual::install_attribute(&y, fb);
            let shared = Individual::duplicate(&y, common.sort());
            shared.borrow_mut().add_use();
            common.elements.insert_into(shared);
            common.clear_maximal();
            this.release(x)?;
            other.release(y)?;
          }

          (Some(mut fa), Some(mut fb)) => {
            let mut shared_attr = Form::new(fa.sort().clone());
            fa.partition(&mut fb, &mut shared_attr)?;
            if !shared_attr.is_empty() {
              let shared = Individual::new(common.sort().clone(), x.borrow().value().clone());
              Individual::install_attribute(&shared, shared_attr);
              common.insert_element(shared);
            }
            if fa.is_empty() {
              this.release(x)?;
            } else {
              Individual::install_attribute(&x, fa);
              kept_left.push(x);
            }
            if fb.is_empty() {
              other.release(y)?;
            } else {
              Individual::install_attribute(&y, fb);
              kept_right.push(y);
            }
          }
        }
      }
    }
  }

  this.elements.restore_ordered(kept_left);
  other.elements.restore_ordered(kept_right);
  Ok(())
}

/// Non-destructive coverage scan: fails fast on any element of `this` absent
/// from `other`, and requires each attribute to be part-of its counterpart's.
pub(crate) fn part_of(this: &mut Form, other: &mut Form) -> Result<bool, FormError> {
  this.maximalize()?;
  other.maximalize()?;

  let mut j = 0;
  for i in 0..this.elements.len() {
    let x = match this.elements.get(i) {
      Some(x) => x.clone(),
      None => break,
    };
    loop {
      let y = match other.elements.get(j) {
        Some(y) => y.clone(),
        None => return Ok(false),
      };
      match compare_values(&x, &y) {
        Ordering::Less => return Ok(false),
        Ordering::Greater => j += 1,
        Ordering::Equal => {
          if !attr_part_of(&x, &y)? {
            return Ok(false);
          }
          j += 1;
          break;
        }
      }
    }
  }
  Ok(true)
}

#[cfg(test)]
mod tests {
  use crate::{
    api::{
      form::Form,
      individual::{Individual, RcIndividual},
      value::Value,
    },
    core::sort::{FormCategory, Sort, SortCollection, SortPtr},
    IString,
  };

  struct Fixture {
    numbers:  SortPtr,
    quantity: SortPtr,
  }

  impl Fixture {
    fn new() -> Fixture {
      let mut sorts = SortCollection::new();
      Fixture {
        numbers:  sorts.get_or_create_sort(IString::from("number"), FormCategory::Discrete),
        quantity: sorts.get_or_create_sort(IString::from("quantity"), FormCategory::Ordinal),
      }
    }

    /// `key` with a numeric quantity attribute, e.g. `3:5`.
    fn keyed(&self, key: i64, quantity: i64) -> RcIndividual {
      let mut attribute = Sort::make_form(&self.quantity);
      attribute
          .add(Individual::new(self.quantity.clone(), Value::Integer(quantity)))
          .unwrap();
      Individual::with_attribute(self.numbers.clone(), Value::Integer(key), attribute)
    }

    fn form(&self, pairs: &[(i64, i64)]) -> Form {
      let mut form = Sort::make_form(&self.numbers);
      for (key, quantity) in pairs {
        form.add(self.keyed(*key, *quantity)).unwrap();
      }
      form
    }

    fn plain_form(&self, keys: &[i64]) -> Form {
      let mut form = Sort::make_form(&self.numbers);
      for key in keys {
        form.add(Individual::new(self.numbers.clone(), Value::Integer(*key))).unwrap();
      }
      form
    }
  }

  fn contents(form: &mut Form) -> Vec<(i64, Option<i64>)> {
    form.maximalize().unwrap();
    form
        .iter()
        .map(|element| {
          let element = element.borrow();
          let key = match element.value() {
            Value::Integer(n) => *n,
            other => panic!("unexpected key {}", other),
          };
          let quantity = element.attribute().and_then(|attribute| {
            attribute.iter().next().map(|held| match held.borrow().value() {
              Value::Integer(n) => *n,
              other => panic!("unexpected quantity {}", other),
            })
          });
          (key, quantity)
        })
        .collect()
  }

  #[test]
  fn sum_merges_quantities() {
    let fixture = Fixture::new();
    let mut a = fixture.form(&[(1, 10), (3, 5), (5, 2)]);
    let b = fixture.form(&[(3, 4), (4, 7)]);

    a.sum(b).unwrap();
    assert_eq!(
      contents(&mut a),
      vec![(1, Some(10)), (3, Some(9)), (4, Some(7)), (5, Some(2))]
    );
  }

  #[test]
  fn sum_is_order_independent() {
    let fixture = Fixture::new();
    let mut ab = fixture.form(&[(1, 10), (3, 5)]);
    ab.sum(fixture.form(&[(3, 4), (4, 7)])).unwrap();

    let mut ba = fixture.form(&[(3, 4), (4, 7)]);
    ba.sum(fixture.form(&[(1, 10), (3, 5)])).unwrap();

    assert!(ab.equals(&mut ba).unwrap());
  }

  #[test]
  fn product_is_order_independent() {
    let fixture = Fixture::new();
    let mut ab = fixture.form(&[(1, 10), (3, 5)]);
    ab.product(fixture.form(&[(3, 5), (4, 7)])).unwrap();

    let mut ba = fixture.form(&[(3, 5), (4, 7)]);
    ba.product(fixture.form(&[(1, 10), (3, 5)])).unwrap();

    assert!(ab.equals(&mut ba).unwrap());
    assert_eq!(contents(&mut ab), vec![(3, Some(5))]);
  }

  #[test]
  fn sym_difference_is_order_independent() {
    let fixture = Fixture::new();
    let mut ab = fixture.form(&[(1, 10), (3, 5)]);
    ab.sym_difference(fixture.form(&[(3, 5), (4, 7)])).unwrap();

    let mut ba = fixture.form(&[(3, 5), (4, 7)]);
    ba.sym_difference(fixture.form(&[(1, 10), (3, 5)])).unwrap();

    assert!(ab.equals(&mut ba).unwrap());
    assert_eq!(contents(&mut ab), vec![(1, Some(10)), (4, Some(7))]);
  }

  #[test]
  fn difference_of_plain_elements() {
    let fixture = Fixture::new();
    let mut a = fixture.plain_form(&[1, 2, 3, 4]);
    a.difference(fixture.plain_form(&[2, 4, 9])).unwrap();
    assert_eq!(contents(&mut a), vec![(1, None), (3, None)]);
  }

  #[test]
  fn product_keeps_only_shared_keys() {
    let fixture = Fixture::new();
    let mut a = fixture.plain_form(&[1, 2, 3]);
    a.product(fixture.plain_form(&[2, 3, 4])).unwrap();
    assert_eq!(contents(&mut a), vec![(2, None), (3, None)]);
  }

  #[test]
  fn sym_difference_cancels_shared_keys() {
    let fixture = Fixture::new();
    let mut a = fixture.plain_form(&[1, 2, 3]);
    a.sym_difference(fixture.plain_form(&[2, 3, 4])).unwrap();
    assert_eq!(contents(&mut a), vec![(1, None), (4, None)]);
  }

  #[test]
  fn maximalize_is_idempotent() {
    let fixture = Fixture::new();
    let mut form = fixture.form(&[(3, 1), (1, 2), (3, 4)]);
    form.maximalize().unwrap();
    let once = contents(&mut form);
    form.maximalize().unwrap();
    assert_eq!(contents(&mut form), once);
    assert_eq!(once, vec![(1, Some(2)), (3, Some(5))]);
  }

  #[test]
  fn duplicate_keys_fold_on_maximalize() {
    let fixture = Fixture::new();
    let mut form = fixture.plain_form(&[2, 1, 2, 2]);
    assert_eq!(contents(&mut form), vec![(1, None), (2, None)]);
  }

  #[test]
  fn partition_reconstruction() {
    let fixture = Fixture::new();
    let mut a = fixture.plain_form(&[1, 2, 3]);
    let mut b = fixture.plain_form(&[2, 3, 4]);
    let mut common = Sort::make_form(&fixture.numbers);

    a.partition(&mut b, &mut common).unwrap();
    assert_eq!(contents(&mut a), vec![(1, None)]);
    assert_eq!(contents(&mut b), vec![(4, None)]);
    assert_eq!(contents(&mut common), vec![(2, None), (3, None)]);

    // a' + common + b' must equal the independent sum.
    let mut rebuilt = fixture.plain_form(&[1]);
    rebuilt.sum(common).unwrap();
    rebuilt.sum(b).unwrap();
    let mut summed = fixture.plain_form(&[1, 2, 3]);
    summed.sum(fixture.plain_form(&[2, 3, 4])).unwrap();
    assert!(rebuilt.equals(&mut summed).unwrap());
  }

  #[test]
  fn part_of_and_product_agree() {
    let fixture = Fixture::new();
    let mut a = fixture.form(&[(1, 3)]);
    let mut b = fixture.form(&[(1, 3), (2, 5)]);
    assert!(a.part_of(&mut b).unwrap());

    let mut narrowed = a.duplicate();
    narrowed.product(b.duplicate()).unwrap();
    assert!(narrowed.equals(&mut a).unwrap());

    let mut c = fixture.plain_form(&[1, 9]);
    assert!(!c.part_of(&mut b).unwrap());
  }

  #[test]
  fn sort_mismatch_is_rejected() {
    let mut sorts = SortCollection::new();
    let numbers = sorts.get_or_create_sort(IString::from("number"), FormCategory::Discrete);
    let letters = sorts.get_or_create_sort(IString::from("letter"), FormCategory::Discrete);

    let mut a = Sort::make_form(&numbers);
    a.add(Individual::new(numbers, Value::Integer(1))).unwrap();
    let b = Sort::make_form(&letters);
    assert!(a.sum(b).is_err());
  }
}
