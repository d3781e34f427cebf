/*!

Interval algebra: elements are one-dimensional segments that may coincide,
touch, contain one another, or partially overlap, and the operators must emit
0–3 fragments per step to keep the result canonical. The strategy throughout
is decomposition: any overlapping pair is split into remainder / overlap /
remainder pieces, after which only the coincident and no-overlap cases remain
and the discrete-style rules apply. The final fusion of touching pieces with
equal attributes happens in `maximalize`.

*/

use std::cmp::Ordering;
use std::collections::VecDeque;

use crate::api::{
  form::{
    attr_part_of,
    attrs_equal_or_absent,
    combine_attr_forms,
    combine_attribute_pair,
    dup_attribute,
    maximalize_attribute,
    AlgebraOp,
    Form,
  },
  form_error::FormError,
  individual::{Individual, RcIndividual},
  value::Value,
};
use crate::core::sort::SortPtr;

/// Ordered insertion of a segment-valued element.
pub(crate) fn add(form: &mut Form, element: RcIndividual) -> Result<(), FormError> {
  assert!(
    matches!(element.borrow().value(), Value::Segment(_)),
    "interval forms hold segment values"
  );
  form.insert_element(element);
  Ok(())
}

/// A fresh fragment belonging to the owning form: its use counter is already
/// bumped, matching the elements drained out of the form's list.
fn fragment(sort: &SortPtr, value: Value, attribute: Option<Form>) -> RcIndividual {
  let piece = match attribute {
    Some(attribute) => Individual::with_attribute(sort.clone(), value, attribute),
    None => Individual::new(sort.clone(), value),
  };
  piece.borrow_mut().add_use();
  piece
}

/// Sums `extra` into the element's attribute form.
fn absorb_attribute(element: &RcIndividual, extra: Option<Form>) -> Result<(), FormError> {
  if let Some(extra) = extra {
    let own = element.borrow_mut().take_attribute();
    let (merged, _) = combine_attr_forms(AlgebraOp::Sum, own, Some(extra))?;
    if let Some(merged) = merged {
      Individual::install_attribute(element, merged);
    }
  }
  Ok(())
}

/// Splits `element` against `against` and pushes the pieces back onto the
/// front of `queue` in order: below-remainder, overlap, above-remainder. The
/// element itself keeps its attribute and shrinks to the overlap; remainders
/// get duplicated attributes.
fn split_for_overlap(
  sort: &SortPtr,
  queue: &mut VecDeque<RcIndividual>,
  element: RcIndividual,
  against: &Value,
) {
  let value = element.borrow().value().clone();
  let overlap = match value.common(against) {
    Some(overlap) => overlap,
    None => {
      queue.push_front(element);
      return;
    }
  };
  let (below, above) = value.complement(against);
  let remainder_attribute = dup_attribute(&element);

  if let Some(above) = above {
    queue.push_front(fragment(sort, above, remainder_attribute.as_ref().map(Form::duplicate)));
  }
  element.borrow_mut().set_value(overlap);
  queue.push_front(element);
  if let Some(below) = below {
    queue.push_front(fragment(sort, below, remainder_attribute));
  }
}

/// Walks adjacent pairs, merging and splitting until no two neighbors are
/// combinable. Case order matters: a gap advances; coincident segments sum
/// their attributes; equal-or-absent attributes fuse geometrically; touching
/// segments with differing attributes stand; containment and partial overlap
/// split the pair into covered and uncovered pieces.
pub(crate) fn maximalize(form: &mut Form) -> Result<(), FormError> {
  form.elements.order();
  let sort = form.sort().clone();
  let mut work: VecDeque<RcIndividual> = form.elements.drain_all().into();
  let mut out: Vec<RcIndividual> = Vec::new();

  while let Some(n) = work.pop_front() {
    let e = match out.last() {
      Some(e) => e.clone(),
      None => {
        out.push(n);
        continue;
      }
    };
    let ev = e.borrow().value().clone();
    let nv = n.borrow().value().clone();

    // A gap (or a different axis) between the pair.
    if ev.disjoint(&nv) && !ev.touches(&nv) {
      out.push(n);
      continue;
    }

    // Exactly coincident: sum attributes, drop the duplicate, re-check the
    // survivor against its new predecessor.
    if ev.equals(&nv) {
      combine_attribute_pair(AlgebraOp::Sum, &e, &n)?;
      form.release(n)?;
      out.pop();
      work.push_front(e);
      continue;
    }

    // Equal (or absent) attributes fuse into the geometric hull.
    if attrs_equal_or_absent(&e, &n)? {
      let hull = ev.combine(&nv);
      e.borrow_mut().set_value(hull);
      form.release(n)?;
      continue;
    }

    // Touching with differing attributes: nothing to combine.
    if ev.touches(&nv) {
      out.push(n);
      continue;
    }

    if ev.contains(&nv) {
      // The predecessor covers the newcomer entirely: the covered extent
      // carries the sum of both attributes (the same rule as the coincident
      // case), the remainders keep the predecessor's.
      let (below, above) = ev.complement(&nv);
      absorb_attribute(&n, dup_attribute(&e))?;
      if let Some(above) = above {
        work.push_front(fragment(&sort, above, dup_attribute(&e)));
      }
      match below {
        Some(below) => e.borrow_mut().set_value(below),
        None => {
          out.pop();
          form.release(e)?;
        }
      }
      work.push_front(n);
    } else if nv.contains(&ev) {
      // The newcomer covers the predecessor (shared lower bound): the
      // predecessor becomes the covered extent with summed attributes and is
      // re-checked against its own predecessor.
      absorb_attribute(&e, dup_attribute(&n))?;
      let (_, above) = nv.complement(&ev);
      match above {
        Some(above) => {
          n.borrow_mut().set_value(above);
          work.push_front(n);
        }
        None => form.release(n)?,
      }
      out.pop();
      work.push_front(e);
    } else {
      // Partial overlap: a third, shared fragment carrying the summed
      // attributes sits between the two remainders.
      let overlap = match ev.common(&nv) {
        Some(overlap) => overlap,
        None => {
          out.push(n);
          continue;
        }
      };
      let (shared_attr, _) =
          combine_attr_forms(AlgebraOp::Sum, dup_attribute(&e), dup_attribute(&n))?;
      let mid = fragment(&sort, overlap, shared_attr);
      if let (Some(below), _) = ev.complement(&nv) {
        e.borrow_mut().set_value(below);
      }
      if let (_, Some(above)) = nv.complement(&ev) {
        n.borrow_mut().set_value(above);
        work.push_front(n);
      } else {
        form.release(n)?;
      }
      work.push_front(mid);
    }
  }

  for element in &out {
    maximalize_attribute(element)?;
  }
  form.elements.restore_ordered(out);
  Ok(())
}

/// Sum transfers every element of `other` and lets canonicalization do the
/// merging and splitting.
pub(crate) fn sum(this: &mut Form, other: &mut Form) -> Result<(), FormError> {
  for element in other.elements.drain_all() {
    this.adopt(&element, other)?;
    this.elements.insert_into(element);
  }
  this.clear_maximal();
  Ok(())
}

/// Difference, product, and symmetric difference: decompose overlapping pairs
/// into coincident pieces, then apply the discrete-style case table.
pub(crate) fn merge_scan(this: &mut Form, other: &mut Form, op: AlgebraOp) -> Result<(), FormError> {
  this.maximalize()?;
  other.maximalize()?;

  let sort = this.sort().clone();
  let mut left: VecDeque<RcIndividual> = this.elements.drain_all().into();
  let mut right: VecDeque<RcIndividual> = other.elements.drain_all().into();
  let mut kept: Vec<RcIndividual> = Vec::new();

  loop {
    let (xv, yv) = match (left.front(), right.front()) {
      (Some(x), Some(y)) => (x.borrow().value().clone(), y.borrow().value().clone()),

      (Some(_), None) => {
        if let Some(x) = left.pop_front() {
          if op == AlgebraOp::Product {
            this.release(x)?;
          } else {
            kept.push(x);
          }
        }
        continue;
      }

      (None, Some(_)) => {
        if let Some(y) = right.pop_front() {
          match op {
            AlgebraOp::Sum | AlgebraOp::SymDifference => {
              this.adopt(&y, other)?;
              kept.push(y);
            }
            AlgebraOp::Difference | AlgebraOp::Product => other.release(y)?,
          }
        }
        continue;
      }

      (None, None) => break,
    };

    if xv.equals(&yv) {
      if let (Some(x), Some(y)) = (left.pop_front(), right.pop_front()) {
        let keep = combine_attribute_pair(op, &x, &y)?;
        other.release(y)?;
        if keep {
          kept.push(x);
        } else {
          this.release(x)?;
        }
      }
      continue;
    }

    if xv.common(&yv).is_none() {
      // No overlap: the earlier piece gets the single-operand treatment.
      if xv.compare(&yv) == Ordering::Less {
        if let Some(x) = left.pop_front() {
          if op == AlgebraOp::Product {
            this.release(x)?;
          } else {
            kept.push(x);
          }
        }
      } else if let Some(y) = right.pop_front() {
        match op {
          AlgebraOp::Sum | AlgebraOp::SymDifference => {
            this.adopt(&y, other)?;
            kept.push(y);
          }
          AlgebraOp::Difference | AlgebraOp::Product => other.release(y)?,
        }
      }
      continue;
    }

    // Overlapping, not coincident: split both sides around the overlap and
    // rescan; only coincident and no-overlap pieces remain afterwards.
    if let (Some(x), Some(y)) = (left.pop_front(), right.pop_front()) {
      split_for_overlap(&sort, &mut left, x, &yv);
      split_for_overlap(&sort, &mut right, y, &xv);
    }
  }

  this.elements.restore_ordered(kept);
  this.clear_maximal();
  Ok(())
}

/// Three-way split with the same decomposition strategy.
pub(crate) fn partition(this: &mut Form, other: &mut Form, common: &mut Form) -> Result<(), FormError> {
  this.maximalize()?;
  other.maximalize()?;
  common.maximalize()?;

  let sort = this.sort().clone();
  let mut left: VecDeque<RcIndividual> = this.elements.drain_all().into();
  let mut right: VecDeque<RcIndividual> = other.elements.drain_all().into();
  let mut kept_left: Vec<RcIndividual> = Vec::new();
  let mut kept_right: Vec<RcIndividual> = Vec::new();

  loop {
    let (xv, yv) = match (left.front(), right.front()) {
      (Some(x), Some(y)) => (x.borrow().value().clone(), y.borrow().value().clone()),
      (Some(_), None) => {
        if let Some(x) = left.pop_front() {
          kept_left.push(x);
        }
        continue;
      }
      (None, Some(_)) => {
        if let Some(y) = right.pop_front() {
          kept_right.push(y);
        }
        continue;
      }
      (None, None) => break,
    };

    if xv.equals(&yv) {
      if let (Some(x), Some(y)) = (left.pop_front(), right.pop_front()) {
        partition_coincident(this, other, common, x, y, &mut kept_left, &mut kept_right)?;
      }
      continue;
    }

    if xv.common(&yv).is_none() {
      if xv.compare(&yv) == Ordering::Less {
        if let Some(x) = left.pop_front() {
          kept_left.push(x);
        }
      } else if let Some(y) = right.pop_front() {
        kept_right.push(y);
      }
      continue;
    }

    if let (Some(x), Some(y)) = (left.pop_front(), right.pop_front()) {
      split_for_overlap(&sort, &mut left, x, &yv);
      split_for_overlap(&sort, &mut right, y, &xv);
    }
  }

  this.elements.restore_ordered(kept_left);
  other.elements.restore_ordered(kept_right);
  this.clear_maximal();
  other.clear_maximal();
  common.clear_maximal();
  Ok(())
}

/// The EQUAL case of partition: the attribute forms are themselves
/// partitioned, and each side survives only with a non-empty residue.
fn partition_coincident(
  this: &mut Form,
  other: &mut Form,
  common: &mut Form,
  x: RcIndividual,
  y: RcIndividual,
  kept_left: &mut Vec<RcIndividual>,
  kept_right: &mut Vec<RcIndividual>,
) -> Result<(), FormError> {
  let attr_x = x.borrow_mut().take_attribute();
  let attr_y = y.borrow_mut().take_attribute();

  match (attr_x, attr_y) {
    (None, None) => {
      let shared = Individual::new(common.sort().clone(), x.borrow().value().clone());
      common.insert_element(shared);
      this.release(x)?;
      other.release(y)?;
    }

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
  Ok(())
}

/// Progressive coverage walk: every segment of `this` must be covered by
/// successive segments of `other`, each covering piece also covering the
/// attribute.
pub(crate) fn part_of(this: &mut Form, other: &mut Form) -> Result<bool, FormError> {
  this.maximalize()?;
  other.maximalize()?;

  let mut j = 0;
  for i in 0..this.elements.len() {
    let x = match this.elements.get(i) {
      Some(x) => x.clone(),
      None => break,
    };
    let mut remaining = x.borrow().value().clone();
    loop {
      let y = match other.elements.get(j) {
        Some(y) => y.clone(),
        None => return Ok(false),
      };
      let yv = y.borrow().value().clone();

      if remaining.common(&yv).is_none() {
        // Disjoint piece: advance past earlier material, fail on a gap.
        if yv.compare(&remaining) == Ordering::Less {
          j += 1;
          continue;
        }
        return Ok(false);
      }

      let (below, above) = remaining.complement(&yv);
      if below.is_some() {
        return Ok(false);
      }
      if !attr_part_of(&x, &y)? {
        return Ok(false);
      }
      match above {
        Some(rest) => {
          remaining = rest;
          j += 1;
        }
        None => break,
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
      value::{Segment, Value},
    },
    core::sort::{FormCategory, Sort, SortCollection, SortPtr},
    IString,
  };

  struct Fixture {
    spans: SortPtr,
    tags:  SortPtr,
  }

  impl Fixture {
    fn new() -> Fixture {
      let mut sorts = SortCollection::new();
      Fixture {
        spans: sorts.get_or_create_sort(IString::from("span"), FormCategory::Interval),
        tags:  sorts.get_or_create_sort(IString::from("tag"), FormCategory::Discrete),
      }
    }

    fn segment(&self, lower: i64, upper: i64) -> RcIndividual {
      Individual::new(
        self.spans.clone(),
        Value::Segment(Segment::new(IString::from("x"), lower, upper)),
      )
    }

    /// A segment carrying a set-valued attribute, e.g. `[0,5) -> {A}`.
    fn tagged(&self, lower: i64, upper: i64, tags: &[&str]) -> RcIndividual {
      let mut attribute = Sort::make_form(&self.tags);
      for tag in tags {
        attribute
            .add(Individual::new(self.tags.clone(), Value::Symbol(IString::from(*tag))))
            .unwrap();
      }
      Individual::with_attribute(
        self.spans.clone(),
        Value::Segment(Segment::new(IString::from("x"), lower, upper)),
        attribute,
      )
    }

    fn form(&self, elements: Vec<RcIndividual>) -> Form {
      let mut form = Sort::make_form(&self.spans);
      for element in elements {
        form.add(element).unwrap();
      }
      form
    }
  }

  fn spans(form: &mut Form) -> Vec<(i64, i64, Vec<String>)> {
    form.maximalize().unwrap();
    form
        .iter()
        .map(|element| {
          let element = element.borrow();
          let (lower, upper) = match element.value() {
            Value::Segment(s) => (s.lower, s.upper),
            other => panic!("unexpected value {}", other),
          };
          let mut tags: Vec<String> = element
              .attribute()
              .map(|attribute| attribute.iter().map(|t| t.borrow().value().to_string()).collect())
              .unwrap_or_default();
          tags.sort();
          (lower, upper, tags)
        })
        .collect()
  }

  #[test]
  fn sum_splits_the_overlap() {
    let fixture = Fixture::new();
    let mut a = fixture.form(vec![fixture.tagged(0, 5, &["A"])]);
    let b = fixture.form(vec![fixture.tagged(3, 8, &["B"])]);

    a.sum(b).unwrap();
    assert_eq!(
      spans(&mut a),
      vec![
        (0, 3, vec!["A".to_string()]),
        (3, 5, vec!["A".to_string(), "B".to_string()]),
        (5, 8, vec!["B".to_string()]),
      ]
    );
  }

  #[test]
  fn overlap_with_a_plain_segment_keeps_the_refinement() {
    let fixture = Fixture::new();
    let mut form = fixture.form(vec![fixture.tagged(0, 5, &["A"]), fixture.segment(3, 8)]);

    // The shared stretch keeps A; the plain remainder stands apart.
    assert_eq!(
      spans(&mut form),
      vec![(0, 5, vec!["A".to_string()]), (5, 8, vec![])]
    );
  }

  #[test]
  fn plain_segment_does_not_swallow_a_contained_refinement() {
    let fixture = Fixture::new();
    let mut form = fixture.form(vec![fixture.segment(0, 8), fixture.tagged(2, 4, &["A"])]);
    assert_eq!(
      spans(&mut form),
      vec![
        (0, 2, vec![]),
        (2, 4, vec!["A".to_string()]),
        (4, 8, vec![]),
      ]
    );
  }

  #[test]
  fn partition_reconstruction_with_mixed_refinement() {
    let fixture = Fixture::new();
    let mut a = fixture.form(vec![fixture.tagged(0, 5, &["A"])]);
    let mut b = fixture.form(vec![fixture.segment(3, 8)]);
    let mut common = Sort::make_form(&fixture.spans);

    let mut summed = fixture.form(vec![fixture.tagged(0, 5, &["A"])]);
    summed.sum(fixture.form(vec![fixture.segment(3, 8)])).unwrap();

    // Reassembling the three parts gives back exactly the direct sum.
    a.partition(&mut b, &mut common).unwrap();
    let mut rebuilt = a;
    rebuilt.sum(common).unwrap();
    rebuilt.sum(b).unwrap();
    assert!(rebuilt.equals(&mut summed).unwrap());
  }

  #[test]
  fn maximalize_fuses_touching_segments() {
    let fixture = Fixture::new();
    let mut form = fixture.form(vec![fixture.segment(5, 8), fixture.segment(0, 5)]);
    assert_eq!(spans(&mut form), vec![(0, 8, vec![])]);
  }

  #[test]
  fn touching_segments_with_different_tags_stand() {
    let fixture = Fixture::new();
    let mut form = fixture.form(vec![fixture.tagged(0, 5, &["A"]), fixture.tagged(5, 8, &["B"])]);
    assert_eq!(
      spans(&mut form),
      vec![(0, 5, vec!["A".to_string()]), (5, 8, vec!["B".to_string()])]
    );
  }

  #[test]
  fn maximalize_is_idempotent() {
    let fixture = Fixture::new();
    let mut form = fixture.form(vec![
      fixture.tagged(0, 5, &["A"]),
      fixture.tagged(3, 8, &["B"]),
      fixture.segment(10, 12),
    ]);
    form.maximalize().unwrap();
    let once = spans(&mut form);
    form.maximalize().unwrap();
    assert_eq!(spans(&mut form), once);
  }

  #[test]
  fn difference_carves_the_overlap() {
    let fixture = Fixture::new();
    let mut a = fixture.form(vec![fixture.segment(0, 8)]);
    a.difference(fixture.form(vec![fixture.segment(3, 5)])).unwrap();
    assert_eq!(spans(&mut a), vec![(0, 3, vec![]), (5, 8, vec![])]);
  }

  #[test]
  fn difference_with_disjoint_tags_keeps_the_refinement() {
    let fixture = Fixture::new();
    let mut a = fixture.form(vec![fixture.tagged(0, 5, &["A"])]);
    a.difference(fixture.form(vec![fixture.tagged(3, 8, &["B"])])).unwrap();
    // Removing B-content leaves the A-content untouched.
    assert_eq!(spans(&mut a), vec![(0, 5, vec!["A".to_string()])]);
  }

  #[test]
  fn product_keeps_only_the_overlap() {
    let fixture = Fixture::new();
    let mut a = fixture.form(vec![fixture.segment(0, 5)]);
    a.product(fixture.form(vec![fixture.segment(3, 8)])).unwrap();
    assert_eq!(spans(&mut a), vec![(3, 5, vec![])]);
  }

  #[test]
  fn sym_difference_of_disjoint_tag_sets_unions() {
    let fixture = Fixture::new();
    let mut a = fixture.form(vec![fixture.tagged(0, 5, &["A"])]);
    a.sym_difference(fixture.form(vec![fixture.tagged(3, 8, &["B"])])).unwrap();
    assert_eq!(
      spans(&mut a),
      vec![
        (0, 3, vec!["A".to_string()]),
        (3, 5, vec!["A".to_string(), "B".to_string()]),
        (5, 8, vec!["B".to_string()]),
      ]
    );
  }

  #[test]
  fn sum_is_order_independent() {
    let fixture = Fixture::new();
    let mut ab = fixture.form(vec![fixture.tagged(0, 5, &["A"])]);
    ab.sum(fixture.form(vec![fixture.tagged(3, 8, &["B"])])).unwrap();

    let mut ba = fixture.form(vec![fixture.tagged(3, 8, &["B"])]);
    ba.sum(fixture.form(vec![fixture.tagged(0, 5, &["A"])])).unwrap();

    assert!(ab.equals(&mut ba).unwrap());
  }

  #[test]
  fn product_is_order_independent() {
    let fixture = Fixture::new();
    let mut ab = fixture.form(vec![fixture.tagged(0, 5, &["A", "B"])]);
    ab.product(fixture.form(vec![fixture.tagged(3, 8, &["B", "C"])])).unwrap();

    let mut ba = fixture.form(vec![fixture.tagged(3, 8, &["B", "C"])]);
    ba.product(fixture.form(vec![fixture.tagged(0, 5, &["A", "B"])])).unwrap();

    assert!(ab.equals(&mut ba).unwrap());
    assert_eq!(spans(&mut ab), vec![(3, 5, vec!["B".to_string()])]);
  }

  #[test]
  fn sym_difference_is_order_independent() {
    let fixture = Fixture::new();
    let mut ab = fixture.form(vec![fixture.tagged(0, 5, &["A"])]);
    ab.sym_difference(fixture.form(vec![fixture.tagged(3, 8, &["B"])])).unwrap();

    let mut ba = fixture.form(vec![fixture.tagged(3, 8, &["B"])]);
    ba.sym_difference(fixture.form(vec![fixture.tagged(0, 5, &["A"])])).unwrap();

    assert!(ab.equals(&mut ba).unwrap());
  }

  #[test]
  fn partition_splits_three_ways() {
    let fixture = Fixture::new();
    let mut a = fixture.form(vec![fixture.segment(0, 5)]);
    let mut b = fixture.form(vec![fixture.segment(3, 8)]);
    let mut common = Sort::make_form(&fixture.spans);

    a.partition(&mut b, &mut common).unwrap();
    assert_eq!(spans(&mut a), vec![(0, 3, vec![])]);
    assert_eq!(spans(&mut b), vec![(5, 8, vec![])]);
    assert_eq!(spans(&mut common), vec![(3, 5, vec![])]);
  }

  #[test]
  fn part_of_follows_coverage() {
    let fixture = Fixture::new();
    let mut a = fixture.form(vec![fixture.segment(2, 4)]);
    let mut b = fixture.form(vec![fixture.segment(0, 8)]);
    assert!(a.part_of(&mut b).unwrap());

    let mut c = fixture.form(vec![fixture.segment(0, 3)]);
    assert!(!a.part_of(&mut c).unwrap());
  }

  #[test]
  fn part_of_spans_successive_pieces() {
    let fixture = Fixture::new();
    let mut a = fixture.form(vec![fixture.tagged(0, 6, &["A"])]);
    let mut b = fixture.form(vec![
      fixture.tagged(0, 3, &["A"]),
      fixture.tagged(3, 6, &["A", "B"]),
    ]);
    assert!(a.part_of(&mut b).unwrap());
  }

  #[test]
  fn separate_axes_do_not_interact() {
    let fixture = Fixture::new();
    let other_axis = Individual::new(
      fixture.spans.clone(),
      Value::Segment(Segment::new(IString::from("y"), 0, 5)),
    );
    let mut form = fixture.form(vec![fixture.segment(0, 5), other_axis]);
    form.maximalize().unwrap();
    assert_eq!(form.size(), 2);
  }
}
