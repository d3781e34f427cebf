/*!

The closed universe of comparison keys an individual can carry: interned
symbols, integers, and one-dimensional half-open segments. The engine never
dispatches on a value's kind at run time beyond matching the enum; the
behavioral category comes from the sort, the value only supplies the capability
set (total order, and for segments the interval geometry).

Segment geometry governs the interval category. A segment is `[lower, upper)`
on a named axis (the segment's descriptor); two segments interact only when
their axes agree. The governing assumption of the interval algebra — for
segments a ≤ b in the order, a + b = b exactly when a < b — is asserted
defensively in `combine` rather than trusted.

*/

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

use crate::abstractions::IString;

/// A half-open interval `[lower, upper)` on a named axis.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Segment {
  pub axis:  IString,
  pub lower: i64,
  pub upper: i64,
}

impl Segment {
  pub fn new(axis: IString, lower: i64, upper: i64) -> Segment {
    assert!(lower < upper, "empty segment [{}, {})", lower, upper);
    Segment { axis, lower, upper }
  }

  /// Same descriptor, ignoring extent.
  #[inline(always)]
  pub fn co_equals(&self, other: &Segment) -> bool {
    self.axis == other.axis
  }

  /// No common point and not adjacent.
  #[inline(always)]
  pub fn strictly_disjoint(&self, other: &Segment) -> bool {
    !self.co_equals(other) || self.upper < other.lower || other.upper < self.lower
  }

  /// No common point (adjacency allowed).
  #[inline(always)]
  pub fn disjoint(&self, other: &Segment) -> bool {
    !self.co_equals(other) || self.upper <= other.lower || other.upper <= self.lower
  }

  /// Adjacent without overlap.
  #[inline(always)]
  pub fn touches(&self, other: &Segment) -> bool {
    self.co_equals(other) && (self.upper == other.lower || other.upper == self.lower)
  }

  #[inline(always)]
  pub fn contains(&self, other: &Segment) -> bool {
    self.co_equals(other) && self.lower <= other.lower && other.upper <= self.upper
  }

  /// The overlap, if any.
  pub fn common(&self, other: &Segment) -> Option<Segment> {
    if !self.co_equals(other) {
      return None;
    }
    let lower = self.lower.max(other.lower);
    let upper = self.upper.min(other.upper);
    if lower < upper {
      Some(Segment::new(self.axis.clone(), lower, upper))
    } else {
      None
    }
  }

  /// The 0–2 fragments of `self` remaining after removing the overlap with
  /// `other`: the part below `other` and the part above it.
  pub fn complement(&self, other: &Segment) -> (Option<Segment>, Option<Segment>) {
    if !self.co_equals(other) || self.disjoint(other) {
      return (Some(self.clone()), None);
    }
    let below = if self.lower < other.lower {
      Some(Segment::new(self.axis.clone(), self.lower, other.lower.min(self.upper)))
    } else {
      None
    };
    let above = if other.upper < self.upper {
      Some(Segment::new(self.axis.clone(), other.upper.max(self.lower), self.upper))
    } else {
      None
    };
    (below, above)
  }

  /// Geometric union of two touching or overlapping segments: the hull.
  pub fn combine(&self, other: &Segment) -> Segment {
    debug_assert!(
      self.co_equals(other) && !self.strictly_disjoint(other),
      "combine requires touching or overlapping segments on one axis"
    );
    Segment::new(
      self.axis.clone(),
      self.lower.min(other.lower),
      self.upper.max(other.upper),
    )
  }

  fn compare(&self, other: &Segment) -> Ordering {
    compare_atoms(&self.axis, &other.axis)
        .then(self.lower.cmp(&other.lower))
        .then(self.upper.cmp(&other.upper))
  }
}

/// A comparison key. Variants of different kinds are ordered by kind; forms
/// only ever hold values of one kind since elements share a sort.
#[derive(Clone, Debug)]
pub enum Value {
  Symbol(IString),
  Integer(i64),
  Segment(Segment),
}

impl Value {
  /// The total order individuals of one sort respect.
  pub fn compare(&self, other: &Value) -> Ordering {
    match (self, other) {
      (Value::Symbol(a), Value::Symbol(b)) => compare_atoms(a, b),
      (Value::Integer(a), Value::Integer(b)) => a.cmp(b),
      (Value::Segment(a), Value::Segment(b)) => a.compare(b),

      (Value::Symbol(_), _) => Ordering::Less,
      (_, Value::Symbol(_)) => Ordering::Greater,
      (Value::Integer(_), _) => Ordering::Less,
      (_, Value::Integer(_)) => Ordering::Greater,
    }
  }

  #[inline(always)]
  pub fn equals(&self, other: &Value) -> bool {
    self.compare(other) == Ordering::Equal
  }

  /// Same descriptor ignoring extent. For non-segment values the descriptor is
  /// the value itself.
  pub fn co_compare(&self, other: &Value) -> Ordering {
    match (self, other) {
      (Value::Segment(a), Value::Segment(b)) => compare_atoms(&a.axis, &b.axis),
      _ => self.compare(other),
    }
  }

  #[inline(always)]
  pub fn co_equals(&self, other: &Value) -> bool {
    self.co_compare(other) == Ordering::Equal
  }

  pub fn disjoint(&self, other: &Value) -> bool {
    match (self, other) {
      (Value::Segment(a), Value::Segment(b)) => a.disjoint(b),
      _ => !self.equals(other),
    }
  }

  pub fn touches(&self, other: &Value) -> bool {
    match (self, other) {
      (Value::Segment(a), Value::Segment(b)) => a.touches(b),
      _ => false,
    }
  }

  pub fn contains(&self, other: &Value) -> bool {
    match (self, other) {
      (Value::Segment(a), Value::Segment(b)) => a.contains(b),
      _ => self.equals(other),
    }
  }

  pub fn common(&self, other: &Value) -> Option<Value> {
    match (self, other) {
      (Value::Segment(a), Value::Segment(b)) => a.common(b).map(Value::Segment),
      _ if self.equals(other) => Some(self.clone()),
      _ => None,
    }
  }

  /// Splits `self` into the 0–2 remainder fragments left after removing the
  /// overlap with `other`.
  pub fn complement(&self, other: &Value) -> (Option<Value>, Option<Value>) {
    match (self, other) {
      (Value::Segment(a), Value::Segment(b)) => {
        let (below, above) = a.complement(b);
        (below.map(Value::Segment), above.map(Value::Segment))
      }
      _ if self.equals(other) => (None, None),
      _ => (Some(self.clone()), None),
    }
  }

  /// Combination of two combinable values: the hull for segments, arithmetic
  /// addition for integers (the quantity rule), the dominating value for
  /// symbols.
  pub fn combine(&self, other: &Value) -> Value {
    match (self, other) {
      (Value::Segment(a), Value::Segment(b)) => Value::Segment(a.combine(b)),
      (Value::Integer(a), Value::Integer(b)) => Value::Integer(a + b),
      _ => {
        if self.compare(other) == Ordering::Less {
          other.clone()
        } else {
          self.clone()
        }
      }
    }
  }

  /// The interned key identifying this value in forward references.
  pub fn key(&self) -> IString {
    match self {
      Value::Symbol(name) => name.clone(),
      Value::Integer(n) => IString::from(n.to_string().as_str()),
      Value::Segment(segment) => segment.axis.clone(),
    }
  }
}

/// Interned strings compare by content here; interning only guarantees pointer
/// equality for equal content, not a content order.
#[inline(always)]
fn compare_atoms(a: &IString, b: &IString) -> Ordering {
  if a == b {
    Ordering::Equal
  } else {
    a.as_ref().cmp(b.as_ref())
  }
}

impl Display for Value {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Value::Symbol(name) => write!(f, "{}", name),
      Value::Integer(n) => write!(f, "{}", n),
      Value::Segment(s) => {
        if s.axis.is_empty() {
          write!(f, "[{},{})", s.lower, s.upper)
        } else {
          write!(f, "{}[{},{})", s.axis, s.lower, s.upper)
        }
      }
    }
  }
}
