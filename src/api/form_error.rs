/*!

Failures the algebra surfaces to the caller. Contract violations between
operands (mismatched sorts, impossible conversions) indicate a caller bug;
consistency failures (a relational mirror missing, unresolved relations left
at purge time) indicate a bug in the bidirectional maintenance logic. Neither
is retried internally. Use counter underflow and associate rebinding are not
represented here: those panic at the site of the bookkeeping bug.

*/

use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

use crate::abstractions::IString;

pub enum FormError {
  /// The operands of an algebra operator belong to different sorts.
  SortMismatch {
    expected: IString,
    found:    IString,
  },
  /// The conversion seam could not re-sort an element.
  NotConvertible {
    from: IString,
    to:   IString,
  },
  /// A relation's mirrored copy was not found in its associate's form.
  MirrorMissing {
    relation: String,
  },
  /// A relational form was purged while forward references were still
  /// unresolved.
  UnresolvedRelations {
    count: usize,
  },
}

impl Display for FormError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {

      FormError::SortMismatch { expected, found } => {
        write!(f, "operands belong to different sorts: expected {}, found {}", expected, found)
      }

      FormError::NotConvertible { from, to } => {
        write!(f, "no conversion from sort {} to sort {}", from, to)
      }

      FormError::MirrorMissing { relation } => {
        write!(f, "inconsistent form: the mirror of relation {} is missing from its associate", relation)
      }

      FormError::UnresolvedRelations { count } => {
        write!(f, "inconsistent form: purged while {} relation(s) remain unresolved", count)
      }

    } // end match on `FormError`
  }
}

impl Debug for FormError {
  fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
    Display::fmt(self, f)
  }
}

impl Error for FormError {}
