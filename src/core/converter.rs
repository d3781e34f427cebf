/*!

The conversion seam. When `add` receives an element of an incompatible but
convertible sort, the element is redirected through a [`Converter`] before
insertion. The engine treats conversion as an opaque function returning a
re-sorted element or failing; the full sort-matching machinery lives outside
this crate, so the [`DefaultConverter`] implements only the structural rule the
engine itself relies on: a value converts across sorts of the same behavioral
category and nowhere else.

*/

use crate::api::form_error::FormError;
use crate::api::individual::{Individual, RcIndividual};
use crate::core::sort::SortPtr;
use crate::warning;

pub trait Converter {
  /// Produces a copy of `element` belonging to `target`, or fails with
  /// [`FormError::NotConvertible`].
  fn convert(&self, target: &SortPtr, element: &RcIndividual) -> Result<RcIndividual, FormError>;
}

pub struct DefaultConverter;

impl Converter for DefaultConverter {
  fn convert(&self, target: &SortPtr, element: &RcIndividual) -> Result<RcIndividual, FormError> {
    let source = element.borrow().sort().clone();
    if source == *target {
      return Ok(element.clone());
    }
    if source.category == target.category {
      // Same behavioral category: rebind the duplicate to the target sort.
      warning!(3, "converting {} from sort {} to sort {}", element.borrow(), source.name, target.name);
      return Ok(Individual::duplicate(element, target));
    }
    Err(FormError::NotConvertible {
      from: source.name.clone(),
      to:   target.name.clone(),
    })
  }
}

/// Conversion through the default converter.
pub fn convert(target: &SortPtr, element: &RcIndividual) -> Result<RcIndividual, FormError> {
  DefaultConverter.convert(target, element)
}
