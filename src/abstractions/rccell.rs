/*!

Reference counted cells with run-time checked mutability and complementary weak
pointers. Individuals are shared between the collections that hold them, while
associate back-references must never keep an individual alive, hence the
strong/weak pair.

*/

use std::{
  cell::RefCell,
  rc::{Rc, Weak},
};

pub type RcCell<T>   = Rc<RefCell<T>>;
pub type WeakCell<T> = Weak<RefCell<T>>;

/// Convenience constructor for an `RcCell`.
#[inline(always)]
pub fn rc_cell<T>(value: T) -> RcCell<T> {
  Rc::new(RefCell::new(value))
}
