/*!

The algebra itself: values, individuals, forms, and one implementation module
per behavioral category. `Form` owns the dispatch; the category modules hold
the merge-scans and case analyses and are not part of the public surface.

*/

pub mod form;
pub mod form_error;
pub mod individual;
pub mod value;

pub(crate) mod discrete;
pub(crate) mod interval;
pub(crate) mod meta;
pub(crate) mod ordinal;
pub(crate) mod relational;

pub use form::{Form, FormFlag, FormFlags};
pub use form_error::FormError;
pub use individual::{AssociateRef, Individual, RcIndividual, WeakIndividual};
pub use value::{Segment, Value};
