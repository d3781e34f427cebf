/*!

Backing-type abstractions: each alias or wrapper here redirects to a chosen
implementation so the rest of the crate never names the backing crate directly.
`IString` is the interned string sort names and symbol values are made of;
`RcCell`/`WeakCell` carry the shared individuals and their non-owning
back-references; `NatSet` holds sets of sort registry indices.

*/

mod nat_set;
mod rccell;
mod string_join;

// Threshold-filtered logging
pub mod log;

// A set of natural numbers
pub use nat_set::NatSet;

// Reference counted pointers with mutable state, and complementary weak pointers.
pub use rccell::{rc_cell, RcCell, WeakCell};

// Interned string.
pub use string_cache::DefaultAtom as IString;

// Join sequences with a separator
pub use string_join::{join_iter, join_string};
