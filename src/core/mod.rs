/*!

Infrastructure the algebra is built on: the lazily ordered cursor sequence, the
sort registry, and the conversion seam.

*/

pub mod converter;
pub mod ordered_list;
pub mod sort;
