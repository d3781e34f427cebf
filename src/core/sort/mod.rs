/*!

A sort (represented in code by the [`Sort`](crate::core::sort::Sort) struct) is a named, immutable
type descriptor. A sort fixes two things for every individual belonging to it: the behavioral
category of forms holding such individuals (discrete, interval, relational, ordinal, or
disjoint-union), and the total order those individuals must respect. Two elements are only ever
combined when they share a sort, or when one can be converted to the other's sort through the
conversion seam.

## Lifecycle and Ownership

`Sort`s, once constructed, are owned by the [`SortCollection`](crate::core::sort::collection::SortCollection)
in which they are registered, are immutable, and are handed out as shared `SortPtr` handles. Every
sort receives a registry index at creation; two sorts are the same sort exactly when their indices
agree, so sort comparison never inspects names or structure.

## Disjunctive Sorts

A disjunctive sort declares a list of component sorts; a form of a disjunctive sort is a disjoint
union holding at most one sub-form per component. Besides the component list itself, each
disjunctive sort precomputes the set of component registry indices, so the membership test used on
every `add` into a union form is a single bit probe rather than a list walk.

*/

pub mod collection;
pub mod sort;

pub use collection::SortCollection;
pub use sort::*;
