/*!

A canonical-form collection algebra engine. Forms are ordered collections of
individuals drawn from a typed universe of sorts; every sort fixes a
behavioral category (discrete, interval, relational, ordinal, or disjoint
union), and every form supports six algebra operators — sum, difference,
product, symmetric difference, partition, and a part-of test — whose results
are always in the category's unique maximal representation.

```
use formlib::{FormCategory, Individual, IString, Sort, SortCollection, Value};

let mut sorts = SortCollection::new();
let numbers = sorts.get_or_create_sort(IString::from("number"), FormCategory::Discrete);

let mut form = Sort::make_form(&numbers);
form.add(Individual::new(numbers.clone(), Value::Integer(3))).unwrap();
form.add(Individual::new(numbers.clone(), Value::Integer(1))).unwrap();
form.maximalize().unwrap();
assert_eq!(form.to_string(), "{1, 3}");
```

*/

pub mod abstractions;
pub mod api;
pub mod core;

pub use abstractions::{log, IString, NatSet};
pub use api::{
  AssociateRef,
  Form,
  FormError,
  FormFlag,
  Individual,
  RcIndividual,
  Segment,
  Value,
};
pub use core::{
  converter::{convert, Converter, DefaultConverter},
  ordered_list::{Ordered, OrderedList},
  sort::{FormCategory, Sort, SortCollection, SortPtr},
};
