/*!

Relational forms run the discrete merge-scans but keep a bidirectional
contract: every relation held by an individual X with associate Y must have a
mirrored copy, carrying the inverse associate, inside Y's own attribute form.
Insertion plants the mirror (descending into the disjoint-union sub-form of
the relation's sort when the target's attribute is disjunctive), deletion
removes it, and a missing mirror is an inconsistency surfaced to the caller.

A relation whose associate is still a forward reference is registered as
pending instead; `resolve` upgrades it once the named individual arrives.

A self-relation (associate equal to the owning individual) already sits in its
associate's form pointing back at it, so it serves as its own mirror: nothing
extra is planted on insertion and nothing is hunted down on deletion.

*/

use std::rc::Rc;

use crate::{
  api::{
    form::Form,
    form_error::FormError,
    individual::{AssociateRef, Individual, RcIndividual},
    meta,
  },
  core::sort::{FormCategory, SortPtr},
  debug,
};

/// Ordered insertion plus mirror maintenance.
pub(crate) fn add(form: &mut Form, element: RcIndividual) -> Result<(), FormError> {
  form.insert_element(element.clone());
  mirror_on_insert(form, &element)
}

/// Plants the mirror of a freshly inserted relation, or registers the relation
/// as a forward reference when its associate cannot yet be resolved.
pub(crate) fn mirror_on_insert(form: &mut Form, relation: &RcIndividual) -> Result<(), FormError> {
  let target = match relation.borrow().associate_ref() {
    Some(AssociateRef::Resolved(weak)) => weak.upgrade(),
    Some(AssociateRef::Pending(_)) => None,
    // An element without an associate has nothing to mirror.
    None => return Ok(()),
  };
  match target {
    Some(target) => insert_mirror(form, relation, &target),
    None => {
      debug!(4, "forward reference registered for relation {}", relation.borrow());
      form.unresolved += 1;
      form.pending.push(relation.clone());
      Ok(())
    }
  }
}

/// Inserts the mirrored copy of `relation` into `target`'s attribute form.
/// The mirror's associate is the owner of `form`, so the pair points at each
/// other.
pub(crate) fn insert_mirror(
  form: &mut Form,
  relation: &RcIndividual,
  target: &RcIndividual,
) -> Result<(), FormError> {
  let owner = match form.associate() {
    // An unowned form has no inverse endpoint to record.
    Some(owner) => owner,
    None => return Ok(()),
  };
  if Rc::ptr_eq(target, &owner) {
    // A self-relation already sits in its associate's form pointing back at
    // it; it serves as its own mirror.
    return Ok(());
  }
  let sort = relation.borrow().sort().clone();
  let value = relation.borrow().value().clone();
  let mirror = Individual::relation(
    sort.clone(),
    value,
    AssociateRef::Resolved(Rc::downgrade(&owner)),
  );
  with_mirror_host(target, &sort, |host| {
    host.insert_element(mirror);
    Ok(())
  })
}

/// Removes the bookkeeping for a departing relation: a pending one leaves the
/// queue, a mirrored one has its mirror located and removed.
pub(crate) fn unlink_mirror(form: &mut Form, relation: &RcIndividual) -> Result<(), FormError> {
  if let Some(position) = form.pending.iter().position(|p| Rc::ptr_eq(p, relation)) {
    form.pending.remove(position);
    form.unresolved -= 1;
    return Ok(());
  }
  let target = match relation.borrow().associate() {
    Some(target) => target,
    None => return Ok(()),
  };
  let owner = match form.associate() {
    Some(owner) => owner,
    None => return Ok(()),
  };
  if Rc::ptr_eq(&target, &owner) {
    // A self-relation is its own mirror; there is nothing separate to remove.
    return Ok(());
  }
  let sort = relation.borrow().sort().clone();
  with_mirror_host(&target, &sort, |host| remove_mirror(host, relation, &owner))
}

/// Completes every pending forward reference naming `individual`: the
/// associate is upgraded and the mirror planted.
pub(crate) fn resolve(form: &mut Form, individual: &RcIndividual) -> Result<(), FormError> {
  let key = individual.borrow().key();
  let mut matched: Vec<RcIndividual> = Vec::new();
  form.pending.retain(|relation| {
    let pending_match = match relation.borrow().associate_ref() {
      Some(AssociateRef::Pending(name)) => *name == key,
      _ => false,
    };
    if pending_match {
      matched.push(relation.clone());
      false
    } else {
      true
    }
  });
  for relation in matched {
    relation
        .borrow_mut()
        .set_associate(AssociateRef::Resolved(Rc::downgrade(individual)));
    insert_mirror(form, &relation, individual)?;
    form.unresolved -= 1;
    debug!(4, "resolved forward reference {}", relation.borrow());
  }
  Ok(())
}

/// Runs `action` against the form inside `target` that hosts mirrors of
/// `sort`-relations: the attribute itself, or the matching component of a
/// disjunctive attribute. A missing attribute form is created.
fn with_mirror_host<F>(target: &RcIndividual, sort: &SortPtr, action: F) -> Result<(), FormError>
where
  F: FnOnce(&mut Form) -> Result<(), FormError>,
{
  let mut attribute = target
      .borrow_mut()
      .take_attribute()
      .unwrap_or_else(|| Form::new(sort.clone()));
  let result = if attribute.sort().index == sort.index {
    action(&mut attribute)
  } else if attribute.category() == FormCategory::Meta && attribute.sort().has_component(sort) {
    meta::with_component(&mut attribute, sort, action)
  } else {
    Err(FormError::SortMismatch {
      expected: attribute.sort().name.clone(),
      found:    sort.name.clone(),
    })
  };
  Individual::install_attribute(target, attribute);
  result
}

/// Locates and removes the mirror of `relation` inside `host`: an element of
/// equal value whose associate is `owner`. The mirror is released without
/// recursing into its own (already departing) counterpart.
fn remove_mirror(host: &mut Form, relation: &RcIndividual, owner: &RcIndividual) -> Result<(), FormError> {
  let value = relation.borrow().value().clone();
  let position = host.iter().position(|candidate| {
    !Rc::ptr_eq(candidate, relation)
        && candidate.borrow().value().equals(&value)
        && candidate
            .borrow()
            .associate()
            .map_or(false, |associate| Rc::ptr_eq(&associate, owner))
  });
  match position {
    Some(position) => {
      if let Some(mirror) = host.elements.remove_at(position) {
        mirror.borrow_mut().del_use();
        let unused = !mirror.borrow().used();
        if unused {
          mirror.borrow_mut().purge()?;
        }
      }
      Ok(())
    }
    None => Err(FormError::MirrorMissing {
      relation: value.to_string(),
    }),
  }
}

#[cfg(test)]
mod tests {
  use std::rc::Rc;

  use crate::{
    api::{
      individual::{AssociateRef, Individual, RcIndividual},
      value::Value,
    },
    core::sort::{FormCategory, Sort, SortCollection, SortPtr},
    IString,
  };

  struct Fixture {
    things: SortPtr,
    links:  SortPtr,
  }

  impl Fixture {
    fn new() -> Fixture {
      let mut sorts = SortCollection::new();
      Fixture {
        things: sorts.get_or_create_sort(IString::from("thing"), FormCategory::Discrete),
        links:  sorts.get_or_create_sort(IString::from("link"), FormCategory::Relational),
      }
    }

    /// An individual owning an (initially empty) relational attribute form.
    fn endpoint(&self, name: &str) -> RcIndividual {
      let individual = Individual::new(self.things.clone(), Value::Symbol(IString::from(name)));
      Individual::install_attribute(&individual, Sort::make_form(&self.links));
      individual
    }

    /// Adds a relation named `name` from `from` to `to` through `from`'s form.
    fn relate(&self, from: &RcIndividual, to: &RcIndividual, name: &str) -> RcIndividual {
      let relation = Individual::relation(
        self.links.clone(),
        Value::Symbol(IString::from(name)),
        AssociateRef::Resolved(Rc::downgrade(to)),
      );
      let mut form = from.borrow_mut().take_attribute().unwrap();
      form.add(relation.clone()).unwrap();
      Individual::install_attribute(from, form);
      relation
    }
  }

  fn mirror_count(individual: &RcIndividual) -> usize {
    individual.borrow().attribute().map_or(0, |form| form.size())
  }

  #[test]
  fn insert_plants_the_mirror() {
    let fixture = Fixture::new();
    let x = fixture.endpoint("X");
    let y = fixture.endpoint("Y");

    fixture.relate(&x, &y, "r");
    assert_eq!(mirror_count(&x), 1);
    assert_eq!(mirror_count(&y), 1);

    // The mirror points back at X.
    let y_ref = y.borrow();
    let mirror = y_ref.attribute().unwrap().iter().next().unwrap().clone();
    drop(y_ref);
    assert!(Rc::ptr_eq(&mirror.borrow().associate().unwrap(), &x));
  }

  #[test]
  fn delete_removes_the_mirror() {
    let fixture = Fixture::new();
    let x = fixture.endpoint("X");
    let y = fixture.endpoint("Y");

    fixture.relate(&x, &y, "r");
    let mut form = x.borrow_mut().take_attribute().unwrap();
    form.to_begin();
    form.delete_current().unwrap();
    Individual::install_attribute(&x, form);

    assert_eq!(mirror_count(&x), 0);
    assert_eq!(mirror_count(&y), 0);
  }

  #[test]
  fn forward_reference_resolves_later() {
    let fixture = Fixture::new();
    let x = fixture.endpoint("X");

    let relation = Individual::relation(
      fixture.links.clone(),
      Value::Symbol(IString::from("r")),
      AssociateRef::Pending(IString::from("Y")),
    );
    let mut form = x.borrow_mut().take_attribute().unwrap();
    form.add(relation).unwrap();
    assert_eq!(form.unresolved(), 1);

    // Purging with a dangling forward reference is an inconsistency.
    assert!(form.duplicate().purge().is_ok());
    assert!(form.purge().is_err());

    let y = fixture.endpoint("Y");
    form.resolve(&y).unwrap();
    assert_eq!(form.unresolved(), 0);
    Individual::install_attribute(&x, form);
    assert_eq!(mirror_count(&y), 1);
  }

  #[test]
  fn sum_carries_mirrors_across() {
    let fixture = Fixture::new();
    let x = fixture.endpoint("X");
    let y = fixture.endpoint("Y");
    let z = fixture.endpoint("Z");

    fixture.relate(&x, &z, "a");
    fixture.relate(&y, &z, "b");
    assert_eq!(mirror_count(&z), 2);

    // Moving Y's relations into X's form re-points the mirrors at X.
    let mut x_form = x.borrow_mut().take_attribute().unwrap();
    let y_form = y.borrow_mut().take_attribute().unwrap();
    x_form.sum(y_form).unwrap();
    Individual::install_attribute(&x, x_form);

    assert_eq!(mirror_count(&x), 2);
    assert_eq!(mirror_count(&z), 2);
    let z_ref = z.borrow();
    let all_point_at_x = z_ref
        .attribute()
        .unwrap()
        .iter()
        .all(|mirror| {
          mirror
              .borrow()
              .associate()
              .map_or(false, |associate| Rc::ptr_eq(&associate, &x))
        });
    assert!(all_point_at_x);
  }

  #[test]
  fn self_relation_is_its_own_mirror() {
    let fixture = Fixture::new();
    let x = fixture.endpoint("X");

    // One element: the relation doubles as its mirror.
    fixture.relate(&x, &x, "r");
    assert_eq!(mirror_count(&x), 1);

    let mut form = x.borrow_mut().take_attribute().unwrap();
    form.maximalize().unwrap();
    assert_eq!(form.size(), 1);

    form.to_begin();
    form.delete_current().unwrap();
    Individual::install_attribute(&x, form);
    assert_eq!(mirror_count(&x), 0);
  }

  #[test]
  fn purge_removes_planted_mirrors() {
    let fixture = Fixture::new();
    let x = fixture.endpoint("X");
    let y = fixture.endpoint("Y");

    fixture.relate(&x, &y, "r");
    assert_eq!(mirror_count(&y), 1);

    let mut form = x.borrow_mut().take_attribute().unwrap();
    form.purge().unwrap();
    Individual::install_attribute(&x, form);

    assert_eq!(mirror_count(&x), 0);
    assert_eq!(mirror_count(&y), 0);
  }
}
