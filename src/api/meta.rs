/*!

The disjoint-union category: a form of a disjunctive sort holds at most one
sub-form per declared component sort. Each sub-form rides inside a wrapper
individual keyed by the component's name, so the six operators are exactly the
discrete merge-scans keyed by component identity, with the EQUAL case recursing
into the matching sub-forms through the ordinary attribute combination. The
only category-specific work is routing an added element to its component
(converting outsiders first) and pruning wrappers whose sub-form has emptied.

*/

use crate::api::{
  form::{Form, FormFlag},
  form_error::FormError,
  individual::{Individual, RcIndividual},
  value::Value,
};
use crate::core::{converter, sort::SortPtr};

/// Routes `element` into the sub-form of its component sort. An element
/// outside the declared components is redirected through the conversion seam
/// into a component of the same category.
pub(crate) fn add(form: &mut Form, element: RcIndividual) -> Result<(), FormError> {
  let element_sort = element.borrow().sort().clone();
  let component = match form.sort().component_for(&element_sort) {
    Some(component) => component.clone(),
    None => {
      let candidate = form
          .sort()
          .components
          .iter()
          .find(|c| c.category == element_sort.category)
          .cloned();
      match candidate {
        Some(candidate) => candidate,
        None => {
          return Err(FormError::NotConvertible {
            from: element_sort.name.clone(),
            to:   form.sort().name.clone(),
          });
        }
      }
    }
  };
  let element = if element_sort.index == component.index {
    element
  } else {
    converter::convert(&component, &element)?
  };
  with_component(form, &component, |sub| sub.add(element))
}

/// Runs `action` against the sub-form of `component`, creating the wrapper on
/// first use. The sub-form is taken out of its wrapper for the duration, then
/// reinstalled.
pub(crate) fn with_component<F>(form: &mut Form, component: &SortPtr, action: F) -> Result<(), FormError>
where
  F: FnOnce(&mut Form) -> Result<(), FormError>,
{
  let key = Value::Symbol(component.name.clone());
  let wrapper = form.iter().find(|w| w.borrow().value().equals(&key)).cloned();
  let wrapper = match wrapper {
    Some(wrapper) => wrapper,
    None => {
      let mut sub = Form::new(component.clone());
      sub.set_flag(FormFlag::Component);
      let wrapper = Individual::with_attribute(form.sort().clone(), key, sub);
      form.insert_element(wrapper.clone());
      wrapper
    }
  };
  let taken = wrapper.borrow_mut().take_attribute();
  let mut sub = match taken {
    Some(sub) => sub,
    None => {
      let mut fresh = Form::new(component.clone());
      fresh.set_flag(FormFlag::Component);
      fresh
    }
  };
  let result = action(&mut sub);
  Individual::install_attribute(&wrapper, sub);
  form.clear_maximal();
  result
}

/// Drops wrappers whose sub-form has been emptied by an operator.
pub(crate) fn prune_empty(form: &mut Form) -> Result<(), FormError> {
  let mut index = 0;
  while index < form.elements.len() {
    let empty = form
        .elements
        .get(index)
        .map_or(false, |wrapper| {
          wrapper.borrow().attribute().map_or(true, |sub| sub.is_empty())
        });
    if empty {
      if let Some(wrapper) = form.elements.remove_at(index) {
        wrapper.borrow_mut().del_use();
        let unused = !wrapper.borrow().used();
        if unused {
          wrapper.borrow_mut().purge()?;
        }
      }
    } else {
      index += 1;
    }
  }
  Ok(())
}

/// Descends into every component sub-form.
pub(crate) fn resolve(form: &mut Form, individual: &RcIndividual) -> Result<(), FormError> {
  for index in 0..form.elements.len() {
    let wrapper = match form.elements.get(index) {
      Some(wrapper) => wrapper.clone(),
      None => break,
    };
    let taken = wrapper.borrow_mut().take_attribute();
    if let Some(mut sub) = taken {
      let result = sub.resolve(individual);
      Individual::install_attribute(&wrapper, sub);
      result?;
    }
  }
  Ok(())
}
