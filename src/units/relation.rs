//! units::relation
//!
//! Write a rate into the located unit.
//!
//! The lookup is scoped to the unit behind the [`UnitHandle`]: only a
//! `relation` inside that unit's matching `base` is ever touched, however
//! many other `base/relation` pairs the document holds.

use super::{names, LocateError, UnitHandle, UnitSpec};
use crate::core::types::Rate;
use crate::document::Document;

/// Set the unit's relation to `rate`.
///
/// Returns the previous relation text (empty for a freshly created unit).
///
/// # Errors
///
/// Returns [`LocateError::MissingRelation`] or
/// [`LocateError::DuplicateRelation`] unless exactly one relation exists
/// under the unit's matching base. No node is created or removed.
pub fn write_rate(
    doc: &mut Document,
    handle: &UnitHandle,
    spec: &UnitSpec,
    rate: &Rate,
) -> Result<String, LocateError> {
    let unit = handle.unit_mut(doc).ok_or(LocateError::StaleHandle)?;

    let mut targets = Vec::new();
    for base in unit.positions(|element| spec.is_base(element)) {
        let Some(base_element) = unit.element_at(base) else {
            continue;
        };
        for relation in base_element.positions(|element| element.name == names::RELATION) {
            targets.push((base, relation));
        }
    }

    let (base, relation) = match targets.as_slice() {
        [] => {
            return Err(LocateError::MissingRelation {
                title: spec.title.to_string(),
                base: spec.base_unit.to_string(),
            })
        }
        [single] => *single,
        _ => {
            return Err(LocateError::DuplicateRelation {
                title: spec.title.to_string(),
                base: spec.base_unit.to_string(),
                count: targets.len(),
            })
        }
    };

    let relation_element = unit
        .element_at_mut(base)
        .and_then(|b| b.element_at_mut(relation))
        .ok_or(LocateError::StaleHandle)?;

    let previous = relation_element.text();
    relation_element.set_text(rate.to_string());
    Ok(previous)
}
