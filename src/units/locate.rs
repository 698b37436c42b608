//! units::locate
//!
//! Find the maintained unit in a document, creating it if absent.
//!
//! # Invariants
//!
//! - At most one category matches [`UnitSpec::is_category`]
//! - At most one unit in that category matches [`UnitSpec::is_unit`]
//!
//! Either invariant failing means the file was corrupted or edited by hand.
//! It is reported, never repaired.
//!
//! # Example
//!
//! ```
//! use qalc_btc::document::Document;
//! use qalc_btc::units::{locate_or_create, BITCOIN};
//!
//! let mut doc = Document::new("QALCULATE");
//! let handle = locate_or_create(&mut doc, &BITCOIN).unwrap();
//! assert!(handle.created_unit);
//! assert!(handle.created_category);
//!
//! // A second lookup finds the same unit.
//! let again = locate_or_create(&mut doc, &BITCOIN).unwrap();
//! assert!(!again.created_unit);
//! assert_eq!(again.position(), handle.position());
//! ```

use thiserror::Error;

use super::{names, UnitSpec};
use crate::document::{Document, Element};

/// Errors from locating the unit.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LocateError {
    #[error("root element is '{found}', expected 'QALCULATE'")]
    UnexpectedRoot { found: String },

    #[error("there are {count} '{title}' categories; expected at most one")]
    DuplicateCategory { title: String, count: usize },

    #[error("more than one matching unit found: {count} '{title}' units based on '{base}'")]
    DuplicateUnit {
        title: String,
        base: String,
        count: usize,
    },

    #[error("unit '{title}' has no '{base}' relation to update")]
    MissingRelation { title: String, base: String },

    #[error("unit '{title}' has {count} '{base}' relations; expected exactly one")]
    DuplicateRelation {
        title: String,
        base: String,
        count: usize,
    },

    #[error("unit handle no longer points at a unit")]
    StaleHandle,
}

/// Position of the located unit within the document.
///
/// Positions index [`Element::children`] of the root and of the category,
/// so the handle stays valid as long as those child lists are not
/// reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitHandle {
    category: usize,
    unit: usize,
    /// The unit was created by this lookup.
    pub created_unit: bool,
    /// The category was created by this lookup.
    pub created_category: bool,
}

impl UnitHandle {
    /// `(category, unit)` child positions.
    pub fn position(&self) -> (usize, usize) {
        (self.category, self.unit)
    }

    /// Borrow the unit element.
    pub fn unit<'a>(&self, doc: &'a Document) -> Option<&'a Element> {
        doc.root
            .element_at(self.category)
            .and_then(|category| category.element_at(self.unit))
    }

    /// Mutably borrow the unit element.
    pub fn unit_mut<'a>(&self, doc: &'a mut Document) -> Option<&'a mut Element> {
        doc.root
            .element_at_mut(self.category)
            .and_then(|category| category.element_at_mut(self.unit))
    }
}

/// Find the unit without modifying the document.
///
/// Returns `Ok(None)` if either the category or the unit is missing.
///
/// # Errors
///
/// Returns [`LocateError`] if the root is not `QALCULATE` or either
/// uniqueness invariant is violated.
pub fn find_unit(doc: &Document, spec: &UnitSpec) -> Result<Option<UnitHandle>, LocateError> {
    let Some(category) = find_category(doc, spec)? else {
        return Ok(None);
    };

    // find_category returned a position it just read.
    let category_element = doc.root.element_at(category).ok_or(LocateError::StaleHandle)?;
    let units = category_element.positions(|element| spec.is_unit(element));

    match units.as_slice() {
        [] => Ok(None),
        [unit] => Ok(Some(UnitHandle {
            category,
            unit: *unit,
            created_unit: false,
            created_category: false,
        })),
        _ => Err(LocateError::DuplicateUnit {
            title: spec.title.to_string(),
            base: spec.base_unit.to_string(),
            count: units.len(),
        }),
    }
}

/// Find the unit, creating it (and its category) if missing.
///
/// New elements are appended after existing siblings and indented to match
/// the document.
///
/// # Errors
///
/// Same as [`find_unit`]. Nothing is modified when an error is returned.
pub fn locate_or_create(doc: &mut Document, spec: &UnitSpec) -> Result<UnitHandle, LocateError> {
    if let Some(handle) = find_unit(doc, spec)? {
        return Ok(handle);
    }

    match find_category(doc, spec)? {
        Some(category) => {
            let category_element = doc
                .root
                .element_at_mut(category)
                .ok_or(LocateError::StaleHandle)?;
            let unit = category_element.append_indented(spec.build_unit(), 1);
            Ok(UnitHandle {
                category,
                unit,
                created_unit: true,
                created_category: false,
            })
        }
        None => {
            let category_element = spec.build_category().with_child(spec.build_unit());
            let category = doc.root.append_indented(category_element, 0);

            // Indentation moved the unit; look it up in the fresh category.
            let unit = doc
                .root
                .element_at(category)
                .and_then(|c| c.positions(|element| spec.is_unit(element)).first().copied())
                .ok_or(LocateError::StaleHandle)?;

            Ok(UnitHandle {
                category,
                unit,
                created_unit: true,
                created_category: true,
            })
        }
    }
}

/// Position of the single matching category, if any.
fn find_category(doc: &Document, spec: &UnitSpec) -> Result<Option<usize>, LocateError> {
    if doc.root.name != names::ROOT {
        return Err(LocateError::UnexpectedRoot {
            found: doc.root.name.clone(),
        });
    }

    let categories = doc.root.positions(|element| spec.is_category(element));
    match categories.as_slice() {
        [] => Ok(None),
        [category] => Ok(Some(*category)),
        _ => Err(LocateError::DuplicateCategory {
            title: spec.category.to_string(),
            count: categories.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{parse, render};
    use crate::units::BITCOIN;

    const WITH_UNIT: &str = r#"<QALCULATE>
	<category>
		<title>Currency</title>
		<unit type="alias">
			<title>Bitcoin</title>
			<names>BTC,XBT</names>
			<base>
				<unit>EUR</unit>
				<relation>400</relation>
				<exponent>1</exponent>
			</base>
		</unit>
	</category>
</QALCULATE>"#;

    #[test]
    fn finds_existing_unit() {
        let mut doc = parse(WITH_UNIT).unwrap();
        let before = doc.clone();

        let handle = locate_or_create(&mut doc, &BITCOIN).unwrap();

        assert!(!handle.created_unit);
        assert!(!handle.created_category);
        assert_eq!(doc, before);
        assert!(BITCOIN.is_unit(handle.unit(&doc).unwrap()));
    }

    #[test]
    fn creates_category_and_unit_in_empty_document() {
        let mut doc = Document::new(names::ROOT);

        let handle = locate_or_create(&mut doc, &BITCOIN).unwrap();

        assert!(handle.created_unit);
        assert!(handle.created_category);
        assert_eq!(doc.root.elements_named("category").count(), 1);
        let unit = handle.unit(&doc).unwrap();
        assert!(BITCOIN.is_unit(unit));
        let found = find_unit(&doc, &BITCOIN).unwrap().unwrap();
        assert_eq!(found.position(), handle.position());
    }

    #[test]
    fn creates_unit_in_existing_category() {
        let mut doc = parse(
            "<QALCULATE>\n\t<category>\n\t\t<title>Currency</title>\n\t</category>\n</QALCULATE>",
        )
        .unwrap();

        let handle = locate_or_create(&mut doc, &BITCOIN).unwrap();

        assert!(handle.created_unit);
        assert!(!handle.created_category);
        assert_eq!(doc.root.elements_named("category").count(), 1);
        assert!(render(&doc).contains(
            "\t\t<title>Currency</title>\n\t\t<unit type=\"alias\">\n\t\t\t<title>Bitcoin</title>"
        ));
    }

    #[test]
    fn similar_units_do_not_match() {
        let mut doc = parse(
            r#"<QALCULATE><category><title>Currency</title>
<unit type="alias"><title>Bitcoin</title><base><unit>USD</unit><relation>1</relation></base></unit>
<unit type="builtin"><title>Bitcoin</title><base><unit>EUR</unit><relation>1</relation></base></unit>
</category></QALCULATE>"#,
        )
        .unwrap();

        let handle = locate_or_create(&mut doc, &BITCOIN).unwrap();
        assert!(handle.created_unit);

        let category = doc.root.elements_named("category").next().unwrap();
        assert_eq!(category.elements_named("unit").count(), 3);
    }

    #[test]
    fn unit_outside_currency_category_is_ignored() {
        let mut doc = parse(
            r#"<QALCULATE><category><title>Misc</title><unit type="alias"><title>Bitcoin</title><base><unit>EUR</unit></base></unit></category></QALCULATE>"#,
        )
        .unwrap();

        let handle = locate_or_create(&mut doc, &BITCOIN).unwrap();
        assert!(handle.created_category);
        assert_eq!(doc.root.elements_named("category").count(), 2);
    }

    #[test]
    fn rejects_duplicate_units() {
        let duplicated = WITH_UNIT.replace(
            "\t</category>",
            "\t\t<unit type=\"alias\"><title>Bitcoin</title><base><unit>EUR</unit></base></unit>\n\t</category>",
        );
        let mut doc = parse(&duplicated).unwrap();
        let before = doc.clone();

        let err = locate_or_create(&mut doc, &BITCOIN).unwrap_err();

        assert_eq!(
            err,
            LocateError::DuplicateUnit {
                title: "Bitcoin".into(),
                base: "EUR".into(),
                count: 2,
            }
        );
        assert_eq!(doc, before);
    }

    #[test]
    fn rejects_duplicate_categories() {
        let mut doc = parse(
            "<QALCULATE><category><title>Currency</title></category><category><title>Currency</title></category></QALCULATE>",
        )
        .unwrap();

        let err = locate_or_create(&mut doc, &BITCOIN).unwrap_err();
        assert!(matches!(err, LocateError::DuplicateCategory { count: 2, .. }));
    }

    #[test]
    fn rejects_duplicate_categories_even_when_unit_exists() {
        let doubled = WITH_UNIT.replace(
            "</QALCULATE>",
            "\t<category><title>Currency</title></category>\n</QALCULATE>",
        );
        let doc = parse(&doubled).unwrap();

        assert!(matches!(
            find_unit(&doc, &BITCOIN),
            Err(LocateError::DuplicateCategory { .. })
        ));
    }

    #[test]
    fn rejects_foreign_root() {
        let mut doc = parse("<html><body/></html>").unwrap();
        let err = locate_or_create(&mut doc, &BITCOIN).unwrap_err();
        assert_eq!(
            err,
            LocateError::UnexpectedRoot {
                found: "html".into()
            }
        );
    }
}
