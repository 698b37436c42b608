//! units
//!
//! The Qalculate units-file schema and the one unit this tool maintains.
//!
//! # Schema
//!
//! ```text
//! QALCULATE
//! └── category
//!     ├── title            "Currency"
//!     └── unit  type="alias"
//!         ├── title        "Bitcoin"
//!         ├── names        "BTC,XBT"
//!         └── base
//!             ├── unit     "EUR"
//!             ├── relation  <rate>
//!             └── exponent "1"
//! ```
//!
//! # Modules
//!
//! - [`locate`] - Find or create the unit under its category
//! - [`relation`] - Write a rate into the located unit

pub mod locate;
pub mod relation;

pub use locate::{find_unit, locate_or_create, LocateError, UnitHandle};
pub use relation::write_rate;

use crate::document::Element;

/// Tag and attribute names used by the units file.
pub mod names {
    pub const ROOT: &str = "QALCULATE";
    pub const CATEGORY: &str = "category";
    pub const TITLE: &str = "title";
    pub const UNIT: &str = "unit";
    pub const NAMES: &str = "names";
    pub const BASE: &str = "base";
    pub const RELATION: &str = "relation";
    pub const EXPONENT: &str = "exponent";
    pub const TYPE: &str = "type";
}

/// Selection predicate and default contents for the maintained unit.
///
/// A unit matches when it sits in a category titled [`category`], has
/// `type` equal to [`unit_type`], a title equal to [`title`], and a base
/// whose unit is [`base_unit`].
///
/// [`category`]: UnitSpec::category
/// [`unit_type`]: UnitSpec::unit_type
/// [`title`]: UnitSpec::title
/// [`base_unit`]: UnitSpec::base_unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitSpec {
    pub category: &'static str,
    pub unit_type: &'static str,
    pub title: &'static str,
    pub names: &'static str,
    pub base_unit: &'static str,
    pub exponent: &'static str,
}

/// The Bitcoin alias of the euro.
pub const BITCOIN: UnitSpec = UnitSpec {
    category: "Currency",
    unit_type: "alias",
    title: "Bitcoin",
    names: "BTC,XBT",
    base_unit: "EUR",
    exponent: "1",
};

impl UnitSpec {
    /// True if `element` is a category this unit belongs in.
    pub fn is_category(&self, element: &Element) -> bool {
        element.name == names::CATEGORY && element.has_child_text(names::TITLE, self.category)
    }

    /// True if `element` is a `base` tied to this unit's base unit.
    pub fn is_base(&self, element: &Element) -> bool {
        element.name == names::BASE && element.has_child_text(names::UNIT, self.base_unit)
    }

    /// True if `element` is the unit this `UnitSpec` describes.
    pub fn is_unit(&self, element: &Element) -> bool {
        element.name == names::UNIT
            && element.attribute(names::TYPE) == Some(self.unit_type)
            && element.has_child_text(names::TITLE, self.title)
            && element.elements().any(|child| self.is_base(child))
    }

    /// Build a new unit element with an empty relation.
    pub fn build_unit(&self) -> Element {
        Element::new(names::UNIT)
            .with_attribute(names::TYPE, self.unit_type)
            .with_child(Element::new(names::TITLE).with_text(self.title))
            .with_child(Element::new(names::NAMES).with_text(self.names))
            .with_child(
                Element::new(names::BASE)
                    .with_child(Element::new(names::UNIT).with_text(self.base_unit))
                    .with_child(Element::new(names::RELATION))
                    .with_child(Element::new(names::EXPONENT).with_text(self.exponent)),
            )
    }

    /// Build a new, empty category element.
    pub fn build_category(&self) -> Element {
        Element::new(names::CATEGORY).with_child(Element::new(names::TITLE).with_text(self.category))
    }
}
