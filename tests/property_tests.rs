//! Property-based tests for rates and document round-tripping.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated inputs.

use proptest::prelude::*;

use qalc_btc::core::types::Rate;
use qalc_btc::document::{parse, render, Document, Element};
use qalc_btc::units::{find_unit, locate_or_create, names, write_rate, BITCOIN};

/// Strategy for plain decimal strings as rate endpoints return them.
fn decimal_string() -> impl Strategy<Value = String> {
    "[1-9][0-9]{0,9}\\.[0-9]{1,12}"
}

/// Strategy for title text, including characters that need escaping.
fn title_text() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 &<>'\"]{1,24}"
}

proptest! {
    #[test]
    fn rate_text_is_preserved(s in decimal_string()) {
        let rate: Rate = s.parse().unwrap();
        prop_assert_eq!(rate.to_string(), s);
    }

    #[test]
    fn written_rate_reads_back_exactly(s in decimal_string()) {
        let rate: Rate = s.parse().unwrap();
        let mut doc = Document::new(names::ROOT);
        let handle = locate_or_create(&mut doc, &BITCOIN).unwrap();
        write_rate(&mut doc, &handle, &BITCOIN, &rate).unwrap();

        let reparsed = parse(&render(&doc)).unwrap();
        let handle = find_unit(&reparsed, &BITCOIN).unwrap().unwrap();
        let unit = handle.unit(&reparsed).unwrap();
        let base = unit.elements_named("base").next().unwrap();
        prop_assert!(base.has_child_text("relation", &s));
    }

    #[test]
    fn unrelated_titles_survive_update(title in title_text(), s in decimal_string()) {
        prop_assume!(title != BITCOIN.category);

        let mut doc = Document::new(names::ROOT);
        doc.root.append_indented(
            Element::new(names::CATEGORY)
                .with_child(Element::new(names::TITLE).with_text(title.clone())),
            0,
        );
        let before = render(&doc);
        let original = parse(&before).unwrap();

        let mut updated = original.clone();
        let handle = locate_or_create(&mut updated, &BITCOIN).unwrap();
        write_rate(&mut updated, &handle, &BITCOIN, &s.parse().unwrap()).unwrap();
        let after = parse(&render(&updated)).unwrap();

        prop_assert_eq!(after.root.children.first(), original.root.children.first());
        prop_assert_eq!(after.root.element_at(1), original.root.element_at(1));
        let kept = after.root.element_at(1).unwrap();
        prop_assert!(kept.has_child_text(names::TITLE, &title));
    }

    #[test]
    fn parse_render_is_stable(title in title_text()) {
        let mut doc = Document::new(names::ROOT);
        doc.root.append_indented(
            Element::new(names::CATEGORY)
                .with_child(Element::new(names::TITLE).with_text(title)),
            0,
        );
        let once = render(&parse(&render(&doc)).unwrap());
        let twice = render(&parse(&once).unwrap());
        prop_assert_eq!(once, twice);
    }
}
