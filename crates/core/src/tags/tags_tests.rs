use super::*;
use std::collections::HashSet;

fn assert_same_tag(a: &str, b: &str) {
    let (left, right) = (Tag::new(a), Tag::new(b));
    assert_eq!(left, right, "{:?} vs {:?}", a, b);

    let set: HashSet<Tag> = [left, right].into_iter().collect();
    assert_eq!(set.len(), 1);
}

#[test]
fn test_is_human_readable() {
    assert_eq!(Tag::new("food").to_string(), "food");
    assert_eq!(Tag::new("Fancy Food").name(), "Fancy Food");
}

#[test]
fn test_equal_ignoring_case() {
    assert_same_tag("food", "FOOD");
}

#[test]
fn test_equal_ignoring_plurals() {
    assert_same_tag("food", "foods");
    assert_same_tag("cars", "car");
    assert_same_tag("category", "Categories");
}

#[test]
fn test_equal_ignoring_punctuation() {
    assert_same_tag("food", "food!");
    assert_same_tag("kid's stuff", "kids stuff");
}

#[test]
fn test_equal_ignoring_whitespace() {
    assert_same_tag("food", "f o\tod");
}

#[test]
fn test_only_ascii_whitespace_is_ignored() {
    assert_eq!(canonicalize("fancy\u{00A0}food"), "fancy\u{00A0}food");
    assert_ne!(Tag::new("fancy\u{00A0}food"), Tag::new("fancyfood"));
}

#[test]
fn test_split_suffix_is_not_part_of_identity() {
    let rent = Tag::new("rent:50%");
    assert_eq!(rent.name(), "rent");
    assert_eq!(rent.to_string(), "rent");
    assert_same_tag("rent:50%", "rent:450");
    assert_same_tag("rent:50%", "rent");
}

#[test]
fn test_all_punctuation_tags_keep_their_punctuation() {
    assert_eq!(canonicalize("???__?"), "???__?");
    assert_same_tag("???__?", "???__   ?");
    assert_ne!(Tag::new("???"), Tag::new("!!!"));
}

#[test]
fn test_tag_that_singularizes_to_nothing_keeps_its_letters() {
    assert_eq!(canonicalize("s"), "s");
    assert_same_tag("s", "S");
}

#[test]
fn test_uncountable_words_are_left_alone() {
    assert_eq!(canonicalize("Money"), "money");
    assert_eq!(canonicalize("equipment"), "equipment");
}

#[test]
fn test_ordering_follows_canonical_identity() {
    let mut tags = vec![Tag::new("Rent"), Tag::new("food"), Tag::new("Coffee")];
    tags.sort();
    let names: Vec<&str> = tags.iter().map(Tag::name).collect();
    assert_eq!(names, vec!["Coffee", "food", "Rent"]);
}

#[test]
fn test_serializes_as_display_name() {
    let json = serde_json::to_string(&Tag::new("Groceries:20")).unwrap();
    assert_eq!(json, "\"Groceries\"");

    let tag: Tag = serde_json::from_str("\"groceries\"").unwrap();
    assert_eq!(tag, Tag::new("Grocery"));
}
