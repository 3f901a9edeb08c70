//! Property-based tests for tag canonical identity.

use proptest::prelude::*;
use spendlens_core::tags::{canonicalize, Tag};

// =============================================================================
// Generators
// =============================================================================

/// A noun and a plural spelling of it.
fn arb_noun() -> impl Strategy<Value = (&'static str, &'static str)> {
    prop_oneof![
        Just(("food", "foods")),
        Just(("grocery", "groceries")),
        Just(("restaurant", "restaurants")),
        Just(("fee", "fees")),
        Just(("box", "boxes")),
        Just(("child", "children")),
        Just(("wife", "wives")),
        Just(("category", "categories")),
    ]
}

fn arb_decoration() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just(""), Just(" "), Just("!"), Just("  #"), Just("."), Just("\t")]
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Case, plurals, punctuation, whitespace and a split suffix never
    /// change a tag's identity.
    #[test]
    fn prop_tag_spellings_share_identity(
        (singular, plural) in arb_noun(),
        use_plural in any::<bool>(),
        upper in any::<bool>(),
        before in arb_decoration(),
        after in arb_decoration(),
        suffix in proptest::option::of("[a-z0-9.]{0,6}"),
    ) {
        let word = if use_plural { plural } else { singular };
        let word = if upper { word.to_uppercase() } else { word.to_string() };
        let mut raw = format!("{before}{word}{after}");
        if let Some(suffix) = suffix {
            raw.push(':');
            raw.push_str(&suffix);
        }

        prop_assert_eq!(canonicalize(&raw), canonicalize(singular));
        prop_assert_eq!(Tag::new(&raw), Tag::new(singular));
    }

    /// Non-ASCII spacing is part of the tag, not a separator.
    #[test]
    fn prop_non_ascii_spaces_are_kept((singular, _) in arb_noun()) {
        let spaced = format!("{singular}\u{00A0}x");
        prop_assert_ne!(canonicalize(&spaced), canonicalize(&format!("{singular}x")));
    }
}
