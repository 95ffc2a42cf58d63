//! Attack text normalization.
//!
//! Dataset text is noisy: reminder text in parentheses, doubled spaces,
//! spaces before punctuation and a handful of known typos or alternative
//! phrasings. [`normalize`] canonicalizes all of that so grammar patterns can
//! be written against one spelling.
//!
//! Steps, in order:
//!
//! 1. drop every `( ... )` span
//! 2. collapse whitespace runs to a single space and trim
//! 3. drop whitespace before `.`, `,`, `;`, `:`, `!` and `?`
//! 4. apply [`CORRECTIONS`] as literal replacements
//!
//! The function is total and idempotent. Keep it that way when extending the
//! correction table: no replacement may contain any source string of the
//! table, and no replacement may introduce parentheses, leading/trailing
//! spaces, doubled spaces or a space before punctuation.

/// Literal `(from, to)` replacements applied after the structural cleanup.
pub const CORRECTIONS: &[(&str, &str)] = &[
    ("’", "'"),
    ("Pokemon", "Pokémon"),
    ("Paralysed", "Paralyzed"),
    ("is now asleep", "is now Asleep"),
    ("is now confused", "is now Confused"),
    ("is now paralyzed", "is now Paralyzed"),
    ("is now poisoned", "is now Poisoned"),
    ("This attack does ", "Does "),
    ("Do ", "Does "),
    ("damage to themselves", "damage to itself"),
    (". If tails, it is now", "; if tails, it is now"),
    ("more damage. If tails, this attack does", "more damage; if tails, this attack does"),
    ("; If tails,", "; if tails,"),
];

/// Canonicalize one attack's raw text.
pub fn normalize(raw: &str) -> String {
    let text = regex!(r"\([^)]*\)").replace_all(raw, "");
    let text = regex!(r"\s+").replace_all(&text, " ");
    let text = regex!(r"\s+([.,;:!?])").replace_all(text.trim(), "$1");

    let mut text = text.into_owned();
    for (from, to) in CORRECTIONS {
        if text.contains(from) {
            text = text.replace(from, to);
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn strips_reminder_text_and_spacing() {
        let raw = "Flip a coin. If heads, prevent all damage done to Squirtle during your opponent's next turn. \
                   (Any other effects of attacks still happen.)";
        assert_eq!(
            normalize(raw),
            "Flip a coin. If heads, prevent all damage done to Squirtle during your opponent's next turn."
        );

        assert_eq!(
            normalize("Does 10 damage to each of your own Benched Pokémon  (Don't apply Weakness) ."),
            "Does 10 damage to each of your own Benched Pokémon."
        );
    }

    #[test]
    fn applies_corrections() {
        assert_eq!(normalize("The Defending Pokemon is now Paralysed."), "The Defending Pokémon is now Paralyzed.");
        assert_eq!(normalize("Change Porygon’s Resistance."), "Change Porygon's Resistance.");
        assert_eq!(
            normalize("Flip a coin. If heads, the Defending Pokémon is now Asleep. If tails, it is now Confused."),
            "Flip a coin. If heads, the Defending Pokémon is now Asleep; if tails, it is now Confused."
        );
        assert_eq!(
            normalize("Flip 2 coins. This attack does 20 damage times the number of heads."),
            "Flip 2 coins. Does 20 damage times the number of heads."
        );
    }

    #[test]
    fn tails_only_clause_keeps_its_period() {
        let text = "Flip a coin. If tails, this attack does nothing.";
        assert_eq!(normalize(text), text);
    }

    #[test]
    fn empty_and_whitespace_only() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \n\t "), "");
        assert_eq!(normalize("(Reminder only.)"), "");
    }

    #[test]
    fn nested_and_unbalanced_parentheses() {
        assert_eq!(normalize("a ((b)) c"), "a ) c");
        assert_eq!(normalize("a (b c"), "a (b c");
    }

    fn attack_like_text() -> impl Strategy<Value = String> {
        let piece = prop_oneof![
            "[A-Za-z]{1,8}".prop_map(String::from),
            "[0-9]{1,3}".prop_map(String::from),
            Just(" ".to_string()),
            Just("  ".to_string()),
            Just("\t".to_string()),
            Just("(".to_string()),
            Just(")".to_string()),
            Just(".".to_string()),
            Just(";".to_string()),
            Just(",".to_string()),
            Just(" .".to_string()),
        ];
        let correction = prop::sample::select(CORRECTIONS.iter().map(|(from, _)| from.to_string()).collect::<Vec<_>>());

        prop::collection::vec(prop_oneof![3 => piece, 1 => correction], 0..40).prop_map(|parts| parts.join(""))
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(text in attack_like_text()) {
            let once = normalize(&text);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn normalize_is_idempotent_on_arbitrary_input(text in "\\PC{0,200}") {
            let once = normalize(&text);
            prop_assert_eq!(normalize(&once), once);
        }
    }
}
