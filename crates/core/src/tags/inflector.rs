//! English singularization, used to fold plural tag spellings together.
//!
//! Rules are tried most-specific first and only the first matching rule is
//! applied, replacing its first match.

use regex::Regex;
use std::sync::LazyLock;

const UNCOUNTABLE_WORDS: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "feedback",
];

enum SingularRule {
    Pattern(Regex, &'static str),
    /// A doubled word character before "es" collapses to one ("quizzes"
    /// style). Expressed by hand since the pattern needs a backreference.
    DoubledLetterEs,
}

impl SingularRule {
    fn apply(&self, word: &str) -> Option<String> {
        match self {
            SingularRule::Pattern(pattern, replacement) => pattern
                .is_match(word)
                .then(|| pattern.replace(word, *replacement).into_owned()),
            SingularRule::DoubledLetterEs => {
                let stem = word.strip_suffix("es")?;
                let mut tail = stem.chars().rev();
                let last = tail.next()?;
                let previous = tail.next()?;
                let is_word_char = |c: char| c.is_alphanumeric() || c == '_';
                (last == previous && is_word_char(last))
                    .then(|| stem[..stem.len() - last.len_utf8()].to_string())
            }
        }
    }
}

static SINGULAR_RULES: LazyLock<Vec<SingularRule>> = LazyLock::new(|| {
    let pattern = |regex: &str, replacement: &'static str| {
        SingularRule::Pattern(
            Regex::new(regex).expect("Invalid regex pattern"),
            replacement,
        )
    };
    vec![
        pattern(r"(?i)(c)hildren$", "${1}hild"),
        pattern(r"(?i)(m)en$", "${1}an"),
        pattern(r"(?i)(p)eople$", "${1}erson"),
        pattern(r"(?i)(hive|tive|movie|shoe)s$", "${1}"),
        pattern(r"(?i)(quiz)zes$", "${1}"),
        pattern(r"(?i)(matr)ices$", "${1}ix"),
        pattern(r"(?i)(vert|ind)ices$", "${1}ex"),
        pattern(r"(?i)^(ox)en", "${1}"),
        pattern(r"(?i)(alias|status|virus)es$", "${1}"),
        pattern(r"(?i)(octop)i$", "${1}us"),
        pattern(r"(?i)^(cris|ax|test)es$", "${1}is"),
        pattern(r"(?i)(o)es$", "${1}"),
        pattern(r"(?i)(bus)es$", "${1}"),
        pattern(r"(?i)([m|l])ice$", "${1}ouse"),
        pattern(r"(?i)(x|ch|ss|sh)es$", "${1}"),
        pattern(r"(?i)([^aeiouy]|qu)ies$", "${1}y"),
        pattern(r"(?i)oves$", "ove"),
        pattern(r"(?i)([lr])ves$", "${1}f"),
        pattern(r"(?i)([^f])ves$", "${1}fe"),
        pattern(r"(?i)^(analy)ses$", "${1}sis"),
        pattern(
            r"(?i)((a)naly|(b)a|(d)iagno|(p)arenthe|(p)rogno|(s)ynop|(t)he)ses$",
            "${1}${2}sis",
        ),
        pattern(r"(?i)([ti])a$", "${1}um"),
        pattern(r"(?i)(new|ga|serie)s$", "${1}s"),
        SingularRule::DoubledLetterEs,
        pattern(r"(?i)s$", ""),
    ]
});

/// Returns the singular form of `word`, or `word` unchanged when no rule
/// applies or the word is uncountable.
pub fn singularize(word: &str) -> String {
    let lowercase = word.to_lowercase();
    if UNCOUNTABLE_WORDS.contains(&lowercase.as_str()) {
        return word.to_string();
    }

    SINGULAR_RULES
        .iter()
        .find_map(|rule| rule.apply(word))
        .unwrap_or_else(|| word.to_string())
}
