//! Accent folding for Pali/Sanskrit search terms.
//!
//! A search for unaccented Latin letters matches the accented
//! equivalents and vice versa: "vinnanam" finds "viññāṇaṁ".

/// Fold class for a character, or None if the character has no
/// diacritic family.
///
/// Every member of a family — the plain letter and each accented
/// variant — maps to the same literal class string, so substituting
/// character-by-character can never nest one class inside another.
fn fold_class(c: char) -> Option<&'static str> {
    match c {
        'a' | 'ā' => Some("[aā]"),
        'i' | 'ī' => Some("[iī]"),
        'u' | 'ū' => Some("[uū]"),
        'm' | 'ṁ' | 'ṃ' => Some("[mṁṃ]"),
        'n' | 'ṅ' | 'ñ' | 'ṇ' => Some("[nṅñṇ]"),
        't' | 'ṭ' => Some("[tṭ]"),
        'd' | 'ḍ' => Some("[dḍ]"),
        'l' | 'ḷ' => Some("[lḷ]"),
        'r' | 'ṛ' => Some("[rṛ]"),
        's' | 'ṣ' | 'ś' => Some("[sṣś]"),
        _ => None,
    }
}

fn is_metacharacter(c: char) -> bool {
    matches!(
        c,
        '\\' | '.' | '+' | '*' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '^' | '$' | '|' | '#' | '&' | '-' | '~'
    )
}

/// Compile a raw search term into an accent-folded regex pattern.
///
/// Each character is replaced by its fold class when it has one,
/// otherwise emitted verbatim with regex metacharacters escaped. The
/// result is a single linear pattern with no nested brackets.
pub fn accent_folded_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() * 4);

    for c in term.chars() {
        match fold_class(c) {
            Some(class) => pattern.push_str(class),
            None => {
                if is_metacharacter(c) {
                    pattern.push('\\');
                }
                pattern.push(c);
            }
        }
    }

    pattern
}
