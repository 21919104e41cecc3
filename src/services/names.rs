use crate::models::RunnerName;

/// Characters dropped from winner names before anything else.
const STRIPPED_CHARS: [char; 5] = ['"', ',', '*', '\u{2019}', '\''];

/// A right single quote decoded as Windows-1252 by a UTF-8 unaware writer,
/// in both cases since title-casing can lower the first form into the second.
const MISENCODED_QUOTES: [&str; 2] = ["\u{e2}\u{20ac}\u{2122}", "\u{c2}\u{20ac}\u{2122}"];

pub fn strip_excessive_spaces(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn title_case(token: &str) -> String {
    let lower = token.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => {
            // Only the first char of a multi-char expansion stays upper case: ß -> Ss.
            let mut upper = first.to_uppercase();
            let mut titled: String = upper.next().into_iter().collect();
            titled.extend(upper.flat_map(char::to_lowercase));
            titled.push_str(chars.as_str());
            titled
        }
        None => String::new(),
    }
}

/// Drops stripped chars until none are left; removing one can close up a
/// mis-encoded quote around it.
fn strip_punctuation(raw: &str) -> String {
    let mut current = raw.to_string();
    loop {
        let mut next = current.clone();
        for quote in MISENCODED_QUOTES {
            next = next.replace(quote, "");
        }
        let next: String = next.chars().filter(|c| !STRIPPED_CHARS.contains(c)).collect();
        if next == current {
            return next;
        }
        current = next;
    }
}

/// Turns a raw winner cell into a display name such as `"Mary Obrien"`.
///
/// Quotes, commas, asterisks and apostrophes are removed (so `O'Brien`
/// becomes `Obrien`), whitespace is collapsed, a standalone `Mc` is glued to
/// the following token, and every token is title-cased.
pub fn normalize(raw: &str) -> String {
    let stripped = strip_punctuation(raw);

    let mut tokens: Vec<String> = Vec::new();
    let mut pending_mc: Option<&str> = None;
    for token in stripped.split_whitespace() {
        match pending_mc.take() {
            Some(mc) => tokens.push(format!("{mc}{token}")),
            None if token.eq_ignore_ascii_case("mc") => pending_mc = Some(token),
            None => tokens.push(token.to_string()),
        }
    }
    if let Some(mc) = pending_mc {
        tokens.push(mc.to_string());
    }

    tokens
        .iter()
        .map(|t| title_case(t))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn split_name(display_name: &str) -> RunnerName {
    let mut tokens = display_name.split(' ');
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(first), Some(surname), None) if !first.is_empty() && !surname.is_empty() => {
            RunnerName::Known {
                first: first.to_string(),
                surname: surname.to_string(),
            }
        }
        _ => RunnerName::Unknown,
    }
}

/// Order-insensitive key for two-token names; the display name otherwise.
/// "John Smith" and "Smith John" share a key on purpose.
pub fn identity_key(display_name: &str) -> String {
    match split_name(display_name) {
        RunnerName::Known { first, surname } => {
            let mut pair = [first, surname];
            pair.sort();
            pair.join(" ")
        }
        RunnerName::Unknown => display_name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn collapses_whitespace_and_title_cases() {
        assert_eq!(normalize("  JOHN    smith "), "John Smith");
        assert_eq!(normalize("mary\tO'brien"), "Mary Obrien");
        assert_eq!(strip_excessive_spaces(" a  b\n c "), "a b c");
    }

    #[test]
    fn strips_punctuation_and_misencoded_quotes() {
        assert_eq!(normalize("\"Smith, John*\""), "Smith John");
        assert_eq!(normalize("Sean O\u{2019}Neill"), "Sean Oneill");
        assert_eq!(normalize("Sean O\u{e2}\u{20ac}\u{2122}Neill"), "Sean Oneill");
        assert_eq!(normalize("John * Smith"), "John Smith");
    }

    #[test]
    fn multi_char_upper_case_is_stable() {
        let once = normalize("\u{df}anna Weber");
        assert_eq!(once, "Ssanna Weber");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn quote_revealed_by_stripping_is_removed() {
        let once = normalize("x\u{e2}\u{20ac}\u{2019}\u{2122}y Smith");
        assert_eq!(once, "Xy Smith");
        assert_eq!(normalize(&once), once);
        assert_eq!(normalize("\u{c2}\u{20ac}\u{2122}ann Lee"), "Ann Lee");
    }

    #[test]
    fn glues_mc_prefix() {
        assert_eq!(normalize("Liam Mc Donald"), "Liam Mcdonald");
        assert_eq!(normalize("liam MC  donald"), "Liam Mcdonald");
        assert_eq!(normalize("Tomc Smith"), "Tomc Smith");
        assert_eq!(normalize("Liam Mc"), "Liam Mc");
    }

    #[test]
    fn two_tokens_are_known_names() {
        assert_eq!(
            split_name("Jane Doe"),
            RunnerName::Known {
                first: "Jane".into(),
                surname: "Doe".into()
            }
        );
        assert_eq!(split_name("Cher"), RunnerName::Unknown);
        assert_eq!(split_name("Mary Ann Smith"), RunnerName::Unknown);
        assert_eq!(split_name(""), RunnerName::Unknown);
    }

    #[test]
    fn identity_key_sorts_two_token_names() {
        assert_eq!(identity_key("John Smith"), "John Smith");
        assert_eq!(identity_key("Smith John"), "John Smith");
        assert_eq!(identity_key("Mary Ann Smith"), "Mary Ann Smith");
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(
            raw in "[a-zA-Z\u{df}\u{e9}\u{c9}\u{f6}\u{142}\u{141}\u{130}\u{149}\u{e2}\u{c2}\u{20ac}\u{2122}\u{2019}'\",* \t]{0,30}",
        ) {
            let once = normalize(&raw);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn prop_identity_key_ignores_token_order(
            first in "[A-Z][a-z]{0,8}",
            surname in "[A-Z][a-z]{0,8}",
        ) {
            prop_assume!(first != "Mc" && surname != "Mc");
            let forward = normalize(&format!("{first} {surname}"));
            let backward = normalize(&format!("{surname} {first}"));
            prop_assert_eq!(identity_key(&forward), identity_key(&backward));
        }
    }
}
