use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("static regex"));
static NON_SLUG_CHAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9_]").expect("static regex"));
static LETTERS_ONLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]+$").expect("static regex"));

///
/// Derive a trait key from its display name.
///
/// Lowercases, turns each whitespace run into `_` and drops anything outside
/// `[a-z0-9_]`. Leading and trailing whitespace is trimmed first so names like
/// `" Eye Color "` don't produce `_eye_color_`.
///
/// # Arguments
/// * `name` - display name as typed by the user
///
pub fn slugify(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let underscored = WHITESPACE_RUN.replace_all(&lowered, "_");
    NON_SLUG_CHAR.replace_all(&underscored, "").into_owned()
}

///
/// Split a comma separated form field into trimmed, non-empty entries.
///
pub fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// `true` when `value` is one or more ASCII letters and nothing else.
pub fn is_letters_only(value: &str) -> bool {
    LETTERS_ONLY.is_match(value)
}

/// `true` for empty or whitespace-only form fields.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("Eye Color", "eye_color")]
    #[case("  Blood   Type (ABO) ", "blood_type_abo")]
    #[case("Rh-Factor 2", "rhfactor_2")]
    #[case("Tongue\tRolling", "tongue_rolling")]
    #[case("", "")]
    fn test_slugify(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(slugify(name), expected);
    }

    #[rstest]
    fn test_parse_list_drops_blanks() {
        assert_eq!(
            parse_list(" OCA2, HERC2,, ,TYR "),
            vec!["OCA2".to_string(), "HERC2".to_string(), "TYR".to_string()]
        );
        assert_eq!(parse_list("").is_empty(), true);
    }

    #[rstest]
    #[case("Bb", true)]
    #[case("AA", true)]
    #[case("A1", false)]
    #[case("A a", false)]
    #[case("Rh+", false)]
    #[case("", false)]
    fn test_is_letters_only(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(is_letters_only(value), expected);
    }
}
