//! Turns tag names into their comparable identity: the slug.

/// Normalizes a tag name into a slug.
///
/// The result is lowercase ASCII, with non-ASCII letters transliterated and
/// every run of other characters collapsed into a single `-`. It never starts
/// or ends with a separator, so slugifying a slug returns it unchanged.
///
/// Names without any letters or digits become the empty string.
pub fn slugify(text: &str) -> String {
    ::slug::slugify(text.trim())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::slugify;

    #[rstest]
    #[case("Red Car", "red-car")]
    #[case("red-car", "red-car")]
    #[case("  RED   CAR ", "red-car")]
    #[case("Go", "go")]
    #[case("GO", "go")]
    #[case("Crème Brûlée", "creme-brulee")]
    #[case("web_development", "web-development")]
    #[case("c++ / rust!", "c-rust")]
    fn normalizes(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(slugify(name), expected);
    }

    #[rstest]
    #[case("Red Car")]
    #[case("  --Weird__ spacing--  ")]
    #[case("Ünïcödé Tåg")]
    #[case("html5")]
    fn idempotent(#[case] name: &str) {
        let once = slugify(name);
        assert_eq!(slugify(&once), once);
    }

    #[test]
    fn punctuation_only_is_empty() {
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify("   "), "");
    }
}
