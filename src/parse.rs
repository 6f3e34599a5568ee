//! Reads tag lists from user input and writes them back out.

use crate::error::TagError;

/// Some tags, as a caller handed them to us.
///
/// A delimited string like `"rust, sql"` is split according to the configured
/// delimiters. A list is taken as-is.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum TagInput {
    Delimited(String),
    List(Vec<String>),
}

impl TagInput {
    /// Builds input from a loosely-typed TOML value.
    ///
    /// Only strings and arrays of strings are tag lists. Everything else is
    /// rejected with [`TagError::InvalidInput`].
    pub fn from_value(value: toml::Value) -> Result<Self, TagError> {
        let shown = value.to_string();

        value.try_into::<Self>().map_err(|e| {
            tracing::debug!("Rejected tag input `{shown}`. err: {e}");
            TagError::InvalidInput {
                input: shown,
                reason: String::from("expected a string or a list of strings"),
            }
        })
    }
}

impl From<&str> for TagInput {
    fn from(value: &str) -> Self {
        Self::Delimited(value.into())
    }
}

impl From<String> for TagInput {
    fn from(value: String) -> Self {
        Self::Delimited(value)
    }
}

impl From<Vec<String>> for TagInput {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<Vec<&str>> for TagInput {
    fn from(value: Vec<&str>) -> Self {
        Self::List(value.into_iter().map(String::from).collect())
    }
}

impl From<&[&str]> for TagInput {
    fn from(value: &[&str]) -> Self {
        Self::List(value.iter().map(|s| String::from(*s)).collect())
    }
}

impl<const N: usize> From<[&str; N]> for TagInput {
    fn from(value: [&str; N]) -> Self {
        Self::List(value.into_iter().map(String::from).collect())
    }
}

/// Turns tag input into an ordered list of tag names.
///
/// Strings are split on every character in `delimiters`, dropping the empty
/// pieces. Lists pass through untouched. Order is kept and nothing is
/// deduplicated.
pub fn parse(input: TagInput, delimiters: &str) -> Vec<String> {
    match input {
        TagInput::List(names) => names,
        TagInput::Delimited(s) => s
            .split(|c: char| delimiters.contains(c))
            .filter(|piece| !piece.is_empty())
            .map(String::from)
            .collect(),
    }
}

/// Glues tag names together with `glue`. See [`crate::config::Config::glue`].
pub fn join<S: AsRef<str>>(pieces: &[S], glue: char) -> String {
    let mut s = String::new();
    for (i, piece) in pieces.iter().enumerate() {
        if i > 0 {
            s.push(glue);
        }
        s.push_str(piece.as_ref());
    }
    s
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("a,b,,c", ",", vec!["a", "b", "c"])]
    #[case("a;b,c", ",;", vec!["a", "b", "c"])]
    #[case(",,,", ",", vec![])]
    #[case("", ",", vec![])]
    #[case("just one", ",", vec!["just one"])]
    #[case("a, b", ",", vec!["a", " b"])]
    #[case("b,a,b", ",", vec!["b", "a", "b"])]
    #[case("a,b", "", vec!["a,b"])]
    fn splits_strings(#[case] input: &str, #[case] delims: &str, #[case] expected: Vec<&str>) {
        assert_eq!(parse(input.into(), delims), expected);
    }

    #[test]
    fn lists_pass_through() {
        // no re-splitting, even when a name has a delimiter in it
        let names = parse(vec!["a,b", "", "c"].into(), ",");
        assert_eq!(names, vec!["a,b", "", "c"]);
    }

    #[test]
    fn join_uses_config_glue() {
        let conf = crate::config::Config::new(";,");
        assert_eq!(join(&["a", "b", "c"], conf.glue()), "a;b;c");
        assert_eq!(join(&["only"], conf.glue()), "only");
        assert_eq!(join::<&str>(&[], ','), "");
    }

    #[test]
    fn input_from_toml_values() {
        let s = TagInput::from_value(toml::Value::String("a,b".into())).unwrap();
        assert_eq!(s, TagInput::Delimited("a,b".into()));

        let list = TagInput::from_value(toml::Value::Array(vec![
            toml::Value::String("a".into()),
            toml::Value::String("b".into()),
        ]))
        .unwrap();
        assert_eq!(list, TagInput::List(vec!["a".into(), "b".into()]));
    }

    #[test]
    fn input_rejects_other_values() {
        let res = TagInput::from_value(toml::Value::Integer(4));
        assert!(matches!(res, Err(TagError::InvalidInput { .. })));

        let res = TagInput::from_value(toml::Value::Array(vec![
            toml::Value::String("a".into()),
            toml::Value::Boolean(true),
        ]));
        assert!(matches!(res, Err(TagError::InvalidInput { .. })));
    }
}
