use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A string that is truncated to at most `N` characters on construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct LimitedLenString<const N: usize>(String);

impl<const N: usize> From<String> for LimitedLenString<N> {
    fn from(mut s: String) -> Self {
        if let Some((idx, _)) = s.char_indices().nth(N) {
            s.truncate(idx);
        }
        LimitedLenString(s)
    }
}

impl<const N: usize> From<&str> for LimitedLenString<N> {
    fn from(s: &str) -> Self {
        s.to_string().into()
    }
}

impl<const N: usize> AsRef<str> for LimitedLenString<N> {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<const N: usize> Serialize for LimitedLenString<N> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de, const N: usize> Deserialize<'de> for LimitedLenString<N> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("", "" ; "empty")]
    #[test_case("abc", "abc" ; "shorter")]
    #[test_case("abcde", "abcde" ; "exact")]
    #[test_case("abcdefgh", "abcde" ; "longer")]
    #[test_case("ääääääää", "äääää" ; "multibyte")]
    fn truncates_on_char_boundary(input: &'static str, expected: &'static str) {
        let s: LimitedLenString<5> = input.into();
        assert_eq!(expected, s.as_ref());
    }

    #[test]
    fn deserialize_truncates() {
        let s: LimitedLenString<3> = serde_json::from_str("\"abcdef\"").unwrap();
        assert_eq!("abc", s.as_ref());
    }
}
