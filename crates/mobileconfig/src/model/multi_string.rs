//! Fields that may hold one string or a list of strings.

/// An ordered list of strings that profiles may write either as a bare
/// `<string>` or as an `<array>` of strings.
///
/// Apple allows the array wrapper to be dropped when there is exactly one
/// entry (`SubjectAltName` keys are the common case). In memory the value is
/// always a list; on encode a single entry is written as a bare string and
/// two or more as an array.
///
/// An empty `MultiString` has no valid encoding. It only exists before the
/// value is populated, and fields that may be empty are declared
/// omit-if-empty so they are skipped instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct MultiString(Vec<String>);

impl MultiString {
    /// Creates an empty value.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Creates a value holding exactly one string.
    pub fn one(value: impl Into<String>) -> Self {
        Self(vec![value.into()])
    }

    /// Returns the strings in order.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Returns an iterator over the strings.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    /// Returns the first string, if any.
    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends a string.
    pub fn push(&mut self, value: impl Into<String>) {
        self.0.push(value.into());
    }

    /// Consumes the value, returning the underlying list.
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<String>> for MultiString {
    fn from(values: Vec<String>) -> Self {
        Self(values)
    }
}

impl From<String> for MultiString {
    fn from(value: String) -> Self {
        Self::one(value)
    }
}

impl From<&str> for MultiString {
    fn from(value: &str) -> Self {
        Self::one(value)
    }
}

impl<S: Into<String>> FromIterator<S> for MultiString {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a MultiString {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for MultiString {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert!(MultiString::new().is_empty());
        assert_eq!(MultiString::one("a").as_slice(), ["a"]);
        assert_eq!(MultiString::from("a"), MultiString::one("a"));

        let many: MultiString = ["a", "b"].into_iter().collect();
        assert_eq!(many.len(), 2);
        assert_eq!(many.first(), Some("a"));
    }

    #[test]
    fn test_push_preserves_order() {
        let mut names = MultiString::new();
        names.push("alice@example.com");
        names.push("bob@example.com");
        assert_eq!(names.into_vec(), vec!["alice@example.com", "bob@example.com"]);
    }
}
