//! Case-insensitive header storage shared by requests and responses.
//!
//! Header names are compared ASCII case-insensitively, but each name is
//! stored and reported with the casing of its first write. Iteration
//! preserves insertion order, which is also the order the serialized
//! `Name: Value` lines reach the native transport in.

/// Ordered header storage.
///
/// Re-adding a name that is already present (under any casing) replaces
/// the value only; the stored name keeps its original casing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a header, overwriting the value when the name is already
    /// present under any casing.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(stored, _)| stored.eq_ignore_ascii_case(&name)) {
            Some((_, stored_value)) => *stored_value = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.iter().find(|(stored, _)| stored.eq_ignore_ascii_case(name)).map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(stored, _)| stored.eq_ignore_ascii_case(name))
    }

    pub fn remove(&mut self, name: &str) {
        self.entries.retain(|(stored, _)| !stored.eq_ignore_ascii_case(name));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Renders `Name: Value` lines in insertion order, the shape the
    /// native transport expects for its custom-header option.
    pub fn to_lines(&self) -> Vec<String> {
        self.entries.iter().map(|(name, value)| format!("{name}: {value}")).collect()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.insert(name, value);
        }
        headers
    }
}

/// Shared header operations for request and response messages.
///
/// Both message types store their headers in a [`Headers`] map; this
/// trait provides the common mutation and lookup surface over it.
pub trait Message {
    fn headers(&self) -> &Headers;

    fn headers_mut(&mut self) -> &mut Headers;

    /// Adds one header (case-insensitive overwrite, first-write casing).
    fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers_mut().insert(name, value);
    }

    /// Adds every header of `headers`, in order.
    fn add_headers<N, V, I>(&mut self, headers: I)
    where
        N: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (N, V)>,
    {
        for (name, value) in headers {
            self.headers_mut().insert(name, value);
        }
    }

    fn has_header(&self, name: &str) -> bool {
        self.headers().contains(name)
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers().get(name)
    }

    fn remove_header(&mut self, name: &str) {
        self.headers_mut().remove(name);
    }

    fn clear_headers(&mut self) {
        self.headers_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        let mut headers = Headers::new();
        headers.insert("Content-Type", "text/plain");

        assert_eq!(headers.get("content-type"), Some("text/plain"));
        assert_eq!(headers.get("CONTENT-TYPE"), Some("text/plain"));
        assert!(headers.contains("Content-type"));
        assert_eq!(headers.get("Content-Length"), None);
    }

    #[test]
    fn overwrite_keeps_first_write_casing() {
        let mut headers = Headers::new();
        headers.insert("X-Token", "one");
        headers.insert("x-token", "two");

        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("X-TOKEN"), Some("two"));
        assert_eq!(headers.iter().next(), Some(("X-Token", "two")));
    }

    #[test]
    fn remove_matches_any_casing() {
        let mut headers = Headers::new();
        headers.insert("Accept", "*/*");
        headers.remove("ACCEPT");

        assert!(headers.is_empty());
    }

    #[test]
    fn lines_preserve_insertion_order() {
        let mut headers = Headers::new();
        headers.insert("Host", "localhost");
        headers.insert("Accept", "*/*");

        assert_eq!(headers.to_lines(), vec!["Host: localhost".to_string(), "Accept: */*".to_string()]);
    }

    #[test]
    fn collects_from_pairs() {
        let headers: Headers = [("A", "1"), ("B", "2"), ("a", "3")].into_iter().collect();

        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("A"), Some("3"));
    }
}
