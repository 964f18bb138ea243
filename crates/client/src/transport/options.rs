//! Typed transport options.
//!
//! Each option is one key/value instruction for the native layer: method
//! selection, target URL, body, header lines. Options are staged in a
//! [`TransportOptions`] map that is deliberately cumulative — handles
//! merge new options over old ones and the last write per key wins.

use std::collections::BTreeMap;
use std::collections::btree_map;

use bytes::Bytes;

/// One instruction for the native transport.
///
/// The variants map one-to-one onto native setter calls (libcurl options
/// for the default transport). `PostFields(None)` records that a body
/// option was prepared but the request carried no body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportOption {
    /// Target URL of the transfer.
    Url(String),
    /// Body-less fetch (GET).
    HttpGet(bool),
    /// POST transfer.
    Post(bool),
    /// Request body for POST-style transfers, `None` when absent.
    PostFields(Option<Bytes>),
    /// Custom method token (PUT, DELETE).
    CustomRequest(String),
    /// Suppress the response body (HEAD).
    Nobody(bool),
    /// Serialized `Name: Value` header lines.
    HttpHeaders(Vec<String>),
    /// User-agent string for the transfer.
    UserAgent(String),
    /// Overall transfer timeout, passed through opaquely.
    TimeoutMs(u64),
}

/// Key a [`TransportOption`] is stored under in the option map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OptionKey {
    Url,
    HttpGet,
    Post,
    PostFields,
    CustomRequest,
    Nobody,
    HttpHeaders,
    UserAgent,
    TimeoutMs,
}

impl TransportOption {
    /// The map key this option is stored under.
    pub fn key(&self) -> OptionKey {
        match self {
            TransportOption::Url(_) => OptionKey::Url,
            TransportOption::HttpGet(_) => OptionKey::HttpGet,
            TransportOption::Post(_) => OptionKey::Post,
            TransportOption::PostFields(_) => OptionKey::PostFields,
            TransportOption::CustomRequest(_) => OptionKey::CustomRequest,
            TransportOption::Nobody(_) => OptionKey::Nobody,
            TransportOption::HttpHeaders(_) => OptionKey::HttpHeaders,
            TransportOption::UserAgent(_) => OptionKey::UserAgent,
            TransportOption::TimeoutMs(_) => OptionKey::TimeoutMs,
        }
    }
}

/// Accumulating option map.
///
/// `set` is last-write-wins per key. Iteration follows the fixed key
/// order, so options reach the native layer deterministically no matter
/// how they were staged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportOptions {
    entries: BTreeMap<OptionKey, TransportOption>,
}

impl TransportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages `option`, replacing any previous value under the same key.
    pub fn set(&mut self, option: TransportOption) {
        self.entries.insert(option.key(), option);
    }

    /// Merges every option of `options` into this map, in order.
    pub fn merge<I: IntoIterator<Item = TransportOption>>(&mut self, options: I) {
        for option in options {
            self.set(option);
        }
    }

    pub fn get(&self, key: OptionKey) -> Option<&TransportOption> {
        self.entries.get(&key)
    }

    pub fn contains(&self, key: OptionKey) -> bool {
        self.entries.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TransportOption> {
        self.entries.values()
    }
}

impl IntoIterator for TransportOptions {
    type Item = TransportOption;
    type IntoIter = btree_map::IntoValues<OptionKey, TransportOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_values()
    }
}

impl FromIterator<TransportOption> for TransportOptions {
    fn from_iter<I: IntoIterator<Item = TransportOption>>(iter: I) -> Self {
        let mut options = TransportOptions::new();
        options.merge(iter);
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_write_per_key_wins() {
        let mut options = TransportOptions::new();
        options.set(TransportOption::Url("http://one/".to_string()));
        options.set(TransportOption::Url("http://two/".to_string()));

        assert_eq!(options.len(), 1);
        assert_eq!(options.get(OptionKey::Url), Some(&TransportOption::Url("http://two/".to_string())));
    }

    #[test]
    fn merge_overrides_only_matching_keys() {
        let mut options = TransportOptions::new();
        options.set(TransportOption::HttpGet(true));
        options.set(TransportOption::TimeoutMs(250));

        options.merge([TransportOption::HttpGet(false), TransportOption::UserAgent("ua".to_string())]);

        assert_eq!(options.get(OptionKey::HttpGet), Some(&TransportOption::HttpGet(false)));
        assert_eq!(options.get(OptionKey::TimeoutMs), Some(&TransportOption::TimeoutMs(250)));
        assert!(options.contains(OptionKey::UserAgent));
    }

    #[test]
    fn distinct_bool_options_do_not_collide() {
        let options: TransportOptions =
            [TransportOption::HttpGet(true), TransportOption::Nobody(true), TransportOption::Post(true)]
                .into_iter()
                .collect();

        assert_eq!(options.len(), 3);
    }
}
