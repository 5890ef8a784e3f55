//! The Tag Store: a mapping from OSM's dotted-hierarchical (`:`-separated)
//! keys to their raw string values, with the tree consumption discipline
//! layered on top so the assembler can warn about
//! recognized tags nobody looked at.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A representation of an OSM tag key, built up from `:`-joined segments.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum TagKey {
    Static(&'static str),
    String(String),
}

impl TagKey {
    #[must_use]
    pub const fn from(string: &'static str) -> Self {
        TagKey::Static(string)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Static(v) => v,
            Self::String(v) => v.as_str(),
        }
    }
}

impl From<&'static str> for TagKey {
    fn from(string: &'static str) -> Self {
        TagKey::from(string)
    }
}

impl From<String> for TagKey {
    fn from(string: String) -> Self {
        TagKey::String(string)
    }
}

impl std::ops::Add for TagKey {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        TagKey::String(format!("{}:{}", self.as_str(), other.as_str()))
    }
}

impl std::ops::Add<&'static str> for TagKey {
    type Output = Self;
    fn add(self, other: &'static str) -> Self {
        self.add(TagKey::from(other))
    }
}

/// A map from string keys to string values, plus a side-buffer of keys that
/// have been inspected by a scheme parser ("consumed"). Unconsumed but
/// recognized keys surface as `Warning(UnconsumedKnownTag)` once assembly is
/// done; unrecognized keys are silently tolerated.
///
/// BTreeMap for deterministic iteration: output is compared directly in
/// tests and round-trip checks, so key reordering between runs would be its
/// own source of flakiness.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Tags {
    map: BTreeMap<String, String>,
    #[serde(skip)]
    consumed: RefCell<BTreeSet<String>>,
}

impl PartialEq for Tags {
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl Tags {
    #[must_use]
    pub fn new(map: BTreeMap<String, String>) -> Self {
        Self {
            map,
            consumed: RefCell::new(BTreeSet::new()),
        }
    }

    #[must_use]
    pub fn from_pairs<const N: usize>(pairs: [(&str, &str); N]) -> Self {
        let mut map = BTreeMap::new();
        for (k, v) in pairs {
            map.insert(k.to_owned(), v.to_owned());
        }
        Self::new(map)
    }

    /// Read without marking the key consumed.
    #[must_use]
    pub fn get<T: Into<TagKey>>(&self, k: T) -> Option<&str> {
        self.map.get(k.into().as_str()).map(String::as_str)
    }

    /// Read and mark the key consumed, so it won't be flagged as an
    /// unprocessed recognized tag once assembly finishes.
    pub fn get_consume<T: Into<TagKey>>(&self, k: T) -> Option<&str> {
        let key = k.into();
        self.consumed.borrow_mut().insert(key.as_str().to_owned());
        self.map.get(key.as_str()).map(String::as_str)
    }

    /// Mark a key consumed without reading it (used when a parser looks at a
    /// whole prefix and wants to declare ownership of one specific key it
    /// already read via a different path).
    pub fn consume<T: Into<TagKey>>(&self, k: T) {
        self.consumed.borrow_mut().insert(k.into().as_str().to_owned());
    }

    #[must_use]
    pub fn is<T: Into<TagKey>>(&self, k: T, v: &str) -> bool {
        self.get_consume(k) == Some(v)
    }

    #[must_use]
    pub fn is_any<T: Into<TagKey>>(&self, k: T, values: &[&str]) -> bool {
        match self.get_consume(k) {
            Some(v) => values.iter().any(|candidate| candidate.eq_ignore_ascii_case(v)),
            None => false,
        }
    }

    /// Iterate every key under `prefix:` (inclusive of `prefix` itself),
    /// marking each one consumed.
    pub fn subtree<T: Into<TagKey>>(&self, prefix: T) -> Vec<(&str, &str)> {
        let prefix = prefix.into();
        let prefix_str = prefix.as_str();
        let mut out = Vec::new();
        for (k, v) in &self.map {
            if k == prefix_str || k.starts_with(&format!("{prefix_str}:")) {
                self.consumed.borrow_mut().insert(k.clone());
                out.push((k.as_str(), v.as_str()));
            }
        }
        out
    }

    /// Keys that exist in the map but were never consumed by a parser.
    #[must_use]
    pub fn unused(&self) -> BTreeSet<String> {
        let consumed = self.consumed.borrow();
        self.map
            .keys()
            .filter(|k| !consumed.contains(*k))
            .cloned()
            .collect()
    }

    /// A copy containing only the given keys (consumed or not), used to
    /// attach offending tags to a diagnostic.
    #[must_use]
    pub fn subset<T>(&self, keys: &[T]) -> Self
    where
        T: Clone + Into<TagKey>,
    {
        let mut map = BTreeMap::new();
        for key in keys {
            let tag_key: TagKey = key.clone().into();
            if let Some(val) = self.map.get(tag_key.as_str()) {
                map.insert(tag_key.as_str().to_owned(), val.clone());
            }
        }
        Self::new(map)
    }

    #[must_use]
    pub fn map(&self) -> &BTreeMap<String, String> {
        &self.map
    }

    /// Returns the old value of this key, if it was already present.
    pub fn insert<K: Into<TagKey>, V: Into<String>>(&mut self, k: K, v: V) -> Option<String> {
        self.map.insert(k.into().as_str().to_owned(), v.into())
    }
}

impl FromStr for Tags {
    type Err = String;

    /// Parse tags from an `=`-separated, newline-delimited list.
    ///
    /// ```
    /// use std::str::FromStr;
    /// use osm2lanes::tag::Tags;
    /// let tags = Tags::from_str("foo=bar\nabra=cadabra").unwrap();
    /// assert_eq!(tags.get("foo"), Some("bar"));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut map = BTreeMap::new();
        for line in s.lines() {
            let (key, val) = line.split_once('=').ok_or("tag must be = separated")?;
            map.insert(key.to_owned(), val.to_owned());
        }
        Ok(Self::new(map))
    }
}

impl std::fmt::Display for Tags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lines: Vec<String> = self.map.iter().map(|(k, v)| format!("{k}={v}")).collect();
        write!(f, "{}", lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_unused_keys() {
        let tags = Tags::from_pairs([("lanes", "2"), ("highway", "residential")]);
        assert_eq!(tags.get_consume("lanes"), Some("2"));
        let unused = tags.unused();
        assert!(!unused.contains("lanes"));
        assert!(unused.contains("highway"));
    }

    #[test]
    fn subtree_consumes_all_matches() {
        let tags = Tags::from_pairs([
            ("cycleway:left", "lane"),
            ("cycleway:right", "track"),
            ("sidewalk", "both"),
        ]);
        let got = tags.subtree("cycleway");
        assert_eq!(got.len(), 2);
        let unused = tags.unused();
        assert!(!unused.contains("cycleway:left"));
        assert!(unused.contains("sidewalk"));
    }

    #[test]
    fn is_any_case_insensitive() {
        let tags = Tags::from_pairs([("oneway", "YES")]);
        assert!(tags.is_any("oneway", &["yes", "true"]));
    }
}
