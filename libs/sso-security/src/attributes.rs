use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::{Deserialize, Serialize};

/// Multi-valued attribute map.
///
/// Attribute names are unique; each name carries one or more values. Names are
/// kept sorted so iteration order never depends on insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(BTreeMap<String, Vec<String>>);

impl Attributes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of a single-valued attribute.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, vec![value.into()]);
        self
    }

    /// Builder-style insert of a multi-valued attribute.
    #[must_use]
    pub fn with_values<I, V>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.insert(name, values.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the values of `name`, returning the previous values if any.
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<String>) -> Option<Vec<String>> {
        self.0.insert(name.into(), values)
    }

    /// Appends values to `name`, creating it when missing.
    pub fn extend_values<I>(&mut self, name: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.0.entry(name.into()).or_default().extend(values);
    }

    pub fn remove(&mut self, name: &str) -> Option<Vec<String>> {
        self.0.remove(name)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.0.get(name).map(Vec::as_slice)
    }

    /// First value of `name`.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(|v| v.first()).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Vec<String>> {
        self.0.iter()
    }

    /// Keeps only the attributes whose name satisfies `keep`.
    #[must_use]
    pub fn filtered<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(&str) -> bool,
    {
        Self(
            self.0
                .iter()
                .filter(|(name, _)| keep(name))
                .map(|(name, values)| (name.clone(), values.clone()))
                .collect(),
        )
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<String>,
    V: IntoIterator<Item = String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into_iter().collect()))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = (&'a String, &'a Vec<String>);
    type IntoIter = btree_map::Iter<'a, String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Attributes {
    type Item = (String, Vec<String>);
    type IntoIter = btree_map::IntoIter<String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<BTreeMap<String, Vec<String>>> for Attributes {
    fn from(map: BTreeMap<String, Vec<String>>) -> Self {
        Self(map)
    }
}
