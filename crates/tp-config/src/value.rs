//! The nested value tree produced by the config parser.

use serde::{Deserialize, Serialize};

/// One node of a parsed model configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigValue {
    /// A leaf value, always kept as its textual form (quotes stripped).
    Scalar(String),
    /// An ordered sequence of values.
    List(Vec<ConfigValue>),
    /// A nested key/value block.
    Message(Message),
}

impl ConfigValue {
    pub fn scalar(value: impl Into<String>) -> Self {
        Self::Scalar(value.into())
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ConfigValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_message(&self) -> Option<&Message> {
        match self {
            Self::Message(m) => Some(m),
            _ => None,
        }
    }
}

/// An ordered key/value mapping with unique keys.
///
/// Field order is the order keys first appeared in the source text; replacing
/// an existing key keeps its position. The field count is small (a model
/// config has a handful of top-level keys), so lookups scan the backing Vec.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Message {
    fields: Vec<(String, ConfigValue)>,
}

impl Message {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.iter().any(|(k, _)| k == key)
    }

    /// Insert a field, replacing the value in place if the key exists.
    pub fn insert(&mut self, key: impl Into<String>, value: ConfigValue) {
        let key = key.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, ConfigValue)> for Message {
    fn from_iter<I: IntoIterator<Item = (String, ConfigValue)>>(iter: I) -> Self {
        let mut message = Message::new();
        for (key, value) in iter {
            message.insert(key, value);
        }
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_preserves_first_seen_order() {
        let mut message = Message::new();
        message.insert("name", ConfigValue::scalar("m1"));
        message.insert("platform", ConfigValue::scalar("tensorrt"));
        message.insert("name", ConfigValue::scalar("m2"));

        let keys: Vec<&str> = message.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["name", "platform"]);
        assert_eq!(message.get("name").unwrap().as_scalar(), Some("m2"));
        assert_eq!(message.len(), 2);
    }

    #[test]
    fn accessors_distinguish_variants() {
        let value = ConfigValue::List(vec![ConfigValue::scalar("4")]);
        assert!(value.as_scalar().is_none());
        assert!(value.as_message().is_none());
        assert_eq!(value.as_list().unwrap().len(), 1);
    }
}
