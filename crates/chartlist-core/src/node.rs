//! Typed YAML tree
//!
//! `values.yaml` and `Chart.yaml` documents are converted from
//! `serde_yaml::Value` into [`Node`], a closed sum type over the shapes the
//! collectors care about. Traversal code matches on variants instead of
//! probing a dynamic value.

use indexmap::IndexMap;
use serde_yaml::Value as YamlValue;

/// Mapping node with string keys, in document order
pub type Mapping = IndexMap<String, Node>;

/// A node of a parsed YAML document
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Mapping(Mapping),
    Sequence(Vec<Node>),
    String(String),
    Scalar(Scalar),
}

/// Non-string scalar values
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(serde_yaml::Number),
}

impl Default for Node {
    fn default() -> Self {
        Node::Scalar(Scalar::Null)
    }
}

impl Node {
    /// Parse a single YAML document
    ///
    /// A blank document parses to null, so an empty `values.yaml` behaves
    /// like one without any keys. `<<` merge keys are resolved before the
    /// tree is built; duplicate keys in one mapping are a parse error.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        if yaml.trim().is_empty() {
            return Ok(Node::default());
        }
        let mut value: YamlValue = serde_yaml::from_str(yaml)?;
        value.apply_merge()?;
        Ok(Node::from(value))
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Node::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Scalar(Scalar::Null))
    }

    /// Look up a key if this node is a mapping
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_mapping().and_then(|map| map.get(key))
    }

    /// Text form of a string, number or boolean; `None` for everything else
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            Node::String(s) => Some(s.clone()),
            Node::Scalar(Scalar::Bool(b)) => Some(b.to_string()),
            Node::Scalar(Scalar::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Visit this node and every mapping nested below it through mapping
    /// values. Sequences and scalars are not descended into.
    pub fn visit_mappings<'a, F>(&'a self, visit: &mut F)
    where
        F: FnMut(&'a Mapping),
    {
        if let Node::Mapping(map) = self {
            visit(map);
            for child in map.values() {
                child.visit_mappings(visit);
            }
        }
    }
}

impl From<YamlValue> for Node {
    fn from(value: YamlValue) -> Self {
        match value {
            YamlValue::Null => Node::Scalar(Scalar::Null),
            YamlValue::Bool(b) => Node::Scalar(Scalar::Bool(b)),
            YamlValue::Number(n) => Node::Scalar(Scalar::Number(n)),
            YamlValue::String(s) => Node::String(s),
            YamlValue::Sequence(items) => {
                Node::Sequence(items.into_iter().map(Node::from).collect())
            }
            YamlValue::Mapping(entries) => Node::Mapping(
                entries
                    .into_iter()
                    .filter_map(|(k, v)| key_text(k).map(|k| (k, Node::from(v))))
                    .collect(),
            ),
            YamlValue::Tagged(tagged) => Node::from(tagged.value),
        }
    }
}

/// Mapping keys are matched as text. Null and collection keys can never
/// name a field we look for, so they are dropped.
fn key_text(key: YamlValue) -> Option<String> {
    match key {
        YamlValue::String(s) => Some(s),
        YamlValue::Bool(b) => Some(b.to_string()),
        YamlValue::Number(n) => Some(n.to_string()),
        YamlValue::Tagged(tagged) => key_text(tagged.value),
        YamlValue::Null | YamlValue::Sequence(_) | YamlValue::Mapping(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_document_is_null() {
        assert!(Node::from_yaml("").unwrap().is_null());
        assert!(Node::from_yaml("   \n\n").unwrap().is_null());
    }

    #[test]
    fn test_mapping_preserves_order() {
        let node = Node::from_yaml("b: 1\na: 2\nc: 3\n").unwrap();
        let keys: Vec<&str> = node.as_mapping().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_scalar_variants() {
        let node = Node::from_yaml(
            r#"
name: ceph
count: 3
enabled: true
missing: ~
list: [1, 2]
"#,
        )
        .unwrap();

        assert_eq!(node.get("name"), Some(&Node::String("ceph".to_string())));
        assert_eq!(node.get("count").and_then(Node::scalar_text).as_deref(), Some("3"));
        assert_eq!(node.get("enabled"), Some(&Node::Scalar(Scalar::Bool(true))));
        assert!(node.get("missing").unwrap().is_null());
        assert!(matches!(node.get("list"), Some(Node::Sequence(items)) if items.len() == 2));
        assert!(node.get("list").unwrap().scalar_text().is_none());
    }

    #[test]
    fn test_non_string_keys() {
        let node = Node::from_yaml("1: one\ntrue: yes\n~: nothing\n").unwrap();
        let map = node.as_mapping().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("1").and_then(Node::as_str), Some("one"));
        assert_eq!(map.get("true").and_then(Node::as_str), Some("yes"));
    }

    #[test]
    fn test_tagged_values_are_unwrapped() {
        let node = Node::from_yaml("tag: !custom v1.2.3\n").unwrap();
        assert_eq!(node.get("tag").and_then(Node::as_str), Some("v1.2.3"));
    }

    #[test]
    fn test_visit_mappings_skips_sequences() {
        let node = Node::from_yaml(
            r#"
a:
  b:
    c: {}
list:
  - nested: {}
scalar: 1
"#,
        )
        .unwrap();

        let mut visited = 0;
        node.visit_mappings(&mut |_| visited += 1);
        // root, a, a.b, a.b.c; the mapping inside the sequence is not reached
        assert_eq!(visited, 4);
    }

    #[test]
    fn test_get_on_non_mapping() {
        let node = Node::String("x".to_string());
        assert!(node.get("x").is_none());
        assert!(node.as_mapping().is_none());
    }

    #[test]
    fn test_merge_keys_are_resolved() {
        let node = Node::from_yaml(
            r#"
base: &base
  repository: r
  tag: v1
derived:
  <<: *base
  tag: v2
"#,
        )
        .unwrap();

        let derived = node.get("derived").unwrap();
        assert_eq!(derived.get("repository").and_then(Node::as_str), Some("r"));
        assert_eq!(derived.get("tag").and_then(Node::as_str), Some("v2"));
        assert!(derived.get("<<").is_none());
    }

    #[test]
    fn test_duplicate_keys_are_rejected() {
        assert!(Node::from_yaml("tag: v1\ntag: v2\n").is_err());
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(Node::from_yaml("key: [unclosed").is_err());
    }
}
