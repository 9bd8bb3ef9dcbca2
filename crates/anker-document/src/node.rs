use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// Mapping entries, kept in key order so nothing downstream can depend on the
/// order keys were written in.
pub type Mapping = BTreeMap<String, Node>;

/// One value in a parsed document.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
  Null,
  Bool(bool),
  Integer(i64),
  Float(f64),
  String(String),
  Sequence(Vec<Node>),
  Mapping(Mapping),
}

impl Node {
  /// Short name of the node's shape, used in error messages.
  pub fn type_name(&self) -> &'static str {
    match self {
      Node::Null => "null",
      Node::Bool(_) => "a boolean",
      Node::Integer(_) => "an integer",
      Node::Float(_) => "a float",
      Node::String(_) => "a string",
      Node::Sequence(_) => "a list",
      Node::Mapping(_) => "a mapping",
    }
  }

  pub fn is_null(&self) -> bool {
    matches!(self, Node::Null)
  }

  pub fn as_str(&self) -> Option<&str> {
    match self {
      Node::String(s) => Some(s),
      _ => None,
    }
  }

  pub fn as_bool(&self) -> Option<bool> {
    match self {
      Node::Bool(b) => Some(*b),
      _ => None,
    }
  }

  pub fn as_i64(&self) -> Option<i64> {
    match self {
      Node::Integer(i) => Some(*i),
      _ => None,
    }
  }

  pub fn as_sequence(&self) -> Option<&[Node]> {
    match self {
      Node::Sequence(items) => Some(items),
      _ => None,
    }
  }

  pub fn as_mapping(&self) -> Option<&Mapping> {
    match self {
      Node::Mapping(map) => Some(map),
      _ => None,
    }
  }

  /// Render a scalar as plain text. Containers have no text form.
  ///
  /// Floats keep their fractional part (`1.0`, not `1`).
  pub fn scalar_text(&self) -> Option<String> {
    match self {
      Node::Null | Node::Sequence(_) | Node::Mapping(_) => None,
      Node::Bool(b) => Some(b.to_string()),
      Node::Integer(i) => Some(i.to_string()),
      Node::Float(f) => Some(format!("{f:?}")),
      Node::String(s) => Some(s.clone()),
    }
  }
}

impl fmt::Display for Node {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Node::Null => write!(f, "null"),
      Node::Bool(b) => write!(f, "{b}"),
      Node::Integer(i) => write!(f, "{i}"),
      Node::Float(x) => write!(f, "{x:?}"),
      Node::String(s) => write!(f, "{s:?}"),
      Node::Sequence(items) => {
        write!(f, "[")?;
        for (i, item) in items.iter().enumerate() {
          if i > 0 {
            write!(f, ", ")?;
          }
          write!(f, "{item}")?;
        }
        write!(f, "]")
      }
      Node::Mapping(map) => {
        write!(f, "{{")?;
        for (i, (key, value)) in map.iter().enumerate() {
          if i > 0 {
            write!(f, ", ")?;
          }
          write!(f, "{key}: {value}")?;
        }
        write!(f, "}}")
      }
    }
  }
}

/// A parsed document. The top level is always a mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
  root: Mapping,
}

impl Document {
  pub(crate) fn new(root: Mapping) -> Self {
    Self { root }
  }

  /// Top-level entries.
  pub fn root(&self) -> &Mapping {
    &self.root
  }

  pub fn get(&self, key: &str) -> Option<&Node> {
    self.root.get(key)
  }

  pub fn is_empty(&self) -> bool {
    self.root.is_empty()
  }
}

impl FromStr for Document {
  type Err = ParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    crate::parse(s)
  }
}
