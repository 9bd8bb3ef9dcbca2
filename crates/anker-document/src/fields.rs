//! Typed access to the fields of a parsed mapping.

use crate::error::FieldError;
use crate::node::{Mapping, Node};

/// Typed readers over one mapping.
///
/// Every reader treats a missing key and an explicit null the same way and
/// returns `Ok(None)`, leaving defaults to the caller.
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
  map: &'a Mapping,
}

impl<'a> Fields<'a> {
  pub fn new(map: &'a Mapping) -> Self {
    Self { map }
  }

  fn present(&self, field: &str) -> Option<&'a Node> {
    self.map.get(field).filter(|node| !node.is_null())
  }

  fn mismatch(field: &str, expected: &'static str, node: &Node) -> FieldError {
    FieldError {
      field: field.to_string(),
      expected,
      found: node.type_name(),
    }
  }

  /// Any scalar, rendered as text.
  pub fn text(&self, field: &str) -> Result<Option<String>, FieldError> {
    match self.present(field) {
      None => Ok(None),
      Some(node) => node
        .scalar_text()
        .map(Some)
        .ok_or_else(|| Self::mismatch(field, "a scalar", node)),
    }
  }

  pub fn bool(&self, field: &str) -> Result<Option<bool>, FieldError> {
    match self.present(field) {
      None => Ok(None),
      Some(node) => node
        .as_bool()
        .map(Some)
        .ok_or_else(|| Self::mismatch(field, "a boolean", node)),
    }
  }

  pub fn integer(&self, field: &str) -> Result<Option<i64>, FieldError> {
    match self.present(field) {
      None => Ok(None),
      Some(node) => node
        .as_i64()
        .map(Some)
        .ok_or_else(|| Self::mismatch(field, "an integer", node)),
    }
  }

  /// A list whose elements are all strings.
  pub fn string_list(&self, field: &str) -> Result<Option<Vec<String>>, FieldError> {
    let Some(node) = self.present(field) else {
      return Ok(None);
    };
    let items = node
      .as_sequence()
      .ok_or_else(|| Self::mismatch(field, "a list of strings", node))?;

    items
      .iter()
      .map(|item| {
        item
          .as_str()
          .map(str::to_string)
          .ok_or_else(|| Self::mismatch(field, "a list of strings", item))
      })
      .collect::<Result<Vec<_>, _>>()
      .map(Some)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::parse;

  #[test]
  fn test_missing_and_null_fields_are_none() {
    let doc = parse("present: ~\n").unwrap();
    let fields = Fields::new(doc.root());
    assert_eq!(fields.text("present").unwrap(), None);
    assert_eq!(fields.text("absent").unwrap(), None);
    assert_eq!(fields.bool("absent").unwrap(), None);
    assert_eq!(fields.string_list("present").unwrap(), None);
  }

  #[test]
  fn test_text_renders_scalars() {
    let doc = parse("a: hello\nb: 42\nc: true\n").unwrap();
    let fields = Fields::new(doc.root());
    assert_eq!(fields.text("a").unwrap().as_deref(), Some("hello"));
    assert_eq!(fields.text("b").unwrap().as_deref(), Some("42"));
    assert_eq!(fields.text("c").unwrap().as_deref(), Some("true"));
  }

  #[test]
  fn test_text_keeps_float_precision() {
    let doc = parse("v: 1.0\nleading: 007\nlarge: 1e20\n").unwrap();
    let fields = Fields::new(doc.root());
    assert_eq!(fields.text("v").unwrap().as_deref(), Some("1.0"));
    assert_eq!(fields.text("leading").unwrap().as_deref(), Some("7.0"));
    assert_eq!(fields.text("large").unwrap().as_deref(), Some("1e20"));
  }

  #[test]
  fn test_text_rejects_containers() {
    let doc = parse("a: [x]\n").unwrap();
    let err = Fields::new(doc.root()).text("a").unwrap_err();
    assert_eq!(err.field, "a");
    assert_eq!(err.found, "a list");
  }

  #[test]
  fn test_bool_and_integer_are_strict() {
    let doc = parse("flag: yes\nthreshold: 80.5\n").unwrap();
    let fields = Fields::new(doc.root());
    assert!(fields.bool("flag").is_err());
    assert!(fields.integer("threshold").is_err());
  }

  #[test]
  fn test_string_list() {
    let doc = parse("ok: [a, b]\nmixed: [a, 1]\nscalar: a\n").unwrap();
    let fields = Fields::new(doc.root());
    assert_eq!(
      fields.string_list("ok").unwrap(),
      Some(vec!["a".to_string(), "b".to_string()])
    );

    let err = fields.string_list("mixed").unwrap_err();
    assert_eq!(err.expected, "a list of strings");
    assert_eq!(err.found, "an integer");

    assert!(fields.string_list("scalar").is_err());
  }
}
