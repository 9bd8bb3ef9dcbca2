//! Scalar coercion and inline list tokenization.

use crate::error::ParseError;
use crate::node::Node;

/// Coerce raw scalar text into a typed [`Node`].
///
/// Rules are tried in order and the first match wins:
///
/// 1. empty, `null`, `none` or `~` (any case) → [`Node::Null`]
/// 2. `true` / `false` (any case) → [`Node::Bool`]
/// 3. `[...]` → [`Node::Sequence`], each element coerced recursively
/// 4. integers, except numerals with a leading zero followed by another digit
/// 5. floats
/// 6. strings, with one layer of matching quotes removed
///
/// `line` is only used to label errors.
pub fn coerce_scalar(raw: &str, line: usize) -> Result<Node, ParseError> {
  let raw = raw.trim();
  let lowered = raw.to_ascii_lowercase();

  if raw.is_empty() || matches!(lowered.as_str(), "null" | "none" | "~") {
    return Ok(Node::Null);
  }
  if lowered == "true" {
    return Ok(Node::Bool(true));
  }
  if lowered == "false" {
    return Ok(Node::Bool(false));
  }
  if raw.starts_with('[') && raw.ends_with(']') && raw.len() >= 2 {
    return parse_inline_list(&raw[1..raw.len() - 1], line);
  }
  if let Some(i) = parse_integer(raw) {
    return Ok(Node::Integer(i));
  }
  if let Ok(f) = raw.parse::<f64>() {
    return Ok(Node::Float(f));
  }

  Ok(Node::String(strip_quotes(raw)))
}

/// `007` must not read as 7; it falls through to the float and string rules.
fn parse_integer(raw: &str) -> Option<i64> {
  let bytes = raw.as_bytes();
  if bytes.len() > 1 && bytes[0] == b'0' && bytes[1].is_ascii_digit() {
    return None;
  }
  raw.parse::<i64>().ok()
}

fn strip_quotes(raw: &str) -> String {
  for quote in ['"', '\''] {
    if raw.len() >= 2 && raw.starts_with(quote) && raw.ends_with(quote) {
      let inner = &raw[1..raw.len() - 1];
      return inner.replace(&format!("\\{quote}"), &quote.to_string());
    }
  }
  raw.to_string()
}

fn parse_inline_list(body: &str, line: usize) -> Result<Node, ParseError> {
  let body = body.trim();
  if body.is_empty() {
    return Ok(Node::Sequence(Vec::new()));
  }

  split_list_items(body, line)?
    .iter()
    .map(|item| coerce_scalar(item, line))
    .collect::<Result<Vec<_>, _>>()
    .map(Node::Sequence)
}

/// Split an inline list body on commas that are not inside quotes.
fn split_list_items(body: &str, line: usize) -> Result<Vec<String>, ParseError> {
  let mut items = Vec::new();
  let mut buffer = String::new();
  let mut quote: Option<char> = None;
  let mut escaped = false;

  for ch in body.chars() {
    match quote {
      Some(active) => {
        buffer.push(ch);
        if escaped {
          escaped = false;
        } else if ch == '\\' {
          escaped = true;
        } else if ch == active {
          quote = None;
        }
      }
      None => match ch {
        '"' | '\'' => {
          quote = Some(ch);
          buffer.push(ch);
        }
        ',' => items.push(std::mem::take(&mut buffer).trim().to_string()),
        _ => buffer.push(ch),
      },
    }
  }

  if quote.is_some() {
    return Err(ParseError::UnterminatedQuote { line });
  }
  if !buffer.is_empty() {
    items.push(buffer.trim().to_string());
  }

  Ok(items)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn coerce(raw: &str) -> Node {
    coerce_scalar(raw, 1).unwrap()
  }

  fn s(value: &str) -> Node {
    Node::String(value.to_string())
  }

  #[test]
  fn test_null_spellings() {
    for raw in ["", "null", "NULL", "Null", "none", "None", "NONE", "~", "  ~  "] {
      assert_eq!(coerce(raw), Node::Null, "raw = {raw:?}");
    }
    // coercing the canonical spelling again stays null
    assert_eq!(coerce(&Node::Null.to_string()), Node::Null);
  }

  #[test]
  fn test_boolean_spellings() {
    for raw in ["true", "TRUE", "True", "tRuE"] {
      assert_eq!(coerce(raw), Node::Bool(true));
    }
    for raw in ["false", "FALSE", "False"] {
      assert_eq!(coerce(raw), Node::Bool(false));
    }
  }

  #[test]
  fn test_integers() {
    assert_eq!(coerce("0"), Node::Integer(0));
    assert_eq!(coerce("42"), Node::Integer(42));
    assert_eq!(coerce("-17"), Node::Integer(-17));
    assert_eq!(coerce("+5"), Node::Integer(5));
  }

  #[test]
  fn test_leading_zero_is_never_an_integer() {
    assert_eq!(coerce("007"), Node::Float(7.0));
    assert_eq!(coerce("00"), Node::Float(0.0));
    assert_eq!(coerce("0123abc"), s("0123abc"));
  }

  #[test]
  fn test_floats() {
    assert_eq!(coerce("1.5"), Node::Float(1.5));
    assert_eq!(coerce("-0.25"), Node::Float(-0.25));
    assert_eq!(coerce("1e3"), Node::Float(1000.0));
  }

  #[test]
  fn test_strings_and_quotes() {
    assert_eq!(coerce("hello world"), s("hello world"));
    assert_eq!(coerce("\"quoted\""), s("quoted"));
    assert_eq!(coerce("'single'"), s("single"));
    assert_eq!(coerce("\"say \\\"hi\\\"\""), s("say \"hi\""));
    // only the matching quote is unescaped
    assert_eq!(coerce("'it\\'s \\\"x\\\"'"), s("it's \\\"x\\\""));
    assert_eq!(coerce("\"true\""), s("true"));
    assert_eq!(coerce("'"), s("'"));
    assert_eq!(coerce("\"mismatched'"), s("\"mismatched'"));
  }

  #[test]
  fn test_hash_is_kept_literally() {
    assert_eq!(coerce("value # not a comment"), s("value # not a comment"));
  }

  #[test]
  fn test_inline_list_with_quoted_comma() {
    assert_eq!(
      coerce("[a, \"b,c\", 1, true]"),
      Node::Sequence(vec![s("a"), s("b,c"), Node::Integer(1), Node::Bool(true)])
    );
  }

  #[test]
  fn test_inline_list_edge_cases() {
    assert_eq!(coerce("[]"), Node::Sequence(vec![]));
    assert_eq!(coerce("[   ]"), Node::Sequence(vec![]));
    assert_eq!(coerce("[a,]"), Node::Sequence(vec![s("a")]));
    assert_eq!(coerce("[a, , b]"), Node::Sequence(vec![s("a"), Node::Null, s("b")]));
    assert_eq!(
      coerce("['x\\'y', \"p, q\"]"),
      Node::Sequence(vec![s("x'y"), s("p, q")])
    );
  }

  #[test]
  fn test_unterminated_quote_names_line() {
    let err = coerce_scalar("[a, \"b]", 7).unwrap_err();
    assert_eq!(err, ParseError::UnterminatedQuote { line: 7 });
    assert_eq!(err.line(), 7);
  }
}
