use thiserror::Error;

/// Errors raised while parsing a document.
///
/// Every variant names the 1-based line it was raised on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
  /// A `- item` line whose enclosing container is not a list.
  #[error("line {line}: list item found outside of a list context: {text}")]
  ListItemOutsideList { line: usize, text: String },

  /// A line that is neither a list item nor a `key: value` pair.
  #[error("line {line}: expected `key: value`, found '{text}'")]
  MissingSeparator { line: usize, text: String },

  /// A `key: value` line whose enclosing container is a list.
  #[error("line {line}: expected a mapping to hold '{text}'")]
  ExpectedMapping { line: usize, text: String },

  /// An inline list with a quote that is never closed.
  #[error("line {line}: unterminated quoted string in inline list")]
  UnterminatedQuote { line: usize },
}

impl ParseError {
  /// The 1-based line number the error was raised on.
  pub fn line(&self) -> usize {
    match self {
      ParseError::ListItemOutsideList { line, .. }
      | ParseError::MissingSeparator { line, .. }
      | ParseError::ExpectedMapping { line, .. }
      | ParseError::UnterminatedQuote { line } => *line,
    }
  }
}

/// A mapping field held a value of the wrong shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("field '{field}' must be {expected}, found {found}")]
pub struct FieldError {
  pub field: String,
  pub expected: &'static str,
  pub found: &'static str,
}
