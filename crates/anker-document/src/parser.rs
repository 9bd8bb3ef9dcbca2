//! Line-oriented, indentation-sensitive document parser.

use crate::error::ParseError;
use crate::node::{Document, Mapping, Node};
use crate::scalar::coerce_scalar;

/// An open container on the indentation stack.
///
/// Containers are owned by their frame while open and moved into the parent
/// mapping when the frame is popped.
struct Frame {
  indent: isize,
  key: Option<String>,
  node: Node,
}

/// The indentation stack, seeded with the root mapping below any real indent.
struct FrameStack {
  frames: Vec<Frame>,
}

impl FrameStack {
  fn new() -> Self {
    Self {
      frames: vec![Frame {
        indent: -1,
        key: None,
        node: Node::Mapping(Mapping::new()),
      }],
    }
  }

  /// Close every frame at or deeper than `indent`, keeping the root.
  fn close_to(&mut self, indent: isize) {
    while self.frames.len() > 1 && self.top().indent >= indent {
      self.pop_into_parent();
    }
  }

  fn top(&self) -> &Frame {
    &self.frames[self.frames.len() - 1]
  }

  fn top_mut(&mut self) -> &mut Frame {
    let last = self.frames.len() - 1;
    &mut self.frames[last]
  }

  fn push(&mut self, indent: isize, key: String, node: Node) {
    self.frames.push(Frame {
      indent,
      key: Some(key),
      node,
    });
  }

  fn pop_into_parent(&mut self) {
    let Some(frame) = self.frames.pop() else {
      return;
    };
    if let (Some(key), Node::Mapping(parent)) = (frame.key, &mut self.top_mut().node) {
      parent.insert(key, frame.node);
    }
  }

  fn finish(mut self) -> Mapping {
    while self.frames.len() > 1 {
      self.pop_into_parent();
    }
    match self.frames.pop().map(|frame| frame.node) {
      Some(Node::Mapping(root)) => root,
      _ => Mapping::new(),
    }
  }
}

/// Parse a document written in the constrained dialect.
///
/// The first malformed line aborts the parse; no partial document is returned.
pub fn parse(text: &str) -> Result<Document, ParseError> {
  let mut stack = FrameStack::new();

  for (idx, raw_line) in text.lines().enumerate() {
    let line = idx + 1;
    let stripped = raw_line.trim();
    if stripped.is_empty() || stripped.starts_with('#') {
      continue;
    }

    let indent = raw_line.len() - raw_line.trim_start_matches(' ').len();
    let indent = indent as isize;
    stack.close_to(indent);

    if let Some(item) = stripped.strip_prefix("- ") {
      let value = coerce_scalar(item, line)?;
      match &mut stack.top_mut().node {
        Node::Sequence(items) => items.push(value),
        _ => {
          return Err(ParseError::ListItemOutsideList {
            line,
            text: stripped.to_string(),
          });
        }
      }
      continue;
    }

    let Some((key, value)) = stripped.split_once(':') else {
      return Err(ParseError::MissingSeparator {
        line,
        text: stripped.to_string(),
      });
    };
    let key = key.trim().to_string();
    let value = value.trim();

    let Node::Mapping(parent) = &mut stack.top_mut().node else {
      return Err(ParseError::ExpectedMapping {
        line,
        text: stripped.to_string(),
      });
    };

    if value.is_empty() {
      stack.push(indent, key, Node::Mapping(Mapping::new()));
      continue;
    }

    match coerce_scalar(value, line)? {
      sequence @ Node::Sequence(_) => stack.push(indent, key, sequence),
      scalar => {
        parent.insert(key, scalar);
      }
    }
  }

  Ok(Document::new(stack.finish()))
}
