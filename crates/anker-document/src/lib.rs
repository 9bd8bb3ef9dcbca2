//! Anker Document
//!
//! A deliberately small parser for the YAML-like dialect Anker uses for its plan,
//! orchestration and agent metadata files. The dialect understands:
//!
//! - `key: value` mappings, nested by indentation
//! - inline lists written as `[item1, item2]`
//! - `- item` lines extending a list opened by `key: [...]`
//! - null, boolean, integer, float and string scalars
//!
//! Everything else (anchors, multi-document streams, block sequences under
//! unnamed keys, multiline strings) is rejected with a line-numbered
//! [`ParseError`] rather than guessed at.
//!
//! Consumers convert the parsed tree into typed structs right away using
//! [`Fields`], so no other crate walks raw [`Node`] values.

mod error;
mod fields;
mod node;
mod parser;
mod scalar;

pub use error::{FieldError, ParseError};
pub use fields::Fields;
pub use node::{Document, Mapping, Node};
pub use parser::parse;
pub use scalar::coerce_scalar;
