//! Bidirectional JSON mapping without reflection or derive macros.
//!
//! A codec is an explicit value describing how one domain type maps to and
//! from JSON. The same codec drives both directions: decoding goes text →
//! tokens → tree → domain value, encoding goes domain value → tree → text.
//! Every tree node carries its path from the root, so failures anywhere in
//! the pipeline name the exact position of the offending data, and object
//! decoding reports all bad fields at once instead of stopping at the first.
//!
//! ```
//! use bidijson::{JInt, JString, JsonCodec, ObjectCodec};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Customer {
//!     id: i32,
//!     name: String,
//! }
//!
//! let mut schema = ObjectCodec::builder();
//! let id = schema.mandatory("id", JInt, |c: &Customer| c.id);
//! let name = schema.mandatory("name", JString, |c: &Customer| c.name.clone());
//! let codec = schema.build(move |view| {
//!     Ok(Customer {
//!         id: view.get(&id)?,
//!         name: view.get(&name)?,
//!     })
//! });
//!
//! let ann = Customer { id: 1, name: "Ann".to_string() };
//! let text = codec.to_json(&ann).unwrap();
//! assert_eq!(text, r#"{"id": 1, "name": "Ann"}"#);
//! assert_eq!(codec.from_json(&text).unwrap(), ann);
//! ```

pub mod codec;
pub mod decode;
pub mod encode;
pub mod error;
pub mod node;
pub mod num;
pub mod path;

pub use codec::object::{
    MandatoryField, ObjectBuilder, ObjectCodec, ObjectView, OptionalField, SchemaField,
};
pub use codec::repr::{JNumRepr, JStringRepr};
pub use codec::sealed::{SealedBuilder, SealedCodec};
pub use codec::{JArray, JBoolean, JDecimal, JDouble, JInt, JLong, JString, JsonCodec};
pub use decode::parse_text;
pub use encode::render;
pub use error::{ErrorKind, JsonError, JsonOutcome};
pub use node::{FieldMap, JsonNode};
pub use num::JsonNumber;
pub use path::NodePath;

/// Decode JSON text with a codec. Shorthand for [`JsonCodec::from_json`].
pub fn from_json<C: JsonCodec>(codec: &C, text: &str) -> JsonOutcome<C::Value> {
    codec.from_json(text)
}

/// Encode a value to JSON text with a codec. Shorthand for
/// [`JsonCodec::to_json`].
pub fn to_json<C: JsonCodec>(codec: &C, value: &C::Value) -> JsonOutcome<String> {
    codec.to_json(value)
}

/// Decode an already-parsed tree with a codec.
pub fn from_node<C: JsonCodec>(codec: &C, node: &JsonNode) -> JsonOutcome<C::Value> {
    codec.from_node(node)
}

/// Encode a value to a tree rooted at `root`.
pub fn to_node<C: JsonCodec>(codec: &C, value: &C::Value) -> JsonOutcome<JsonNode> {
    codec.to_node(value, &NodePath::root())
}
