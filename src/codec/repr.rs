use crate::codec::JsonCodec;
use crate::decode::parser;
use crate::decode::TokenStream;
use crate::error::{JsonError, JsonOutcome};
use crate::node::JsonNode;
use crate::num::JsonNumber;
use crate::path::NodePath;

/// Codec for any type with a canonical string form: enums, wrapped
/// identifiers, dates, currencies.
///
/// The constructor may reject its input; the rejection is wrapped into a
/// decode failure carrying the node's path.
///
/// # Examples
/// ```
/// use bidijson::{JStringRepr, JsonCodec};
///
/// let upper = JStringRepr::new(
///     |text| {
///         if text.chars().all(char::is_uppercase) {
///             Ok(text.to_string())
///         } else {
///             Err("not uppercase".to_string())
///         }
///     },
///     |value: &String| value.clone(),
/// );
/// assert_eq!(upper.from_json("\"ABC\"").unwrap(), "ABC");
/// assert!(upper.from_json("\"abc\"").is_err());
/// ```
pub struct JStringRepr<T> {
    construct: Box<dyn Fn(&str) -> Result<T, String> + Send + Sync>,
    show: Box<dyn Fn(&T) -> String + Send + Sync>,
}

impl<T> JStringRepr<T> {
    pub fn new(
        construct: impl Fn(&str) -> Result<T, String> + Send + Sync + 'static,
        show: impl Fn(&T) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            construct: Box::new(construct),
            show: Box::new(show),
        }
    }
}

impl<T> JsonCodec for JStringRepr<T> {
    type Value = T;

    fn from_node(&self, node: &JsonNode) -> JsonOutcome<T> {
        let text = node.expect_string()?;
        (self.construct)(text).map_err(|reason| JsonError::invalid_value(node.path(), reason))
    }

    fn to_node(&self, value: &T, path: &NodePath) -> JsonOutcome<JsonNode> {
        Ok(JsonNode::String {
            text: (self.show)(value),
            path: path.clone(),
        })
    }

    fn parse(&self, tokens: &mut TokenStream<'_>, path: &NodePath) -> JsonOutcome<JsonNode> {
        parser::parse_string(tokens, path)
    }
}

/// Number-representable analog of [`JStringRepr`]: a constructor from decimal
/// and a renderer to decimal, so overflow and precision failures surface as
/// ordinary decode failures.
pub struct JNumRepr<T> {
    construct: Box<dyn Fn(&JsonNumber) -> Result<T, String> + Send + Sync>,
    show: Box<dyn Fn(&T) -> JsonNumber + Send + Sync>,
}

impl<T> JNumRepr<T> {
    pub fn new(
        construct: impl Fn(&JsonNumber) -> Result<T, String> + Send + Sync + 'static,
        show: impl Fn(&T) -> JsonNumber + Send + Sync + 'static,
    ) -> Self {
        Self {
            construct: Box::new(construct),
            show: Box::new(show),
        }
    }
}

impl<T> JsonCodec for JNumRepr<T> {
    type Value = T;

    fn from_node(&self, node: &JsonNode) -> JsonOutcome<T> {
        let number = node.expect_number()?;
        (self.construct)(number).map_err(|reason| JsonError::invalid_value(node.path(), reason))
    }

    fn to_node(&self, value: &T, path: &NodePath) -> JsonOutcome<JsonNode> {
        Ok(JsonNode::Number {
            value: (self.show)(value),
            path: path.clone(),
        })
    }

    fn parse(&self, tokens: &mut TokenStream<'_>, path: &NodePath) -> JsonOutcome<JsonNode> {
        parser::parse_number(tokens, path)
    }
}
