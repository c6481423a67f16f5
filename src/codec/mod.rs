pub mod object;
pub mod repr;
pub mod sealed;

use crate::decode::parser::{self, ParseFn};
use crate::decode::{ensure_exhausted, tokenize, TokenStream};
use crate::encode::render;
use crate::error::{JsonError, JsonOutcome};
use crate::node::JsonNode;
use crate::num::JsonNumber;
use crate::path::NodePath;

/// Bidirectional mapping between a domain type and one JSON node variant.
///
/// The same codec drives tree-based round trips (`from_node`/`to_node`) and
/// text-based ones (`from_json`/`to_json`), and supplies the schema-guided
/// object parser with per-field parse functions through `parse`.
///
/// `to_node` only fails for an ill-formed schema (a sealed codec asked to
/// encode a value no registered subtype matches); every other codec encodes
/// infallibly.
///
/// # Examples
/// ```
/// use bidijson::{JsonCodec, JInt};
///
/// let text = JInt.to_json(&123).unwrap();
/// assert_eq!(text, "123");
/// assert_eq!(JInt.from_json(&text).unwrap(), 123);
/// ```
pub trait JsonCodec {
    type Value;

    fn from_node(&self, node: &JsonNode) -> JsonOutcome<Self::Value>;

    fn to_node(&self, value: &Self::Value, path: &NodePath) -> JsonOutcome<JsonNode>;

    fn parse(&self, tokens: &mut TokenStream<'_>, path: &NodePath) -> JsonOutcome<JsonNode>;

    fn from_json(&self, text: &str) -> JsonOutcome<Self::Value> {
        let mut tokens = tokenize(text);
        let node = self.parse(&mut tokens, &NodePath::root())?;
        ensure_exhausted(&mut tokens)?;
        self.from_node(&node)
    }

    fn to_json(&self, value: &Self::Value) -> JsonOutcome<String> {
        Ok(render(&self.to_node(value, &NodePath::root())?))
    }
}

pub struct JBoolean;

impl JsonCodec for JBoolean {
    type Value = bool;

    fn from_node(&self, node: &JsonNode) -> JsonOutcome<bool> {
        node.expect_boolean()
    }

    fn to_node(&self, value: &bool, path: &NodePath) -> JsonOutcome<JsonNode> {
        Ok(JsonNode::Boolean {
            value: *value,
            path: path.clone(),
        })
    }

    fn parse(&self, tokens: &mut TokenStream<'_>, path: &NodePath) -> JsonOutcome<JsonNode> {
        parser::parse_boolean(tokens, path)
    }
}

pub struct JString;

impl JsonCodec for JString {
    type Value = String;

    fn from_node(&self, node: &JsonNode) -> JsonOutcome<String> {
        node.expect_string().map(str::to_string)
    }

    fn to_node(&self, value: &String, path: &NodePath) -> JsonOutcome<JsonNode> {
        Ok(JsonNode::String {
            text: value.clone(),
            path: path.clone(),
        })
    }

    fn parse(&self, tokens: &mut TokenStream<'_>, path: &NodePath) -> JsonOutcome<JsonNode> {
        parser::parse_string(tokens, path)
    }
}

pub struct JInt;

impl JsonCodec for JInt {
    type Value = i32;

    fn from_node(&self, node: &JsonNode) -> JsonOutcome<i32> {
        let number = node.expect_number()?;
        number.as_i32().ok_or_else(|| {
            JsonError::invalid_value(node.path(), format!("not a valid Int: {number}"))
        })
    }

    fn to_node(&self, value: &i32, path: &NodePath) -> JsonOutcome<JsonNode> {
        Ok(JsonNode::Number {
            value: JsonNumber::from(*value),
            path: path.clone(),
        })
    }

    fn parse(&self, tokens: &mut TokenStream<'_>, path: &NodePath) -> JsonOutcome<JsonNode> {
        parser::parse_number(tokens, path)
    }
}

pub struct JLong;

impl JsonCodec for JLong {
    type Value = i64;

    fn from_node(&self, node: &JsonNode) -> JsonOutcome<i64> {
        let number = node.expect_number()?;
        number.as_i64().ok_or_else(|| {
            JsonError::invalid_value(node.path(), format!("not a valid Long: {number}"))
        })
    }

    fn to_node(&self, value: &i64, path: &NodePath) -> JsonOutcome<JsonNode> {
        Ok(JsonNode::Number {
            value: JsonNumber::from(*value),
            path: path.clone(),
        })
    }

    fn parse(&self, tokens: &mut TokenStream<'_>, path: &NodePath) -> JsonOutcome<JsonNode> {
        parser::parse_number(tokens, path)
    }
}

pub struct JDouble;

impl JsonCodec for JDouble {
    type Value = f64;

    fn from_node(&self, node: &JsonNode) -> JsonOutcome<f64> {
        let number = node.expect_number()?;
        number.as_f64().ok_or_else(|| {
            JsonError::invalid_value(node.path(), format!("not a valid Double: {number}"))
        })
    }

    fn to_node(&self, value: &f64, path: &NodePath) -> JsonOutcome<JsonNode> {
        // Non-finite values have no JSON literal; fall back to zero.
        let value = JsonNumber::from_f64(*value).unwrap_or_else(|| JsonNumber::from(0));
        Ok(JsonNode::Number {
            value,
            path: path.clone(),
        })
    }

    fn parse(&self, tokens: &mut TokenStream<'_>, path: &NodePath) -> JsonOutcome<JsonNode> {
        parser::parse_number(tokens, path)
    }
}

/// Arbitrary-precision passthrough: the domain value is the decimal itself.
pub struct JDecimal;

impl JsonCodec for JDecimal {
    type Value = JsonNumber;

    fn from_node(&self, node: &JsonNode) -> JsonOutcome<JsonNumber> {
        node.expect_number().cloned()
    }

    fn to_node(&self, value: &JsonNumber, path: &NodePath) -> JsonOutcome<JsonNode> {
        Ok(JsonNode::Number {
            value: value.clone(),
            path: path.clone(),
        })
    }

    fn parse(&self, tokens: &mut TokenStream<'_>, path: &NodePath) -> JsonOutcome<JsonNode> {
        parser::parse_number(tokens, path)
    }
}

/// Ordered sequence of values, one element codec for all of them.
///
/// Decoding fails on the first element failure; the element's array index is
/// already recorded in its node path.
pub struct JArray<C>(pub C);

impl<C: JsonCodec> JsonCodec for JArray<C> {
    type Value = Vec<C::Value>;

    fn from_node(&self, node: &JsonNode) -> JsonOutcome<Vec<C::Value>> {
        node.expect_array()?
            .iter()
            .map(|item| self.0.from_node(item))
            .collect()
    }

    fn to_node(&self, value: &Vec<C::Value>, path: &NodePath) -> JsonOutcome<JsonNode> {
        let items = value
            .iter()
            .enumerate()
            .map(|(position, item)| self.0.to_node(item, &path.index(position)))
            .collect::<JsonOutcome<Vec<_>>>()?;
        Ok(JsonNode::Array {
            items,
            path: path.clone(),
        })
    }

    fn parse(&self, tokens: &mut TokenStream<'_>, path: &NodePath) -> JsonOutcome<JsonNode> {
        let parse_element: &ParseFn<'_> = &|tokens, path| self.0.parse(tokens, path);
        parser::parse_array(tokens, path, parse_element)
    }
}
