use std::sync::Arc;

use indexmap::IndexMap;

use crate::codec::object::ObjectCodec;
use crate::codec::JsonCodec;
use crate::decode::parser;
use crate::decode::TokenStream;
use crate::error::{ErrorKind, JsonError, JsonOutcome};
use crate::node::JsonNode;
use crate::path::NodePath;

const DEFAULT_DISCRIMINATOR: &str = "_type";

type EncodeVariant<T> = Box<dyn Fn(&T, &NodePath) -> Option<JsonOutcome<JsonNode>> + Send + Sync>;
type DecodeVariant<T> = Box<dyn Fn(&JsonNode) -> JsonOutcome<T> + Send + Sync>;
type TagOf<T> = Box<dyn Fn(&T) -> String + Send + Sync>;

struct SealedVariant<T> {
    encode: EncodeVariant<T>,
    decode: DecodeVariant<T>,
}

/// Codec for a closed family of subtypes, dispatched through a string
/// discriminator field inside the encoded object.
///
/// Decoding reads the discriminator and hands the whole node to the matching
/// subtype codec; an unregistered discriminator value is a named decode
/// failure. Encoding asks `tag_of` which subtype the value is, delegates to
/// that subtype's object codec, and writes the discriminator as the first
/// member so it leads the rendered text.
///
/// # Examples
/// ```
/// use bidijson::{JsonCodec, JString, ObjectCodec, SealedCodec};
///
/// #[derive(Debug, Clone, PartialEq)]
/// enum Party {
///     Person { name: String },
///     Company { name: String },
/// }
///
/// fn person_codec() -> ObjectCodec<String> {
///     let mut schema = ObjectCodec::builder();
///     let name = schema.mandatory("name", JString, |n: &String| n.clone());
///     schema.build(move |view| view.get(&name))
/// }
///
/// let codec = SealedCodec::builder(|party: &Party| {
///     match party {
///         Party::Person { .. } => "person",
///         Party::Company { .. } => "company",
///     }
///     .to_string()
/// })
/// .variant(
///     "person",
///     person_codec(),
///     |party| match party {
///         Party::Person { name } => Some(name),
///         _ => None,
///     },
///     |name| Party::Person { name },
/// )
/// .variant(
///     "company",
///     person_codec(),
///     |party| match party {
///         Party::Company { name } => Some(name),
///         _ => None,
///     },
///     |name| Party::Company { name },
/// )
/// .build();
///
/// let ann = Party::Person { name: "Ann".to_string() };
/// let text = codec.to_json(&ann).unwrap();
/// assert_eq!(text, r#"{"_type": "person", "name": "Ann"}"#);
/// assert_eq!(codec.from_json(&text).unwrap(), ann);
/// ```
pub struct SealedCodec<T> {
    discriminator: String,
    tag_of: TagOf<T>,
    variants: IndexMap<String, SealedVariant<T>>,
}

impl<T> SealedCodec<T> {
    /// Start a builder; `tag_of` names the subtype of any domain value.
    pub fn builder(tag_of: impl Fn(&T) -> String + Send + Sync + 'static) -> SealedBuilder<T> {
        SealedBuilder {
            discriminator: DEFAULT_DISCRIMINATOR.to_string(),
            tag_of: Box::new(tag_of),
            variants: IndexMap::new(),
        }
    }
}

pub struct SealedBuilder<T> {
    discriminator: String,
    tag_of: TagOf<T>,
    variants: IndexMap<String, SealedVariant<T>>,
}

impl<T: 'static> SealedBuilder<T> {
    /// Override the default `_type` discriminator field name.
    pub fn discriminator(mut self, name: &str) -> Self {
        self.discriminator = name.to_string();
        self
    }

    /// Register one subtype under `tag`.
    ///
    /// `project` narrows a family value down to this subtype, returning
    /// `None` when the value belongs to another subtype; `inject` widens a
    /// decoded subtype value back into the family.
    pub fn variant<S: 'static>(
        mut self,
        tag: &str,
        codec: ObjectCodec<S>,
        project: impl Fn(&T) -> Option<&S> + Send + Sync + 'static,
        inject: impl Fn(S) -> T + Send + Sync + 'static,
    ) -> Self {
        let codec = Arc::new(codec);
        let encode_codec = codec.clone();
        let encode: EncodeVariant<T> = Box::new(move |value, path| {
            project(value).map(|narrowed| encode_codec.to_node(narrowed, path))
        });
        let decode: DecodeVariant<T> =
            Box::new(move |node| codec.from_node(node).map(&inject));
        self.variants
            .insert(tag.to_string(), SealedVariant { encode, decode });
        self
    }

    pub fn build(self) -> SealedCodec<T> {
        SealedCodec {
            discriminator: self.discriminator,
            tag_of: self.tag_of,
            variants: self.variants,
        }
    }
}

impl<T> JsonCodec for SealedCodec<T> {
    type Value = T;

    fn from_node(&self, node: &JsonNode) -> JsonOutcome<T> {
        let (fields, path) = node.expect_object()?;
        let tag_node = fields.get(&self.discriminator).ok_or_else(|| {
            JsonError::at(
                path,
                ErrorKind::MissingField,
                format!("discriminator field '{}' not found", self.discriminator),
            )
        })?;
        let tag = match tag_node {
            JsonNode::String { text, .. } => text,
            other => {
                return Err(JsonError::wrong_type(
                    other.path(),
                    "String",
                    other.kind_name(),
                ));
            }
        };
        let variant = self
            .variants
            .get(tag.as_str())
            .ok_or_else(|| JsonError::unknown_subtype(path, tag))?;
        (variant.decode)(node)
    }

    fn to_node(&self, value: &T, path: &NodePath) -> JsonOutcome<JsonNode> {
        let tag = (self.tag_of)(value);
        let variant = self
            .variants
            .get(&tag)
            .ok_or_else(|| JsonError::unknown_subtype(path, &tag))?;
        let encoded = (variant.encode)(value, path).ok_or_else(|| {
            JsonError::at(
                path,
                ErrorKind::UnknownSubtype,
                format!("value does not match subtype '{tag}'"),
            )
        })??;
        match encoded {
            JsonNode::Object { mut fields, path } => {
                let tag_node = JsonNode::String {
                    text: tag,
                    path: path.child(self.discriminator.as_str()),
                };
                fields.shift_insert(0, self.discriminator.clone(), tag_node);
                Ok(JsonNode::Object { fields, path })
            }
            other => Ok(other),
        }
    }

    fn parse(&self, tokens: &mut TokenStream<'_>, path: &NodePath) -> JsonOutcome<JsonNode> {
        // The subtype is unknown until the discriminator has been read, so
        // sealed parsing is not schema-guided.
        parser::parse_object(tokens, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{JInt, JString};

    #[derive(Debug, Clone, PartialEq)]
    struct Person {
        name: String,
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Company {
        name: String,
        vat: i32,
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Party {
        Human(Person),
        Corp(Company),
    }

    fn person_codec() -> ObjectCodec<Person> {
        let mut schema = ObjectCodec::builder();
        let name = schema.mandatory("name", JString, |p: &Person| p.name.clone());
        schema.build(move |view| {
            Ok(Person {
                name: view.get(&name)?,
            })
        })
    }

    fn company_codec() -> ObjectCodec<Company> {
        let mut schema = ObjectCodec::builder();
        let name = schema.mandatory("name", JString, |c: &Company| c.name.clone());
        let vat = schema.mandatory("vat", JInt, |c: &Company| c.vat);
        schema.build(move |view| {
            Ok(Company {
                name: view.get(&name)?,
                vat: view.get(&vat)?,
            })
        })
    }

    fn party_codec() -> SealedCodec<Party> {
        SealedCodec::builder(|party: &Party| {
            match party {
                Party::Human(_) => "person",
                Party::Corp(_) => "company",
            }
            .to_string()
        })
        .variant(
            "person",
            person_codec(),
            |party| match party {
                Party::Human(person) => Some(person),
                _ => None,
            },
            Party::Human,
        )
        .variant(
            "company",
            company_codec(),
            |party| match party {
                Party::Corp(company) => Some(company),
                _ => None,
            },
            Party::Corp,
        )
        .build()
    }

    #[rstest::rstest]
    fn test_dispatch_round_trip_both_subtypes() {
        let codec = party_codec();

        let ann = Party::Human(Person {
            name: "Ann".to_string(),
        });
        let text = codec.to_json(&ann).unwrap();
        assert_eq!(text, r#"{"_type": "person", "name": "Ann"}"#);
        assert_eq!(codec.from_json(&text).unwrap(), ann);

        let acme = Party::Corp(Company {
            name: "Acme".to_string(),
            vat: 12345,
        });
        let text = codec.to_json(&acme).unwrap();
        assert_eq!(text, r#"{"_type": "company", "name": "Acme", "vat": 12345}"#);
        assert_eq!(codec.from_json(&text).unwrap(), acme);
    }

    #[rstest::rstest]
    fn test_unknown_discriminator_value_fails() {
        let codec = party_codec();
        let error = codec
            .from_json(r#"{"_type": "alien", "name": "Zorg"}"#)
            .unwrap_err();
        assert_eq!(error.kind, ErrorKind::UnknownSubtype);
        assert_eq!(error.reason, "subtype not known: alien");
    }

    #[rstest::rstest]
    fn test_missing_discriminator_names_the_field() {
        let codec = party_codec();
        let error = codec.from_json(r#"{"name": "Ann"}"#).unwrap_err();
        assert_eq!(error.kind, ErrorKind::MissingField);
        assert_eq!(error.reason, "discriminator field '_type' not found");
    }

    #[rstest::rstest]
    fn test_non_string_discriminator_fails() {
        let codec = party_codec();
        let error = codec.from_json(r#"{"_type": 1, "name": "Ann"}"#).unwrap_err();
        assert_eq!(error.kind, ErrorKind::WrongType);
        assert_eq!(error.reason, "expected String but found Number");
        assert_eq!(error.location, "root/_type");
    }

    #[rstest::rstest]
    fn test_custom_discriminator_name() {
        let codec = SealedCodec::builder(|_: &Party| "person".to_string())
            .discriminator("kind")
            .variant(
                "person",
                person_codec(),
                |party: &Party| match party {
                    Party::Human(person) => Some(person),
                    _ => None,
                },
                Party::Human,
            )
            .build();

        let ann = Party::Human(Person {
            name: "Ann".to_string(),
        });
        let text = codec.to_json(&ann).unwrap();
        assert_eq!(text, r#"{"kind": "person", "name": "Ann"}"#);
        assert_eq!(codec.from_json(&text).unwrap(), ann);
    }

    #[rstest::rstest]
    fn test_tag_without_registered_variant_fails_encode() {
        let codec = SealedCodec::builder(|_: &Party| "ghost".to_string())
            .variant(
                "person",
                person_codec(),
                |party: &Party| match party {
                    Party::Human(person) => Some(person),
                    _ => None,
                },
                Party::Human,
            )
            .build();

        let error = codec
            .to_json(&Party::Human(Person {
                name: "Ann".to_string(),
            }))
            .unwrap_err();
        assert_eq!(error.kind, ErrorKind::UnknownSubtype);
    }

    #[rstest::rstest]
    fn test_mismatched_projection_fails_encode() {
        let codec = SealedCodec::builder(|_: &Party| "person".to_string())
            .variant(
                "person",
                person_codec(),
                |_: &Party| None::<&Person>,
                Party::Human,
            )
            .build();

        let error = codec
            .to_json(&Party::Human(Person {
                name: "Ann".to_string(),
            }))
            .unwrap_err();
        assert_eq!(error.kind, ErrorKind::UnknownSubtype);
        assert!(error.reason.contains("does not match subtype 'person'"));
    }
}
