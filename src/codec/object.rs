use std::sync::Arc;

use crate::codec::JsonCodec;
use crate::decode::lexer::Token;
use crate::decode::parser::{self, FieldParsers};
use crate::decode::TokenStream;
use crate::error::{JsonError, JsonOutcome};
use crate::node::{FieldMap, JsonNode};
use crate::path::NodePath;

/// A schema field descriptor: how one field is read out of an object node,
/// written into one, and parsed from text.
pub trait SchemaField {
    type Out;

    fn name(&self) -> &str;

    fn read(&self, fields: &FieldMap, object_path: &NodePath) -> JsonOutcome<Self::Out>;

    fn write(
        &self,
        value: &Self::Out,
        fields: FieldMap,
        object_path: &NodePath,
    ) -> JsonOutcome<FieldMap>;

    fn parse_value(&self, tokens: &mut TokenStream<'_>, path: &NodePath)
        -> JsonOutcome<JsonNode>;
}

/// Field that must be present; absence is a decode failure.
pub struct MandatoryField<V> {
    name: String,
    codec: Arc<dyn JsonCodec<Value = V> + Send + Sync>,
}

impl<V> Clone for MandatoryField<V> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            codec: self.codec.clone(),
        }
    }
}

impl<V: 'static> MandatoryField<V> {
    pub fn new(name: &str, codec: impl JsonCodec<Value = V> + Send + Sync + 'static) -> Self {
        Self {
            name: name.to_string(),
            codec: Arc::new(codec),
        }
    }
}

impl<V: 'static> SchemaField for MandatoryField<V> {
    type Out = V;

    fn name(&self) -> &str {
        &self.name
    }

    fn read(&self, fields: &FieldMap, object_path: &NodePath) -> JsonOutcome<V> {
        match fields.get(&self.name) {
            Some(node) => self.codec.from_node(node),
            None => Err(JsonError::missing_field(object_path, &self.name)),
        }
    }

    fn write(
        &self,
        value: &V,
        mut fields: FieldMap,
        object_path: &NodePath,
    ) -> JsonOutcome<FieldMap> {
        let node = self
            .codec
            .to_node(value, &object_path.child(self.name.as_str()))?;
        fields.insert(self.name.clone(), node);
        Ok(fields)
    }

    fn parse_value(
        &self,
        tokens: &mut TokenStream<'_>,
        path: &NodePath,
    ) -> JsonOutcome<JsonNode> {
        self.codec.parse(tokens, path)
    }
}

/// Field that may be absent. Absence decodes to `None`; an explicit `null`
/// in the source also decodes to `None` without consulting the element codec.
pub struct OptionalField<V> {
    name: String,
    codec: Arc<dyn JsonCodec<Value = V> + Send + Sync>,
}

impl<V> Clone for OptionalField<V> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            codec: self.codec.clone(),
        }
    }
}

impl<V: 'static> OptionalField<V> {
    pub fn new(name: &str, codec: impl JsonCodec<Value = V> + Send + Sync + 'static) -> Self {
        Self {
            name: name.to_string(),
            codec: Arc::new(codec),
        }
    }
}

impl<V: 'static> SchemaField for OptionalField<V> {
    type Out = Option<V>;

    fn name(&self) -> &str {
        &self.name
    }

    fn read(&self, fields: &FieldMap, _object_path: &NodePath) -> JsonOutcome<Option<V>> {
        match fields.get(&self.name) {
            None => Ok(None),
            Some(JsonNode::Null { .. }) => Ok(None),
            Some(node) => self.codec.from_node(node).map(Some),
        }
    }

    fn write(
        &self,
        value: &Option<V>,
        mut fields: FieldMap,
        object_path: &NodePath,
    ) -> JsonOutcome<FieldMap> {
        if let Some(value) = value {
            let node = self
                .codec
                .to_node(value, &object_path.child(self.name.as_str()))?;
            fields.insert(self.name.clone(), node);
        }
        Ok(fields)
    }

    fn parse_value(
        &self,
        tokens: &mut TokenStream<'_>,
        path: &NodePath,
    ) -> JsonOutcome<JsonNode> {
        let is_null = matches!(tokens.peek()?, Some(Token::Word(word)) if word == "null");
        if is_null {
            parser::parse_null(tokens, path)
        } else {
            self.codec.parse(tokens, path)
        }
    }
}

/// Accessor bundle handed to the assemble closure once every registered
/// field has been validated against the source object node.
pub struct ObjectView<'a> {
    fields: &'a FieldMap,
    path: &'a NodePath,
}

impl<'a> ObjectView<'a> {
    pub fn get<F: SchemaField>(&self, field: &F) -> JsonOutcome<F::Out> {
        field.read(self.fields, self.path)
    }

    pub fn path(&self) -> &NodePath {
        self.path
    }
}

type Writer<T> = Box<dyn Fn(FieldMap, &T, &NodePath) -> JsonOutcome<FieldMap> + Send + Sync>;
type Reader = Box<dyn Fn(&FieldMap, &NodePath) -> Option<JsonError> + Send + Sync>;
type Assemble<T> = Box<dyn Fn(&ObjectView<'_>) -> JsonOutcome<T> + Send + Sync>;

/// Declarative object schema: one registered descriptor per domain field.
///
/// Built once with [`ObjectBuilder`], then immutable; concurrent decode and
/// encode calls against the same codec share no mutable state.
///
/// Decoding evaluates **every** registered field before failing, so a single
/// call reports all invalid and missing fields at once.
///
/// # Examples
/// ```
/// use bidijson::{JInt, JString, JsonCodec, ObjectCodec};
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Customer {
///     id: i32,
///     name: String,
/// }
///
/// let mut schema = ObjectCodec::builder();
/// let id = schema.mandatory("id", JInt, |c: &Customer| c.id);
/// let name = schema.mandatory("name", JString, |c: &Customer| c.name.clone());
/// let codec = schema.build(move |view| {
///     Ok(Customer {
///         id: view.get(&id)?,
///         name: view.get(&name)?,
///     })
/// });
///
/// let customer = Customer { id: 123, name: "abc".to_string() };
/// let text = codec.to_json(&customer).unwrap();
/// assert_eq!(text, r#"{"id": 123, "name": "abc"}"#);
/// assert_eq!(codec.from_json(&text).unwrap(), customer);
/// ```
pub struct ObjectCodec<T> {
    writers: Vec<Writer<T>>,
    readers: Vec<Reader>,
    parsers: FieldParsers,
    assemble: Assemble<T>,
}

impl<T> ObjectCodec<T> {
    pub fn builder() -> ObjectBuilder<T> {
        ObjectBuilder {
            writers: Vec::new(),
            readers: Vec::new(),
            parsers: FieldParsers::new(),
        }
    }
}

/// Collects field descriptors during schema definition. Frozen into an
/// [`ObjectCodec`] by `build`; no registration is possible afterwards.
pub struct ObjectBuilder<T> {
    writers: Vec<Writer<T>>,
    readers: Vec<Reader>,
    parsers: FieldParsers,
}

impl<T> ObjectBuilder<T> {
    /// Register a mandatory field and get back its typed accessor handle.
    ///
    /// `binder` reads the field's value out of a domain instance when
    /// encoding.
    pub fn mandatory<V, C>(
        &mut self,
        name: &str,
        codec: C,
        binder: impl Fn(&T) -> V + Send + Sync + 'static,
    ) -> MandatoryField<V>
    where
        V: 'static,
        C: JsonCodec<Value = V> + Send + Sync + 'static,
    {
        let field = MandatoryField::new(name, codec);
        self.register(&field, binder);
        field
    }

    /// Register an optional field; the binder returns `None` to leave the
    /// key out of the encoded object.
    pub fn optional<V, C>(
        &mut self,
        name: &str,
        codec: C,
        binder: impl Fn(&T) -> Option<V> + Send + Sync + 'static,
    ) -> OptionalField<V>
    where
        V: 'static,
        C: JsonCodec<Value = V> + Send + Sync + 'static,
    {
        let field = OptionalField::new(name, codec);
        self.register(&field, binder);
        field
    }

    fn register<F>(&mut self, field: &F, binder: impl Fn(&T) -> F::Out + Send + Sync + 'static)
    where
        F: SchemaField + Clone + Send + Sync + 'static,
    {
        let write_field = field.clone();
        self.writers.push(Box::new(move |fields, value, path| {
            write_field.write(&binder(value), fields, path)
        }));

        let read_field = field.clone();
        self.readers
            .push(Box::new(move |fields, path| {
                read_field.read(fields, path).err()
            }));

        let parse_field = field.clone();
        self.parsers.insert(
            field.name().to_string(),
            Box::new(move |tokens, path| parse_field.parse_value(tokens, path)),
        );
    }

    /// Freeze the schema. `assemble` builds the domain value by reading the
    /// already-validated fields through their handles.
    pub fn build(
        self,
        assemble: impl Fn(&ObjectView<'_>) -> JsonOutcome<T> + Send + Sync + 'static,
    ) -> ObjectCodec<T> {
        ObjectCodec {
            writers: self.writers,
            readers: self.readers,
            parsers: self.parsers,
            assemble: Box::new(assemble),
        }
    }
}

impl<T> JsonCodec for ObjectCodec<T> {
    type Value = T;

    fn from_node(&self, node: &JsonNode) -> JsonOutcome<T> {
        let (fields, path) = node.expect_object()?;

        // Every field is evaluated before failing, registration order.
        let mut errors: Vec<JsonError> = self
            .readers
            .iter()
            .filter_map(|read| read(fields, path))
            .collect();

        if errors.is_empty() {
            (self.assemble)(&ObjectView { fields, path })
        } else if errors.len() == 1 {
            Err(errors.remove(0))
        } else {
            Err(JsonError::multiple(path, errors))
        }
    }

    fn to_node(&self, value: &T, path: &NodePath) -> JsonOutcome<JsonNode> {
        let mut fields = FieldMap::new();
        for write in &self.writers {
            fields = write(fields, value, path)?;
        }
        Ok(JsonNode::Object {
            fields,
            path: path.clone(),
        })
    }

    fn parse(&self, tokens: &mut TokenStream<'_>, path: &NodePath) -> JsonOutcome<JsonNode> {
        parser::parse_object_guided(tokens, path, &self.parsers)
    }
}
