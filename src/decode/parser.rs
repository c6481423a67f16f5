use indexmap::IndexMap;

use crate::decode::lexer::Token;
use crate::decode::stream::TokenStream;
use crate::error::{JsonError, JsonOutcome};
use crate::node::{FieldMap, JsonNode};
use crate::num::JsonNumber;
use crate::path::NodePath;

/// Shape of every parse function: consume tokens, produce a node rooted at
/// the given path or fail with the exact token position.
pub type ParseFn<'f> = dyn Fn(&mut TokenStream<'_>, &NodePath) -> JsonOutcome<JsonNode> + 'f;

/// Owned parse function as stored in a schema, shareable across threads.
pub type BoxedParseFn =
    Box<dyn Fn(&mut TokenStream<'_>, &NodePath) -> JsonOutcome<JsonNode> + Send + Sync>;

/// Field name to parse function, in schema registration order. Used by
/// schema-guided object parsing.
pub type FieldParsers = IndexMap<String, BoxedParseFn>;

fn next_token(
    tokens: &mut TokenStream<'_>,
    expected: &str,
    path: &NodePath,
) -> JsonOutcome<Token> {
    match tokens.advance()? {
        Some(token) => Ok(token),
        None => Err(JsonError::syntax(
            tokens.position() + 1,
            expected,
            "EOF",
            path,
        )),
    }
}

pub fn parse_boolean(tokens: &mut TokenStream<'_>, path: &NodePath) -> JsonOutcome<JsonNode> {
    let token = next_token(tokens, "a Boolean", path)?;
    match &token {
        Token::Word(word) if word == "true" => Ok(JsonNode::Boolean {
            value: true,
            path: path.clone(),
        }),
        Token::Word(word) if word == "false" => Ok(JsonNode::Boolean {
            value: false,
            path: path.clone(),
        }),
        other => Err(JsonError::syntax(
            tokens.position(),
            "a Boolean",
            &other.to_string(),
            path,
        )),
    }
}

pub fn parse_number(tokens: &mut TokenStream<'_>, path: &NodePath) -> JsonOutcome<JsonNode> {
    let token = next_token(tokens, "a Number", path)?;
    let number = match &token {
        Token::Word(word) => JsonNumber::from_literal(word),
        _ => None,
    };
    match number {
        Some(value) => Ok(JsonNode::Number {
            value,
            path: path.clone(),
        }),
        None => Err(JsonError::syntax(
            tokens.position(),
            "a Number",
            &token.to_string(),
            path,
        )),
    }
}

pub fn parse_null(tokens: &mut TokenStream<'_>, path: &NodePath) -> JsonOutcome<JsonNode> {
    let token = next_token(tokens, "null", path)?;
    match &token {
        Token::Word(word) if word == "null" => Ok(JsonNode::Null { path: path.clone() }),
        other => Err(JsonError::syntax(
            tokens.position(),
            "null",
            &other.to_string(),
            path,
        )),
    }
}

pub fn parse_string(tokens: &mut TokenStream<'_>, path: &NodePath) -> JsonOutcome<JsonNode> {
    let text = parse_quoted_text(tokens, path)?;
    Ok(JsonNode::String {
        text,
        path: path.clone(),
    })
}

/// Exactly three tokens: opening quote, decoded content, closing quote.
fn parse_quoted_text(tokens: &mut TokenStream<'_>, path: &NodePath) -> JsonOutcome<String> {
    let open = next_token(tokens, "'\"'", path)?;
    if open != Token::Quote {
        return Err(JsonError::syntax(
            tokens.position(),
            "'\"'",
            &open.to_string(),
            path,
        ));
    }
    let content = next_token(tokens, "a string value", path)?;
    let text = match content {
        Token::Text(text) => text,
        other => {
            return Err(JsonError::syntax(
                tokens.position(),
                "a string value",
                &other.to_string(),
                path,
            ));
        }
    };
    let close = next_token(tokens, "'\"'", path)?;
    if close != Token::Quote {
        return Err(JsonError::syntax(
            tokens.position(),
            "'\"'",
            &close.to_string(),
            path,
        ));
    }
    Ok(text)
}

/// The element parser is supplied by the caller: `parse_any` for generic
/// trees, a codec's parse function when the element type is known.
pub fn parse_array(
    tokens: &mut TokenStream<'_>,
    path: &NodePath,
    parse_element: &ParseFn<'_>,
) -> JsonOutcome<JsonNode> {
    let open = next_token(tokens, "'['", path)?;
    if open != Token::OpenBracket {
        return Err(JsonError::syntax(
            tokens.position(),
            "'['",
            &open.to_string(),
            path,
        ));
    }

    let mut items = Vec::new();
    if tokens.peek()? == Some(&Token::CloseBracket) {
        tokens.advance()?;
        return Ok(JsonNode::Array {
            items,
            path: path.clone(),
        });
    }

    loop {
        let item_path = path.index(items.len());
        items.push(parse_element(tokens, &item_path)?);
        let separator = next_token(tokens, "',' or ']'", path)?;
        match separator {
            Token::Comma => continue,
            Token::CloseBracket => break,
            other => {
                return Err(JsonError::syntax(
                    tokens.position(),
                    "',' or ']'",
                    &other.to_string(),
                    path,
                ));
            }
        }
    }

    Ok(JsonNode::Array {
        items,
        path: path.clone(),
    })
}

/// Generic object parsing: any key is accepted, values go through `parse_any`.
pub fn parse_object(tokens: &mut TokenStream<'_>, path: &NodePath) -> JsonOutcome<JsonNode> {
    parse_object_with(tokens, path, None)
}

/// Schema-guided object parsing: every key must have a registered parse
/// function; an unrecognized key fails naming the allowed key set.
pub fn parse_object_guided(
    tokens: &mut TokenStream<'_>,
    path: &NodePath,
    fields: &FieldParsers,
) -> JsonOutcome<JsonNode> {
    parse_object_with(tokens, path, Some(fields))
}

fn parse_object_with(
    tokens: &mut TokenStream<'_>,
    path: &NodePath,
    schema: Option<&FieldParsers>,
) -> JsonOutcome<JsonNode> {
    let open = next_token(tokens, "'{'", path)?;
    if open != Token::OpenBrace {
        return Err(JsonError::syntax(
            tokens.position(),
            "'{'",
            &open.to_string(),
            path,
        ));
    }

    let mut fields = FieldMap::new();
    if tokens.peek()? == Some(&Token::CloseBrace) {
        tokens.advance()?;
        return Ok(JsonNode::Object {
            fields,
            path: path.clone(),
        });
    }

    loop {
        let key = parse_quoted_text(tokens, path)?;
        let colon = next_token(tokens, "':'", path)?;
        if colon != Token::Colon {
            return Err(JsonError::syntax(
                tokens.position(),
                "':'",
                &colon.to_string(),
                path,
            ));
        }

        let field_path = path.child(key.as_str());
        let value = match schema {
            None => parse_any(tokens, &field_path)?,
            Some(parsers) => match parsers.get(&key) {
                Some(parse_field) => parse_field(tokens, &field_path)?,
                None => {
                    let allowed = parsers.keys().cloned().collect::<Vec<_>>().join(", ");
                    return Err(JsonError::syntax(
                        tokens.position(),
                        &format!("one of [{allowed}]"),
                        &key,
                        path,
                    ));
                }
            },
        };
        fields.insert(key, value);

        let separator = next_token(tokens, "',' or '}'", path)?;
        match separator {
            Token::Comma => continue,
            Token::CloseBrace => break,
            other => {
                return Err(JsonError::syntax(
                    tokens.position(),
                    "',' or '}'",
                    &other.to_string(),
                    path,
                ));
            }
        }
    }

    Ok(JsonNode::Object {
        fields,
        path: path.clone(),
    })
}

#[derive(Clone, Copy)]
enum ValueKind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

fn classify(token: &Token) -> Option<ValueKind> {
    match token {
        Token::Word(word) if word == "null" => Some(ValueKind::Null),
        Token::Word(word) if word == "true" || word == "false" => Some(ValueKind::Boolean),
        Token::Quote => Some(ValueKind::String),
        Token::OpenBracket => Some(ValueKind::Array),
        Token::OpenBrace => Some(ValueKind::Object),
        Token::Word(word) => {
            let first = word.as_bytes().first();
            if matches!(first, Some(byte) if byte.is_ascii_digit() || *byte == b'-') {
                Some(ValueKind::Number)
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Decide the variant to parse by looking at the next token.
pub fn parse_any(tokens: &mut TokenStream<'_>, path: &NodePath) -> JsonOutcome<JsonNode> {
    let kind = match tokens.peek()? {
        None => {
            return Err(JsonError::syntax(
                tokens.position() + 1,
                "a valid JSON value",
                "EOF",
                path,
            ));
        }
        Some(token) => match classify(token) {
            Some(kind) => kind,
            None => {
                let found = token.to_string();
                return Err(JsonError::syntax(
                    tokens.position() + 1,
                    "a valid JSON value",
                    &found,
                    path,
                ));
            }
        },
    };

    match kind {
        ValueKind::Null => parse_null(tokens, path),
        ValueKind::Boolean => parse_boolean(tokens, path),
        ValueKind::Number => parse_number(tokens, path),
        ValueKind::String => parse_string(tokens, path),
        ValueKind::Array => parse_array(tokens, path, &parse_any),
        ValueKind::Object => parse_object(tokens, path),
    }
}
