pub mod lexer;
pub mod parser;
pub mod stream;

pub use lexer::{Lexer, Token};
pub use stream::TokenStream;

use crate::error::{JsonError, JsonOutcome};
use crate::node::JsonNode;
use crate::path::NodePath;

pub fn tokenize(input: &str) -> TokenStream<'_> {
    TokenStream::new(Lexer::new(input))
}

/// Parse a whole document into a generic tree, verifying nothing trails the
/// top-level value.
pub fn parse_text(input: &str) -> JsonOutcome<JsonNode> {
    let mut tokens = tokenize(input);
    let node = parser::parse_any(&mut tokens, &NodePath::root())?;
    ensure_exhausted(&mut tokens)?;
    Ok(node)
}

pub fn ensure_exhausted(tokens: &mut TokenStream<'_>) -> JsonOutcome<()> {
    let position = tokens.position() + 1;
    match tokens.peek()? {
        None => Ok(()),
        Some(token) => Err(JsonError::syntax(
            position,
            "end of input",
            &token.to_string(),
            &NodePath::root(),
        )),
    }
}
