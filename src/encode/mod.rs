use crate::node::JsonNode;

/// Render a tree back to JSON text. Pure structural recursion, never fails.
///
/// Numbers print their canonical decimal literal, so exact digits survive the
/// trip; object members print in insertion order.
pub fn render(node: &JsonNode) -> String {
    let mut out = String::new();
    write_node(&mut out, node);
    out
}

fn write_node(out: &mut String, node: &JsonNode) {
    match node {
        JsonNode::Null { .. } => out.push_str("null"),
        JsonNode::Boolean { value, .. } => {
            out.push_str(if *value { "true" } else { "false" });
        }
        JsonNode::Number { value, .. } => out.push_str(value.as_str()),
        JsonNode::String { text, .. } => write_quoted(out, text),
        JsonNode::Array { items, .. } => {
            out.push('[');
            for (position, item) in items.iter().enumerate() {
                if position > 0 {
                    out.push_str(", ");
                }
                write_node(out, item);
            }
            out.push(']');
        }
        JsonNode::Object { fields, .. } => {
            out.push('{');
            for (position, (key, value)) in fields.iter().enumerate() {
                if position > 0 {
                    out.push_str(", ");
                }
                write_quoted(out, key);
                out.push_str(": ");
                write_node(out, value);
            }
            out.push('}');
        }
    }
}

fn write_quoted(out: &mut String, text: &str) {
    out.push('"');
    escape_into(out, text);
    out.push('"');
}

/// Copy `text` into `out`, escaping the characters the wire format reserves.
/// Unescaped runs are appended in one piece.
fn escape_into(out: &mut String, text: &str) {
    let bytes = text.as_bytes();
    let mut start = 0;
    for (idx, byte) in bytes.iter().enumerate() {
        let escaped = match byte {
            b'\\' => "\\\\",
            b'"' => "\\\"",
            b'\n' => "\\n",
            b'\t' => "\\t",
            b'\r' => "\\r",
            0x08 => "\\b",
            _ => continue,
        };
        if start < idx {
            out.push_str(&text[start..idx]);
        }
        out.push_str(escaped);
        start = idx + 1;
    }
    if start < text.len() {
        out.push_str(&text[start..]);
    }
}
