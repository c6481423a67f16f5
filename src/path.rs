use std::fmt;
use std::sync::Arc;

use smol_str::SmolStr;

/// Structural location of a node inside a JSON document.
///
/// Paths form a parent-linked chain so that extending a path while descending
/// into an object field or array element shares the whole parent chain instead
/// of copying it.
///
/// # Examples
/// ```
/// use bidijson::NodePath;
///
/// let path = NodePath::root().child("items").index(2).child("price");
/// assert_eq!(path.to_string(), "root/items/2/price");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodePath {
    Root,
    Segment(Arc<PathSegment>),
}

#[derive(Debug, PartialEq, Eq)]
pub struct PathSegment {
    name: SmolStr,
    parent: NodePath,
}

impl NodePath {
    pub fn root() -> Self {
        NodePath::Root
    }

    /// Extend the path with an object field name.
    pub fn child(&self, name: impl Into<SmolStr>) -> NodePath {
        NodePath::Segment(Arc::new(PathSegment {
            name: name.into(),
            parent: self.clone(),
        }))
    }

    /// Extend the path with an array index segment.
    pub fn index(&self, position: usize) -> NodePath {
        let mut buffer = itoa::Buffer::new();
        self.child(buffer.format(position))
    }

    pub fn is_root(&self) -> bool {
        matches!(self, NodePath::Root)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodePath::Root => write!(f, "root"),
            NodePath::Segment(segment) => {
                write!(f, "{}/{}", segment.parent, segment.name)
            }
        }
    }
}
