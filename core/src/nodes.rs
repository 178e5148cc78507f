//! The closed node-kind union shared by both generators.

/// Name of the common base type every node kind shares.
pub const NODE_BASE_TYPE: &str = "Node";

/// Name of the discriminant field carrying the node kind.
pub const NODE_DISCRIMINANT: &str = "type";

/// One concrete node kind: its literal tag (also the name of its type) and
/// a short description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeKind {
    pub name: &'static str,
    pub doc: &'static str,
}

/// The 15 mutually exclusive node kinds, in declaration order.
pub const NODE_KINDS: [NodeKind; 15] = [
    NodeKind { name: "DOCUMENT", doc: "The root node" },
    NodeKind { name: "CANVAS", doc: "Represents a single page" },
    NodeKind { name: "FRAME", doc: "A node of fixed size containing other nodes" },
    NodeKind { name: "GROUP", doc: "A logical grouping of nodes" },
    NodeKind { name: "VECTOR", doc: "A vector network, consisting of vertices and edges" },
    NodeKind {
        name: "BOOLEAN_OPERATION",
        doc: "A group that has a boolean operation applied to it",
    },
    NodeKind { name: "STAR", doc: "A regular star shape" },
    NodeKind { name: "LINE", doc: "A straight line" },
    NodeKind { name: "ELLIPSE", doc: "An ellipse" },
    NodeKind { name: "REGULAR_POLYGON", doc: "A regular n-sided polygon" },
    NodeKind { name: "RECTANGLE", doc: "A rectangle" },
    NodeKind { name: "TEXT", doc: "A text box" },
    NodeKind {
        name: "SLICE",
        doc: "A rectangular region of the canvas that can be exported",
    },
    NodeKind {
        name: "COMPONENT",
        doc: "A node that can have instances created of it that share the same properties",
    },
    NodeKind {
        name: "INSTANCE",
        doc: "An instance of a component, changes to the component result in the same changes applied to the instance",
    },
];
