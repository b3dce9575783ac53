use std::fmt::Write as _;

/// A node of the parsed message tree.
///
/// Container kinds hold child nodes; leaf kinds hold text. A tree is
/// immutable once parsing returns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Paragraph { content: Vec<Node> },
    BlockQuote { content: Vec<Node> },
    Del { content: Vec<Node> },
    Em { content: Vec<Node> },
    Strong { content: Vec<Node> },
    /// Literal emoji char or `:shortcode:`, normalized to the shortcode when known.
    Emoji { content: String },
    /// Unhighlighted code block.
    Fence { content: String },
    /// Highlighted code block. `content` is HTML, `unformatted_content` the raw body.
    CodeFence {
        content: String,
        unformatted_content: String,
        lang: String,
    },
    InlineCode { content: String },
    Newline,
    Text { content: String },
    ServiceDecoration { content: String },
}

impl Node {
    pub fn text(content: impl Into<String>) -> Self {
        Node::Text {
            content: content.into(),
        }
    }

    pub fn emoji(content: impl Into<String>) -> Self {
        Node::Emoji {
            content: content.into(),
        }
    }

    /// The node's type tag as it appears in serialized trees.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Paragraph { .. } => "paragraph",
            Node::BlockQuote { .. } => "blockQuote",
            Node::Del { .. } => "del",
            Node::Em { .. } => "em",
            Node::Strong { .. } => "strong",
            Node::Emoji { .. } => "emoji",
            Node::Fence { .. } => "fence",
            Node::CodeFence { .. } => "codeFence",
            Node::InlineCode { .. } => "inlineCode",
            Node::Newline => "newline",
            Node::Text { .. } => "text",
            Node::ServiceDecoration { .. } => "serviceDecoration",
        }
    }

    /// Child nodes, for container kinds only.
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Paragraph { content }
            | Node::BlockQuote { content }
            | Node::Del { content }
            | Node::Em { content }
            | Node::Strong { content } => Some(content),
            _ => None,
        }
    }

    pub fn is_newline(&self) -> bool {
        matches!(self, Node::Newline)
    }
}

/// Renders a tree one node per line, children indented by two spaces.
pub fn dump_tree(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        dump_node(&mut out, node, 0);
    }
    out.truncate(out.trim_end_matches('\n').len());
    out
}

fn dump_node(out: &mut String, node: &Node, depth: usize) {
    let indent = "  ".repeat(depth);
    let _ = match node {
        Node::Emoji { content }
        | Node::Fence { content }
        | Node::InlineCode { content }
        | Node::Text { content }
        | Node::ServiceDecoration { content } => {
            writeln!(out, "{indent}{} {content:?}", node.kind())
        }
        Node::CodeFence {
            unformatted_content,
            lang,
            ..
        } => writeln!(out, "{indent}codeFence {lang} {unformatted_content:?}"),
        _ => writeln!(out, "{indent}{}", node.kind()),
    };
    for child in node.children().unwrap_or_default() {
        dump_node(out, child, depth + 1);
    }
}
