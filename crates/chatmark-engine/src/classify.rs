use crate::grammar::Node;

/// True when a message is nothing but emoji.
///
/// Ignoring top-level newlines, the tree must hold exactly one node, that
/// node must have children, and every child must be an emoji or a newline.
/// Only that one level is inspected.
pub fn is_all_emoji(ast: &[Node]) -> bool {
    let mut blocks = ast.iter().filter(|node| !node.is_newline());
    match (blocks.next(), blocks.next()) {
        (Some(only), None) => only.children().is_some_and(|children| {
            children
                .iter()
                .all(|child| matches!(child, Node::Emoji { .. } | Node::Newline))
        }),
        _ => false,
    }
}
