use crate::error::MarkdownError;
use crate::grammar::Node;
use crate::render::{BIG_EMOJI_SIZE, Output, RenderState, Rendered};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BigEmoji {
    Emoji {
        shortcode: String,
        size: u32,
        allow_font_scaling: bool,
    },
    LineBreak,
}

/// Enlarged emoji for messages that are nothing else.
///
/// Only trees that pass [`crate::is_all_emoji`] render; any other node is
/// an [`MarkdownError::UnexpectedNode`].
pub struct BigEmojiOutput;

impl BigEmojiOutput {
    const NAME: &'static str = "big-emoji";
}

impl Output for BigEmojiOutput {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn render(&self, ast: &[Node], state: &RenderState<'_>) -> Result<Rendered, MarkdownError> {
        let mut out = Vec::new();
        for node in ast.iter().filter(|node| !node.is_newline()) {
            let children = node.children().ok_or_else(|| unexpected(node))?;
            for child in children {
                out.push(match child {
                    Node::Emoji { content } => BigEmoji::Emoji {
                        shortcode: content.clone(),
                        size: BIG_EMOJI_SIZE,
                        allow_font_scaling: state.allow_font_scaling,
                    },
                    Node::Newline => BigEmoji::LineBreak,
                    other => return Err(unexpected(other)),
                });
            }
        }
        while out.last() == Some(&BigEmoji::LineBreak) {
            out.pop();
        }
        Ok(Rendered::BigEmoji(out))
    }
}

fn unexpected(node: &Node) -> MarkdownError {
    MarkdownError::UnexpectedNode {
        renderer: BigEmojiOutput::NAME,
        kind: node.kind(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatmark_config::StyleOverride;
    use pretty_assertions::assert_eq;

    fn render(ast: &[Node]) -> Result<Rendered, MarkdownError> {
        let style_override = StyleOverride::default();
        let state = RenderState {
            allow_font_scaling: true,
            meta: None,
            style_override: &style_override,
            paragraph_text_class_name: None,
        };
        BigEmojiOutput.render(ast, &state)
    }

    fn big(shortcode: &str) -> BigEmoji {
        BigEmoji::Emoji {
            shortcode: shortcode.into(),
            size: 32,
            allow_font_scaling: true,
        }
    }

    #[test]
    fn emoji_render_large_with_inner_line_breaks() {
        let ast = vec![Node::Paragraph {
            content: vec![
                Node::emoji(":fire:"),
                Node::Newline,
                Node::emoji(":tada:"),
                Node::Newline,
            ],
        }];
        assert_eq!(
            render(&ast).unwrap(),
            Rendered::BigEmoji(vec![big(":fire:"), BigEmoji::LineBreak, big(":tada:")])
        );
    }

    #[test]
    fn other_nodes_fail() {
        let ast = vec![Node::Paragraph {
            content: vec![Node::emoji(":fire:"), Node::text("!")],
        }];
        let err = render(&ast).unwrap_err();
        assert!(matches!(
            err,
            MarkdownError::UnexpectedNode { renderer: "big-emoji", kind: "text" }
        ));
        assert_eq!(err.stage(), "rendering");
    }
}
