use std::sync::Arc;

use crate::error::MarkdownError;
use crate::grammar::{MarkdownMeta, Node};
use crate::render::{EMOJI_SIZE, Output, RenderState, Rendered};

/// A rich presentation element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Paragraph {
        class_name: Option<String>,
        style: Option<String>,
        children: Vec<Element>,
    },
    BlockQuote {
        children: Vec<Element>,
    },
    Bold {
        style: Option<String>,
        children: Vec<Element>,
    },
    Italic {
        style: Option<String>,
        children: Vec<Element>,
    },
    Strikethrough {
        style: Option<String>,
        children: Vec<Element>,
    },
    Emoji {
        shortcode: String,
        size: u32,
        allow_font_scaling: bool,
    },
    /// `html` is always safe to inject: highlighted markup or escaped text.
    CodeBlock {
        html: String,
        language: Option<String>,
        copy_text: String,
        style: Option<String>,
    },
    InlineCode {
        text: String,
        style: Option<String>,
    },
    LineBreak,
    Text(String),
    /// Resolved by the host from the payload and the message meta.
    ServiceDecoration {
        payload: String,
        meta: Option<Arc<MarkdownMeta>>,
    },
}

/// Renders every node kind.
pub struct FullOutput;

impl Output for FullOutput {
    fn name(&self) -> &'static str {
        "full"
    }

    fn render(&self, ast: &[Node], state: &RenderState<'_>) -> Result<Rendered, MarkdownError> {
        Ok(Rendered::Full(elements(ast, state)))
    }
}

fn elements(nodes: &[Node], state: &RenderState<'_>) -> Vec<Element> {
    nodes.iter().map(|node| element(node, state)).collect()
}

fn element(node: &Node, state: &RenderState<'_>) -> Element {
    let styles = state.style_override;
    match node {
        Node::Paragraph { content } => Element::Paragraph {
            class_name: state.paragraph_text_class_name.map(str::to_string),
            style: styles.paragraph.clone(),
            children: elements(content, state),
        },
        Node::BlockQuote { content } => Element::BlockQuote {
            children: elements(content, state),
        },
        Node::Strong { content } => Element::Bold {
            style: styles.strong.clone(),
            children: elements(content, state),
        },
        Node::Em { content } => Element::Italic {
            style: styles.em.clone(),
            children: elements(content, state),
        },
        Node::Del { content } => Element::Strikethrough {
            style: styles.del.clone(),
            children: elements(content, state),
        },
        Node::Emoji { content } => Element::Emoji {
            shortcode: content.clone(),
            size: EMOJI_SIZE,
            allow_font_scaling: state.allow_font_scaling,
        },
        Node::Fence { content } => Element::CodeBlock {
            html: html_escape::encode_text(content).into_owned(),
            language: None,
            copy_text: content.clone(),
            style: styles.fence.clone(),
        },
        Node::CodeFence {
            content,
            unformatted_content,
            lang,
        } => Element::CodeBlock {
            html: content.clone(),
            language: Some(lang.clone()),
            copy_text: unformatted_content.clone(),
            style: styles.fence.clone(),
        },
        Node::InlineCode { content } => Element::InlineCode {
            text: content.clone(),
            style: styles.inline_code.clone(),
        },
        Node::Newline => Element::LineBreak,
        Node::Text { content } => Element::Text(content.clone()),
        Node::ServiceDecoration { content } => Element::ServiceDecoration {
            payload: content.clone(),
            meta: state.meta.cloned(),
        },
    }
}
