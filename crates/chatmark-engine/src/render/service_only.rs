use std::sync::Arc;

use crate::error::MarkdownError;
use crate::grammar::{MarkdownMeta, Node};
use crate::render::{Output, RenderState, Rendered};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceSpan {
    Text(String),
    ServiceDecoration {
        payload: String,
        meta: Option<Arc<MarkdownMeta>>,
    },
}

/// Plain text with service decorations as the only rich spans.
pub struct ServiceOnlyOutput;

impl Output for ServiceOnlyOutput {
    fn name(&self) -> &'static str {
        "service-only"
    }

    fn render(&self, ast: &[Node], state: &RenderState<'_>) -> Result<Rendered, MarkdownError> {
        let mut spans = Vec::new();
        flatten(ast, state, &mut spans);
        if let Some(ServiceSpan::Text(last)) = spans.last_mut() {
            last.truncate(last.trim_end_matches('\n').len());
            if last.is_empty() {
                spans.pop();
            }
        }
        Ok(Rendered::ServiceOnly(spans))
    }
}

fn push_text(spans: &mut Vec<ServiceSpan>, text: &str) {
    match spans.last_mut() {
        Some(ServiceSpan::Text(last)) => last.push_str(text),
        _ if text.is_empty() => {}
        _ => spans.push(ServiceSpan::Text(text.to_string())),
    }
}

fn flatten(nodes: &[Node], state: &RenderState<'_>, spans: &mut Vec<ServiceSpan>) {
    for node in nodes {
        match node {
            Node::ServiceDecoration { content } => spans.push(ServiceSpan::ServiceDecoration {
                payload: content.clone(),
                meta: state.meta.cloned(),
            }),
            Node::Text { content }
            | Node::Emoji { content }
            | Node::InlineCode { content }
            | Node::Fence { content } => push_text(spans, content),
            Node::CodeFence {
                unformatted_content, ..
            } => push_text(spans, unformatted_content),
            Node::Newline => push_text(spans, "\n"),
            Node::Paragraph { content }
            | Node::BlockQuote { content }
            | Node::Del { content }
            | Node::Em { content }
            | Node::Strong { content } => flatten(content, state, spans),
        }
    }
}
