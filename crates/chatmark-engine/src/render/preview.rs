use std::sync::Arc;

use crate::error::MarkdownError;
use crate::grammar::{MarkdownMeta, Node};
use crate::render::{EMOJI_SIZE, Output, RenderState, Rendered};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewSpan {
    Text(String),
    Emoji {
        shortcode: String,
        size: u32,
        allow_font_scaling: bool,
    },
    ServiceDecoration {
        payload: String,
        meta: Option<Arc<MarkdownMeta>>,
    },
}

/// One line of spans, trimmed at both ends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewLine {
    pub spans: Vec<PreviewSpan>,
}

impl PreviewLine {
    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.spans.last_mut() {
            Some(PreviewSpan::Text(last)) => last.push_str(text),
            _ => self.spans.push(PreviewSpan::Text(text.to_string())),
        }
    }

    fn trim(&mut self) {
        if let Some(PreviewSpan::Text(first)) = self.spans.first_mut() {
            *first = first.trim_start().to_string();
        }
        if let Some(PreviewSpan::Text(last)) = self.spans.last_mut() {
            *last = last.trim_end().to_string();
        }
        self.spans
            .retain(|span| !matches!(span, PreviewSpan::Text(text) if text.is_empty()));
    }

    /// The line as plain text, emoji by shortcode.
    pub fn to_plain_text(&self) -> String {
        self.spans
            .iter()
            .map(|span| match span {
                PreviewSpan::Text(text) => text.as_str(),
                PreviewSpan::Emoji { shortcode, .. } => shortcode.as_str(),
                PreviewSpan::ServiceDecoration { payload, .. } => payload.as_str(),
            })
            .collect()
    }
}

/// Single-line rendering for message previews; formatting is dropped.
pub struct PreviewOutput;

impl Output for PreviewOutput {
    fn name(&self) -> &'static str {
        "preview"
    }

    fn render(&self, ast: &[Node], state: &RenderState<'_>) -> Result<Rendered, MarkdownError> {
        let mut line = PreviewLine::default();
        collect(ast, state, &mut line);
        line.trim();
        Ok(Rendered::Preview(line))
    }
}

fn collect(nodes: &[Node], state: &RenderState<'_>, line: &mut PreviewLine) {
    for node in nodes {
        match node {
            Node::Text { content } => line.push_text(content),
            Node::InlineCode { content } | Node::Fence { content } => {
                line.push_text(&content.replace('\n', " "))
            }
            Node::CodeFence {
                unformatted_content, ..
            } => line.push_text(&unformatted_content.replace('\n', " ")),
            Node::Newline => line.push_text(" "),
            Node::Emoji { content } => line.spans.push(PreviewSpan::Emoji {
                shortcode: content.clone(),
                size: EMOJI_SIZE,
                allow_font_scaling: state.allow_font_scaling,
            }),
            Node::ServiceDecoration { content } => line.spans.push(PreviewSpan::ServiceDecoration {
                payload: content.clone(),
                meta: state.meta.cloned(),
            }),
            Node::Paragraph { content } | Node::BlockQuote { content } => {
                collect(content, state, line);
                line.push_text(" ");
            }
            Node::Del { content } | Node::Em { content } | Node::Strong { content } => {
                collect(content, state, line)
            }
        }
    }
}
