use thiserror::Error;

use crate::highlight::HighlightError;

/// Failures of the parse/render pipeline.
///
/// None of these reach the user: [`crate::render_message`] turns every one
/// of them into the plain-text fallback.
#[derive(Debug, Error)]
pub enum MarkdownError {
    #[error("no rule matched the input starting at {snippet:?}")]
    NoMatchingRule { snippet: String },

    #[error("rule {rule} matched without consuming any input")]
    EmptyCapture { rule: String },

    #[error("input nests deeper than {limit} levels")]
    NestingTooDeep { limit: usize },

    #[error("input of {len} bytes exceeds the {max} byte limit")]
    InputTooLarge { len: usize, max: usize },

    #[error("failed to highlight code fence: {0}")]
    Highlight(#[from] HighlightError),

    #[error("{renderer} output cannot render a {kind} node")]
    UnexpectedNode {
        renderer: &'static str,
        kind: &'static str,
    },
}

impl MarkdownError {
    /// The pipeline stage that failed, for log messages.
    pub fn stage(&self) -> &'static str {
        match self {
            MarkdownError::UnexpectedNode { .. } => "rendering",
            _ => "parsing",
        }
    }
}
