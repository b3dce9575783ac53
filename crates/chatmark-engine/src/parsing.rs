//! Turning a raw chat message into a node tree.

use std::sync::Arc;

use chatmark_config::Platform;

use crate::engine::ParseOptions;
use crate::error::MarkdownError;
use crate::grammar::{MarkdownMeta, Node, PARSER, ParseState};
use crate::highlight::{Highlighter, default_highlighter};

/// What a parse needs to know about its surroundings.
#[derive(Debug, Clone)]
pub struct ParseContext {
    pub platform: Platform,
    pub meta: Option<Arc<MarkdownMeta>>,
    pub highlighter: Arc<dyn Highlighter>,
}

impl Default for ParseContext {
    fn default() -> Self {
        Self {
            platform: Platform::default(),
            meta: None,
            highlighter: default_highlighter(),
        }
    }
}

impl ParseContext {
    pub fn for_platform(platform: Platform) -> Self {
        Self {
            platform,
            ..Self::default()
        }
    }
}

/// Parses a message in block mode.
///
/// Surrounding whitespace is trimmed and exactly one trailing newline is
/// added, so a message never ends in a dangling blank line.
pub fn parse_message(input: &str, context: &ParseContext) -> Result<Vec<Node>, MarkdownError> {
    let source = format!("{}\n", input.trim());
    let state = ParseState::new(context.platform, Arc::clone(&context.highlighter)).with_meta(context.meta.clone());
    log::trace!("parsing {} byte message for {:?}", source.len(), context.platform);
    PARSER.parse(
        &source,
        state,
        ParseOptions {
            inline: false,
            disable_auto_block_newlines: true,
        },
    )
}
