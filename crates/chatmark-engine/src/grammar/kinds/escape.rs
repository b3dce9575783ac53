use crate::engine::Capture;
use crate::error::MarkdownError;
use crate::grammar::{MessageParser, Node, ParseState};

/// A backslash before punctuation yields the punctuation as plain text.
pub fn match_escape<'s>(source: &'s str, _state: &ParseState, _previous: &str) -> Option<Capture<'s>> {
    let escaped = source.strip_prefix('\\')?.chars().next()?;
    if escaped.is_ascii_alphanumeric() || escaped.is_whitespace() {
        return None;
    }
    let end = 1 + escaped.len_utf8();
    Some(Capture::new(&source[..end]).with_group(Some(&source[1..end])))
}

pub fn parse_escape(capture: &Capture<'_>, _parser: &MessageParser, _state: &ParseState) -> Result<Vec<Node>, MarkdownError> {
    Ok(vec![Node::text(capture.text(1))])
}
