use crate::engine::Capture;
use crate::error::MarkdownError;
use crate::grammar::{MessageParser, Node, ParseState};

pub fn match_newline<'s>(source: &'s str, _state: &ParseState, _previous: &str) -> Option<Capture<'s>> {
    source.starts_with('\n').then(|| Capture::new(&source[..1]))
}

pub fn parse_newline(_capture: &Capture<'_>, _parser: &MessageParser, _state: &ParseState) -> Result<Vec<Node>, MarkdownError> {
    Ok(vec![Node::Newline])
}
