use crate::engine::Capture;
use crate::engine::cursor::Cursor;
use crate::error::MarkdownError;
use crate::grammar::kinds::code_fence::CodeFence;
use crate::grammar::{MessageParser, Node, ParseState};

/// Runs of `>`-prefixed lines.
///
/// A quote only opens at the start of a line, and a line's quoted text
/// stops short of any character that is followed by a code fence.
pub struct BlockQuote;

impl BlockQuote {
    pub const PREFIX: char = '>';
    /// Quotes nested deeper than this stay literal text.
    pub const MAX_LEVEL: u8 = 6;

    /// True when `previous` leaves us at the start of a line.
    pub fn opens_after(previous: &str) -> bool {
        previous.is_empty() || previous.trim_end_matches(' ').ends_with('\n')
    }

    pub fn capture(source: &str) -> Option<Capture<'_>> {
        let mut end = 0;
        while let Some(len) = Self::quoted_line_len(&source[end..]) {
            end += len;
        }
        (end > 0).then(|| Capture::new(&source[..end]))
    }

    /// Length of one ` *>text\n?` unit at the start of `s`.
    fn quoted_line_len(s: &str) -> Option<usize> {
        let mut cur = Cursor::new(s);
        cur.eat_while(|c| c == ' ');
        if !cur.eat_char(Self::PREFIX) {
            return None;
        }
        let text_start = cur.pos();
        while let Some(c) = cur.peek() {
            if c == '\n' || s[cur.pos() + c.len_utf8()..].starts_with(CodeFence::TICKS) {
                break;
            }
            cur.bump();
        }
        if cur.pos() == text_start {
            return None;
        }
        cur.eat_char('\n');
        Some(cur.pos())
    }

    /// Drops one level of `>` (and the spaces around it) from every line.
    pub fn strip_markers(quoted: &str) -> String {
        quoted
            .split_inclusive('\n')
            .map(|line| match line.trim_start_matches(' ').strip_prefix(Self::PREFIX) {
                Some(rest) => rest.trim_start_matches(' '),
                None => line,
            })
            .collect()
    }
}

pub fn match_block_quote<'s>(source: &'s str, state: &ParseState, previous: &str) -> Option<Capture<'s>> {
    if state.block_quote_level > BlockQuote::MAX_LEVEL || !BlockQuote::opens_after(previous) {
        return None;
    }
    BlockQuote::capture(source)
}

pub fn parse_block_quote(
    capture: &Capture<'_>,
    parser: &MessageParser,
    state: &ParseState,
) -> Result<Vec<Node>, MarkdownError> {
    let content = BlockQuote::strip_markers(capture.full);
    Ok(vec![Node::BlockQuote {
        content: parser.parse_nested(&content, &state.entering_quote())?,
    }])
}
