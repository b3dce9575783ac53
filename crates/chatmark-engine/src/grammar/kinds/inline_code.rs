use crate::engine::Capture;
use crate::engine::cursor::Cursor;
use crate::error::MarkdownError;
use crate::grammar::{MessageParser, Node, ParseState};

/// Single-backtick code spans.
///
/// Neither delimiter may be part of a longer backtick run, whitespace just
/// inside the delimiters is trimmed, and the content must end on a
/// character other than a backtick or newline.
pub struct InlineCode;

impl InlineCode {
    pub const TICK: char = '`';
    /// A closing backtick further than this past the padding is not looked for.
    pub const MAX_SPAN_LEN: usize = 2048;

    /// Group 1 is the trimmed content.
    pub fn capture(source: &str) -> Option<Capture<'_>> {
        let mut cur = Cursor::new(source);
        if !cur.eat_char(Self::TICK) || cur.peek() == Some(Self::TICK) {
            return None;
        }
        let open = cur.pos();
        cur.eat_while(char::is_whitespace);
        if cur.peek()? == Self::TICK {
            return Self::capture_after_padding(source, open, cur.pos());
        }
        let start = cur.pos();
        let (close, end) = Self::first_close(source, start)?;
        Some(Self::span(source, close, start, end))
    }

    /// `` ` `` then only whitespace up to another backtick at `inner`.
    ///
    /// The content has to start inside the padding: on its last character
    /// when that can run on to a close, else on the last character that may
    /// end content by itself.
    fn capture_after_padding(source: &str, open: usize, inner: usize) -> Option<Capture<'_>> {
        let padding = &source[open..inner];
        let (offset, last) = padding.char_indices().last()?;
        let last_start = open + offset;
        let closes_here = !source[inner + 1..].starts_with(Self::TICK);
        if closes_here && last != '\n' {
            return Some(Self::span(source, inner, last_start, inner));
        }
        if let Some((close, end)) = Self::first_close(source, inner + 1) {
            return Some(Self::span(source, close, last_start, end));
        }
        if !closes_here {
            return None;
        }
        let (offset, c) = padding.char_indices().rev().find(|&(_, c)| c != '\n')?;
        Some(Self::span(source, inner, open + offset, open + offset + c.len_utf8()))
    }

    /// The first lone backtick at or after `from` that can close a span,
    /// with where that span's content ends.
    fn first_close(source: &str, from: usize) -> Option<(usize, usize)> {
        let limit = from + Self::MAX_SPAN_LEN;
        source[from..]
            .match_indices(Self::TICK)
            .map(|(offset, _)| from + offset)
            .take_while(|&close| close <= limit)
            .filter(|&close| !source[close + 1..].starts_with(Self::TICK))
            .find_map(|close| Self::content_end(source, close).map(|end| (close, end)))
    }

    /// Content ends on something other than a backtick or newline, with
    /// only whitespace between it and `close`.
    fn content_end(source: &str, close: usize) -> Option<usize> {
        let padding = source[..close].trim_end_matches(char::is_whitespace).len();
        if !source[..padding].ends_with(Self::TICK) {
            return Some(padding);
        }
        source[padding..close]
            .char_indices()
            .find(|&(_, c)| c != '\n')
            .map(|(offset, c)| padding + offset + c.len_utf8())
    }

    fn span(source: &str, close: usize, start: usize, end: usize) -> Capture<'_> {
        Capture::new(&source[..close + Self::TICK.len_utf8()]).with_group(Some(&source[start..end]))
    }
}

pub fn match_inline_code<'s>(source: &'s str, _state: &ParseState, _previous: &str) -> Option<Capture<'s>> {
    InlineCode::capture(source)
}

pub fn parse_inline_code(
    capture: &Capture<'_>,
    _parser: &MessageParser,
    _state: &ParseState,
) -> Result<Vec<Node>, MarkdownError> {
    Ok(vec![Node::InlineCode {
        content: capture.text(1).to_string(),
    }])
}
