use crate::engine::Capture;
use crate::engine::cursor::Cursor;
use crate::error::MarkdownError;
use crate::grammar::kinds::code_fence::{CodeFence, body_end};
use crate::grammar::kinds::paragraph::wrap_in_paragraph;
use crate::grammar::{MessageParser, Node, ParseState};

/// A quote line whose text runs into a code fence.
///
/// Produces a block quote holding the lead-in text followed by an
/// unhighlighted fence.
pub struct QuotedFence;

impl QuotedFence {
    /// Group 1 is the lead-in text, group 2 the fence body.
    pub fn capture(source: &str) -> Option<Capture<'_>> {
        let mut cur = Cursor::new(source);
        cur.eat_while(|c| c == ' ');
        if !cur.eat_char('>') {
            return None;
        }
        let after_marker = cur.pos();
        let spaces = cur.eat_while(|c| c == ' ');
        // spaces after the marker are handed back to the lead-in when needed
        (after_marker..=after_marker + spaces)
            .rev()
            .find_map(|lead_start| Self::capture_from(source, lead_start))
    }

    fn capture_from(source: &str, lead_start: usize) -> Option<Capture<'_>> {
        let lead_end = lead_in_end(source, lead_start);
        let opener = format!(" {}", CodeFence::TICKS);
        if !source[lead_end..].starts_with(&opener) {
            return None;
        }
        let after_opener = lead_end + opener.len();
        let mut body_starts = vec![after_opener];
        if source[after_opener..].starts_with('\n') {
            body_starts.insert(0, after_opener + 1);
        }
        body_starts.into_iter().find_map(|body_start| {
            let body_end = body_end(source, body_start, false)?;
            let mut end = body_end + CodeFence::TICKS.len();
            if source[end..].starts_with('\n') {
                end += 1;
            }
            Some(
                Capture::new(&source[..end])
                    .with_group(Some(&source[lead_start..lead_end]))
                    .with_group(Some(&source[body_start..body_end])),
            )
        })
    }
}

/// End of the lead-in: the first newline, or the first char that is
/// followed by ticks.
fn lead_in_end(source: &str, start: usize) -> usize {
    source[start..]
        .char_indices()
        .find(|&(offset, c)| {
            c == '\n' || source[start + offset + c.len_utf8()..].starts_with(CodeFence::TICKS)
        })
        .map_or(source.len(), |(offset, _)| start + offset)
}

pub fn match_quoted_fence<'s>(source: &'s str, _state: &ParseState, _previous: &str) -> Option<Capture<'s>> {
    QuotedFence::capture(source)
}

pub fn parse_quoted_fence(
    capture: &Capture<'_>,
    parser: &MessageParser,
    state: &ParseState,
) -> Result<Vec<Node>, MarkdownError> {
    let lead_in = capture.text(1);
    let mut content = if state.is_mobile() && !lead_in.is_empty() {
        wrap_in_paragraph(lead_in, parser, state)?
    } else {
        parser.parse_inline(lead_in, state)?
    };
    content.push(Node::Fence {
        content: capture.text(2).to_string(),
    });
    Ok(vec![Node::BlockQuote { content }])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn scan(source: &str) -> Option<(&str, &str, &str)> {
        QuotedFence::capture(source).map(|c| (c.full, c.text(1), c.text(2)))
    }

    #[rstest]
    #[case("> ```code```", Some(("> ```code```", "", "code")))]
    #[case("> look ```\nx = 1\n```\nafter", Some(("> look ```\nx = 1\n```\n", "look", "x = 1\n")))]
    #[case(">  ```a```", Some((">  ```a```", "", "a")))]
    #[case("  > see ```b````", Some(("  > see ```b```", "see", "b")))]
    #[case("> no fence here\n", None)]
    #[case("> ```unterminated", None)]
    #[case("text ```x```", None)]
    fn scans_quoted_fences(#[case] source: &str, #[case] expected: Option<(&str, &str, &str)>) {
        assert_eq!(scan(source), expected);
    }

    #[test]
    fn lead_in_cannot_cross_lines() {
        assert_eq!(scan("> a\nb ```x```"), None);
    }
}
