use crate::engine::Capture;
use crate::engine::cursor::Cursor;
use crate::error::MarkdownError;
use crate::grammar::{MessageParser, Node, ParseState};

/// Runs of text up to a blank line, a quote line, or a code fence.
///
/// Single newlines stay inside the paragraph; on desktop they become
/// newline nodes among the paragraph's children.
pub struct Paragraph;

impl Paragraph {
    /// Group 1 is the paragraph text, without the newline that ends it.
    pub fn capture(source: &str) -> Option<Capture<'_>> {
        let mut cur = Cursor::new(source);
        while let Some(c) = cur.peek() {
            let after = &cur.rest()[c.len_utf8()..];
            let admitted = match c {
                '\n' => !Self::breaks_before(after),
                '`' => !after.starts_with("``"),
                _ => true,
            };
            if !admitted {
                break;
            }
            cur.bump();
        }
        let text_end = cur.pos();
        if text_end == 0 {
            return None;
        }
        cur.eat_char('\n');
        Some(Capture::new(cur.consumed()).with_group(Some(&source[..text_end])))
    }

    /// A newline ends the paragraph when a blank line or a quote follows.
    fn breaks_before(after_newline: &str) -> bool {
        let line = after_newline.trim_start_matches(' ');
        line.starts_with('\n') || line.starts_with('>')
    }
}

/// One paragraph node around the inline parse of `content`.
pub fn wrap_in_paragraph(content: &str, parser: &MessageParser, state: &ParseState) -> Result<Vec<Node>, MarkdownError> {
    Ok(vec![Node::Paragraph {
        content: parser.parse_inline(content, &state.entering_paragraph())?,
    }])
}

pub fn match_paragraph<'s>(source: &'s str, _state: &ParseState, _previous: &str) -> Option<Capture<'s>> {
    Paragraph::capture(source)
}

pub fn parse_paragraph(
    capture: &Capture<'_>,
    parser: &MessageParser,
    state: &ParseState,
) -> Result<Vec<Node>, MarkdownError> {
    let text = capture.text(1);
    let text = if state.is_mobile() {
        text.strip_suffix('\n').unwrap_or(text)
    } else {
        text
    };
    wrap_in_paragraph(text, parser, state)
}

/// Mobile only: anything no other rule claims outside a paragraph gets
/// wrapped in one, since bare text cannot be shown there.
pub fn match_fallback_paragraph<'s>(source: &'s str, state: &ParseState, _previous: &str) -> Option<Capture<'s>> {
    (state.is_mobile() && !state.in_paragraph).then(|| Capture::new(source))
}

pub fn parse_fallback_paragraph(
    capture: &Capture<'_>,
    parser: &MessageParser,
    state: &ParseState,
) -> Result<Vec<Node>, MarkdownError> {
    wrap_in_paragraph(capture.full, parser, state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatmark_config::Platform;
    use rstest::rstest;

    #[rstest]
    #[case("one\ntwo\n", "one\ntwo\n", "one\ntwo\n")]
    #[case("one\n\ntwo", "one\n", "one")]
    #[case("one\n  \ntwo", "one\n", "one")]
    #[case("one\n> quote", "one\n", "one")]
    #[case("one\n  > quote", "one\n", "one")]
    #[case("say ```code```", "say ", "say ")]
    #[case("a `tick` b\n", "a `tick` b\n", "a `tick` b\n")]
    #[case("a``b\n", "a``b\n", "a``b\n")]
    fn captures_up_to_a_break(#[case] source: &str, #[case] full: &str, #[case] text: &str) {
        let capture = Paragraph::capture(source).unwrap();
        assert_eq!((capture.full, capture.text(1)), (full, text));
    }

    #[rstest]
    #[case("```fence")]
    #[case("\n\nx")]
    #[case("")]
    fn refuses_when_nothing_is_admitted(#[case] source: &str) {
        assert_eq!(Paragraph::capture(source), None);
    }

    #[test]
    fn fallback_only_applies_on_mobile_outside_paragraphs() {
        let mobile = ParseState {
            platform: Platform::Mobile,
            ..ParseState::default()
        };
        assert!(match_fallback_paragraph("x", &mobile, "").is_some());
        assert!(match_fallback_paragraph("x", &mobile.entering_paragraph(), "").is_none());
        assert!(match_fallback_paragraph("x", &ParseState::default(), "").is_none());
    }
}
