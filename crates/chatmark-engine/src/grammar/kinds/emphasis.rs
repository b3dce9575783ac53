use crate::engine::Capture;
use crate::engine::cursor::Cursor;
use crate::error::MarkdownError;
use crate::grammar::{MessageParser, Node, ParseState};

/// Single-character delimited spans: `_em_`, `*strong*`, `~del~`.
///
/// The span must sit on one line, must not start right after a word
/// character, and closes on the first delimiter that is not doubled.
/// A backslash escapes the next character.
pub struct Emphasis;

impl Emphasis {
    pub const EM: char = '_';
    pub const STRONG: char = '*';
    pub const DEL: char = '~';

    /// True when a span may open after `previous`.
    pub fn opens_after(previous: &str) -> bool {
        previous.chars().last().is_none_or(|c| !is_word_char(c))
    }

    /// Scans `d...d` at the start of `source`. Group 1 is the inner text.
    pub fn capture(source: &str, delimiter: char) -> Option<Capture<'_>> {
        let mut cur = Cursor::new(source);
        if !cur.eat_char(delimiter) {
            return None;
        }
        let inner_start = cur.pos();
        loop {
            if cur.pos() > inner_start
                && cur.peek() == Some(delimiter)
                && cur.peek_second() != Some(delimiter)
            {
                let inner = &source[inner_start..cur.pos()];
                cur.bump();
                return Some(Capture::new(cur.consumed()).with_group(Some(inner)));
            }
            match cur.bump()? {
                '\\' => {
                    cur.bump()?;
                }
                '\n' => return None,
                _ => {}
            }
        }
    }
}

/// ASCII `\w`.
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn delimited<'s>(source: &'s str, previous: &str, delimiter: char) -> Option<Capture<'s>> {
    if !Emphasis::opens_after(previous) {
        return None;
    }
    Emphasis::capture(source, delimiter)
}

pub fn match_em<'s>(source: &'s str, _state: &ParseState, previous: &str) -> Option<Capture<'s>> {
    delimited(source, previous, Emphasis::EM)
}

pub fn match_strong<'s>(source: &'s str, _state: &ParseState, previous: &str) -> Option<Capture<'s>> {
    delimited(source, previous, Emphasis::STRONG)
}

pub fn match_del<'s>(source: &'s str, _state: &ParseState, previous: &str) -> Option<Capture<'s>> {
    delimited(source, previous, Emphasis::DEL)
}

pub fn parse_em(capture: &Capture<'_>, parser: &MessageParser, state: &ParseState) -> Result<Vec<Node>, MarkdownError> {
    Ok(vec![Node::Em {
        content: parser.parse_nested(capture.text(1), state)?,
    }])
}

pub fn parse_strong(
    capture: &Capture<'_>,
    parser: &MessageParser,
    state: &ParseState,
) -> Result<Vec<Node>, MarkdownError> {
    Ok(vec![Node::Strong {
        content: parser.parse_nested(capture.text(1), state)?,
    }])
}

pub fn parse_del(capture: &Capture<'_>, parser: &MessageParser, state: &ParseState) -> Result<Vec<Node>, MarkdownError> {
    Ok(vec![Node::Del {
        content: parser.parse_nested(capture.text(1), state)?,
    }])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("*bold* rest", '*', Some(("*bold*", "bold")))]
    #[case("_a_", '_', Some(("_a_", "a")))]
    #[case("~gone~~", '~', Some(("~gone~~", "gone~")))]
    #[case("*a\\*b*", '*', Some(("*a\\*b*", "a\\*b")))]
    #[case("**", '*', None)]
    #[case("*a\nb*", '*', None)]
    #[case("*unclosed", '*', None)]
    #[case("*a**", '*', Some(("*a**", "a*")))]
    fn scans_delimited_spans(#[case] source: &str, #[case] delimiter: char, #[case] expected: Option<(&str, &str)>) {
        let got = Emphasis::capture(source, delimiter).map(|c| (c.full, c.text(1)));
        assert_eq!(got, expected);
    }

    #[rstest]
    #[case("", true)]
    #[case("hello ", true)]
    #[case("(", true)]
    #[case("é", true)]
    #[case("word", false)]
    #[case("snake_", false)]
    #[case("9", false)]
    fn opens_only_after_non_word(#[case] previous: &str, #[case] expected: bool) {
        assert_eq!(Emphasis::opens_after(previous), expected);
    }

    #[test]
    fn doubled_delimiter_closes_on_its_second_half() {
        let capture = Emphasis::capture("*a** b*", '*').unwrap();
        assert_eq!(capture.full, "*a**");
        assert_eq!(capture.text(1), "a*");
    }
}
