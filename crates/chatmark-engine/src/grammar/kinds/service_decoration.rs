use crate::engine::Capture;
use crate::error::MarkdownError;
use crate::grammar::{MessageParser, Node, ParseState};

/// `$>kb$payload$<kb$`: an opaque payload the host renders itself.
pub struct ServiceDecoration;

impl ServiceDecoration {
    pub const OPEN: &'static str = "$>kb$";
    pub const CLOSE: &'static str = "$<kb$";

    /// Group 1 is the payload, which may not span lines.
    pub fn capture(source: &str) -> Option<Capture<'_>> {
        let after_open = source.strip_prefix(Self::OPEN)?;
        let payload_len = after_open.find(Self::CLOSE)?;
        let payload = &after_open[..payload_len];
        if payload.contains(is_line_terminator) {
            return None;
        }
        let end = Self::OPEN.len() + payload_len + Self::CLOSE.len();
        Some(Capture::new(&source[..end]).with_group(Some(payload)))
    }
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

pub fn match_service_decoration<'s>(source: &'s str, _state: &ParseState, _previous: &str) -> Option<Capture<'s>> {
    ServiceDecoration::capture(source)
}

pub fn parse_service_decoration(
    capture: &Capture<'_>,
    _parser: &MessageParser,
    _state: &ParseState,
) -> Result<Vec<Node>, MarkdownError> {
    Ok(vec![Node::ServiceDecoration {
        content: capture.text(1).to_string(),
    }])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("$>kb$eyJ0eXBlIjoxfQ==$<kb$ tail", Some(("$>kb$eyJ0eXBlIjoxfQ==$<kb$", "eyJ0eXBlIjoxfQ==")))]
    #[case("$>kb$$<kb$", Some(("$>kb$$<kb$", "")))]
    #[case("$>kb$a$<kb$b$<kb$", Some(("$>kb$a$<kb$", "a")))]
    #[case("$>kb$a\nb$<kb$", None)]
    #[case("$>kb$unclosed", None)]
    #[case("$kb$x$<kb$", None)]
    fn scans_decorations(#[case] source: &str, #[case] expected: Option<(&str, &str)>) {
        assert_eq!(ServiceDecoration::capture(source).map(|c| (c.full, c.text(1))), expected);
    }
}
