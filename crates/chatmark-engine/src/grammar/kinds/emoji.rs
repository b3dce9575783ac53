use crate::emoji_data;
use crate::engine::Capture;
use crate::error::MarkdownError;
use crate::grammar::{MessageParser, Node, ParseState};

pub fn match_emoji<'s>(source: &'s str, _state: &ParseState, _previous: &str) -> Option<Capture<'s>> {
    emoji_data::match_emoji(source).map(Capture::new)
}

/// Literal emoji are stored by shortcode so every renderer sees one spelling.
pub fn parse_emoji(capture: &Capture<'_>, _parser: &MessageParser, _state: &ParseState) -> Result<Vec<Node>, MarkdownError> {
    let shortcode = emoji_data::shortcode_for(capture.full).unwrap_or(capture.full);
    Ok(vec![Node::emoji(shortcode)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("🔥", ":fire:")]
    #[case(":fire:", ":fire:")]
    #[case(":wave::skin-tone-4:", ":wave::skin-tone-4:")]
    fn normalizes_to_shortcode(#[case] source: &str, #[case] expected: &str) {
        let state = ParseState::default();
        let capture = match_emoji(source, &state, "").unwrap();
        let parsed = parse_emoji(&capture, &crate::grammar::PARSER, &state).unwrap();
        assert_eq!(parsed, vec![Node::emoji(expected)]);
    }
}
