use crate::engine::Capture;
use crate::engine::cursor::Cursor;
use crate::error::MarkdownError;
use crate::grammar::{MessageParser, Node, ParseState};
use crate::languages;

/// Triple-backtick code blocks, optionally tagged with a language.
///
/// A registered language tag turns the block into highlighted code; any
/// other tag is left in the body untouched.
pub struct CodeFence;

impl CodeFence {
    pub const TICKS: &'static str = "```";

    /// Group 1 is the language tag (if registered and used), group 2 the body.
    pub fn capture(source: &str) -> Option<Capture<'_>> {
        let mut cur = Cursor::new(source);
        if !cur.eat_str(Self::TICKS) {
            return None;
        }
        let after_ticks = cur.pos();
        let info_start = if cur.eat_char(' ') { cur.pos() } else { after_ticks };

        // Each optional piece of the opener can be given back to the body,
        // tried from the greediest reading to the plainest.
        let mut openers = Vec::with_capacity(5);
        if let Some(tag) = languages::leading_tag(&source[info_start..]) {
            let after_tag = info_start + tag.len();
            if source[after_tag..].starts_with('\n') {
                openers.push((Some(tag), after_tag + 1));
            }
            openers.push((Some(tag), after_tag));
        }
        if source[info_start..].starts_with('\n') {
            openers.push((None, info_start + 1));
        }
        openers.push((None, info_start));
        if info_start != after_ticks {
            openers.push((None, after_ticks));
        }

        openers.into_iter().find_map(|(lang, body_start)| {
            let body_end = body_end(source, body_start, true)?;
            let mut end = body_end + Self::TICKS.len();
            if source[end..].starts_with('\n') {
                end += 1;
            }
            Some(
                Capture::new(&source[..end])
                    .with_group(lang)
                    .with_group(Some(&source[body_start..body_end])),
            )
        })
    }
}

/// Finds the closing ticks of a body starting at `start`.
///
/// The body holds at least one character and a backslash escapes the
/// character after it. With `strict`, ticks followed by a fourth backtick
/// do not close.
pub fn body_end(source: &str, start: usize, strict: bool) -> Option<usize> {
    let mut cur = Cursor::at(source, start);
    loop {
        if cur.pos() > start && cur.starts_with(CodeFence::TICKS) {
            let after = &cur.rest()[CodeFence::TICKS.len()..];
            if !(strict && after.starts_with('`')) {
                return Some(cur.pos());
            }
        }
        if cur.bump()? == '\\' {
            cur.bump()?;
        }
    }
}

pub fn match_fence<'s>(source: &'s str, _state: &ParseState, _previous: &str) -> Option<Capture<'s>> {
    CodeFence::capture(source)
}

pub fn parse_fence(capture: &Capture<'_>, _parser: &MessageParser, state: &ParseState) -> Result<Vec<Node>, MarkdownError> {
    let body = capture.text(2);
    let node = match capture.group(1) {
        Some(lang) if languages::is_supported(lang) => Node::CodeFence {
            content: state.highlighter.highlight(lang, body)?,
            unformatted_content: body.to_string(),
            lang: lang.to_string(),
        },
        _ => Node::Fence {
            content: body.to_string(),
        },
    };
    Ok(vec![node])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn scan(source: &str) -> Option<(&str, Option<&str>, &str)> {
        CodeFence::capture(source).map(|c| (c.full, c.group(1), c.text(2)))
    }

    #[rstest]
    #[case("```rust\nfn main() {}\n```\nrest", Some(("```rust\nfn main() {}\n```\n", Some("rust"), "fn main() {}\n")))]
    #[case("``` js\nx\n```", Some(("``` js\nx\n```", Some("js"), "x\n")))]
    #[case("```\ncode```", Some(("```\ncode```", None, "code")))]
    #[case("```inline```", Some(("```inline```", None, "inline")))]
    #[case("```rusty\nx```", Some(("```rusty\nx```", None, "rusty\nx")))]
    #[case("``` ```", Some(("``` ```", None, " ")))]
    #[case("```a\\```b```", Some(("```a\\```b```", None, "a\\```b")))]
    #[case("```unterminated", None)]
    #[case("``````", None)]
    fn scans_fences(#[case] source: &str, #[case] expected: Option<(&str, Option<&str>, &str)>) {
        assert_eq!(scan(source), expected);
    }

    #[test]
    fn tag_with_nothing_after_it_falls_back_to_body() {
        // "python" alone cannot be a tag: the body would be empty
        assert_eq!(scan("```python```"), Some(("```python```", None, "python")));
    }

    #[test]
    fn closing_ticks_skip_a_leading_extra_backtick() {
        assert_eq!(scan("```a````b```"), Some(("```a````", None, "a`")));
    }

    #[rstest]
    #[case(true, Some(5))]
    #[case(false, Some(4))]
    fn strict_closing_rejects_fourth_backtick(#[case] strict: bool, #[case] expected: Option<usize>) {
        assert_eq!(body_end("```a````", 3, strict), expected);
    }
}
