use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::emoji_data::COMMON_TLDS;
use crate::engine::Capture;
use crate::error::MarkdownError;
use crate::grammar::kinds::emphasis::is_word_char;
use crate::grammar::{MessageParser, Node, ParseState};

/// Plain text: at least one character, then up to the next point where
/// another rule might want to start.
pub struct Text;

/// Longest email address scanned for; anything longer is left to text.
const MAX_EMAIL_LEN: usize = 254;
/// Longest host name scanned for.
const MAX_DOMAIN_LEN: usize = 253;

impl Text {
    pub fn capture(source: &str) -> Option<Capture<'_>> {
        let first = source.chars().next()?;
        let mut end = first.len_utf8();
        // every position in one word run sees the same link lookahead
        let mut link_ahead = None;
        while let Some(c) = source[end..].chars().next() {
            if Self::stops_at(c) {
                break;
            }
            if is_word_char(c) {
                if *link_ahead.get_or_insert_with(|| starts_link(&source[end..])) {
                    break;
                }
            } else {
                link_ahead = None;
            }
            end += c.len_utf8();
        }
        Some(Capture::new(&source[..end]))
    }

    /// Punctuation, anything past Latin-1, and newlines end a text run.
    fn stops_at(c: char) -> bool {
        c == '\n' || c >= '\u{c0}' || !(c.is_ascii_alphanumeric() || c.is_whitespace())
    }
}

/// Looks like the start of an email address, a domain with a common TLD,
/// or a `scheme:` link.
fn starts_link(rest: &str) -> bool {
    starts_email(rest) || starts_domain(rest) || starts_scheme(rest)
}

/// Length of the leading run of ASCII word characters.
fn word_len(s: &str) -> usize {
    s.bytes().take_while(|&b| is_word_char(b as char)).count()
}

/// `[\w.-]+@`
fn starts_email(rest: &str) -> bool {
    let local = rest
        .bytes()
        .take(MAX_EMAIL_LEN)
        .take_while(|&b| is_word_char(b as char) || b == b'.' || b == b'-')
        .count();
    local > 0 && rest[local..].starts_with('@')
}

static TLDS: Lazy<HashSet<&'static str>> = Lazy::new(|| COMMON_TLDS.iter().copied().collect());
static LONGEST_TLD: Lazy<usize> = Lazy::new(|| COMMON_TLDS.iter().map(|tld| tld.len()).max().unwrap_or(0));

/// `(\w+\.)+tld`
fn starts_domain(rest: &str) -> bool {
    let host = &rest[..floor_char_boundary(rest, MAX_DOMAIN_LEN)];
    let mut at = 0;
    loop {
        let label = word_len(&host[at..]);
        if label == 0 || !host[at + label..].starts_with('.') {
            return false;
        }
        at += label + 1;
        let next = &host[at..at + word_len(&host[at..])];
        if (1..=next.len().min(*LONGEST_TLD)).any(|len| TLDS.contains(&next[..len])) {
            return true;
        }
    }
}

fn floor_char_boundary(s: &str, max: usize) -> usize {
    if max >= s.len() {
        return s.len();
    }
    (0..=max).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0)
}

/// `\w+:\S`
fn starts_scheme(rest: &str) -> bool {
    let scheme = word_len(rest);
    if scheme == 0 {
        return false;
    }
    let mut after = rest[scheme..].chars();
    after.next() == Some(':') && after.next().is_some_and(|c| !c.is_whitespace())
}

/// Refused on mobile outside a paragraph; the fallback paragraph takes it.
pub fn match_text<'s>(source: &'s str, state: &ParseState, _previous: &str) -> Option<Capture<'s>> {
    if state.is_mobile() && !state.in_paragraph {
        return None;
    }
    Text::capture(source)
}

pub fn parse_text(capture: &Capture<'_>, _parser: &MessageParser, _state: &ParseState) -> Result<Vec<Node>, MarkdownError> {
    Ok(vec![Node::text(capture.full)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("hello world", "hello world")]
    #[case("hello, world", "hello")]
    #[case("say *hi*", "say ")]
    #[case("two\nlines", "two")]
    #[case("*", "*")]
    #[case("café", "caf")]
    #[case("mail bob@example.com", "mail ")]
    #[case("visit example.com today", "visit ")]
    #[case("see https://x", "see ")]
    #[case("time 10:30", "time ")]
    #[case("a: b", "a")]
    #[case("version 1.2.3", "version 1")]
    fn stops_where_another_rule_may_start(#[case] source: &str, #[case] expected: &str) {
        assert_eq!(Text::capture(source).map(|c| c.full), Some(expected));
    }

    #[test]
    fn always_takes_at_least_one_char() {
        assert_eq!(Text::capture("😀😀").map(|c| c.full), Some("😀"));
        assert_eq!(Text::capture("").map(|c| c.full), None);
    }

    #[rstest]
    #[case("foo.bar.com", true)]
    #[case("foo.community", true)]
    #[case("foo.bar", false)]
    #[case(".com", false)]
    fn domain_detection(#[case] rest: &str, #[case] expected: bool) {
        assert_eq!(starts_domain(rest), expected);
    }

    #[test]
    fn overlong_addresses_are_plain_text() {
        let host = format!("{}.com", "a".repeat(MAX_DOMAIN_LEN));
        assert!(!starts_domain(&host));
        let email = format!("{}@example.com", "b".repeat(MAX_EMAIL_LEN + 1));
        assert!(!starts_email(&email));
    }

    #[test]
    fn long_words_are_one_capture() {
        let word = "a".repeat(60_000);
        assert_eq!(Text::capture(&word).map(|c| c.full.len()), Some(60_000));
        let words = format!("{} b", "a".repeat(5_000));
        assert_eq!(Text::capture(&words).map(|c| c.full), Some(words.as_str()));
    }
}
