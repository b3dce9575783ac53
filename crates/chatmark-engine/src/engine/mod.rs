//! # Rule Engine
//!
//! A small ordered-rule parser. Each [`Rule`] pairs a matcher with a node
//! builder; at every position the lowest-ordered rule whose scope admits
//! the current mode and whose matcher accepts the input wins. Matchers see
//! the text consumed by the previous sibling match so they can refuse to
//! start mid-word.
//!
//! The engine knows nothing about chat markdown. The grammar lives in
//! [`crate::grammar`] and plugs in its own node and state types.

pub mod cursor;

use crate::error::MarkdownError;

/// Nested parses deeper than this fail with [`MarkdownError::NestingTooDeep`].
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Which parse mode a rule takes part in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Block,
    Inline,
    Any,
}

impl Scope {
    pub fn admits(self, inline: bool) -> bool {
        match self {
            Scope::Block => !inline,
            Scope::Inline => inline,
            Scope::Any => true,
        }
    }
}

/// Parse state threaded through every rule.
///
/// Nested parses work on modified copies, so a rule can never leak a
/// change into its siblings.
pub trait EngineState: Clone {
    fn is_inline(&self) -> bool;
    fn with_inline(&self, inline: bool) -> Self;
    fn depth(&self) -> usize;
    fn with_depth(&self, depth: usize) -> Self;
}

/// The text a matcher accepted, plus its sub-captures.
///
/// `full` is always a prefix of the matcher's input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture<'s> {
    pub full: &'s str,
    groups: Vec<Option<&'s str>>,
}

impl<'s> Capture<'s> {
    pub fn new(full: &'s str) -> Self {
        Self {
            full,
            groups: Vec::new(),
        }
    }

    /// Appends the next numbered group.
    pub fn with_group(mut self, group: Option<&'s str>) -> Self {
        self.groups.push(group);
        self
    }

    /// Group `index`, counting from 1. Group 0 is the full match.
    pub fn group(&self, index: usize) -> Option<&'s str> {
        match index {
            0 => Some(self.full),
            n => self.groups.get(n - 1).copied().flatten(),
        }
    }

    /// Group `index`, or `""` when it did not participate.
    pub fn text(&self, index: usize) -> &'s str {
        self.group(index).unwrap_or("")
    }
}

/// Accepts a prefix of `source` given the state and the previous sibling capture.
pub type MatchFn<S> = for<'s> fn(&'s str, &S, &str) -> Option<Capture<'s>>;

/// Builds nodes from a capture, recursing through the parser when needed.
pub type ParseFn<K, N, S> = fn(&Capture<'_>, &Parser<K, N, S>, &S) -> Result<Vec<N>, MarkdownError>;

pub struct Rule<K, N, S> {
    pub kind: K,
    pub scope: Scope,
    pub order: u32,
    pub matcher: MatchFn<S>,
    pub parser: ParseFn<K, N, S>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    pub inline: bool,
    /// Skips the `"\n\n"` a block-mode parse appends to its input.
    pub disable_auto_block_newlines: bool,
}

pub struct Parser<K, N, S> {
    rules: Vec<Rule<K, N, S>>,
    max_depth: usize,
}

impl<K, N, S> Parser<K, N, S>
where
    K: Copy + std::fmt::Debug,
    S: EngineState,
{
    /// Builds a parser. Rules sharing an order keep their given order.
    pub fn new(mut rules: Vec<Rule<K, N, S>>) -> Self {
        rules.sort_by_key(|rule| rule.order);
        Self {
            rules,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Rule kinds in the order they are tried.
    pub fn kinds(&self) -> impl Iterator<Item = K> + '_ {
        self.rules.iter().map(|rule| rule.kind)
    }

    /// Top-level entry point.
    pub fn parse(&self, source: &str, state: S, options: ParseOptions) -> Result<Vec<N>, MarkdownError> {
        let state = state.with_inline(options.inline);
        if !options.inline && !options.disable_auto_block_newlines {
            let padded = format!("{source}\n\n");
            return self.parse_nested(&padded, &state);
        }
        self.parse_nested(source, &state)
    }

    /// Parses `source` in whatever mode `state` is in.
    pub fn parse_nested(&self, source: &str, state: &S) -> Result<Vec<N>, MarkdownError> {
        let depth = state.depth() + 1;
        if depth > self.max_depth {
            return Err(MarkdownError::NestingTooDeep {
                limit: self.max_depth,
            });
        }
        let state = state.with_depth(depth);

        let mut nodes = Vec::new();
        let mut rest = source;
        let mut previous = "";
        while !rest.is_empty() {
            let Some((rule, capture)) = self.first_match(rest, &state, previous) else {
                return Err(MarkdownError::NoMatchingRule {
                    snippet: rest.chars().take(40).collect(),
                });
            };
            if capture.full.is_empty() {
                return Err(MarkdownError::EmptyCapture {
                    rule: format!("{:?}", rule.kind),
                });
            }
            nodes.extend((rule.parser)(&capture, self, &state)?);
            previous = capture.full;
            rest = &rest[capture.full.len()..];
        }
        Ok(nodes)
    }

    pub fn parse_inline(&self, source: &str, state: &S) -> Result<Vec<N>, MarkdownError> {
        self.parse_nested(source, &state.with_inline(true))
    }

    pub fn parse_block(&self, source: &str, state: &S) -> Result<Vec<N>, MarkdownError> {
        self.parse_nested(source, &state.with_inline(false))
    }

    fn first_match<'s>(
        &self,
        source: &'s str,
        state: &S,
        previous: &str,
    ) -> Option<(&Rule<K, N, S>, Capture<'s>)> {
        let inline = state.is_inline();
        self.rules
            .iter()
            .filter(|rule| rule.scope.admits(inline))
            .find_map(|rule| (rule.matcher)(source, state, previous).map(|capture| (rule, capture)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Clone, Default)]
    struct TestState {
        inline: bool,
        depth: usize,
    }

    impl EngineState for TestState {
        fn is_inline(&self) -> bool {
            self.inline
        }
        fn with_inline(&self, inline: bool) -> Self {
            Self { inline, ..self.clone() }
        }
        fn depth(&self) -> usize {
            self.depth
        }
        fn with_depth(&self, depth: usize) -> Self {
            Self { depth, ..self.clone() }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Kind {
        Word,
        Other,
        Group,
        Nothing,
    }

    type TestParser = Parser<Kind, String, TestState>;

    fn match_word<'s>(source: &'s str, _: &TestState, _: &str) -> Option<Capture<'s>> {
        let end = source
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(source.len());
        (end > 0).then(|| Capture::new(&source[..end]))
    }

    fn match_char<'s>(source: &'s str, _: &TestState, _: &str) -> Option<Capture<'s>> {
        let c = source.chars().next()?;
        Some(Capture::new(&source[..c.len_utf8()]))
    }

    fn match_group<'s>(source: &'s str, _: &TestState, _: &str) -> Option<Capture<'s>> {
        let inner = source.strip_prefix('(')?;
        let end = inner.rfind(')')?;
        Some(Capture::new(&source[..end + 2]).with_group(Some(&inner[..end])))
    }

    fn match_after_space<'s>(source: &'s str, _: &TestState, previous: &str) -> Option<Capture<'s>> {
        if !previous.ends_with(' ') {
            return None;
        }
        match_word(source, &TestState::default(), previous)
    }

    fn match_nothing<'s>(source: &'s str, _: &TestState, _: &str) -> Option<Capture<'s>> {
        Some(Capture::new(&source[..0]))
    }

    fn label_word(capture: &Capture<'_>, _: &TestParser, state: &TestState) -> Result<Vec<String>, MarkdownError> {
        let mode = if state.is_inline() { "i" } else { "b" };
        Ok(vec![format!("{mode}:{}", capture.full)])
    }

    fn label_other(capture: &Capture<'_>, _: &TestParser, _: &TestState) -> Result<Vec<String>, MarkdownError> {
        Ok(vec![format!("c:{}", capture.full)])
    }

    fn parse_group(
        capture: &Capture<'_>,
        parser: &TestParser,
        state: &TestState,
    ) -> Result<Vec<String>, MarkdownError> {
        let inner = parser.parse_inline(capture.text(1), state)?;
        Ok(vec![format!("[{}]", inner.join(","))])
    }

    fn rule(kind: Kind, scope: Scope, order: u32, matcher: MatchFn<TestState>) -> Rule<Kind, String, TestState> {
        let parser: ParseFn<Kind, String, TestState> = match kind {
            Kind::Group => parse_group,
            Kind::Word => label_word,
            _ => label_other,
        };
        Rule {
            kind,
            scope,
            order,
            matcher,
            parser,
        }
    }

    fn test_parser() -> TestParser {
        Parser::new(vec![
            rule(Kind::Other, Scope::Any, 20, match_char),
            rule(Kind::Word, Scope::Any, 10, match_word),
            rule(Kind::Group, Scope::Any, 5, match_group),
        ])
    }

    #[test]
    fn lowest_order_wins() {
        let parser = test_parser();
        let out = parser
            .parse("ab c", TestState::default(), ParseOptions { inline: true, ..Default::default() })
            .unwrap();
        assert_eq!(out, vec!["i:ab", "c: ", "i:c"]);
    }

    #[test]
    fn equal_orders_keep_declaration_order() {
        let parser: TestParser = Parser::new(vec![
            rule(Kind::Other, Scope::Any, 1, match_char),
            rule(Kind::Word, Scope::Any, 1, match_word),
        ]);
        assert_eq!(parser.kinds().collect::<Vec<_>>(), vec![Kind::Other, Kind::Word]);
    }

    #[test]
    fn block_parse_appends_blank_line_unless_disabled() {
        let parser = test_parser();
        let padded = parser
            .parse("ab", TestState::default(), ParseOptions::default())
            .unwrap();
        assert_eq!(padded, vec!["b:ab", "c:\n", "c:\n"]);

        let exact = parser
            .parse(
                "ab",
                TestState::default(),
                ParseOptions {
                    inline: false,
                    disable_auto_block_newlines: true,
                },
            )
            .unwrap();
        assert_eq!(exact, vec!["b:ab"]);
    }

    #[test]
    fn scope_filters_rules() {
        let parser: TestParser = Parser::new(vec![
            rule(Kind::Word, Scope::Block, 1, match_word),
            rule(Kind::Other, Scope::Any, 2, match_char),
        ]);
        let out = parser.parse_inline("ab", &TestState::default()).unwrap();
        assert_eq!(out, vec!["c:a", "c:b"]);
    }

    #[test]
    fn nested_parse_switches_to_inline() {
        let parser = test_parser();
        let out = parser.parse_block("(ab)cd", &TestState::default()).unwrap();
        assert_eq!(out, vec!["[i:ab]", "b:cd"]);
    }

    #[test]
    fn matchers_see_previous_capture() {
        let parser: TestParser = Parser::new(vec![
            rule(Kind::Word, Scope::Any, 1, match_after_space),
            rule(Kind::Other, Scope::Any, 2, match_char),
        ]);
        let out = parser.parse_inline("a b", &TestState::default()).unwrap();
        assert_eq!(out, vec!["c:a", "c: ", "i:b"]);
    }

    #[test]
    fn no_matching_rule_is_an_error() {
        let parser: TestParser = Parser::new(vec![rule(Kind::Word, Scope::Any, 1, match_word)]);
        let err = parser.parse_inline("ab!", &TestState::default()).unwrap_err();
        assert!(matches!(err, MarkdownError::NoMatchingRule { ref snippet } if snippet == "!"));
    }

    #[test]
    fn empty_capture_is_an_error() {
        let parser: TestParser = Parser::new(vec![rule(Kind::Nothing, Scope::Any, 1, match_nothing)]);
        let err = parser.parse_inline("x", &TestState::default()).unwrap_err();
        assert!(matches!(err, MarkdownError::EmptyCapture { .. }));
    }

    #[test]
    fn depth_limit_stops_runaway_nesting() {
        let parser = test_parser().with_max_depth(3);
        assert!(parser.parse_inline("((x))", &TestState::default()).is_ok());
        let err = parser.parse_inline("(((x)))", &TestState::default()).unwrap_err();
        assert!(matches!(err, MarkdownError::NestingTooDeep { limit: 3 }));
    }

    #[test]
    fn capture_groups_count_from_one() {
        let capture = Capture::new("(ab)").with_group(Some("ab")).with_group(None);
        assert_eq!(capture.group(0), Some("(ab)"));
        assert_eq!(capture.group(1), Some("ab"));
        assert_eq!(capture.group(2), None);
        assert_eq!(capture.text(2), "");
        assert_eq!(capture.text(9), "");
    }
}
