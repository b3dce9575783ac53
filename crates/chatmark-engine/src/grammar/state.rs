use std::collections::BTreeMap;
use std::sync::Arc;

use chatmark_config::Platform;

use crate::engine::EngineState;
use crate::highlight::{Highlighter, default_highlighter};

/// Opaque key/value data carried alongside a message, handed to
/// service-decoration renderers untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkdownMeta {
    values: BTreeMap<String, String>,
}

impl MarkdownMeta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MarkdownMeta {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

/// State for one parse of a chat message.
#[derive(Debug, Clone)]
pub struct ParseState {
    pub inline: bool,
    /// Set while parsing a paragraph's content.
    pub in_paragraph: bool,
    pub block_quote_level: u8,
    pub platform: Platform,
    pub depth: usize,
    pub meta: Option<Arc<MarkdownMeta>>,
    pub highlighter: Arc<dyn Highlighter>,
}

impl ParseState {
    pub fn new(platform: Platform, highlighter: Arc<dyn Highlighter>) -> Self {
        Self {
            inline: false,
            in_paragraph: false,
            block_quote_level: 0,
            platform,
            depth: 0,
            meta: None,
            highlighter,
        }
    }

    pub fn with_meta(mut self, meta: Option<Arc<MarkdownMeta>>) -> Self {
        self.meta = meta;
        self
    }

    pub fn is_mobile(&self) -> bool {
        self.platform.is_mobile()
    }

    /// Copy for parsing the inside of a paragraph.
    pub fn entering_paragraph(&self) -> Self {
        Self {
            in_paragraph: true,
            ..self.clone()
        }
    }

    /// Copy for parsing the inside of one more level of block quote.
    pub fn entering_quote(&self) -> Self {
        Self {
            block_quote_level: self.block_quote_level.saturating_add(1),
            ..self.clone()
        }
    }
}

impl Default for ParseState {
    fn default() -> Self {
        Self::new(Platform::default(), default_highlighter())
    }
}

impl EngineState for ParseState {
    fn is_inline(&self) -> bool {
        self.inline
    }

    fn with_inline(&self, inline: bool) -> Self {
        Self {
            inline,
            ..self.clone()
        }
    }

    fn depth(&self) -> usize {
        self.depth
    }

    fn with_depth(&self, depth: usize) -> Self {
        Self {
            depth,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copies_leave_the_original_untouched() {
        let state = ParseState::default();
        let quoted = state.entering_quote().entering_quote();
        let para = state.entering_paragraph();

        assert_eq!(quoted.block_quote_level, 2);
        assert!(para.in_paragraph);
        assert_eq!(state.block_quote_level, 0);
        assert!(!state.in_paragraph);
    }

    #[test]
    fn meta_collects_pairs() {
        let meta: MarkdownMeta = [("channel", "general"), ("team", "core")].into_iter().collect();
        assert_eq!(meta.get("channel"), Some("general"));
        assert_eq!(meta.get("missing"), None);
        assert!(!meta.is_empty());
    }
}
