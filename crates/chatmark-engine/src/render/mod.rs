//! # Output Renderers
//!
//! Four ways to present a parsed message. [`RenderMode::select`] picks one
//! per message; each implements [`Output`].

pub mod big_emoji;
pub mod full;
pub mod preview;
pub mod service_only;

use std::sync::Arc;

use chatmark_config::StyleOverride;

use crate::classify::is_all_emoji;
use crate::error::MarkdownError;
use crate::grammar::{MarkdownMeta, Node};

/// Emoji size in running text.
pub const EMOJI_SIZE: u32 = 16;
/// Emoji size when a message is only emoji.
pub const BIG_EMOJI_SIZE: u32 = 32;

/// Inputs every renderer shares.
#[derive(Debug, Clone, Copy)]
pub struct RenderState<'a> {
    pub allow_font_scaling: bool,
    pub meta: Option<&'a Arc<MarkdownMeta>>,
    pub style_override: &'a StyleOverride,
    pub paragraph_text_class_name: Option<&'a str>,
}

/// A renderer from node trees to one presentation form.
pub trait Output: Sync {
    /// Name used in errors and logs.
    fn name(&self) -> &'static str;

    fn render(&self, ast: &[Node], state: &RenderState<'_>) -> Result<Rendered, MarkdownError>;
}

/// A rendered message body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Full(Vec<full::Element>),
    Preview(preview::PreviewLine),
    BigEmoji(Vec<big_emoji::BigEmoji>),
    ServiceOnly(Vec<service_only::ServiceSpan>),
    /// The raw input, shown when parsing or rendering failed.
    Plain(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    ServiceOnly,
    Preview,
    BigEmoji,
    Full,
}

/// The caller's presentation flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModeFlags {
    pub service_only: bool,
    pub preview: bool,
    pub small_standalone_emoji: bool,
}

type ModePredicate = fn(&ModeFlags, &[Node]) -> bool;

fn wants_service_only(flags: &ModeFlags, _ast: &[Node]) -> bool {
    flags.service_only
}

fn wants_preview(flags: &ModeFlags, _ast: &[Node]) -> bool {
    flags.preview
}

fn wants_big_emoji(flags: &ModeFlags, ast: &[Node]) -> bool {
    !flags.small_standalone_emoji && is_all_emoji(ast)
}

/// Checked top to bottom; full rendering when none applies.
const MODE_TABLE: [(ModePredicate, RenderMode); 3] = [
    (wants_service_only, RenderMode::ServiceOnly),
    (wants_preview, RenderMode::Preview),
    (wants_big_emoji, RenderMode::BigEmoji),
];

impl RenderMode {
    pub fn select(flags: &ModeFlags, ast: &[Node]) -> Self {
        MODE_TABLE
            .iter()
            .find(|(applies, _)| applies(flags, ast))
            .map_or(RenderMode::Full, |&(_, mode)| mode)
    }

    pub fn output(self) -> &'static dyn Output {
        match self {
            RenderMode::ServiceOnly => &service_only::ServiceOnlyOutput,
            RenderMode::Preview => &preview::PreviewOutput,
            RenderMode::BigEmoji => &big_emoji::BigEmojiOutput,
            RenderMode::Full => &full::FullOutput,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn emoji_only() -> Vec<Node> {
        vec![Node::Paragraph {
            content: vec![Node::emoji(":fire:")],
        }]
    }

    fn flags(service_only: bool, preview: bool, small_standalone_emoji: bool) -> ModeFlags {
        ModeFlags {
            service_only,
            preview,
            small_standalone_emoji,
        }
    }

    #[rstest]
    #[case(flags(true, true, false), RenderMode::ServiceOnly)]
    #[case(flags(false, true, false), RenderMode::Preview)]
    #[case(flags(false, false, false), RenderMode::BigEmoji)]
    #[case(flags(false, false, true), RenderMode::Full)]
    fn selection_follows_priority(#[case] flags: ModeFlags, #[case] expected: RenderMode) {
        assert_eq!(RenderMode::select(&flags, &emoji_only()), expected);
    }

    #[test]
    fn text_renders_in_full() {
        let ast = vec![Node::Paragraph {
            content: vec![Node::text("hi")],
        }];
        assert_eq!(RenderMode::select(&ModeFlags::default(), &ast), RenderMode::Full);
    }

    #[test]
    fn each_mode_has_its_own_output() {
        let names: Vec<&str> = [
            RenderMode::ServiceOnly,
            RenderMode::Preview,
            RenderMode::BigEmoji,
            RenderMode::Full,
        ]
        .into_iter()
        .map(|mode| mode.output().name())
        .collect();
        assert_eq!(names, vec!["service-only", "preview", "big-emoji", "full"]);
    }
}
