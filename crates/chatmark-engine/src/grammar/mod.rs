//! # Chat Markdown Grammar
//!
//! The rule table for chat messages. Rules are tried in ascending
//! [`order`]; the first one whose scope admits the current mode and
//! whose matcher accepts the input builds the next node(s).
//!
//! | rule | scope | order |
//! |---|---|---|
//! | fence | any | 0 |
//! | serviceDecoration | inline | 1 |
//! | quotedFence | any | 55 |
//! | blockQuote | any | 60 |
//! | newline | any | 110 |
//! | paragraph | block | 120 |
//! | escape | inline | 130 |
//! | em / strong | inline | 210 |
//! | del | inline | 220 |
//! | inlineCode | inline | 230 |
//! | emoji | inline | 245 |
//! | text | any | 250 |
//! | fallbackParagraph | any | last |

pub mod kinds;
pub mod node;
pub mod state;

use once_cell::sync::Lazy;

use crate::engine::{Parser, Rule, Scope};
use kinds::{
    block_quote, code_fence, emoji, emphasis, escape, inline_code, newline, paragraph, quoted_fence,
    service_decoration, text,
};

pub use node::{Node, dump_tree};
pub use state::{MarkdownMeta, ParseState};

pub type MessageRule = Rule<RuleKind, Node, ParseState>;
pub type MessageParser = Parser<RuleKind, Node, ParseState>;

/// The grammar's parser, built once.
pub static PARSER: Lazy<MessageParser> = Lazy::new(|| MessageParser::new(rules()));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    BlockQuote,
    Del,
    Em,
    Emoji,
    Escape,
    FallbackParagraph,
    Fence,
    InlineCode,
    Newline,
    Paragraph,
    QuotedFence,
    ServiceDecoration,
    Strong,
    Text,
}

/// Rule precedence. Lower goes first.
pub mod order {
    pub const FENCE: u32 = 0;
    pub const SERVICE_DECORATION: u32 = 1;
    pub const QUOTED_FENCE: u32 = 55;
    pub const BLOCK_QUOTE: u32 = 60;
    pub const NEWLINE: u32 = 110;
    pub const PARAGRAPH: u32 = 120;
    pub const ESCAPE: u32 = 130;
    pub const EM: u32 = 210;
    pub const STRONG: u32 = 210;
    pub const DEL: u32 = 220;
    pub const INLINE_CODE: u32 = 230;
    pub const EMOJI: u32 = 245;
    pub const TEXT: u32 = 250;
    pub const FALLBACK_PARAGRAPH: u32 = 100_000;
}

/// The full rule table, in declaration order.
pub fn rules() -> Vec<MessageRule> {
    vec![
        Rule {
            kind: RuleKind::BlockQuote,
            scope: Scope::Any,
            order: order::BLOCK_QUOTE,
            matcher: block_quote::match_block_quote,
            parser: block_quote::parse_block_quote,
        },
        Rule {
            kind: RuleKind::Del,
            scope: Scope::Inline,
            order: order::DEL,
            matcher: emphasis::match_del,
            parser: emphasis::parse_del,
        },
        Rule {
            kind: RuleKind::Em,
            scope: Scope::Inline,
            order: order::EM,
            matcher: emphasis::match_em,
            parser: emphasis::parse_em,
        },
        Rule {
            kind: RuleKind::Emoji,
            scope: Scope::Inline,
            order: order::EMOJI,
            matcher: emoji::match_emoji,
            parser: emoji::parse_emoji,
        },
        Rule {
            kind: RuleKind::Escape,
            scope: Scope::Inline,
            order: order::ESCAPE,
            matcher: escape::match_escape,
            parser: escape::parse_escape,
        },
        Rule {
            kind: RuleKind::FallbackParagraph,
            scope: Scope::Any,
            order: order::FALLBACK_PARAGRAPH,
            matcher: paragraph::match_fallback_paragraph,
            parser: paragraph::parse_fallback_paragraph,
        },
        Rule {
            kind: RuleKind::Fence,
            scope: Scope::Any,
            order: order::FENCE,
            matcher: code_fence::match_fence,
            parser: code_fence::parse_fence,
        },
        Rule {
            kind: RuleKind::InlineCode,
            scope: Scope::Inline,
            order: order::INLINE_CODE,
            matcher: inline_code::match_inline_code,
            parser: inline_code::parse_inline_code,
        },
        Rule {
            kind: RuleKind::Newline,
            scope: Scope::Any,
            order: order::NEWLINE,
            matcher: newline::match_newline,
            parser: newline::parse_newline,
        },
        Rule {
            kind: RuleKind::Paragraph,
            scope: Scope::Block,
            order: order::PARAGRAPH,
            matcher: paragraph::match_paragraph,
            parser: paragraph::parse_paragraph,
        },
        Rule {
            kind: RuleKind::QuotedFence,
            scope: Scope::Any,
            order: order::QUOTED_FENCE,
            matcher: quoted_fence::match_quoted_fence,
            parser: quoted_fence::parse_quoted_fence,
        },
        Rule {
            kind: RuleKind::ServiceDecoration,
            scope: Scope::Inline,
            order: order::SERVICE_DECORATION,
            matcher: service_decoration::match_service_decoration,
            parser: service_decoration::parse_service_decoration,
        },
        Rule {
            kind: RuleKind::Strong,
            scope: Scope::Inline,
            order: order::STRONG,
            matcher: emphasis::match_strong,
            parser: emphasis::parse_strong,
        },
        Rule {
            kind: RuleKind::Text,
            scope: Scope::Any,
            order: order::TEXT,
            matcher: text::match_text,
            parser: text::parse_text,
        },
    ]
}
