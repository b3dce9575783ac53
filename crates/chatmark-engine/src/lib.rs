//! # Chat Markdown
//!
//! Parsing and rendering for the markdown dialect used in chat messages:
//! emphasis, strikethrough, inline and fenced code, block quotes, emoji,
//! and opaque service decorations.
//!
//! Most callers only need [`render_message`]. The pieces are public for
//! hosts that want the tree itself ([`parse_message`]) or a specific
//! renderer ([`render`]).

pub mod classify;
pub mod emoji_data;
pub mod engine;
pub mod error;
pub mod grammar;
pub mod highlight;
pub mod languages;
pub mod message;
pub mod parsing;
pub mod render;

pub use chatmark_config::{Platform, StyleOverride};
pub use classify::is_all_emoji;
pub use error::MarkdownError;
pub use grammar::{MarkdownMeta, Node, dump_tree};
pub use highlight::{HighlightError, Highlighter, SyntectHighlighter};
pub use message::{HostWrapper, RenderOptions, RenderedMessage, TextType, TextWrapper, render_message, try_render};
pub use parsing::{ParseContext, parse_message};
pub use render::{RenderMode, Rendered};
