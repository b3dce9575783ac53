//! UniFFI bindings for chatmark mobile apps
//!
//! Exposes message rendering to Kotlin and Swift hosts. Trees are
//! flattened into depth-tagged lists since records cannot be recursive.

use std::collections::HashMap;
use std::sync::Arc;

use chatmark_config::{DEFAULT_MAX_INPUT_BYTES, Platform};
use chatmark_engine::render::big_emoji::BigEmoji;
use chatmark_engine::render::full::Element;
use chatmark_engine::render::preview::PreviewSpan;
use chatmark_engine::render::service_only::ServiceSpan;
use chatmark_engine::{
    MarkdownError, MarkdownMeta, Node, ParseContext, RenderOptions, Rendered, RenderedMessage, TextType, TextWrapper, languages,
};

uniffi::setup_scaffolding!();

// ============ Errors ============

/// Errors that can cross the FFI boundary
/// Note: Field is named `reason` not `message` to avoid conflict with Throwable.message in Kotlin
#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum FfiError {
    #[error("Parse error: {reason}")]
    ParseError { reason: String },
}

// ============ Options ============

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiPlatform {
    Desktop,
    Mobile,
}

impl From<FfiPlatform> for Platform {
    fn from(platform: FfiPlatform) -> Self {
        match platform {
            FfiPlatform::Desktop => Platform::Desktop,
            FfiPlatform::Mobile => Platform::Mobile,
        }
    }
}

/// Presentation flags for one message.
#[derive(Debug, Clone, uniffi::Record)]
pub struct RenderOptionsDto {
    pub platform: FfiPlatform,
    pub service_only: bool,
    pub preview: bool,
    pub small_standalone_emoji: bool,
    pub allow_font_scaling: bool,
    /// Passed through to service decorations untouched.
    pub meta: HashMap<String, String>,
    pub paragraph_text_class_name: Option<String>,
    pub style: Option<String>,
    pub line_clamp: Option<u32>,
    pub selectable: bool,
}

impl RenderOptionsDto {
    fn into_engine(self) -> RenderOptions {
        let meta = (!self.meta.is_empty()).then(|| Arc::new(self.meta.into_iter().collect::<MarkdownMeta>()));
        RenderOptions {
            platform: self.platform.into(),
            service_only: self.service_only,
            preview: self.preview,
            small_standalone_emoji: self.small_standalone_emoji,
            allow_font_scaling: self.allow_font_scaling,
            meta,
            paragraph_text_class_name: self.paragraph_text_class_name,
            style: self.style,
            line_clamp: self.line_clamp,
            selectable: self.selectable,
            ..RenderOptions::default()
        }
    }
}

// ============ DTOs ============

/// One parsed node. Children follow their parent with `depth + 1`.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct NodeDto {
    /// Node kind (e.g., "paragraph", "codeFence", "emoji")
    pub kind: String,
    pub depth: u32,
    /// Text of a leaf node; highlighted HTML for code fences
    pub content: Option<String>,
    /// Raw code of a highlighted fence
    pub unformatted_content: Option<String>,
    pub lang: Option<String>,
}

impl NodeDto {
    fn flatten(nodes: &[Node], depth: u32, out: &mut Vec<NodeDto>) {
        for node in nodes {
            let (content, unformatted_content, lang) = match node {
                Node::Emoji { content }
                | Node::Fence { content }
                | Node::InlineCode { content }
                | Node::Text { content }
                | Node::ServiceDecoration { content } => (Some(content.clone()), None, None),
                Node::CodeFence {
                    content,
                    unformatted_content,
                    lang,
                } => (
                    Some(content.clone()),
                    Some(unformatted_content.clone()),
                    Some(lang.clone()),
                ),
                _ => (None, None, None),
            };
            out.push(NodeDto {
                kind: node.kind().to_string(),
                depth,
                content,
                unformatted_content,
                lang,
            });
            if let Some(children) = node.children() {
                Self::flatten(children, depth + 1, out);
            }
        }
    }
}

/// One rendered element. Children follow their parent with `depth + 1`.
#[derive(Debug, Clone, Default, PartialEq, uniffi::Record)]
pub struct ElementDto {
    /// Element type: "paragraph", "block_quote", "bold", "italic",
    /// "strikethrough", "emoji", "code_block", "inline_code",
    /// "line_break", "text" or "service_decoration"
    pub kind: String,
    pub depth: u32,
    /// Text, emoji shortcode, copyable code or decoration payload
    pub text: String,
    /// Safe to inject; set for code blocks only
    pub html: Option<String>,
    pub language: Option<String>,
    /// Emoji size in points, 0 for everything else
    pub size: u32,
    pub allow_font_scaling: bool,
    pub style: Option<String>,
    pub class_name: Option<String>,
}

impl ElementDto {
    fn new(kind: &str, depth: u32) -> Self {
        Self {
            kind: kind.to_string(),
            depth,
            ..Self::default()
        }
    }

    fn text(kind: &str, depth: u32, text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Self::new(kind, depth)
        }
    }

    fn emoji(shortcode: &str, size: u32, allow_font_scaling: bool) -> Self {
        Self {
            size,
            allow_font_scaling,
            ..Self::text("emoji", 0, shortcode)
        }
    }

    fn flatten(elements: &[Element], depth: u32, out: &mut Vec<ElementDto>) {
        for element in elements {
            let (dto, children) = match element {
                Element::Paragraph {
                    class_name,
                    style,
                    children,
                } => (
                    ElementDto {
                        class_name: class_name.clone(),
                        style: style.clone(),
                        ..Self::new("paragraph", depth)
                    },
                    Some(children),
                ),
                Element::BlockQuote { children } => (Self::new("block_quote", depth), Some(children)),
                Element::Bold { style, children } => (
                    ElementDto {
                        style: style.clone(),
                        ..Self::new("bold", depth)
                    },
                    Some(children),
                ),
                Element::Italic { style, children } => (
                    ElementDto {
                        style: style.clone(),
                        ..Self::new("italic", depth)
                    },
                    Some(children),
                ),
                Element::Strikethrough { style, children } => (
                    ElementDto {
                        style: style.clone(),
                        ..Self::new("strikethrough", depth)
                    },
                    Some(children),
                ),
                Element::Emoji {
                    shortcode,
                    size,
                    allow_font_scaling,
                } => (
                    ElementDto {
                        depth,
                        ..Self::emoji(shortcode, *size, *allow_font_scaling)
                    },
                    None,
                ),
                Element::CodeBlock {
                    html,
                    language,
                    copy_text,
                    style,
                } => (
                    ElementDto {
                        html: Some(html.clone()),
                        language: language.clone(),
                        style: style.clone(),
                        ..Self::text("code_block", depth, copy_text)
                    },
                    None,
                ),
                Element::InlineCode { text, style } => (
                    ElementDto {
                        style: style.clone(),
                        ..Self::text("inline_code", depth, text)
                    },
                    None,
                ),
                Element::LineBreak => (Self::new("line_break", depth), None),
                Element::Text(text) => (Self::text("text", depth, text), None),
                Element::ServiceDecoration { payload, .. } => (Self::text("service_decoration", depth, payload), None),
            };
            out.push(dto);
            if let Some(children) = children {
                Self::flatten(children, depth + 1, out);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct TextWrapperDto {
    /// "body" or "body_small"
    pub text_type: String,
    pub class_name: Option<String>,
    pub styles: Vec<String>,
    pub line_clamp: Option<u32>,
    pub selectable: bool,
    pub white_space_pre: bool,
}

impl TextWrapperDto {
    fn from_engine(wrapper: TextWrapper) -> Self {
        Self {
            text_type: match wrapper.text_type {
                TextType::Body => "body",
                TextType::BodySmall => "body_small",
            }
            .to_string(),
            class_name: wrapper.class_name,
            styles: wrapper.styles,
            line_clamp: wrapper.line_clamp,
            selectable: wrapper.selectable,
            white_space_pre: wrapper.white_space_pre,
        }
    }
}

/// A rendered message ready for the host.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct RenderedMessageDto {
    /// "full", "preview", "big_emoji", "service_only" or "plain"
    pub mode: String,
    pub elements: Vec<ElementDto>,
    pub inner: Option<TextWrapperDto>,
    pub outer: Option<TextWrapperDto>,
}

impl RenderedMessageDto {
    fn from_engine(message: RenderedMessage) -> Self {
        let (mode, elements) = match &message.body {
            Rendered::Full(elements) => {
                let mut out = Vec::new();
                ElementDto::flatten(elements, 0, &mut out);
                ("full", out)
            }
            Rendered::Preview(line) => (
                "preview",
                line.spans
                    .iter()
                    .map(|span| match span {
                        PreviewSpan::Text(text) => ElementDto::text("text", 0, text),
                        PreviewSpan::Emoji {
                            shortcode,
                            size,
                            allow_font_scaling,
                        } => ElementDto::emoji(shortcode, *size, *allow_font_scaling),
                        PreviewSpan::ServiceDecoration { payload, .. } => {
                            ElementDto::text("service_decoration", 0, payload)
                        }
                    })
                    .collect(),
            ),
            Rendered::BigEmoji(emoji) => (
                "big_emoji",
                emoji
                    .iter()
                    .map(|item| match item {
                        BigEmoji::Emoji {
                            shortcode,
                            size,
                            allow_font_scaling,
                        } => ElementDto::emoji(shortcode, *size, *allow_font_scaling),
                        BigEmoji::LineBreak => ElementDto::new("line_break", 0),
                    })
                    .collect(),
            ),
            Rendered::ServiceOnly(spans) => (
                "service_only",
                spans
                    .iter()
                    .map(|span| match span {
                        ServiceSpan::Text(text) => ElementDto::text("text", 0, text),
                        ServiceSpan::ServiceDecoration { payload, .. } => {
                            ElementDto::text("service_decoration", 0, payload)
                        }
                    })
                    .collect(),
            ),
            Rendered::Plain(text) => ("plain", vec![ElementDto::text("text", 0, text)]),
        };
        Self {
            mode: mode.to_string(),
            elements,
            inner: message.wrapper.inner.map(TextWrapperDto::from_engine),
            outer: message.wrapper.outer.map(TextWrapperDto::from_engine),
        }
    }
}

// ============ Standalone Functions ============

/// Render a message for display. Never fails: unparseable input comes
/// back with mode "plain".
#[uniffi::export]
pub fn render_markdown(input: String, options: RenderOptionsDto) -> RenderedMessageDto {
    let options = options.into_engine();
    RenderedMessageDto::from_engine(chatmark_engine::render_message(&input, &options))
}

/// Parses under the same size cap rendering applies.
fn parse_capped(input: &str, platform: FfiPlatform) -> Result<Vec<Node>, MarkdownError> {
    if input.len() > DEFAULT_MAX_INPUT_BYTES {
        return Err(MarkdownError::InputTooLarge {
            len: input.len(),
            max: DEFAULT_MAX_INPUT_BYTES,
        });
    }
    chatmark_engine::parse_message(input, &ParseContext::for_platform(platform.into()))
}

/// Parse a message into a flattened node list.
#[uniffi::export]
pub fn parse_markdown(input: String, platform: FfiPlatform) -> Result<Vec<NodeDto>, FfiError> {
    let ast = parse_capped(&input, platform).map_err(|e| FfiError::ParseError {
        reason: e.to_string(),
    })?;
    let mut out = Vec::new();
    NodeDto::flatten(&ast, 0, &mut out);
    Ok(out)
}

/// Whether a message would render as big emoji. False if it cannot be parsed.
#[uniffi::export]
pub fn is_all_emoji_message(input: String, platform: FfiPlatform) -> bool {
    parse_capped(&input, platform).is_ok_and(|ast| chatmark_engine::is_all_emoji(&ast))
}

/// Language tags recognised on code fences, longest first.
#[uniffi::export]
pub fn supported_languages() -> Vec<String> {
    languages::SUPPORTED_LANGUAGES.iter().map(|lang| lang.to_string()).collect()
}
