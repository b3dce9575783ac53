//! The public entry point: parse, pick a renderer, wrap for the host.

use std::sync::Arc;

use chatmark_config::{Config, DEFAULT_MAX_INPUT_BYTES, Platform, StyleOverride};

use crate::error::MarkdownError;
use crate::grammar::MarkdownMeta;
use crate::highlight::{HighlightError, Highlighter, SyntectHighlighter, default_highlighter};
use crate::parsing::{ParseContext, parse_message};
use crate::render::{ModeFlags, RenderMode, RenderState, Rendered};

/// Muted style for single-line previews.
pub const NEUTRAL_PREVIEW_STYLE: &str = "neutral-preview";
/// Style that lets the plain-text fallback wrap.
pub const WRAP_STYLE: &str = "wrap";

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub platform: Platform,
    pub service_only: bool,
    pub preview: bool,
    pub small_standalone_emoji: bool,
    pub allow_font_scaling: bool,
    pub meta: Option<Arc<MarkdownMeta>>,
    pub style_override: StyleOverride,
    pub paragraph_text_class_name: Option<String>,
    /// Caller style applied to the wrappers.
    pub style: Option<String>,
    pub line_clamp: Option<u32>,
    pub selectable: bool,
    pub max_input_bytes: usize,
    pub highlighter: Arc<dyn Highlighter>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            platform: Platform::default(),
            service_only: false,
            preview: false,
            small_standalone_emoji: false,
            allow_font_scaling: true,
            meta: None,
            style_override: StyleOverride::default(),
            paragraph_text_class_name: None,
            style: None,
            line_clamp: None,
            selectable: false,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            highlighter: default_highlighter(),
        }
    }
}

impl RenderOptions {
    /// Options from the configuration file. Fails only if the configured
    /// syntax folder cannot be loaded.
    pub fn from_config(config: &Config) -> Result<Self, HighlightError> {
        let highlighter: Arc<dyn Highlighter> = match &config.syntaxes_path {
            Some(path) => Arc::new(SyntectHighlighter::with_syntaxes_from(path)?),
            None => default_highlighter(),
        };
        Ok(Self {
            platform: config.platform,
            small_standalone_emoji: config.small_standalone_emoji,
            allow_font_scaling: config.allow_font_scaling,
            style_override: config.style_override.clone(),
            paragraph_text_class_name: config.paragraph_text_class_name.clone(),
            max_input_bytes: config.max_input_bytes,
            highlighter,
            ..Self::default()
        })
    }

    fn parse_context(&self) -> ParseContext {
        ParseContext {
            platform: self.platform,
            meta: self.meta.clone(),
            highlighter: Arc::clone(&self.highlighter),
        }
    }

    fn render_state(&self) -> RenderState<'_> {
        RenderState {
            allow_font_scaling: self.allow_font_scaling,
            meta: self.meta.as_ref(),
            style_override: &self.style_override,
            paragraph_text_class_name: self.paragraph_text_class_name.as_deref(),
        }
    }

    pub fn mode_flags(&self) -> ModeFlags {
        ModeFlags {
            service_only: self.service_only,
            preview: self.preview,
            small_standalone_emoji: self.small_standalone_emoji,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextType {
    Body,
    BodySmall,
}

/// A host text container around rendered output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextWrapper {
    pub text_type: TextType,
    pub class_name: Option<String>,
    /// Style names, applied in order.
    pub styles: Vec<String>,
    pub line_clamp: Option<u32>,
    pub selectable: bool,
    /// Preserve whitespace as typed.
    pub white_space_pre: bool,
}

impl TextWrapper {
    fn body(options: &RenderOptions) -> Self {
        Self {
            text_type: TextType::Body,
            class_name: options.paragraph_text_class_name.clone(),
            styles: options.style.iter().cloned().collect(),
            line_clamp: options.line_clamp,
            selectable: false,
            white_space_pre: false,
        }
    }
}

/// Wrappers from the innermost out; either may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostWrapper {
    pub inner: Option<TextWrapper>,
    pub outer: Option<TextWrapper>,
}

impl HostWrapper {
    fn for_body(body: &Rendered, options: &RenderOptions) -> Self {
        let desktop = !options.platform.is_mobile();
        if matches!(body, Rendered::Plain(_)) {
            return Self {
                inner: Some(TextWrapper {
                    class_name: None,
                    styles: vec![WRAP_STYLE.to_string()],
                    line_clamp: None,
                    white_space_pre: desktop,
                    ..TextWrapper::body(options)
                }),
                outer: None,
            };
        }

        let inner = match body {
            Rendered::ServiceOnly(_) => Some(TextWrapper::body(options)),
            Rendered::Preview(_) => {
                let styles = std::iter::once(NEUTRAL_PREVIEW_STYLE.to_string())
                    .chain(options.style.iter().cloned())
                    .chain(options.style_override.preview.iter().cloned())
                    .collect();
                Some(TextWrapper {
                    text_type: if desktop { TextType::BodySmall } else { TextType::Body },
                    styles,
                    line_clamp: Some(1),
                    ..TextWrapper::body(options)
                })
            }
            _ => None,
        };
        let outer = desktop.then(|| TextWrapper {
            selectable: options.selectable,
            white_space_pre: true,
            ..TextWrapper::body(options)
        });
        Self { inner, outer }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub body: Rendered,
    pub wrapper: HostWrapper,
}

/// Parses and renders `input`, returning the first error.
pub fn try_render(input: &str, options: &RenderOptions) -> Result<Rendered, MarkdownError> {
    if input.len() > options.max_input_bytes {
        return Err(MarkdownError::InputTooLarge {
            len: input.len(),
            max: options.max_input_bytes,
        });
    }
    let ast = parse_message(input, &options.parse_context())?;
    let mode = RenderMode::select(&options.mode_flags(), &ast);
    log::debug!("rendering {} top-level nodes as {mode:?}", ast.len());
    mode.output().render(&ast, &options.render_state())
}

/// Renders `input` for the host. Never fails: on any error the raw input
/// comes back as [`Rendered::Plain`].
pub fn render_message(input: &str, options: &RenderOptions) -> RenderedMessage {
    let body = match try_render(input, options) {
        Ok(body) => body,
        Err(err) => {
            log::error!("Error {} markdown", err.stage());
            log::debug!("Error {} markdown: {err}", err.stage());
            Rendered::Plain(input.to_string())
        }
    };
    let wrapper = HostWrapper::for_body(&body, options);
    RenderedMessage { body, wrapper }
}
