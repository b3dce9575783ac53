//! Rendered messages as styled terminal text.

use chatmark_engine::emoji_data::literal_for;
use chatmark_engine::render::big_emoji::BigEmoji;
use chatmark_engine::render::full::Element;
use chatmark_engine::render::preview::PreviewSpan;
use chatmark_engine::render::service_only::ServiceSpan;
use chatmark_engine::{Rendered, RenderedMessage};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

const QUOTE_MARKER: &str = "│ ";

fn code_style() -> Style {
    Style::default().fg(Color::Yellow)
}

fn decoration_style() -> Style {
    Style::default().fg(Color::Magenta)
}

/// Terminal fonts draw emoji themselves; unknown shortcodes stay as typed.
fn emoji_text(shortcode: &str) -> String {
    literal_for(shortcode).unwrap_or(shortcode).to_string()
}

#[derive(Default)]
struct TextBuilder {
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    prefix: String,
}

impl TextBuilder {
    fn push(&mut self, text: &str, style: Style) {
        for (i, part) in text.split('\n').enumerate() {
            if i > 0 {
                self.break_line();
            }
            if !part.is_empty() {
                self.current.push(Span::styled(part.to_string(), style));
            }
        }
    }

    fn break_line(&mut self) {
        let mut spans = Vec::with_capacity(self.current.len() + 1);
        if !self.prefix.is_empty() {
            spans.push(Span::styled(self.prefix.clone(), Style::default().fg(Color::DarkGray)));
        }
        spans.append(&mut self.current);
        self.lines.push(Line::from(spans));
    }

    fn end_block(&mut self) {
        if !self.current.is_empty() {
            self.break_line();
        }
    }

    fn element(&mut self, element: &Element, style: Style) {
        match element {
            Element::Paragraph { children, .. } => {
                self.elements(children, style);
                self.end_block();
            }
            Element::BlockQuote { children } => {
                self.end_block();
                let saved = self.prefix.len();
                self.prefix.push_str(QUOTE_MARKER);
                self.elements(children, style);
                self.end_block();
                self.prefix.truncate(saved);
            }
            Element::Bold { children, .. } => self.elements(children, style.add_modifier(Modifier::BOLD)),
            Element::Italic { children, .. } => self.elements(children, style.add_modifier(Modifier::ITALIC)),
            Element::Strikethrough { children, .. } => {
                self.elements(children, style.add_modifier(Modifier::CROSSED_OUT))
            }
            Element::Emoji { shortcode, .. } => self.push(&emoji_text(shortcode), style),
            Element::CodeBlock {
                language, copy_text, ..
            } => {
                self.end_block();
                if let Some(language) = language {
                    self.push(language, Style::default().fg(Color::DarkGray));
                    self.break_line();
                }
                self.push(copy_text.strip_suffix('\n').unwrap_or(copy_text), code_style());
                self.break_line();
            }
            Element::InlineCode { text, .. } => self.push(text, code_style()),
            Element::LineBreak => self.break_line(),
            Element::Text(text) => self.push(text, style),
            Element::ServiceDecoration { payload, .. } => self.push(&format!("⟨{payload}⟩"), decoration_style()),
        }
    }

    fn elements(&mut self, elements: &[Element], style: Style) {
        for element in elements {
            self.element(element, style);
        }
    }

    fn finish(mut self) -> Text<'static> {
        self.end_block();
        Text::from(self.lines)
    }
}

/// Converts a rendered message body into lines for a ratatui widget.
pub fn to_text(message: &RenderedMessage) -> Text<'static> {
    let mut builder = TextBuilder::default();
    match &message.body {
        Rendered::Full(elements) => builder.elements(elements, Style::default()),
        Rendered::Preview(line) => {
            let dim = Style::default().add_modifier(Modifier::DIM);
            for span in &line.spans {
                match span {
                    PreviewSpan::Text(text) => builder.push(text, dim),
                    PreviewSpan::Emoji { shortcode, .. } => builder.push(&emoji_text(shortcode), dim),
                    PreviewSpan::ServiceDecoration { payload, .. } => {
                        builder.push(&format!("⟨{payload}⟩"), decoration_style())
                    }
                }
            }
        }
        Rendered::BigEmoji(items) => {
            for item in items {
                match item {
                    BigEmoji::Emoji { shortcode, .. } => {
                        builder.push(&format!("{} ", emoji_text(shortcode)), Style::default())
                    }
                    BigEmoji::LineBreak => builder.break_line(),
                }
            }
        }
        Rendered::ServiceOnly(spans) => {
            for span in spans {
                match span {
                    ServiceSpan::Text(text) => builder.push(text, Style::default()),
                    ServiceSpan::ServiceDecoration { payload, .. } => {
                        builder.push(&format!("⟨{payload}⟩"), decoration_style())
                    }
                }
            }
        }
        Rendered::Plain(text) => builder.push(text, Style::default()),
    }
    builder.finish()
}

/// Lines without styling, for piping to other tools.
pub fn to_plain_lines(text: &Text<'_>) -> Vec<String> {
    text.lines
        .iter()
        .map(|line| line.spans.iter().map(|span| span.content.as_ref()).collect())
        .collect()
}
