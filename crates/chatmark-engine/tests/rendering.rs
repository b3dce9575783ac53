use std::sync::Arc;
use std::time::{Duration, Instant};

use chatmark_engine::render::big_emoji::BigEmoji;
use chatmark_engine::render::full::Element;
use chatmark_engine::render::service_only::ServiceSpan;
use chatmark_config::DEFAULT_MAX_INPUT_BYTES;
use chatmark_engine::{MarkdownError, MarkdownMeta, Platform, RenderOptions, Rendered, render_message, try_render};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn options() -> RenderOptions {
    RenderOptions::default()
}

#[test]
fn service_only_keeps_only_decorations() {
    let options = RenderOptions {
        service_only: true,
        preview: true,
        ..options()
    };
    assert_eq!(
        render_message("*hi* $>kb$user:42$<kb$", &options).body,
        Rendered::ServiceOnly(vec![
            ServiceSpan::Text("hi ".into()),
            ServiceSpan::ServiceDecoration {
                payload: "user:42".into(),
                meta: None,
            },
        ])
    );
}

#[test]
fn preview_is_a_single_line() {
    let options = RenderOptions {
        preview: true,
        ..options()
    };
    let Rendered::Preview(line) = render_message("first\n> second", &options).body else {
        panic!("expected a preview");
    };
    assert_eq!(line.to_plain_text(), "first second");
}

#[test]
fn emoji_only_messages_render_big() {
    assert_eq!(
        render_message("🔥🎉", &options()).body,
        Rendered::BigEmoji(vec![
            BigEmoji::Emoji {
                shortcode: ":fire:".into(),
                size: 32,
                allow_font_scaling: true,
            },
            BigEmoji::Emoji {
                shortcode: ":tada:".into(),
                size: 32,
                allow_font_scaling: true,
            },
        ])
    );
}

#[test]
fn small_standalone_emoji_stay_in_running_text() {
    let options = RenderOptions {
        small_standalone_emoji: true,
        ..options()
    };
    assert!(matches!(render_message("🔥", &options).body, Rendered::Full(_)));
}

#[test]
fn text_renders_in_full() {
    let Rendered::Full(elements) = render_message("hello *there*", &options()).body else {
        panic!("expected full rendering");
    };
    let [Element::Paragraph { children, .. }] = &elements[..] else {
        panic!("expected one paragraph, got {elements:?}");
    };
    assert_eq!(children[0], Element::Text("hello ".into()));
    assert!(matches!(children[1], Element::Bold { .. }));
}

#[test]
fn decorations_carry_the_message_meta() {
    let meta: Arc<MarkdownMeta> = Arc::new([("user:42", "Ada")].into_iter().collect());
    let options = RenderOptions {
        meta: Some(Arc::clone(&meta)),
        ..options()
    };
    let Rendered::Full(elements) = render_message("$>kb$user:42$<kb$", &options).body else {
        panic!("expected full rendering");
    };
    let [Element::Paragraph { children, .. }] = &elements[..] else {
        panic!("expected one paragraph, got {elements:?}");
    };
    assert_eq!(
        children[0],
        Element::ServiceDecoration {
            payload: "user:42".into(),
            meta: Some(meta),
        }
    );
}

#[rstest]
fn unterminated_fences_render_in_full(
    #[values(Platform::Desktop, Platform::Mobile)] platform: Platform,
    #[values("```", "hello *bold*\n```oops\nbye _it_")] input: &str,
) {
    let options = RenderOptions {
        platform,
        ..options()
    };
    let body = try_render(input, &options).unwrap();
    assert!(matches!(body, Rendered::Full(_)), "got {body:?}");
}

#[test]
fn oversized_input_falls_back_to_plain_text() {
    let options = RenderOptions {
        max_input_bytes: 8,
        ..options()
    };
    let input = "more than eight bytes";
    assert!(matches!(
        try_render(input, &options),
        Err(MarkdownError::InputTooLarge { len: 21, max: 8 })
    ));
    assert_eq!(render_message(input, &options).body, Rendered::Plain(input.into()));
}

#[test]
fn runaway_nesting_falls_back_to_plain_text() {
    // each strikethrough level peels one tilde off each end
    let input = "~".repeat(200);
    assert!(matches!(
        try_render(&input, &options()),
        Err(MarkdownError::NestingTooDeep { .. })
    ));
    assert_eq!(render_message(&input, &options()).body, Rendered::Plain(input.clone()));
}

const NEAR_CAP: usize = DEFAULT_MAX_INPUT_BYTES - 16;

#[rstest]
#[case::padded_inline_code(format!("a `{}x", " ".repeat(NEAR_CAP)))]
#[case::one_long_word("a".repeat(NEAR_CAP))]
#[case::dotted_chain("a.".repeat(NEAR_CAP / 2))]
#[case::almost_emails("a@".repeat(NEAR_CAP / 2))]
#[case::scheme_like("a:".repeat(NEAR_CAP / 2))]
fn inputs_at_the_size_cap_render_quickly(#[case] input: String) {
    assert!(input.len() <= DEFAULT_MAX_INPUT_BYTES);
    let started = Instant::now();
    let body = try_render(&input, &options()).unwrap();
    let elapsed = started.elapsed();
    assert!(matches!(body, Rendered::Full(_)));
    assert!(elapsed < Duration::from_secs(5), "took {elapsed:?}");
}

#[rstest]
fn rendering_never_fails(
    #[values(Platform::Desktop, Platform::Mobile)] platform: Platform,
    #[values(
        "",
        "```",
        "> ```",
        "*",
        "\\",
        "$>kb$",
        "`",
        ">>>>>>>>>>>>>>>>>>>>>>>>>",
        "_*~`",
        "\u{0}",
        "~~~~",
        "```rust\nfn main() {}",
        "> a\n>> b\n>>> ```c```"
    )]
    input: &str,
) {
    let options = RenderOptions {
        platform,
        ..options()
    };
    let message = render_message(input, &options);
    if let Rendered::Plain(text) = &message.body {
        assert_eq!(text, input);
    }
}
