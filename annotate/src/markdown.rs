//! Markdown integration: drives the annotation pipeline over a
//! pulldown-cmark event stream and renders annotated HTML.
//!
//! This is the collaborator boundary. The core never parses Markdown; this
//! adapter maps the tokenizer's events onto the pipeline's eligibility
//! rules (code, links, images, ignore directives) and turns each
//! annotation into an inline HTML `<span>` the site theme styles into a
//! tooltip.

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag, TagEnd};

use crate::annotator::{OccurrenceTracker, TermAnnotator};
use crate::classify::ScanState;
use crate::token::{TermAnnotation, Token};

/// Annotates one Markdown document and renders it to HTML.
///
/// Uses the site's Markdown option set (tables, footnotes, strikethrough).
/// Text inside code spans, code blocks, links, images, and ignore-directive
/// regions reaches the output exactly as the tokenizer produced it.
#[must_use]
pub fn annotate_markdown(
    annotator: &TermAnnotator,
    source: &str,
    tracker: &mut OccurrenceTracker,
) -> String {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_TABLES);
    opts.insert(Options::ENABLE_FOOTNOTES);
    opts.insert(Options::ENABLE_STRIKETHROUGH);

    let directives = &annotator.options().ignore_directives;
    let mut state = ScanState::new();
    let mut code_depth: usize = 0;
    let mut events: Vec<Event> = Vec::new();

    for event in Parser::new_ext(source, opts) {
        match event {
            Event::Start(tag @ (Tag::Link { .. } | Tag::Image { .. })) => {
                state.enter_link();
                events.push(Event::Start(tag));
            }
            Event::End(tag @ (TagEnd::Link | TagEnd::Image)) => {
                state.leave_link();
                events.push(Event::End(tag));
            }
            Event::Start(tag @ Tag::CodeBlock(_)) => {
                code_depth += 1;
                events.push(Event::Start(tag));
            }
            Event::End(tag @ TagEnd::CodeBlock) => {
                code_depth = code_depth.saturating_sub(1);
                events.push(Event::End(tag));
            }
            Event::Html(content) => {
                state.observe_raw_markup(&content, directives);
                events.push(Event::Html(content));
            }
            Event::InlineHtml(content) => {
                state.observe_raw_markup(&content, directives);
                events.push(Event::InlineHtml(content));
            }
            Event::Text(text) => {
                if code_depth == 0 && state.eligible() {
                    match annotator.annotate_text(&text, tracker) {
                        Some(run) => {
                            for token in run {
                                match token {
                                    Token::Text(fragment) => {
                                        events.push(Event::Text(CowStr::from(fragment)));
                                    }
                                    Token::Annotation(annotation) => {
                                        events.push(Event::InlineHtml(CowStr::from(
                                            annotation_html(&annotation),
                                        )));
                                    }
                                    // annotate_text only emits text and
                                    // annotation tokens.
                                    _ => {}
                                }
                            }
                        }
                        None => events.push(Event::Text(text)),
                    }
                } else {
                    events.push(Event::Text(text));
                }
            }
            other => events.push(other),
        }
    }

    let mut html_out = String::new();
    html::push_html(&mut html_out, events.into_iter());
    html_out
}

/// Renders one annotation as the tooltip `<span>` consumed by the theme.
fn annotation_html(annotation: &TermAnnotation) -> String {
    format!(
        r#"<span class="glossa-term" data-source="{}" data-definition="{}" data-first="{}">{}</span>"#,
        escape_html(&annotation.source),
        escape_html(&annotation.definition),
        annotation.is_first,
        escape_html(&annotation.display),
    )
}

/// Escapes HTML special characters in a string.
#[must_use]
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::annotator::AnnotateOptions;
    use serde_json::json;

    fn fixture() -> TermAnnotator {
        let dict = glossa_terms::validate(&json!({
            "version": "1.0.0",
            "lastUpdated": "2026-08-01",
            "terms": {
                "user": {
                    "display": "用户",
                    "source": "User",
                    "definition": "A simulated visitor generating load.",
                    "category": "core",
                    "related": []
                },
                "task-set": {
                    "display": "任务集",
                    "source": "TaskSet",
                    "definition": "A weighted collection of tasks.",
                    "category": "core",
                    "related": []
                }
            }
        }))
        .expect("valid fixture");
        TermAnnotator::new(dict, AnnotateOptions::default()).expect("pattern compiles")
    }

    #[test]
    fn prose_occurrence_becomes_tooltip_span() {
        let annotator = fixture();
        let mut tracker = OccurrenceTracker::new();
        let html = annotate_markdown(&annotator, "每个User代表一个访问者。", &mut tracker);
        assert!(html.contains(r#"class="glossa-term""#), "got: {}", html);
        assert!(html.contains(r#"data-source="User""#), "got: {}", html);
        assert!(html.contains(r#"data-first="true""#), "got: {}", html);
        assert!(html.contains(">用户</span>"), "got: {}", html);
    }

    #[test]
    fn second_occurrence_is_not_first() {
        let annotator = fixture();
        let mut tracker = OccurrenceTracker::new();
        let html = annotate_markdown(&annotator, "User first. User second.", &mut tracker);
        assert!(html.contains(r#"data-first="true""#));
        assert!(html.contains(r#"data-first="false""#));
    }

    #[test]
    fn inline_code_is_untouched() {
        let annotator = fixture();
        let mut tracker = OccurrenceTracker::new();
        let html = annotate_markdown(&annotator, "Prose User and `User` in code.", &mut tracker);
        assert!(html.contains("<code>User</code>"), "got: {}", html);
        // Exactly one annotation: the prose occurrence.
        assert_eq!(html.matches("glossa-term").count(), 1, "got: {}", html);
    }

    #[test]
    fn fenced_block_is_untouched() {
        let annotator = fixture();
        let mut tracker = OccurrenceTracker::new();
        let source = "```python\nclass User:\n    pass\n```\n";
        let html = annotate_markdown(&annotator, source, &mut tracker);
        assert!(html.contains("class User:"), "got: {}", html);
        assert!(!html.contains("glossa-term"), "got: {}", html);
    }

    #[test]
    fn link_labels_are_untouched() {
        let annotator = fixture();
        let mut tracker = OccurrenceTracker::new();
        let html = annotate_markdown(
            &annotator,
            "See the [User guide](https://example.com/user) for the User class.",
            &mut tracker,
        );
        assert!(html.contains(">User guide</a>"), "got: {}", html);
        assert_eq!(html.matches("glossa-term").count(), 1, "got: {}", html);
    }

    #[test]
    fn ignore_directives_protect_a_region() {
        let annotator = fixture();
        let mut tracker = OccurrenceTracker::new();
        let source = "\
<!-- glossa:ignore-start -->

User inside the ignored region.

<!-- glossa:ignore-end -->

User outside.
";
        let html = annotate_markdown(&annotator, source, &mut tracker);
        assert_eq!(html.matches("glossa-term").count(), 1, "got: {}", html);
        assert!(html.contains("User inside the ignored region."), "got: {}", html);
    }

    #[test]
    fn longest_term_wins_in_markdown_too() {
        let annotator = fixture();
        let mut tracker = OccurrenceTracker::new();
        let html = annotate_markdown(&annotator, "Define a TaskSet here.", &mut tracker);
        assert!(html.contains(">任务集</span>"), "got: {}", html);
        assert_eq!(html.matches("glossa-term").count(), 1, "got: {}", html);
    }

    #[test]
    fn definition_attribute_is_escaped() {
        let dict = glossa_terms::validate(&json!({
            "version": "1.0.0",
            "lastUpdated": "2026-08-01",
            "terms": {
                "hatch": {
                    "display": "孵化",
                    "source": "hatch",
                    "definition": "Rate of \"new\" users, i.e. <spawn>.",
                    "category": "core",
                    "related": []
                }
            }
        }))
        .expect("valid fixture");
        let annotator =
            TermAnnotator::new(dict, AnnotateOptions::default()).expect("pattern compiles");
        let mut tracker = OccurrenceTracker::new();
        let html = annotate_markdown(&annotator, "Set the hatch rate.", &mut tracker);
        assert!(html.contains("&quot;new&quot;"), "got: {}", html);
        assert!(html.contains("&lt;spawn&gt;"), "got: {}", html);
    }
}
