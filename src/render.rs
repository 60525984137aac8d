use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};
use yansi::Paint;

use crate::content;

/// Minimal styling categories used when coloring note output.
#[derive(Clone, Copy)]
enum Style {
    Heading,
    Bullet,
    Rule,
    Body,
}

/// Render note content for the terminal. Markup content is reduced to its
/// text first; the text is then treated as Markdown, since plain notes use
/// `-` bullets and numbered lists.
pub fn render_content(raw: &str, width: usize, use_color: bool) -> String {
    render_markdown(&content::display_text(raw, width), use_color)
}

pub fn render_markdown(input: &str, use_color: bool) -> String {
    let mut rendered = String::new();
    let mut list_depth: usize = 0;
    let mut ordered: Vec<Option<u64>> = Vec::new();

    for event in Parser::new(input) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                rendered.push('\n');
                let mark = match level {
                    HeadingLevel::H1 => "# ",
                    HeadingLevel::H2 => "## ",
                    HeadingLevel::H3 => "### ",
                    _ => "#### ",
                };
                push_styled(&mut rendered, mark, Style::Heading, use_color);
            }
            Event::End(TagEnd::Heading(_)) => rendered.push('\n'),
            Event::End(TagEnd::Paragraph) => rendered.push_str("\n\n"),
            Event::Start(Tag::List(start)) => {
                list_depth += 1;
                ordered.push(start);
            }
            Event::End(TagEnd::List(_)) => {
                list_depth = list_depth.saturating_sub(1);
                ordered.pop();
                rendered.push('\n');
            }
            Event::Start(Tag::Item) => {
                rendered.push_str(&"  ".repeat(list_depth.saturating_sub(1)));
                let marker = match ordered.last_mut() {
                    Some(Some(n)) => {
                        let m = format!("{n}. ");
                        *n += 1;
                        m
                    }
                    _ => "- ".to_string(),
                };
                push_styled(&mut rendered, &marker, Style::Bullet, use_color);
            }
            Event::End(TagEnd::Item) => {
                if !rendered.ends_with('\n') {
                    rendered.push('\n');
                }
            }
            Event::Text(t) | Event::Code(t) => {
                push_styled(&mut rendered, &t, Style::Body, use_color)
            }
            Event::SoftBreak | Event::HardBreak => rendered.push('\n'),
            Event::Rule => {
                push_styled(&mut rendered, "\n---\n", Style::Rule, use_color);
            }
            Event::Html(t) | Event::InlineHtml(t) => rendered.push_str(&t),
            _ => {}
        }
    }

    rendered.trim().to_string()
}

fn push_styled(buf: &mut String, text: &str, style: Style, use_color: bool) {
    if use_color {
        let painted = match style {
            Style::Heading => Paint::cyan(text).bold(),
            Style::Bullet => Paint::yellow(text).bold(),
            Style::Rule => Paint::new(text).dim(),
            Style::Body => Paint::new(text),
        };
        buf.push_str(&painted.to_string());
    } else {
        buf.push_str(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_bullets_without_color() {
        let out = render_markdown("Tokyo\n- Senso-ji\n- Shibuya", false);
        assert!(out.contains("- Senso-ji"));
        assert!(out.contains("- Shibuya"));
        assert!(out.starts_with("Tokyo"));
    }

    #[test]
    fn numbers_ordered_lists() {
        let out = render_markdown("1. one\n2. two", false);
        assert!(out.contains("1. one"));
        assert!(out.contains("2. two"));
    }

    #[test]
    fn markup_content_is_rendered_as_text() {
        let out = render_content("<p>Hello <span>there</span></p><p>again</p>", 80, false);
        assert!(out.contains("Hello there"));
        assert!(out.contains("again"));
        assert!(!out.contains("<p>"));
    }

    #[test]
    fn color_adds_escape_codes() {
        let out = render_markdown("# Title", true);
        assert!(out.contains("Title"));
        assert!(out.contains('\x1b'));
    }
}
