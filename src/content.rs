//! Content format sniffing and the plain/markup conversions behind the
//! editor's rich/plain toggle.
//!
//! Markup here means the small HTML subset produced by the rich editor:
//! one `<p>` per line, `<p><br></p>` for blank lines. The toggle needs an
//! exact line round trip, so it uses its own scanner; display goes through
//! `html2text`.

use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentFormat {
    Plain,
    Markup,
}

/// Classify content as markup when it contains something shaped like a tag:
/// `<`, an optional `/`, an ASCII letter, and a later `>`.
///
/// Incidental text such as `a<b and c>d` is classified as markup too.
pub fn detect_format(content: &str) -> ContentFormat {
    let bytes = content.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b != b'<' {
            continue;
        }
        let mut j = i + 1;
        if bytes.get(j) == Some(&b'/') {
            j += 1;
        }
        if bytes.get(j).is_some_and(|c| c.is_ascii_alphabetic())
            && bytes[j + 1..].contains(&b'>')
        {
            return ContentFormat::Markup;
        }
    }
    ContentFormat::Plain
}

pub fn is_markup(content: &str) -> bool {
    detect_format(content) == ContentFormat::Markup
}

/// Wrap every line in a paragraph. Whitespace-only lines become an empty
/// paragraph marker so they survive the trip back to plain text.
pub fn plain_to_markup(text: &str) -> String {
    if text.trim().is_empty() {
        return "<p></p>".to_string();
    }
    text.split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                "<p><br></p>".to_string()
            } else {
                format!("<p>{}</p>", escape(line))
            }
        })
        .collect()
}

/// Extract the text of a markup string, one line per block element.
pub fn markup_to_plain(markup: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_block = false;
    let mut pending_br = false;
    let mut rest = markup;

    while !rest.is_empty() {
        let Some(open) = rest.find('<') else {
            push_text(&mut lines, &mut current, &mut pending_br, rest);
            break;
        };
        let (text, tail) = rest.split_at(open);
        push_text(&mut lines, &mut current, &mut pending_br, text);

        let Some(close) = tail.find('>') else {
            push_text(&mut lines, &mut current, &mut pending_br, tail);
            break;
        };
        let tag = Tag::parse(&tail[1..close]);
        rest = &tail[close + 1..];

        match tag {
            Tag::Block { closing: false } => {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                in_block = true;
                pending_br = false;
            }
            Tag::Block { closing: true } => {
                lines.push(std::mem::take(&mut current));
                in_block = false;
                pending_br = false;
            }
            Tag::LineBreak => {
                if in_block && current.is_empty() && !pending_br {
                    pending_br = true;
                } else {
                    lines.push(std::mem::take(&mut current));
                }
            }
            Tag::Other => {}
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines.join("\n")
}

/// Plain text for display, whatever the stored format. Markup is laid out
/// by `html2text` at `width` columns; if that fails the line-exact
/// [`markup_to_plain`] conversion is used instead.
pub fn display_text(content: &str, width: usize) -> String {
    match detect_format(content) {
        ContentFormat::Plain => content.to_string(),
        ContentFormat::Markup => match html2text::from_read(content.as_bytes(), width) {
            Ok(text) => text.trim_end().to_string(),
            Err(err) => {
                warn!(%err, "html2text failed, using line conversion");
                markup_to_plain(content)
            }
        },
    }
}

/// Flip content between formats, as the editor toggle does.
pub fn toggle(content: &str) -> String {
    match detect_format(content) {
        ContentFormat::Plain => plain_to_markup(content),
        ContentFormat::Markup => markup_to_plain(content),
    }
}

enum Tag {
    Block { closing: bool },
    LineBreak,
    Other,
}

impl Tag {
    fn parse(inner: &str) -> Self {
        let (closing, body) = match inner.strip_prefix('/') {
            Some(b) => (true, b),
            None => (false, inner),
        };
        let name: String = body
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match name.as_str() {
            "br" => Tag::LineBreak,
            "p" | "div" | "li" | "blockquote" | "pre" | "h1" | "h2" | "h3"
            | "h4" | "h5" | "h6" => Tag::Block { closing },
            _ => Tag::Other,
        }
    }
}

fn push_text(
    lines: &mut Vec<String>,
    current: &mut String,
    pending_br: &mut bool,
    text: &str,
) {
    if text.is_empty() {
        return;
    }
    if *pending_br {
        lines.push(std::mem::take(current));
        *pending_br = false;
    }
    current.push_str(&unescape(text));
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
    out
}

fn unescape(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    const ENTITIES: &[(&str, &str)] = &[
        ("&lt;", "<"),
        ("&gt;", ">"),
        ("&quot;", "\""),
        ("&#39;", "'"),
        ("&apos;", "'"),
        ("&nbsp;", " "),
        ("&amp;", "&"),
    ];
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match ENTITIES.iter().find(|(name, _)| tail.starts_with(name)) {
            Some((name, value)) => {
                out.push_str(value);
                rest = &tail[name.len()..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
