//! Table and text layout helpers used by the shell.
//! Keeps ANSI-aware width calculations and simple table rendering in one place.

/// Render a simple text table. Column widths are auto-computed from the widest
/// cell (header or row) using display lengths that ignore ANSI color codes.
pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    if headers.is_empty() {
        return String::new();
    }
    let cols = headers.len();
    let mut widths: Vec<usize> =
        headers.iter().map(|h| display_len(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(cols) {
            widths[i] = widths[i].max(display_len(cell));
        }
    }

    let header_line = format_row(headers, &widths);
    let mut out = String::new();
    out.push_str(&header_line);
    out.push('\n');
    out.push_str(&"=".repeat(display_len(&header_line)));
    for row in rows {
        out.push('\n');
        out.push_str(&format_row(row, &widths));
    }
    out
}

fn format_row(row: &[String], widths: &[usize]) -> String {
    let parts: Vec<String> = row
        .iter()
        .zip(widths.iter())
        .map(|(cell, width)| pad_field(cell, *width))
        .collect();
    parts.join(" | ").trim_end().to_string()
}

/// Right-pad a field based on visible length (ignoring ANSI codes).
pub fn pad_field(display: &str, target: usize) -> String {
    let mut out = display.to_string();
    out.push_str(&" ".repeat(target.saturating_sub(display_len(display))));
    out
}

/// Truncate text to a width, appending an ellipsis when needed.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    let len = text.chars().count();
    if len <= max_width {
        return text.to_string();
    }
    if max_width == 1 {
        return "…".to_string();
    }
    let mut out =
        text.chars().take(max_width.saturating_sub(1)).collect::<String>();
    out.push('…');
    out
}

/// Compute visible length of a string, ignoring ANSI escape sequences.
pub fn display_len(s: &str) -> usize {
    let mut len = 0;
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            for next in chars.by_ref() {
                if next == 'm' {
                    break;
                }
            }
            continue;
        }
        len += 1;
    }
    len
}

/// Width of the attached terminal, if any.
pub fn terminal_columns() -> Option<usize> {
    terminal_size::terminal_size().map(|(w, _)| w.0 as usize)
}
