use chrono::{DateTime, Utc};
use yansi::Paint;

use crate::theme::Theme;

/// Color palette for consistent theming
pub struct ColorPalette {
    pub accent: (u8, u8, u8),    // Headers, selection marker
    pub muted: (u8, u8, u8),     // IDs, secondary text
    pub timestamp: (u8, u8, u8), // Timestamps
    pub highlight: (u8, u8, u8), // Search matches
    pub error: (u8, u8, u8),     // Validation messages
}

impl ColorPalette {
    pub fn for_theme(theme: &Theme) -> Self {
        let dark = theme.mode == crate::theme::ThemeMode::Dark;
        Self {
            accent: theme.color.rgb(),
            muted: if dark { (156, 163, 175) } else { (108, 112, 134) },
            timestamp: if dark { (137, 180, 250) } else { (30, 102, 245) },
            highlight: (243, 139, 168),
            error: (239, 68, 68),
        }
    }
}

/// Formatting context passed through rendering pipeline
pub struct FormatContext {
    pub use_color: bool,
    pub palette: ColorPalette,
}

impl FormatContext {
    pub fn new(use_color: bool, theme: &Theme) -> Self {
        Self { use_color, palette: ColorPalette::for_theme(theme) }
    }

    fn paint(&self, text: &str, (r, g, b): (u8, u8, u8)) -> String {
        if self.use_color {
            Paint::rgb(text, r, g, b).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn format_id(&self, id: &str) -> String {
        self.paint(id, self.palette.muted)
    }

    pub fn format_header(&self, text: &str) -> String {
        if self.use_color {
            let (r, g, b) = self.palette.accent;
            Paint::rgb(text, r, g, b).bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn format_timestamp(&self, ts: &str) -> String {
        self.paint(ts, self.palette.timestamp)
    }

    pub fn format_error(&self, text: &str) -> String {
        self.paint(text, self.palette.error)
    }

    pub fn format_tag(&self, tag: &str) -> String {
        if self.use_color {
            let (r, g, b) = crate::tags::color_for_tag(tag);
            Paint::rgb(tag, r, g, b).bold().to_string()
        } else {
            tag.to_string()
        }
    }

    pub fn format_tags(&self, tags: &[String]) -> String {
        tags.iter()
            .map(|t| self.format_tag(&format!("#{t}")))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn highlight_match(&self, text: &str, query: Option<&str>) -> String {
        let Some(q) = query.map(str::trim) else { return text.to_string() };
        if q.is_empty() || !self.use_color {
            return text.to_string();
        }

        let lower = text.to_lowercase();
        // byte offsets only line up when lowercasing kept the length
        if lower.len() != text.len() {
            return text.to_string();
        }
        let q_lower = q.to_lowercase();
        let mut out = String::new();
        let mut start = 0;
        while let Some(pos) = lower[start..].find(&q_lower) {
            let begin = start + pos;
            let end = begin + q_lower.len();
            out.push_str(&text[start..begin]);
            out.push_str(&self.paint(&text[begin..end], self.palette.highlight));
            start = end;
        }
        out.push_str(&text[start..]);
        out
    }
}

/// Timestamp formatting with relative/absolute modes
pub struct TimeFormatter {
    relative_mode: bool,
    now: DateTime<Utc>,
}

impl TimeFormatter {
    pub fn new(relative_mode: bool, now: DateTime<Utc>) -> Self {
        Self { relative_mode, now }
    }

    pub fn format(&self, dt: DateTime<Utc>) -> String {
        if self.relative_mode {
            self.format_relative(dt)
        } else {
            dt.format("%d%b%y %H:%M").to_string()
        }
    }

    pub fn format_relative(&self, dt: DateTime<Utc>) -> String {
        let dur = self.now.signed_duration_since(dt);
        let total_minutes = dur.num_minutes().max(0);
        let total_hours = dur.num_hours().max(0);
        let total_days = dur.num_days().max(0);

        if total_hours == 0 {
            return if total_minutes == 0 {
                "just now".to_string()
            } else {
                format!("{}m ago", total_minutes)
            };
        }
        if total_days < 30 {
            if total_days == 0 {
                return format!("{}h ago", total_hours);
            }
            let hours = total_hours - total_days * 24;
            if hours > 0 {
                format!("{}d {}h ago", total_days, hours)
            } else {
                format!("{}d ago", total_days)
            }
        } else if total_days < 365 {
            let months = total_days / 30;
            let days = total_days % 30;
            if days > 0 {
                format!("{}mo {}d ago", months, days)
            } else {
                format!("{}mo ago", months)
            }
        } else {
            let years = total_days / 365;
            let months = (total_days % 365) / 30;
            if months > 0 {
                format!("{}y {}mo ago", years, months)
            } else {
                format!("{}y ago", years)
            }
        }
    }
}
