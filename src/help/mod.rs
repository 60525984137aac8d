use crate::shared::table::terminal_columns;

mod content;

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum Section {
    Browse,
    Edit,
    Settings,
    Environment,
}

impl Section {
    const ORDER: [Section; 4] =
        [Section::Browse, Section::Edit, Section::Settings, Section::Environment];

    fn label(self) -> &'static str {
        match self {
            Section::Browse => "Browsing",
            Section::Edit => "Editing",
            Section::Settings => "Settings & data",
            Section::Environment => "Environment",
        }
    }
}

#[derive(Clone, Copy)]
pub(crate) struct HelpFlag<'a> {
    pub name: &'a str,
    pub desc: &'a str,
}

#[derive(Clone, Copy)]
pub(crate) struct HelpTopic<'a> {
    pub name: &'a str,
    pub summary: &'a str,
    pub usage: &'a str,
    pub details: &'a [&'a str],
    pub flags: &'a [HelpFlag<'a>],
    pub aliases: &'a [&'a str],
    pub section: Section,
    pub examples: &'a [&'a str],
}

#[derive(Clone, Copy)]
pub(crate) struct HelpBook<'a> {
    pub title: &'a str,
    pub usage: &'a str,
    pub topics: &'a [HelpTopic<'a>],
    pub footer: &'a [&'a str],
}

impl<'a> HelpBook<'a> {
    fn find(&self, name: &str) -> Option<&HelpTopic<'a>> {
        self.topics.iter().find(|topic| {
            topic.name.eq_ignore_ascii_case(name)
                || topic.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
        })
    }

    fn in_section(
        &self,
        section: Section,
    ) -> impl Iterator<Item = &HelpTopic<'a>> {
        self.topics.iter().filter(move |t| t.section == section)
    }
}

/// Help text for `topic`, or the overview. Unknown topics fall back to the
/// overview with a note on the first line.
pub fn render(topic: Option<&str>) -> Vec<String> {
    let book = content::book();
    let width = terminal_columns().unwrap_or(96).clamp(64, 120);
    let printer = HelpPrinter::new(width);

    match topic {
        None => printer.render_overview(&book),
        Some(name) => match book.find(name) {
            Some(entry) => printer.render_topic(&book, entry),
            None => {
                let mut lines = vec![format!("Unknown help topic: {name}")];
                lines.extend(printer.render_overview(&book));
                lines
            }
        },
    }
}

struct HelpPrinter {
    width: usize,
}

impl HelpPrinter {
    fn new(width: usize) -> Self {
        Self { width }
    }

    fn render_overview(&self, book: &HelpBook<'_>) -> Vec<String> {
        let mut out = Vec::new();
        out.push(book.title.to_string());
        out.push(format!("usage: {}", book.usage));
        out.push(String::new());

        for section in Section::ORDER {
            let rows: Vec<(String, String)> = book
                .in_section(section)
                .map(|t| (t.usage.to_string(), t.summary.to_string()))
                .collect();
            out.extend(self.render_block(section.label(), &rows));
        }

        self.push_footer(book, &mut out);
        out
    }

    fn render_topic(
        &self,
        book: &HelpBook<'_>,
        topic: &HelpTopic<'_>,
    ) -> Vec<String> {
        let mut out = Vec::new();
        out.push(format!("{}: {}", topic.name, topic.summary));
        out.push(format!("usage: {}", topic.usage));
        if !topic.aliases.is_empty() {
            out.push(format!("aliases: {}", topic.aliases.join(", ")));
        }
        out.push(String::new());

        for line in topic.details {
            out.extend(self.wrap(line, self.width));
        }
        if !topic.details.is_empty() {
            out.push(String::new());
        }

        if !topic.flags.is_empty() {
            let flags: Vec<(String, String)> = topic
                .flags
                .iter()
                .map(|f| (f.name.to_string(), f.desc.to_string()))
                .collect();
            out.extend(self.render_block("Options", &flags));
        }

        if !topic.examples.is_empty() {
            out.push("Examples:".to_string());
            for ex in topic.examples {
                for l in self.wrap(ex, self.width.saturating_sub(2)) {
                    out.push(format!("  {l}"));
                }
            }
            out.push(String::new());
        }

        self.push_footer(book, &mut out);
        out
    }

    fn push_footer(&self, book: &HelpBook<'_>, out: &mut Vec<String>) {
        for line in book.footer {
            out.extend(self.wrap(line, self.width));
        }
    }

    fn render_block(
        &self,
        title: &str,
        rows: &[(String, String)],
    ) -> Vec<String> {
        if rows.is_empty() {
            return Vec::new();
        }
        let mut out = Vec::new();
        let min_desc = self.width / 2;
        let mut label_width =
            rows.iter().map(|r| r.0.len()).max().unwrap_or(0).min(38);
        if label_width + 4 + min_desc > self.width {
            label_width = self.width.saturating_sub(min_desc + 4);
        }
        let desc_width =
            self.width.saturating_sub(2 + label_width + 2).max(min_desc);

        out.push(format!("{title}:"));
        for (label, desc) in rows {
            let label_lines = self.wrap(label, label_width);
            let desc_lines = self.wrap(desc, desc_width);
            let rows = label_lines.len().max(desc_lines.len());
            for idx in 0..rows {
                let l = label_lines.get(idx).map(String::as_str).unwrap_or("");
                let d = desc_lines.get(idx).map(String::as_str).unwrap_or("");
                let line = format!("  {l:label_width$}  {d}");
                out.push(line.trim_end().to_string());
            }
        }
        out.push(String::new());
        out
    }

    fn wrap(&self, text: &str, width: usize) -> Vec<String> {
        let mut out = Vec::new();
        let mut line = String::new();
        for word in text.split_whitespace() {
            if line.is_empty() {
                line.push_str(word);
                continue;
            }
            if line.len() + 1 + word.len() <= width {
                line.push(' ');
                line.push_str(word);
            } else {
                out.push(line);
                line = word.to_string();
            }
        }
        if !line.is_empty() {
            out.push(line);
        }
        if out.is_empty() {
            out.push(String::new());
        }
        out
    }
}
