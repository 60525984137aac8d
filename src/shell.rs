//! Line-oriented command shell over one in-memory [`AppState`].

use std::io::{BufRead, Write};
use std::path::Path;
use tracing::debug;

use crate::args::{
    ArgParser, key_value, parse_switch, split_words, unescape_newlines,
};
use crate::backup;
use crate::config::Config;
use crate::content::{self, ContentFormat};
use crate::error::{NotesError, Result};
use crate::formatting::{FormatContext, TimeFormatter};
use crate::help;
use crate::note::{self, Note};
use crate::query;
use crate::render::render_content;
use crate::session::SessionMode;
use crate::shared::table::{render_table, terminal_columns, truncate_with_ellipsis};
use crate::state::AppState;
use crate::tags;
use crate::theme::ThemePatch;
use crate::view::{SortBy, ViewKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Shell {
    state: AppState,
    config: Config,
}

impl Shell {
    pub fn new(state: AppState, config: Config) -> Self {
        Self { state, config }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run commands from `input` until it ends or `quit`. Command errors go
    /// to `err` and do not stop the loop.
    pub fn run(
        &mut self,
        input: impl BufRead,
        out: &mut impl Write,
        err: &mut impl Write,
    ) -> std::io::Result<()> {
        for line in input.lines() {
            let line = line?;
            match self.execute(&line, out) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(e) => {
                    let ctx = self.format_context();
                    writeln!(err, "{}", ctx.format_error(&describe(&e)))?;
                }
            }
        }
        out.flush()
    }

    pub fn execute(&mut self, line: &str, out: &mut impl Write) -> Result<Flow> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(Flow::Continue);
        }
        let mut words = split_words(trimmed)?;
        if words.is_empty() {
            return Ok(Flow::Continue);
        }
        let cmd = words.remove(0);
        debug!(%cmd, "shell command");

        match cmd.as_str() {
            "list" | "ls" => self.list(out)?,
            "show" | "view-note" => self.show(words, out)?,
            "select" => self.select(words, out)?,
            "next" => {
                self.state.select_next();
                self.print_selection(out)?;
            }
            "prev" => {
                self.state.select_previous();
                self.print_selection(out)?;
            }
            "view" => {
                let view: ViewKind = one_arg(words, "view all|archived")?.parse()?;
                self.state.set_view(view);
                writeln!(out, "View: {}", view.title())?;
                self.print_selection(out)?;
            }
            "tag" => self.tag(words, out)?,
            "search" | "find" => {
                let query = words.join(" ");
                self.state.set_search_query(query.clone());
                if query.trim().is_empty() {
                    writeln!(out, "Search cleared")?;
                } else {
                    writeln!(out, "Search: {query}")?;
                }
            }
            "sort" => {
                let sort: SortBy = one_arg(words, "sort <mode>")?.parse()?;
                self.state.set_sort_by(sort);
                writeln!(out, "Sort: {sort}")?;
            }
            "tags" => self.list_tags(out)?,
            "new" => {
                self.state.start_creating();
                writeln!(out, "New note draft (set title|body|tags, then save)")?;
            }
            "edit" => {
                self.state.start_editing()?;
                self.print_draft(out)?;
            }
            "set" => self.set_field(words, out)?,
            "format" => {
                let editor = self.state.editor()?;
                editor.toggle_format();
                let now_markup = editor
                    .draft()
                    .is_some_and(|d| content::is_markup(&d.content));
                writeln!(
                    out,
                    "Draft body is now {}",
                    if now_markup { "rich" } else { "plain" }
                )?;
            }
            "draft" => self.print_draft(out)?,
            "save" => {
                let editing = self.state.session().editing_id().is_some();
                let id = self.state.save()?;
                let verb = if editing { "Updated" } else { "Created" };
                writeln!(out, "{verb} note {id}")?;
            }
            "cancel" => {
                self.state.cancel();
                writeln!(out, "Draft discarded")?;
            }
            "delete" | "rm" => {
                let id = self.target_id(words)?;
                self.state.delete(&id)?;
                writeln!(out, "Deleted {id}")?;
            }
            "archive" => {
                let id = self.target_id(words)?;
                self.state.archive(&id)?;
                writeln!(out, "Archived {id}")?;
            }
            "unarchive" => {
                let id = self.target_id(words)?;
                self.state.unarchive(&id)?;
                writeln!(out, "Unarchived {id}")?;
            }
            "theme" => self.theme(words, out)?,
            "prefs" => self.prefs(words, out)?,
            "export" => self.export(words, out)?,
            "import" => {
                let path = one_arg(words, "import <path>")?;
                let notes = backup::read_backup(Path::new(&path))?;
                let count = notes.len();
                self.state.import_all(notes);
                writeln!(out, "Imported {count} notes")?;
            }
            "clear" => {
                if !words.iter().any(|w| w == "--yes") {
                    return Err(NotesError::InvalidArgument(
                        "This deletes every note. Run `clear --yes` to confirm".to_string(),
                    ));
                }
                self.state.clear();
                writeln!(out, "All data cleared")?;
            }
            "help" => {
                for line in help::render(words.first().map(String::as_str)) {
                    writeln!(out, "{line}")?;
                }
            }
            "quit" | "exit" => return Ok(Flow::Quit),
            other => {
                return Err(NotesError::InvalidArgument(format!(
                    "Unknown command: {other} (try `help`)"
                )));
            }
        }
        Ok(Flow::Continue)
    }

    fn format_context(&self) -> FormatContext {
        FormatContext::new(self.config.use_color, self.state.theme())
    }

    /// Explicit id argument, or the selected note.
    fn target_id(&self, words: Vec<String>) -> Result<String> {
        match words.into_iter().next() {
            Some(id) => Ok(id),
            None => self
                .state
                .view()
                .selected_note_id
                .clone()
                .ok_or(NotesError::NothingSelected),
        }
    }

    fn list(&self, out: &mut impl Write) -> Result<()> {
        let ctx = self.format_context();
        let view = self.state.view();
        let counts = query::view_counts(self.state.store(), &view.search_query);
        writeln!(
            out,
            "{}  (all {}, archived {}, sort {})",
            ctx.format_header(&view.heading()),
            counts.active,
            counts.archived,
            view.sort_by
        )?;

        let notes = self.state.visible_notes();
        if notes.is_empty() {
            writeln!(out, "No notes found.")?;
            return Ok(());
        }

        let query = view.has_search().then_some(view.search_query.as_str());
        let times = TimeFormatter::new(false, note::now());
        let title_width = terminal_columns()
            .map(|w| w.saturating_sub(if view.compact_view { 20 } else { 60 }))
            .unwrap_or(48)
            .clamp(16, 64);
        let selected = view.selected_note_id.as_deref();

        let mut headers = vec![" ".to_string(), "ID".to_string(), "Title".to_string()];
        if !view.compact_view {
            headers.push("Updated".to_string());
            headers.push("Tags".to_string());
        }
        let rows: Vec<Vec<String>> = notes
            .iter()
            .map(|n| {
                let marker = if selected == Some(n.id.as_str()) { ">" } else { " " };
                let title = truncate_with_ellipsis(&n.title, title_width);
                let mut row = vec![
                    marker.to_string(),
                    ctx.format_id(&n.id),
                    ctx.highlight_match(&title, query),
                ];
                if !view.compact_view {
                    row.push(ctx.format_timestamp(&times.format(n.updated_at)));
                    row.push(ctx.format_tags(&n.tags));
                }
                row
            })
            .collect();
        writeln!(out, "{}", render_table(&headers, &rows))?;
        Ok(())
    }

    fn show(&self, words: Vec<String>, out: &mut impl Write) -> Result<()> {
        let mut render = false;
        let mut id: Option<String> = None;
        let mut parser = ArgParser::new(words, "show");
        while let Some(arg) = parser.next() {
            if arg == "--render" || arg == "-r" {
                render = true;
            } else if arg.starts_with('-') || id.is_some() {
                return Err(parser.unknown(&arg));
            } else {
                id = Some(arg);
            }
        }

        let note = match id {
            Some(id) => self
                .state
                .store()
                .get(&id)
                .ok_or(NotesError::NoteNotFound(id))?,
            None => self.state.selected_note().ok_or(NotesError::NothingSelected)?,
        };
        self.print_note(note, render, out)
    }

    fn print_note(&self, note: &Note, render: bool, out: &mut impl Write) -> Result<()> {
        let ctx = self.format_context();
        let times = TimeFormatter::new(false, note::now());
        let format = match note.format() {
            ContentFormat::Plain => "plain",
            ContentFormat::Markup => "rich",
        };
        writeln!(out, "# {} ({})", ctx.format_header(&note.title), ctx.format_id(&note.id))?;
        writeln!(out, "Created: {}", ctx.format_timestamp(&times.format(note.created_at)))?;
        writeln!(out, "Updated: {}", ctx.format_timestamp(&times.format(note.updated_at)))?;
        if !note.tags.is_empty() {
            writeln!(out, "Tags: {}", ctx.format_tags(&note.tags))?;
        }
        if note.is_archived {
            writeln!(out, "Archived")?;
        }
        writeln!(out, "Format: {format}")?;
        writeln!(out)?;
        let width = terminal_columns().unwrap_or(80).max(20);
        let body = if render {
            render_content(&note.content, width, self.config.use_color)
        } else {
            content::display_text(&note.content, width)
        };
        writeln!(out, "{body}")?;
        Ok(())
    }

    fn print_selection(&self, out: &mut impl Write) -> Result<()> {
        match self.state.selected_note() {
            Some(n) => writeln!(out, "Selected {} ({})", n.id, n.title)?,
            None => writeln!(out, "No note selected")?,
        }
        Ok(())
    }

    fn select(&mut self, words: Vec<String>, out: &mut impl Write) -> Result<()> {
        let arg = one_arg(words, "select <id> | select --none")?;
        let id = (arg != "--none").then_some(arg.as_str());
        self.state.set_selected_note_id(id)?;
        self.print_selection(out)
    }

    fn tag(&mut self, words: Vec<String>, out: &mut impl Write) -> Result<()> {
        let arg = one_arg(words, "tag <name> | tag --clear")?;
        if arg == "--clear" {
            self.state.set_selected_tag(None);
        } else {
            self.state.choose_tag(&arg);
        }
        match &self.state.view().selected_tag {
            Some(tag) => writeln!(out, "Tag filter: {tag}")?,
            None => writeln!(out, "Tag filter cleared")?,
        }
        Ok(())
    }

    fn list_tags(&self, out: &mut impl Write) -> Result<()> {
        let store = self.state.store();
        let stats = tags::tag_stats(store.iter());
        if stats.is_empty() {
            writeln!(out, "No tags found.")?;
            return Ok(());
        }
        let shown = query::tag_counts(store, self.state.view());
        let ctx = self.format_context();
        let times = TimeFormatter::new(false, note::now());
        let never = || "n/a".to_string();

        let headers: Vec<String> = ["Tag", "Shown", "Total", "Archived", "First", "Last"]
            .iter()
            .map(|h| h.to_string())
            .collect();
        let rows: Vec<Vec<String>> = stats
            .iter()
            .map(|(tag, stat)| {
                vec![
                    ctx.format_tag(tag),
                    shown.get(tag).copied().unwrap_or(0).to_string(),
                    stat.count.to_string(),
                    stat.archived.to_string(),
                    stat.first.map(|d| times.format(d)).unwrap_or_else(never),
                    stat.last.map(|d| times.format(d)).unwrap_or_else(never),
                ]
            })
            .collect();
        writeln!(out, "{}", render_table(&headers, &rows))?;
        Ok(())
    }

    fn set_field(&mut self, words: Vec<String>, out: &mut impl Write) -> Result<()> {
        let mut parser = ArgParser::new(words, "set");
        let field = parser.next().ok_or_else(|| {
            NotesError::InvalidArgument("Usage: set title|body|tags <text...>".to_string())
        })?;
        let value = parser.collect_remaining().join(" ");
        let editor = self.state.editor()?;
        match field.as_str() {
            "title" => editor.set_title(value),
            "body" | "content" => editor.set_content(unescape_newlines(&value)),
            "tags" => editor.set_tags_input(value),
            other => {
                return Err(NotesError::InvalidArgument(format!(
                    "Unknown draft field: {other} (expected title|body|tags)"
                )));
            }
        }
        writeln!(out, "Draft {field} set")?;
        Ok(())
    }

    fn print_draft(&self, out: &mut impl Write) -> Result<()> {
        let session = self.state.session();
        let Some(draft) = session.draft() else {
            return Err(NotesError::NoActiveSession);
        };
        let ctx = self.format_context();
        let heading = match session.mode() {
            SessionMode::Editing { note_id } => format!("Editing note {note_id}"),
            _ => "New note".to_string(),
        };
        writeln!(out, "{}", ctx.format_header(&heading))?;
        writeln!(out, "Title: {}", draft.title)?;
        writeln!(out, "Tags: {}", draft.tags_input)?;
        writeln!(out, "Body:")?;
        writeln!(out, "{}", draft.content)?;
        let errors = session.errors();
        for msg in [errors.title, errors.content].into_iter().flatten() {
            writeln!(out, "{}", ctx.format_error(&format!("! {msg}")))?;
        }
        Ok(())
    }

    fn theme(&mut self, words: Vec<String>, out: &mut impl Write) -> Result<()> {
        if words.first().map(String::as_str) == Some("toggle") {
            self.state.toggle_theme_mode();
        } else if !words.is_empty() {
            let mut patch = ThemePatch::default();
            for word in &words {
                match key_value(word)? {
                    ("color", v) => patch.color = Some(v.parse()?),
                    ("font", v) => patch.font = Some(v.parse()?),
                    ("mode", v) => patch.mode = Some(v.parse()?),
                    (other, _) => {
                        return Err(NotesError::InvalidArgument(format!(
                            "Unknown theme setting: {other}"
                        )));
                    }
                }
            }
            self.state.set_theme(patch);
        }
        writeln!(out, "Theme: {}", self.state.theme())?;
        Ok(())
    }

    fn prefs(&mut self, words: Vec<String>, out: &mut impl Write) -> Result<()> {
        let mut auto_save = None;
        let mut compact = None;
        for word in &words {
            match key_value(word)? {
                ("autosave", v) => auto_save = Some(parse_switch(v)?),
                ("compact", v) => compact = Some(parse_switch(v)?),
                (other, _) => {
                    return Err(NotesError::InvalidArgument(format!(
                        "Unknown preference: {other}"
                    )));
                }
            }
        }
        if let Some(on) = auto_save {
            self.state.set_auto_save(on);
        }
        if let Some(on) = compact {
            self.state.set_compact_view(on);
        }
        let view = self.state.view();
        let onoff = |b: bool| if b { "on" } else { "off" };
        writeln!(
            out,
            "autosave={} compact={}",
            onoff(view.auto_save),
            onoff(view.compact_view)
        )?;
        Ok(())
    }

    fn export(&self, words: Vec<String>, out: &mut impl Write) -> Result<()> {
        let notes = self.state.store().notes();
        let path = match words.into_iter().next() {
            Some(path) => {
                let path = std::path::PathBuf::from(path);
                backup::write_backup_to(&path, notes)?;
                path
            }
            None => {
                let today = chrono::Local::now().date_naive();
                backup::write_backup(&self.config.export_dir, today, notes)?
            }
        };
        writeln!(out, "Exported {} notes to {}", notes.len(), path.display())?;
        Ok(())
    }
}

fn one_arg(words: Vec<String>, usage: &str) -> Result<String> {
    let mut iter = words.into_iter();
    match (iter.next(), iter.next()) {
        (Some(arg), None) => Ok(arg),
        _ => Err(NotesError::InvalidArgument(format!("Usage: {usage}"))),
    }
}

fn describe(err: &NotesError) -> String {
    match err {
        NotesError::Validation(errors) => {
            let mut lines = vec!["Cannot save note:".to_string()];
            lines.extend(errors.title.map(|m| format!("  title: {m}")));
            lines.extend(errors.content.map(|m| format!("  content: {m}")));
            lines.join("\n")
        }
        other => format!("Error: {other}"),
    }
}
