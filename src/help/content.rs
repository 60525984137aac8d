use super::{HelpBook, HelpFlag, HelpTopic, Section};

pub(crate) fn book() -> HelpBook<'static> {
    HelpBook {
        title: "Jotboard",
        usage: "jb [--import <file> | --empty]  (commands are read from stdin, one per line)",
        topics: ALL_TOPICS,
        footer: &[
            "Use `help <topic>` for focused docs, e.g. `help list` or `help save`.",
        ],
    }
}

const ALL_TOPICS: &[HelpTopic<'static>] = &[
    HelpTopic {
        name: "list",
        summary: "Show the visible notes for the current view, tag, search and sort.",
        usage: "list",
        details: &[
            "The selected note is marked with `>`. Compact view drops the timestamp and tag columns.",
            "The heading shows how many active and archived notes match the search.",
        ],
        flags: &[],
        aliases: &["ls"],
        section: Section::Browse,
        examples: &["list"],
    },
    HelpTopic {
        name: "show",
        summary: "Print a note; defaults to the selected note.",
        usage: "show [id] [--render]",
        details: &[
            "Markup notes are printed as their text content. --render styles lists and headings.",
        ],
        flags: &[HelpFlag {
            name: "--render, -r",
            desc: "Render the body as Markdown with terminal styling.",
        }],
        aliases: &["view-note"],
        section: Section::Browse,
        examples: &["show 3 --render"],
    },
    HelpTopic {
        name: "select",
        summary: "Select a note by id, or clear the selection. Ends any edit in progress.",
        usage: "select <id> | select --none",
        details: &[],
        flags: &[],
        aliases: &[],
        section: Section::Browse,
        examples: &["select 2"],
    },
    HelpTopic {
        name: "next",
        summary: "Move the selection down (next) or up (prev) the visible list.",
        usage: "next | prev",
        details: &["Stops at either end of the list."],
        flags: &[],
        aliases: &["prev"],
        section: Section::Browse,
        examples: &[],
    },
    HelpTopic {
        name: "view",
        summary: "Switch between active and archived notes; clears the tag filter.",
        usage: "view all|archived",
        details: &["The first note of the new list becomes the selection."],
        flags: &[],
        aliases: &[],
        section: Section::Browse,
        examples: &["view archived"],
    },
    HelpTopic {
        name: "tag",
        summary: "Filter by a tag; choosing the active tag again clears the filter.",
        usage: "tag <name> | tag --clear",
        details: &["Choosing a tag switches back to the `all` view."],
        flags: &[],
        aliases: &[],
        section: Section::Browse,
        examples: &["tag Dev"],
    },
    HelpTopic {
        name: "search",
        summary: "Case-insensitive search over titles, bodies and tags.",
        usage: "search [text...]",
        details: &["Without text the search is cleared."],
        flags: &[],
        aliases: &["find"],
        section: Section::Browse,
        examples: &["search pasta", "search"],
    },
    HelpTopic {
        name: "sort",
        summary: "Order the list by updated, created, alphabetical or tags.",
        usage: "sort updated|created|alphabetical|tags",
        details: &[
            "updated and created are newest first; alphabetical and tags ignore case.",
            "Notes without tags sort last under `tags`.",
        ],
        flags: &[],
        aliases: &[],
        section: Section::Browse,
        examples: &["sort tags"],
    },
    HelpTopic {
        name: "tags",
        summary: "List every tag with counts and first/last use.",
        usage: "tags",
        details: &["`shown` counts notes in the current view that match the search."],
        flags: &[],
        aliases: &[],
        section: Section::Browse,
        examples: &[],
    },
    HelpTopic {
        name: "new",
        summary: "Start a new note draft.",
        usage: "new",
        details: &["Fill the draft with `set`, then `save` or `cancel`."],
        flags: &[],
        aliases: &[],
        section: Section::Edit,
        examples: &["new", "set title \"Groceries\"", "set body \"milk\\neggs\"", "save"],
    },
    HelpTopic {
        name: "edit",
        summary: "Start editing the selected note.",
        usage: "edit",
        details: &["Tags are edited as one comma-separated string."],
        flags: &[],
        aliases: &[],
        section: Section::Edit,
        examples: &[],
    },
    HelpTopic {
        name: "set",
        summary: "Change a draft field.",
        usage: "set title|body|tags <text...>",
        details: &[
            "`\\n` in a body becomes a line break.",
            "Tags are split on commas, trimmed, and duplicates dropped when saving.",
        ],
        flags: &[],
        aliases: &[],
        section: Section::Edit,
        examples: &["set tags Dev, React"],
    },
    HelpTopic {
        name: "format",
        summary: "Toggle the draft body between plain text and rich markup.",
        usage: "format",
        details: &["Each line becomes a paragraph; toggling back restores the lines."],
        flags: &[],
        aliases: &[],
        section: Section::Edit,
        examples: &[],
    },
    HelpTopic {
        name: "draft",
        summary: "Print the current draft and any validation errors.",
        usage: "draft",
        details: &[],
        flags: &[],
        aliases: &[],
        section: Section::Edit,
        examples: &[],
    },
    HelpTopic {
        name: "save",
        summary: "Validate and commit the draft.",
        usage: "save",
        details: &[
            "Title and body must not be blank; errors are reported per field and the draft stays open.",
        ],
        flags: &[],
        aliases: &[],
        section: Section::Edit,
        examples: &[],
    },
    HelpTopic {
        name: "cancel",
        summary: "Discard the draft.",
        usage: "cancel",
        details: &["With nothing selected afterwards, the first note is selected."],
        flags: &[],
        aliases: &[],
        section: Section::Edit,
        examples: &[],
    },
    HelpTopic {
        name: "delete",
        summary: "Delete a note; defaults to the selected note.",
        usage: "delete [id]",
        details: &[],
        flags: &[],
        aliases: &["rm"],
        section: Section::Edit,
        examples: &["delete 5"],
    },
    HelpTopic {
        name: "archive",
        summary: "Archive or unarchive a note; defaults to the selected note.",
        usage: "archive [id] | unarchive [id]",
        details: &[],
        flags: &[],
        aliases: &["unarchive"],
        section: Section::Edit,
        examples: &[],
    },
    HelpTopic {
        name: "theme",
        summary: "Show or change the accent color, font and light/dark mode.",
        usage: "theme [color=<c>] [font=<f>] [mode=light|dark] | theme toggle",
        details: &[
            "Colors: blue purple green orange pink indigo teal red yellow cyan.",
            "Fonts: inter roboto system open-sans source-sans poppins lato montserrat.",
        ],
        flags: &[],
        aliases: &[],
        section: Section::Settings,
        examples: &["theme color=teal mode=dark"],
    },
    HelpTopic {
        name: "prefs",
        summary: "Show or change display preferences.",
        usage: "prefs [autosave=on|off] [compact=on|off]",
        details: &[],
        flags: &[],
        aliases: &[],
        section: Section::Settings,
        examples: &["prefs compact=on"],
    },
    HelpTopic {
        name: "export",
        summary: "Write every note to a JSON backup.",
        usage: "export [path]",
        details: &[
            "Without a path the file is notes-backup-YYYY-MM-DD.json in JOTBOARD_EXPORT_DIR.",
        ],
        flags: &[],
        aliases: &[],
        section: Section::Settings,
        examples: &[],
    },
    HelpTopic {
        name: "import",
        summary: "Replace every note with the contents of a JSON backup.",
        usage: "import <path>",
        details: &["Files that are not a JSON array of notes are rejected and nothing changes."],
        flags: &[],
        aliases: &[],
        section: Section::Settings,
        examples: &["import notes-backup-2024-11-01.json"],
    },
    HelpTopic {
        name: "clear",
        summary: "Delete every note. Cannot be undone.",
        usage: "clear --yes",
        details: &["Also resets the selection, search, tag filter and any draft."],
        flags: &[HelpFlag { name: "--yes", desc: "Required confirmation." }],
        aliases: &[],
        section: Section::Settings,
        examples: &[],
    },
    HelpTopic {
        name: "JOTBOARD_EXPORT_DIR",
        summary: "Directory used by `export` without a path (default: current directory).",
        usage: "JOTBOARD_EXPORT_DIR",
        details: &[],
        flags: &[],
        aliases: &[],
        section: Section::Environment,
        examples: &[],
    },
    HelpTopic {
        name: "JOTBOARD_LOG",
        summary: "Log filter for stderr diagnostics, e.g. `debug` (default: warn).",
        usage: "JOTBOARD_LOG",
        details: &[],
        flags: &[],
        aliases: &[],
        section: Section::Environment,
        examples: &[],
    },
    HelpTopic {
        name: "NO_COLOR",
        summary: "Disable colored output.",
        usage: "NO_COLOR",
        details: &[],
        flags: &[],
        aliases: &[],
        section: Section::Environment,
        examples: &[],
    },
];
