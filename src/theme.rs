use std::fmt;
use std::str::FromStr;

use crate::error::NotesError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccentColor {
    #[default]
    Blue,
    Purple,
    Green,
    Orange,
    Pink,
    Indigo,
    Teal,
    Red,
    Yellow,
    Cyan,
}

impl AccentColor {
    pub const ALL: [AccentColor; 10] = [
        AccentColor::Blue,
        AccentColor::Purple,
        AccentColor::Green,
        AccentColor::Orange,
        AccentColor::Pink,
        AccentColor::Indigo,
        AccentColor::Teal,
        AccentColor::Red,
        AccentColor::Yellow,
        AccentColor::Cyan,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AccentColor::Blue => "blue",
            AccentColor::Purple => "purple",
            AccentColor::Green => "green",
            AccentColor::Orange => "orange",
            AccentColor::Pink => "pink",
            AccentColor::Indigo => "indigo",
            AccentColor::Teal => "teal",
            AccentColor::Red => "red",
            AccentColor::Yellow => "yellow",
            AccentColor::Cyan => "cyan",
        }
    }

    /// Terminal color used for headers and highlights.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            AccentColor::Blue => (37, 99, 235),
            AccentColor::Purple => (147, 51, 234),
            AccentColor::Green => (22, 163, 74),
            AccentColor::Orange => (234, 88, 12),
            AccentColor::Pink => (219, 39, 119),
            AccentColor::Indigo => (79, 70, 229),
            AccentColor::Teal => (13, 148, 136),
            AccentColor::Red => (220, 38, 38),
            AccentColor::Yellow => (202, 138, 4),
            AccentColor::Cyan => (8, 145, 178),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontFamily {
    #[default]
    Inter,
    Roboto,
    System,
    OpenSans,
    SourceSans,
    Poppins,
    Lato,
    Montserrat,
}

impl FontFamily {
    pub const ALL: [FontFamily; 8] = [
        FontFamily::Inter,
        FontFamily::Roboto,
        FontFamily::System,
        FontFamily::OpenSans,
        FontFamily::SourceSans,
        FontFamily::Poppins,
        FontFamily::Lato,
        FontFamily::Montserrat,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FontFamily::Inter => "inter",
            FontFamily::Roboto => "roboto",
            FontFamily::System => "system",
            FontFamily::OpenSans => "open-sans",
            FontFamily::SourceSans => "source-sans",
            FontFamily::Poppins => "poppins",
            FontFamily::Lato => "lato",
            FontFamily::Montserrat => "montserrat",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn name(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Theme {
    pub color: AccentColor,
    pub font: FontFamily,
    pub mode: ThemeMode,
}

/// Partial theme update; unset fields keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThemePatch {
    pub color: Option<AccentColor>,
    pub font: Option<FontFamily>,
    pub mode: Option<ThemeMode>,
}

impl Theme {
    pub fn merge(&mut self, patch: ThemePatch) {
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(font) = patch.font {
            self.font = font;
        }
        if let Some(mode) = patch.mode {
            self.mode = mode;
        }
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "color={} font={} mode={}",
            self.color.name(),
            self.font.name(),
            self.mode.name()
        )
    }
}

fn parse_named<T: Copy>(
    kind: &str,
    value: &str,
    all: &[T],
    name: impl Fn(T) -> &'static str,
) -> Result<T, NotesError> {
    let needle = value.trim().to_ascii_lowercase();
    all.iter().copied().find(|v| name(*v) == needle).ok_or_else(|| {
        let options: Vec<&str> = all.iter().map(|v| name(*v)).collect();
        NotesError::InvalidArgument(format!(
            "Unknown {kind} '{value}' (expected {})",
            options.join("|")
        ))
    })
}

impl FromStr for AccentColor {
    type Err = NotesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named("color", s, &AccentColor::ALL, AccentColor::name)
    }
}

impl FromStr for FontFamily {
    type Err = NotesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named("font", s, &FontFamily::ALL, FontFamily::name)
    }
}

impl FromStr for ThemeMode {
    type Err = NotesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named("mode", s, &[ThemeMode::Light, ThemeMode::Dark], ThemeMode::name)
    }
}
