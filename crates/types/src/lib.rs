//! Core types shared across the engine.
//! This module contains pure data types with no external dependencies.

/// Terminal cell color.
///
/// `Default` is the zero value: it means "unspecified, do not override" when
/// cells are merged, and maps to the terminal's reset color when painted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Rgb(u8, u8, u8),
}

/// The transparent glyph. A cell whose `ch` is this value paints nothing
/// and does not override the glyph already in place when merged.
pub const TRANSPARENT: char = '\0';

/// A single paintable cell: glyph plus foreground/background color.
///
/// Zero-valued fields (`TRANSPARENT` glyph, `Color::Default` colors) mean
/// "leave the target field alone" during a merge, so a painter can set only
/// the glyph, only a color, or all three.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub fg: Color,
    pub bg: Color,
    pub ch: char,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            fg: Color::Default,
            bg: Color::Default,
            ch: TRANSPARENT,
        }
    }
}

impl Cell {
    /// A glyph-only cell with both colors unspecified.
    pub const fn glyph(ch: char) -> Self {
        Self {
            fg: Color::Default,
            bg: Color::Default,
            ch,
        }
    }

    pub const fn new(ch: char, fg: Color, bg: Color) -> Self {
        Self { fg, bg, ch }
    }

    /// Overwrite each field of `self` from `src`, but only where `src` has
    /// that field set. Merging a fully zero-valued cell changes nothing.
    pub fn merge_from(&mut self, src: &Cell) {
        if src.ch != TRANSPARENT {
            self.ch = src.ch;
        }
        if src.bg != Color::Default {
            self.bg = src.bg;
        }
        if src.fg != Color::Default {
            self.fg = src.fg;
        }
    }
}

/// Key codes delivered with [`Event::Key`].
///
/// `Null` is reserved: the driver translation never produces it, so binding
/// it as the loop's end key effectively disables quitting via keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Null,
    Char(char),
    Ctrl(char),
    Enter,
    Esc,
    Tab,
    Backspace,
    Delete,
    Insert,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
}

/// An input, geometry or driver-error report, produced by the terminal
/// driver and consumed by the game loop.
///
/// "No event this frame" is expressed as `Option::None` at the dispatch
/// boundary rather than as an extra variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Key(Key),
    Resize { width: u16, height: u16 },
    Error(String),
}
