//! The paint-side half of the driver: terminal lifecycle and cell output.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use termgame_types::{Cell, Color, TRANSPARENT};

/// What the engine needs from a terminal.
///
/// `paint_cell` may buffer; nothing is required to reach the physical
/// terminal until `flush`. Initialization failure is fatal to the caller;
/// `fini` must restore the terminal to its pre-`init` state.
pub trait Backend {
    fn init(&mut self) -> Result<()>;
    fn fini(&mut self) -> Result<()>;
    fn size(&self) -> Result<(u16, u16)>;
    fn paint_cell(&mut self, x: u16, y: u16, cell: &Cell) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
}

/// Crossterm-backed [`Backend`]: raw mode plus alternate screen, queued
/// writes flushed once per frame.
pub struct CrosstermBackend {
    stdout: io::Stdout,
}

impl CrosstermBackend {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
        }
    }
}

impl Default for CrosstermBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for CrosstermBackend {
    fn init(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.queue(terminal::DisableLineWrap)?;
        self.stdout.flush()?;
        Ok(())
    }

    fn fini(&mut self) -> Result<()> {
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(terminal::EnableLineWrap)?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    fn size(&self) -> Result<(u16, u16)> {
        Ok(terminal::size()?)
    }

    fn paint_cell(&mut self, x: u16, y: u16, cell: &Cell) -> Result<()> {
        let glyph = if cell.ch == TRANSPARENT { ' ' } else { cell.ch };
        self.stdout.queue(cursor::MoveTo(x, y))?;
        self.stdout.queue(SetForegroundColor(to_crossterm(cell.fg)))?;
        self.stdout.queue(SetBackgroundColor(to_crossterm(cell.bg)))?;
        self.stdout.queue(Print(glyph))?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.flush()?;
        Ok(())
    }
}

fn to_crossterm(color: Color) -> crossterm::style::Color {
    use crossterm::style::Color as Ct;
    match color {
        Color::Default => Ct::Reset,
        Color::Black => Ct::Black,
        Color::Red => Ct::Red,
        Color::Green => Ct::Green,
        Color::Yellow => Ct::Yellow,
        Color::Blue => Ct::Blue,
        Color::Magenta => Ct::Magenta,
        Color::Cyan => Ct::Cyan,
        Color::White => Ct::White,
        Color::Rgb(r, g, b) => Ct::Rgb { r, g, b },
    }
}
