//! The grid data model: one frame's worth of cells.
//!
//! A [`Canvas`] is addressed `(x, y)` column-major and backed by a flat
//! buffer. The display surface rebuilds one every frame and compares it
//! against the previous frame's canvas to decide whether to flush.

use termgame_types::Cell;

/// 2D grid of cells with explicit width and height.
///
/// Two canvases are equal iff they have the same width, the same height, and
/// all cells are pairwise equal. Equality exists to answer "does this frame
/// need a redraw", nothing more.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Canvas {
    /// A canvas of the given size with every cell fully transparent.
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
        }
    }

    /// Build a canvas from text. Newlines separate rows; the canvas is as
    /// wide as the longest row and as tall as the row count. Each character
    /// becomes a glyph-only cell; short rows leave the rest transparent.
    pub fn from_text(text: &str) -> Self {
        let rows: Vec<Vec<char>> = text.split('\n').map(|row| row.chars().collect()).collect();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0) as u16;
        let height = rows.len() as u16;

        let mut canvas = Self::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, &ch) in row.iter().enumerate() {
                canvas.set(x as u16, y as u16, Cell::glyph(ch));
            }
        }
        canvas
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((x as usize) * (self.height as usize) + (y as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Merge `cell` into the cell at `(x, y)`, overwriting only the fields
    /// `cell` has set. Out-of-range coordinates are ignored.
    pub fn merge(&mut self, x: u16, y: u16, cell: &Cell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i].merge_from(cell);
        }
    }

    /// Resize to the new dimensions, keeping the overlapping rectangle of
    /// old data. Cells outside the overlap start out transparent.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        let mut resized = Self::new(width, height);
        for x in 0..width.min(self.width) {
            for y in 0..height.min(self.height) {
                if let Some(cell) = self.get(x, y) {
                    resized.set(x, y, cell);
                }
            }
        }
        *self = resized;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termgame_types::{Color, TRANSPARENT};

    #[test]
    fn new_canvas_is_transparent() {
        let canvas = Canvas::new(3, 2);
        for x in 0..3 {
            for y in 0..2 {
                assert_eq!(canvas.get(x, y), Some(Cell::default()));
            }
        }
    }

    #[test]
    fn from_text_pads_short_rows() {
        let canvas = Canvas::from_text("AB\nC");
        assert_eq!(canvas.width(), 2);
        assert_eq!(canvas.height(), 2);
        assert_eq!(canvas.get(0, 0).unwrap().ch, 'A');
        assert_eq!(canvas.get(1, 0).unwrap().ch, 'B');
        assert_eq!(canvas.get(0, 1).unwrap().ch, 'C');
        assert_eq!(canvas.get(1, 1).unwrap().ch, TRANSPARENT);
    }

    #[test]
    fn get_out_of_range_is_none() {
        let canvas = Canvas::new(2, 2);
        assert_eq!(canvas.get(2, 0), None);
        assert_eq!(canvas.get(0, 2), None);
    }

    #[test]
    fn resize_preserves_overlap() {
        let mut canvas = Canvas::new(3, 3);
        canvas.set(0, 0, Cell::glyph('a'));
        canvas.set(2, 2, Cell::glyph('b'));
        canvas.set(1, 1, Cell::new('c', Color::Red, Color::Default));

        canvas.resize(2, 4);
        assert_eq!(canvas.width(), 2);
        assert_eq!(canvas.height(), 4);
        assert_eq!(canvas.get(0, 0).unwrap().ch, 'a');
        assert_eq!(canvas.get(1, 1).unwrap().ch, 'c');
        assert_eq!(canvas.get(1, 1).unwrap().fg, Color::Red);
        // Outside the old grid: transparent.
        assert_eq!(canvas.get(0, 3), Some(Cell::default()));
        assert_eq!(canvas.get(1, 3), Some(Cell::default()));
    }

    #[test]
    fn equality_requires_matching_size() {
        let a = Canvas::new(2, 3);
        let b = Canvas::new(3, 2);
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }
}
