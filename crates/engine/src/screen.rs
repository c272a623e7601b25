//! The display surface: double-buffered canvas, tick/draw dispatch and the
//! diff-then-flush policy.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;

use termgame_canvas::Canvas;
use termgame_term::Backend;
use termgame_types::{Cell, Event};

use crate::drawable::{Drawable, Scene};

/// The current state of the display.
///
/// Owns the canvas being painted this frame, the previous frame's canvas for
/// the redraw decision, an optional scene and an ordered list of top-level
/// drawables. All mutation happens on the loop thread.
pub struct Screen {
    backend: Box<dyn Backend>,
    previous: Option<Canvas>,
    canvas: Canvas,
    scene: Option<Box<dyn Scene>>,
    entities: Vec<Rc<RefCell<dyn Drawable>>>,
    width: u16,
    height: u16,
    offset_x: i32,
    offset_y: i32,
    delta: f64,
    fps: f64,
}

impl Screen {
    /// A new screen with no scene and no entities. The placeholder canvas is
    /// replaced by the first `set_size` call with the real terminal size.
    pub fn new(backend: Box<dyn Backend>) -> Self {
        Self {
            backend,
            previous: None,
            canvas: Canvas::new(10, 10),
            scene: None,
            entities: Vec::new(),
            width: 0,
            height: 0,
            offset_x: 0,
            offset_y: 0,
            delta: 0.0,
            fps: 0.0,
        }
    }

    pub fn init(&mut self) -> Result<()> {
        self.backend.init()
    }

    pub fn fini(&mut self) -> Result<()> {
        self.backend.fini()
    }

    /// The driver's current idea of the terminal size.
    pub fn driver_size(&self) -> Result<(u16, u16)> {
        self.backend.size()
    }

    /// Process one frame's event. The scene is always ticked, even with no
    /// event, so it can run time-based logic; top-level drawables are only
    /// ticked when an actual event is present.
    pub fn tick(&mut self, event: Option<&Event>) {
        if let Some(mut scene) = self.scene.take() {
            scene.tick(event);
            self.scene = Some(scene);
        }
        if let Some(event) = event {
            let entities = self.entities.clone();
            for entity in &entities {
                entity.borrow_mut().tick(event);
            }
        }
    }

    /// Render the current state: paint scene background, scene foreground,
    /// then every top-level drawable in insertion order into a fresh canvas;
    /// flush to the driver only if the result differs from the previous
    /// frame. The previous canvas is replaced unconditionally, so the next
    /// comparison baseline is always the last computed frame.
    pub fn draw(&mut self) -> Result<()> {
        self.canvas = Canvas::new(self.width, self.height);

        if let Some(mut scene) = self.scene.take() {
            scene.draw_background(self);
            scene.draw(self);
            self.scene = Some(scene);
        }
        let entities = self.entities.clone();
        for entity in &entities {
            entity.borrow_mut().draw(self);
        }

        let changed = match &self.previous {
            Some(previous) => self.canvas != *previous,
            None => true,
        };
        if changed {
            for x in 0..self.canvas.width() {
                for y in 0..self.canvas.height() {
                    if let Some(cell) = self.canvas.get(x, y) {
                        self.backend.paint_cell(x, y, &cell)?;
                    }
                }
            }
            self.backend.flush()?;
        }
        self.previous = Some(self.canvas.clone());
        Ok(())
    }

    /// Merge `cell` into the canvas at the given logical position, after
    /// applying the screen's global offset. Writes that land outside the
    /// canvas are dropped silently; a drawable painting past the edge (for
    /// example mid-resize) must not break the frame.
    pub fn paint_cell(&mut self, x: i32, y: i32, cell: &Cell) {
        let px = x + self.offset_x;
        let py = y + self.offset_y;
        let in_range = px >= 0
            && py >= 0
            && px < i32::from(self.canvas.width())
            && py < i32::from(self.canvas.height());
        if in_range {
            self.canvas.merge(px as u16, py as u16, cell);
        }
    }

    /// Store new dimensions and resize the canvas, keeping the overlapping
    /// region of what was already painted.
    pub fn set_size(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.canvas.resize(width, height);
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn set_scene(&mut self, scene: Box<dyn Scene>) {
        self.scene = Some(scene);
    }

    pub fn has_scene(&self) -> bool {
        self.scene.is_some()
    }

    /// Add a top-level drawable. Insertion order is tick and draw order.
    pub fn add_entity(&mut self, entity: Rc<RefCell<dyn Drawable>>) {
        self.entities.push(entity);
    }

    /// Remove a drawable by identity. Not present is a no-op.
    pub fn remove_entity(&mut self, entity: &Rc<RefCell<dyn Drawable>>) {
        if let Some(i) = self.entities.iter().position(|e| Rc::ptr_eq(e, entity)) {
            self.entities.remove(i);
        }
    }

    /// Set the global translation applied to every `paint_cell`, letting a
    /// scene scroll a viewport without its drawables knowing.
    pub fn set_offset(&mut self, x: i32, y: i32) {
        self.offset_x = x;
        self.offset_y = y;
    }

    pub fn offset(&self) -> (i32, i32) {
        (self.offset_x, self.offset_y)
    }

    /// Seconds since the previous frame's timestamp capture. For animation
    /// and movement timing inside entities.
    pub fn time_delta(&self) -> f64 {
        self.delta
    }

    pub(crate) fn set_delta(&mut self, delta: f64) {
        self.delta = delta;
    }

    /// Target frame rate. Zero (the default) means unthrottled: the loop
    /// runs as fast as it can.
    pub fn set_fps(&mut self, fps: f64) {
        self.fps = fps;
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }
}
