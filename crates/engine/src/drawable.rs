//! Capability contracts for everything that lives on a screen or in a scene.

use termgame_types::Event;

use crate::screen::Screen;

/// Something that can be ticked and drawn. Mandatory for anything added to
/// a [`Screen`] or managed by a [`Scene`].
///
/// `tick` is only ever called with a real event; frames without input do not
/// reach drawables. Continuous per-frame logic belongs in the scene, or in
/// `draw` via [`Screen::time_delta`].
pub trait Drawable {
    fn tick(&mut self, event: &Event);
    fn draw(&mut self, screen: &mut Screen);

    /// Capability probe: a drawable that can be collision-queried returns
    /// itself here. Scenes dispatch over these instead of assuming every
    /// object has a body.
    fn as_physical(&self) -> Option<&dyn Physical> {
        None
    }

    /// Capability probe for self-handled collisions.
    fn as_dynamic_physical(&mut self) -> Option<&mut dyn DynamicPhysical> {
        None
    }
}

/// A passive body: it has a position and a size, so scenes can include it in
/// broad-phase collision scans, but it does not react on its own.
pub trait Physical {
    /// Top-left corner, in cells.
    fn position(&self) -> (i32, i32);
    /// Width and height, in cells.
    fn size(&self) -> (i32, i32);
}

/// A body that reacts to its own collisions. The engine defines the
/// contract only; detection itself is scene logic.
pub trait DynamicPhysical: Physical {
    fn collide(&mut self, other: &dyn Physical);
}

/// A scene composes a level: its own background and foreground painting plus
/// whatever entity management it wants.
///
/// The scene is ticked every frame, event or not, so it is the place for
/// time-based logic. It paints before the screen's top-level drawables.
pub trait Scene {
    fn tick(&mut self, event: Option<&Event>);
    fn draw_background(&mut self, screen: &mut Screen);
    fn draw(&mut self, screen: &mut Screen);
}
