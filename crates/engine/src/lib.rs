//! Engine runtime: the display surface, the game loop and the contracts
//! scene objects implement.
//!
//! Goals:
//! - All scene/entity/canvas mutation confined to the main loop thread
//! - Exactly one background thread (the input pump), talking over channels
//! - Flush a frame to the terminal only when its canvas actually changed

pub mod drawable;
pub mod game;
pub mod input;
pub mod screen;

pub use termgame_canvas as canvas;
pub use termgame_term as term;
pub use termgame_types as types;

pub use drawable::{Drawable, DynamicPhysical, Physical, Scene};
pub use game::Game;
pub use input::InputPump;
pub use screen::Screen;
