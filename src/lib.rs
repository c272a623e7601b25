//! Termgame (workspace facade crate).
//!
//! A character-cell game engine for the terminal: a fixed-cadence loop, an
//! input-pump thread, and a double-buffered screen that only flushes frames
//! that changed. The implementation lives in dedicated crates under
//! `crates/`; this package re-exports them under stable module paths.

pub use termgame_canvas as canvas;
pub use termgame_engine as engine;
pub use termgame_term as term;
pub use termgame_types as types;
