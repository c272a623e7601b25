//! Game loop tests: end-key termination, event dispatch, error logging and
//! the diff-flush policy over whole runs. Driven by a scripted event source
//! and a counting fake backend, no tty involved.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use anyhow::Result;

use termgame::engine::{Game, Scene, Screen};
use termgame::term::{Backend, EventSource};
use termgame::types::{Cell, Event, Key};

struct FakeBackend {
    flushes: Arc<AtomicUsize>,
    size: (u16, u16),
}

impl Backend for FakeBackend {
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    fn fini(&mut self) -> Result<()> {
        Ok(())
    }

    fn size(&self) -> Result<(u16, u16)> {
        Ok(self.size)
    }

    fn paint_cell(&mut self, _x: u16, _y: u16, _cell: &Cell) -> Result<()> {
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.flushes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Hands out the scripted events one per poll, then times out forever.
struct ScriptedEvents {
    events: VecDeque<Event>,
}

impl ScriptedEvents {
    fn new(events: Vec<Event>) -> Self {
        Self {
            events: events.into(),
        }
    }
}

impl EventSource for ScriptedEvents {
    fn poll(&mut self, timeout: Duration) -> Result<Option<Event>> {
        match self.events.pop_front() {
            Some(event) => Ok(Some(event)),
            None => {
                thread::sleep(timeout);
                Ok(None)
            }
        }
    }
}

/// Records every event-bearing tick the scene receives.
struct RecordingScene {
    keys: Arc<Mutex<Vec<Key>>>,
}

impl Scene for RecordingScene {
    fn tick(&mut self, event: Option<&Event>) {
        if let Some(Event::Key(key)) = event {
            self.keys.lock().unwrap().push(*key);
        }
    }

    fn draw_background(&mut self, _screen: &mut Screen) {}

    fn draw(&mut self, _screen: &mut Screen) {}
}

fn game_with_scene(size: (u16, u16)) -> (Game, Arc<AtomicUsize>, Arc<Mutex<Vec<Key>>>) {
    let flushes = Arc::new(AtomicUsize::new(0));
    let keys = Arc::new(Mutex::new(Vec::new()));
    let mut game = Game::new(Box::new(FakeBackend {
        flushes: flushes.clone(),
        size,
    }));
    game.screen_mut().set_scene(Box::new(RecordingScene {
        keys: keys.clone(),
    }));
    (game, flushes, keys)
}

#[test]
fn end_key_stops_the_loop_without_dispatching_it() {
    let (mut game, _, keys) = game_with_scene((8, 4));
    let script = ScriptedEvents::new(vec![
        Event::Key(Key::Char('x')),
        Event::Key(Key::Ctrl('c')),
    ]);

    game.start(script).unwrap();

    let keys = keys.lock().unwrap();
    assert!(keys.contains(&Key::Char('x')), "ordinary keys are dispatched");
    assert!(
        !keys.contains(&Key::Ctrl('c')),
        "the end key ends the loop instead of being processed"
    );
}

#[test]
fn end_key_is_rebindable() {
    let (mut game, _, keys) = game_with_scene((8, 4));
    game.set_end_key(Key::Char('q'));
    let script = ScriptedEvents::new(vec![
        Event::Key(Key::Ctrl('c')),
        Event::Key(Key::Char('q')),
    ]);

    game.start(script).unwrap();

    // With the end key rebound, ctrl-C is just another key event.
    assert!(keys.lock().unwrap().contains(&Key::Ctrl('c')));
}

#[test]
fn resize_events_update_the_screen_without_a_tick() {
    let (mut game, _, keys) = game_with_scene((8, 4));
    let script = ScriptedEvents::new(vec![
        Event::Resize {
            width: 20,
            height: 10,
        },
        Event::Key(Key::Ctrl('c')),
    ]);

    game.start(script).unwrap();

    assert_eq!(game.screen().size(), (20, 10));
    assert!(keys.lock().unwrap().is_empty(), "resize is not forwarded as a tick");
}

#[test]
fn driver_errors_are_logged_and_not_fatal() {
    let (mut game, _, _) = game_with_scene((8, 4));
    let script = ScriptedEvents::new(vec![
        Event::Error(String::from("input stream hiccup")),
        Event::Key(Key::Ctrl('c')),
    ]);

    game.start(script).unwrap();

    assert!(game
        .logs()
        .iter()
        .any(|line| line.contains("input stream hiccup")));
}

#[test]
fn static_run_flushes_exactly_once() {
    // However many frames the loop manages before the end key arrives, a
    // scene that never changes must only cost one terminal flush. The
    // leading ordinary key guarantees at least one full frame runs.
    let (mut game, flushes, _) = game_with_scene((8, 4));
    let script = ScriptedEvents::new(vec![
        Event::Key(Key::Char('x')),
        Event::Key(Key::Ctrl('c')),
    ]);

    game.start(script).unwrap();

    assert_eq!(flushes.load(Ordering::SeqCst), 1);
}

#[test]
fn throttled_run_still_terminates() {
    let (mut game, _, _) = game_with_scene((8, 4));
    game.screen_mut().set_fps(120.0);
    assert_eq!(game.screen().fps(), 120.0);
    let script = ScriptedEvents::new(vec![Event::Key(Key::Ctrl('c'))]);

    game.start(script).unwrap();
    assert!(game.screen().time_delta() >= 0.0);
}

#[test]
fn log_lines_are_timestamped_and_buffered() {
    let (mut game, _, _) = game_with_scene((8, 4));
    assert!(!game.debug());
    game.set_debug(true);
    assert!(game.debug());

    game.log("level loaded");
    game.log("player spawned");

    let logs = game.logs();
    assert_eq!(logs.len(), 2);
    assert!(logs[0].contains("level loaded"));
    assert!(logs[1].contains("player spawned"));
    // Elapsed-time prefix, e.g. "[    0.001s]".
    assert!(logs[0].starts_with('['));
    assert!(logs[0].contains("s]"));
}
