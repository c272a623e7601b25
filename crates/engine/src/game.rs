//! The game loop: poll input, tick, draw, throttle.

use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;

use termgame_term::{Backend, EventSource};
use termgame_types::{Event, Key};

use crate::input::InputPump;
use crate::screen::Screen;

/// A running engine instance: the screen, the end key, the debug flag and
/// the log buffer. One per process by convention, not enforcement; every
/// collaborator is passed in explicitly.
pub struct Game {
    screen: Screen,
    end_key: Key,
    debug: bool,
    logs: Vec<String>,
    started_at: Instant,
}

impl Game {
    pub fn new(backend: Box<dyn Backend>) -> Self {
        Self {
            screen: Screen::new(backend),
            end_key: Key::Ctrl('c'),
            debug: false,
            logs: Vec::new(),
            started_at: Instant::now(),
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    /// Set the key that ends the loop. Defaults to ctrl-C.
    ///
    /// `Key::Null` is reserved to mean "no end key": the driver never
    /// produces it, so binding it leaves the loop with no keyboard exit.
    /// The engine does not validate the choice.
    pub fn set_end_key(&mut self, key: Key) {
        self.end_key = key;
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Append a timestamped line to the log buffer. The buffer is printed
    /// to stdout after shutdown when debug mode is on; while the loop runs
    /// the terminal belongs to the renderer.
    pub fn log(&mut self, message: impl Into<String>) {
        let elapsed = self.started_at.elapsed().as_secs_f64();
        self.logs.push(format!("[{elapsed:9.3}s] {}", message.into()));
    }

    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    /// Run the loop until the end key arrives.
    ///
    /// Initializes the driver (failure here is fatal and propagates before
    /// any terminal state has been touched by the loop), sizes the screen,
    /// starts the input pump, then iterates: capture the frame delta, handle
    /// at most one queued event, draw, sleep off the rest of the frame
    /// budget. Shutdown order is strict: stop the pump, restore the
    /// terminal, then dump logs.
    pub fn start(&mut self, events: impl EventSource + 'static) -> Result<()> {
        self.screen.init()?;
        let result = (|| -> Result<()> {
            let (width, height) = self.screen.driver_size()?;
            self.screen.set_size(width, height);

            let pump = InputPump::start(events);
            let result = self.run_loop(&pump);
            pump.stop();
            result
        })();
        let fini = self.screen.fini();
        self.dump_logs();
        result.and(fini)
    }

    fn run_loop(&mut self, pump: &InputPump) -> Result<()> {
        let mut clock = Instant::now();
        loop {
            let frame_start = Instant::now();
            self.screen
                .set_delta(frame_start.duration_since(clock).as_secs_f64());
            clock = frame_start;

            match pump.poll_event() {
                Some(Event::Key(key)) if key == self.end_key => return Ok(()),
                Some(event @ Event::Key(_)) => self.screen.tick(Some(&event)),
                Some(Event::Resize { width, height }) => self.screen.set_size(width, height),
                Some(Event::Error(message)) => self.log(format!("driver error: {message}")),
                None => self.screen.tick(None),
            }

            self.screen.draw()?;

            let pause = frame_sleep(self.screen.fps(), frame_start.elapsed());
            if !pause.is_zero() {
                thread::sleep(pause);
            }
        }
    }

    fn dump_logs(&self) {
        if !self.debug {
            return;
        }
        println!("=== Logs: ===");
        for line in &self.logs {
            println!("{line}");
        }
        println!("=============");
    }
}

/// Remaining sleep for this frame: the frame budget minus the time already
/// spent ticking and drawing, clamped at zero. An fps of zero means no
/// throttling at all.
fn frame_sleep(fps: f64, spent: Duration) -> Duration {
    if fps <= 0.0 {
        return Duration::ZERO;
    }
    Duration::from_secs_f64(1.0 / fps).saturating_sub(spent)
}
