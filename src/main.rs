//! Demo game (default binary).
//!
//! A tiny pong-like arena that exercises the whole engine surface: a scene
//! with background and foreground painting, entities driven by key events,
//! movement timed off the frame delta, collision dispatch through the
//! physical capability probes, and a top-level HUD drawable.
//!
//! Run with `--debug` to dump the engine log on exit. `q` quits.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;

use termgame::engine::{Drawable, DynamicPhysical, Game, Physical, Scene, Screen};
use termgame::term::{CrosstermBackend, TerminalEvents};
use termgame::types::{Cell, Color, Event, Key};

/// Player paddle along the bottom of the arena. Moves on arrow keys.
struct Paddle {
    x: i32,
    y: i32,
    width: i32,
}

impl Drawable for Paddle {
    fn tick(&mut self, event: &Event) {
        match event {
            Event::Key(Key::Left) => self.x -= 2,
            Event::Key(Key::Right) => self.x += 2,
            _ => {}
        }
    }

    fn draw(&mut self, screen: &mut Screen) {
        let (w, h) = screen.size();
        if w < 4 || h < 4 {
            return;
        }
        self.x = self.x.clamp(1, i32::from(w) - 1 - self.width);
        self.y = i32::from(h) - 2;
        for dx in 0..self.width {
            screen.paint_cell(self.x + dx, self.y, &Cell::new('=', Color::Cyan, Color::Default));
        }
    }

    fn as_physical(&self) -> Option<&dyn Physical> {
        Some(self)
    }
}

impl Physical for Paddle {
    fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    fn size(&self) -> (i32, i32) {
        (self.width, 1)
    }
}

/// Ball bouncing off the arena walls and the paddle.
struct Ball {
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
}

impl Drawable for Ball {
    fn tick(&mut self, _event: &Event) {}

    fn draw(&mut self, screen: &mut Screen) {
        let (w, h) = screen.size();
        if w < 4 || h < 4 {
            return;
        }
        let dt = screen.time_delta();
        self.x += self.vx * dt;
        self.y += self.vy * dt;

        let max_x = f64::from(w) - 2.0;
        let max_y = f64::from(h) - 2.0;
        if self.x < 1.0 {
            self.x = 1.0;
            self.vx = self.vx.abs();
        }
        if self.x > max_x {
            self.x = max_x;
            self.vx = -self.vx.abs();
        }
        if self.y < 1.0 {
            self.y = 1.0;
            self.vy = self.vy.abs();
        }
        if self.y > max_y {
            self.y = max_y;
            self.vy = -self.vy.abs();
        }

        screen.paint_cell(
            self.x as i32,
            self.y as i32,
            &Cell::new('o', Color::Yellow, Color::Default),
        );
    }

    fn as_physical(&self) -> Option<&dyn Physical> {
        Some(self)
    }

    fn as_dynamic_physical(&mut self) -> Option<&mut dyn DynamicPhysical> {
        Some(self)
    }
}

impl Physical for Ball {
    fn position(&self) -> (i32, i32) {
        (self.x as i32, self.y as i32)
    }

    fn size(&self) -> (i32, i32) {
        (1, 1)
    }
}

impl DynamicPhysical for Ball {
    fn collide(&mut self, other: &dyn Physical) {
        // Bounce away from whatever we hit.
        let (_, other_y) = other.position();
        if (self.y as i32) <= other_y {
            self.vy = -self.vy.abs();
        } else {
            self.vy = self.vy.abs();
        }
    }
}

/// A position-and-extent snapshot used as the passive side of a collision.
struct StaticBody {
    pos: (i32, i32),
    size: (i32, i32),
}

impl Physical for StaticBody {
    fn position(&self) -> (i32, i32) {
        self.pos
    }

    fn size(&self) -> (i32, i32) {
        self.size
    }
}

/// The arena: draws the walls, owns the ball and the paddle, and runs the
/// broad-phase collision scan over its entities each frame.
struct Arena {
    entities: Vec<Rc<RefCell<dyn Drawable>>>,
}

impl Arena {
    fn new() -> Self {
        let ball = Ball {
            x: 10.0,
            y: 5.0,
            vx: 14.0,
            vy: 9.0,
        };
        let paddle = Paddle {
            x: 8,
            y: 0,
            width: 8,
        };
        Self {
            entities: vec![
                Rc::new(RefCell::new(ball)),
                Rc::new(RefCell::new(paddle)),
            ],
        }
    }

    fn resolve_collisions(&mut self) {
        for i in 0..self.entities.len() {
            // Snapshot the other bodies first; collide() may move the subject.
            let mut others = Vec::new();
            for (j, entity) in self.entities.iter().enumerate() {
                if j == i {
                    continue;
                }
                let guard = entity.borrow();
                if let Some(body) = guard.as_physical() {
                    others.push(StaticBody {
                        pos: body.position(),
                        size: body.size(),
                    });
                }
            }

            let mut guard = self.entities[i].borrow_mut();
            let Some(subject) = guard.as_dynamic_physical() else {
                continue;
            };
            for other in &others {
                if overlaps(subject.position(), subject.size(), other.pos, other.size) {
                    subject.collide(other);
                }
            }
        }
    }
}

impl Scene for Arena {
    fn tick(&mut self, event: Option<&Event>) {
        if let Some(event) = event {
            for entity in &self.entities {
                entity.borrow_mut().tick(event);
            }
        }
    }

    fn draw_background(&mut self, screen: &mut Screen) {
        let (w, h) = screen.size();
        if w < 2 || h < 2 {
            return;
        }
        let wall = Cell::new('#', Color::Blue, Color::Default);
        for x in 0..i32::from(w) {
            screen.paint_cell(x, 0, &wall);
            screen.paint_cell(x, i32::from(h) - 1, &wall);
        }
        for y in 0..i32::from(h) {
            screen.paint_cell(0, y, &wall);
            screen.paint_cell(i32::from(w) - 1, y, &wall);
        }
    }

    fn draw(&mut self, screen: &mut Screen) {
        for entity in &self.entities {
            entity.borrow_mut().draw(screen);
        }
        self.resolve_collisions();
    }
}

/// Top-level HUD line, drawn over everything else.
struct StatusLine {
    last_key: Option<Key>,
}

impl Drawable for StatusLine {
    fn tick(&mut self, event: &Event) {
        if let Event::Key(key) = event {
            self.last_key = Some(*key);
        }
    }

    fn draw(&mut self, screen: &mut Screen) {
        let text = match self.last_key {
            Some(key) => format!(" arrows move | q quits | last: {key:?} "),
            None => String::from(" arrows move | q quits "),
        };
        for (i, ch) in text.chars().enumerate() {
            screen.paint_cell(
                2 + i as i32,
                0,
                &Cell::new(ch, Color::White, Color::Default),
            );
        }
    }
}

fn main() -> Result<()> {
    let debug = std::env::args().any(|arg| arg == "--debug");

    let mut game = Game::new(Box::new(CrosstermBackend::new()));
    game.set_debug(debug);
    game.set_end_key(Key::Char('q'));
    game.log("demo starting");

    game.screen_mut().set_scene(Box::new(Arena::new()));
    game.screen_mut()
        .add_entity(Rc::new(RefCell::new(StatusLine { last_key: None })));
    game.screen_mut().set_fps(60.0);

    game.start(TerminalEvents::new())
}

fn overlaps(a_pos: (i32, i32), a_size: (i32, i32), b_pos: (i32, i32), b_size: (i32, i32)) -> bool {
    a_pos.0 < b_pos.0 + b_size.0
        && b_pos.0 < a_pos.0 + a_size.0
        && a_pos.1 < b_pos.1 + b_size.1
        && b_pos.1 < a_pos.1 + a_size.1
}
