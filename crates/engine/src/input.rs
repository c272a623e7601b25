//! The input pump: one background thread relaying driver events into the
//! loop's bounded queue.

use std::sync::mpsc::{self, Receiver, SyncSender, TryRecvError};
use std::thread;
use std::time::Duration;

use termgame_term::EventSource;
use termgame_types::Event;

/// How long the pump blocks on the driver between stop-signal checks.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Small bound on the inbound queue; the loop drains one event per frame.
const EVENT_QUEUE_CAP: usize = 16;

/// Handle to the background relay thread.
///
/// The pump runs for the lifetime of the loop. Its thread exits on the stop
/// signal, or when the receiving side of the event queue is gone; nothing
/// else stops it. Driver read errors are forwarded as [`Event::Error`], not
/// treated as fatal.
pub struct InputPump {
    events: Receiver<Event>,
    ctrl: SyncSender<()>,
}

impl InputPump {
    /// Spawn the relay thread over the given event source.
    pub fn start(mut source: impl EventSource + 'static) -> Self {
        let (event_tx, event_rx) = mpsc::sync_channel(EVENT_QUEUE_CAP);
        let (ctrl_tx, ctrl_rx) = mpsc::sync_channel(1);
        thread::spawn(move || relay(&mut source, &event_tx, &ctrl_rx));
        Self {
            events: event_rx,
            ctrl: ctrl_tx,
        }
    }

    /// Non-blocking read of the next relayed event. The loop calls this once
    /// per frame so ticking and drawing continue with no input.
    pub fn poll_event(&self) -> Option<Event> {
        self.events.try_recv().ok()
    }

    /// Signal the relay thread to exit and return without waiting for it.
    /// The control queue has capacity for the signal, so this never blocks.
    pub fn stop(&self) {
        let _ = self.ctrl.try_send(());
    }
}

fn relay(source: &mut dyn EventSource, events: &SyncSender<Event>, ctrl: &Receiver<()>) {
    loop {
        match ctrl.try_recv() {
            Ok(()) | Err(TryRecvError::Disconnected) => return,
            Err(TryRecvError::Empty) => {}
        }
        let event = match source.poll(POLL_INTERVAL) {
            Ok(Some(event)) => event,
            Ok(None) => continue,
            Err(err) => Event::Error(err.to_string()),
        };
        if events.send(event).is_err() {
            return;
        }
    }
}
