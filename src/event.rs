use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind, MouseEvent};
use std::time::Duration;

/// Showcase event
#[derive(Debug, Clone)]
pub enum Event {
    /// Key press (release and repeat reports are dropped)
    Key(KeyEvent),
    /// Mouse event
    Mouse(MouseEvent),
    /// Terminal was resized; the next draw picks up the new size
    Resize,
    /// Nothing arrived within the tick rate
    Tick,
}

/// Event handler
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    /// Create new event handler with specified tick rate
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// Wait for next event
    pub fn next(&self) -> Result<Event> {
        if !event::poll(self.tick_rate)? {
            return Ok(Event::Tick);
        }

        match event::read()? {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Ok(Event::Key(key)),
            CrosstermEvent::Mouse(mouse) => Ok(Event::Mouse(mouse)),
            CrosstermEvent::Resize(..) => Ok(Event::Resize),
            _ => Ok(Event::Tick),
        }
    }
}
