use std::collections::HashMap;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};
use log::{debug, error};

use crate::constants::KEY_HOLD_WINDOW_FRAMES;
use crate::rendering::CellScale;
use crate::types::Vector2D;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub mouse: Option<Vector2D>,
    pub quit: bool,
}

pub trait InputSource {
    fn poll(&mut self, frame: u64) -> io::Result<InputState>;
}

/// Folds terminal events into held-key state. Terminals without release
/// events only repeat presses, so a key counts as held while its last
/// press or repeat is within the hold window.
pub struct KeyTracker {
    key_frame: HashMap<KeyCode, u64>,
    mouse: Option<Vector2D>,
    quit: bool,
    scale: CellScale,
}

impl KeyTracker {
    pub fn new(scale: CellScale) -> Self {
        KeyTracker { key_frame: HashMap::new(), mouse: None, quit: false, scale }
    }

    pub fn apply(&mut self, event: Event, frame: u64) {
        match event {
            Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                KeyEventKind::Press | KeyEventKind::Repeat => {
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.quit = true,
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => self.quit = true,
                        _ => {}
                    }
                    self.key_frame.insert(normalize(code), frame);
                }
                KeyEventKind::Release => {
                    self.key_frame.remove(&normalize(code));
                }
            },
            Event::Mouse(MouseEvent { kind, column, row, .. }) => {
                if matches!(kind, MouseEventKind::Moved | MouseEventKind::Drag(_) | MouseEventKind::Down(_)) {
                    self.mouse = Some(self.scale.cell_center(column, row));
                }
            }
            _ => {}
        }
    }

    fn is_held(&self, key: KeyCode, frame: u64) -> bool {
        self.key_frame
            .get(&key)
            .map(|&last| frame.saturating_sub(last) <= KEY_HOLD_WINDOW_FRAMES)
            .unwrap_or(false)
    }

    pub fn snapshot(&self, frame: u64) -> InputState {
        InputState {
            up: self.is_held(KeyCode::Up, frame),
            down: self.is_held(KeyCode::Down, frame),
            left: self.is_held(KeyCode::Left, frame),
            right: self.is_held(KeyCode::Right, frame),
            mouse: self.mouse,
            quit: self.quit,
        }
    }
}

// WASD folds onto the arrow keys.
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char('w') | KeyCode::Char('W') => KeyCode::Up,
        KeyCode::Char('s') | KeyCode::Char('S') => KeyCode::Down,
        KeyCode::Char('a') | KeyCode::Char('A') => KeyCode::Left,
        KeyCode::Char('d') | KeyCode::Char('D') => KeyCode::Right,
        other => other,
    }
}

pub struct CrosstermInput {
    tracker: KeyTracker,
}

impl CrosstermInput {
    pub fn new(scale: CellScale) -> Self {
        CrosstermInput { tracker: KeyTracker::new(scale) }
    }
}

impl InputSource for CrosstermInput {
    fn poll(&mut self, frame: u64) -> io::Result<InputState> {
        while event::poll(Duration::ZERO).map_err(|e| { error!("Failed to poll event: {}", e); e })? {
            let ev = event::read().map_err(|e| { error!("Failed to read event: {}", e); e })?;
            self.tracker.apply(ev, frame);
        }
        Ok(self.tracker.snapshot(frame))
    }
}

// --- SimulatedInput for debugging ---
pub struct SimulatedInput {
    events: HashMap<u64, Vec<Event>>,
    tracker: KeyTracker,
}

impl SimulatedInput {
    pub fn new(events: HashMap<u64, Vec<Event>>, scale: CellScale) -> Self {
        SimulatedInput { events, tracker: KeyTracker::new(scale) }
    }

    pub fn demo_script(scale: CellScale, quit_frame: u64) -> Self {
        let mut events: HashMap<u64, Vec<Event>> = HashMap::new();
        for frame in (1..quit_frame).step_by(KEY_HOLD_WINDOW_FRAMES as usize) {
            let key = if (frame / 60) % 2 == 0 { KeyCode::Right } else { KeyCode::Up };
            events.entry(frame).or_default().push(Event::Key(key.into()));
        }
        events.entry(1).or_default().push(Event::Mouse(MouseEvent {
            kind: MouseEventKind::Moved,
            column: 70,
            row: 5,
            modifiers: KeyModifiers::NONE,
        }));
        events.entry(quit_frame).or_default().push(Event::Key(KeyCode::Char('q').into()));
        SimulatedInput::new(events, scale)
    }
}

impl InputSource for SimulatedInput {
    fn poll(&mut self, frame: u64) -> io::Result<InputState> {
        if let Some(events) = self.events.remove(&frame) {
            for ev in events {
                debug!("Simulated event at frame {}: {:?}", frame, ev);
                self.tracker.apply(ev, frame);
            }
        }
        Ok(self.tracker.snapshot(frame))
    }
}
