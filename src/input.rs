/// Crossterm backend for [`InputSource`].
///
/// A dedicated thread blocks on `event::read()` and forwards everything
/// through a channel, so the tick loop only ever drains it without waiting.
///
/// Held keys: we remember the tick of the last press/repeat for every key.
/// Terminals that report releases (kitty protocol) drop the key at once;
/// classic terminals only send repeated presses, so a key also expires after
/// `HOLD_WINDOW` ticks of silence, which is shorter than the OS repeat
/// interval at 60 ticks per second.
use std::collections::HashMap;
use std::sync::mpsc;
use std::thread;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use tracing::debug;

use crate::display::terminal::Viewport;
use crate::entities::{Directions, Point};
use crate::platform::{InputEvent, InputFrame, InputSource, Key, MouseButton};

/// A key counts as held if seen within this many ticks.
const HOLD_WINDOW: u64 = 8;

pub struct TerminalInput {
    rx: mpsc::Receiver<Event>,
    viewport: Viewport,
    key_tick: HashMap<Key, u64>,
    tick: u64,
    pointer: Point,
}

impl TerminalInput {
    /// Start the reader thread.  It exits on its own once the receiver is
    /// dropped and the next terminal event arrives.
    pub fn spawn(viewport: Viewport) -> Self {
        let (tx, rx) = mpsc::channel::<Event>();
        thread::spawn(move || loop {
            match event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    debug!(error = %err, "terminal event reader stopped");
                    break;
                }
            }
        });
        Self::from_receiver(rx, viewport)
    }

    pub fn from_receiver(rx: mpsc::Receiver<Event>, viewport: Viewport) -> Self {
        Self {
            rx,
            viewport,
            key_tick: HashMap::new(),
            tick: 0,
            pointer: Point::default(),
        }
    }

    fn is_held(&self, key: Key) -> bool {
        self.key_tick
            .get(&key)
            .map(|&last| self.tick.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    fn on_key(&mut self, key: KeyEvent, events: &mut Vec<InputEvent>) {
        let KeyEvent {
            code,
            kind,
            modifiers,
            ..
        } = key;
        if kind == KeyEventKind::Press && is_quit(code, modifiers) {
            events.push(InputEvent::Quit);
            return;
        }
        let Some(key) = translate_key(code) else {
            return;
        };
        match kind {
            KeyEventKind::Press => {
                self.key_tick.insert(key, self.tick);
                events.push(InputEvent::KeyDown(key));
            }
            KeyEventKind::Repeat => {
                self.key_tick.insert(key, self.tick);
            }
            KeyEventKind::Release => {
                self.key_tick.remove(&key);
            }
        }
    }

    fn on_mouse(&mut self, mouse: MouseEvent, events: &mut Vec<InputEvent>) {
        self.pointer = self.viewport.to_field(mouse.column, mouse.row);
        if let MouseEventKind::Down(button) = mouse.kind {
            events.push(InputEvent::PointerDown {
                pos: self.pointer,
                button: translate_button(button),
            });
        }
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> InputFrame {
        self.tick += 1;
        let mut events = Vec::new();

        while let Ok(ev) = self.rx.try_recv() {
            match ev {
                Event::Key(key) => self.on_key(key, &mut events),
                Event::Mouse(mouse) => self.on_mouse(mouse, &mut events),
                Event::Resize(cols, rows) => {
                    self.viewport = Viewport::new(cols, rows, self.viewport.field);
                }
                _ => {}
            }
        }

        InputFrame {
            held: Directions {
                left: self.is_held(Key::Left),
                right: self.is_held(Key::Right),
                up: self.is_held(Key::Up),
                down: self.is_held(Key::Down),
            },
            pointer: self.pointer,
            events,
        }
    }
}

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Arrow keys and WASD steer; Space fires; Enter confirms.
pub fn translate_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Key::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Key::Down),
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Enter => Some(Key::Enter),
        _ => None,
    }
}

fn translate_button(button: event::MouseButton) -> MouseButton {
    match button {
        event::MouseButton::Left => MouseButton::Primary,
        event::MouseButton::Right => MouseButton::Secondary,
        event::MouseButton::Middle => MouseButton::Middle,
    }
}
