//! Input events: [`Msg`], [`Key`], [`MouseAction`], and their mapping from
//! crossterm events.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

/// A keyboard key the editor cares about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Space,
    Delete,
    /// A printable character.
    Char(char),
}

/// A mouse action. Drags report the held button, like a press.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MouseAction {
    /// Left button pressed or dragged.
    Main,
    /// Right button pressed or dragged.
    Secondary,
    /// Button released.
    Release,
    /// Mouse moved with no button held.
    Move,
}

/// An input message delivered to the editor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Msg {
    /// A key was pressed.
    KeyDown { key: Key, ctrl: bool },
    /// A mouse event at a terminal column / row.
    Mouse {
        action: MouseAction,
        column: u16,
        row: u16,
    },
    /// The terminal was resized.
    Screen { width: u16, height: u16 },
}

impl Msg {
    /// Convenience: a `KeyDown` without modifiers.
    pub fn key(key: Key) -> Self {
        Self::KeyDown { key, ctrl: false }
    }

    /// `q` or `Ctrl-C`.
    pub fn is_quit(&self) -> bool {
        matches!(
            self,
            Msg::KeyDown {
                key: Key::Char('q'),
                ..
            } | Msg::KeyDown {
                key: Key::Char('c'),
                ctrl: true
            }
        )
    }
}

/// Maps a crossterm [`KeyCode`] to a [`Key`].
fn to_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Delete => Some(Key::Delete),
        _ => None,
    }
}

/// Translate a crossterm event into a [`Msg`], dropping what the editor
/// does not handle (key releases, wheel, focus, paste).
pub fn translate(ev: Event) -> Option<Msg> {
    match ev {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) => {
            if kind == KeyEventKind::Release {
                return None;
            }
            to_key(code).map(|key| Msg::KeyDown {
                key,
                ctrl: modifiers.contains(KeyModifiers::CONTROL),
            })
        }
        Event::Mouse(MouseEvent {
            kind, column, row, ..
        }) => {
            let action = match kind {
                MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left) => {
                    MouseAction::Main
                }
                MouseEventKind::Down(MouseButton::Right)
                | MouseEventKind::Drag(MouseButton::Right) => MouseAction::Secondary,
                MouseEventKind::Up(_) => MouseAction::Release,
                MouseEventKind::Moved => MouseAction::Move,
                _ => return None,
            };
            Some(Msg::Mouse {
                action,
                column,
                row,
            })
        }
        Event::Resize(width, height) => Some(Msg::Screen { width, height }),
        _ => None,
    }
}
