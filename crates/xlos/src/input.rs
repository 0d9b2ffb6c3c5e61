//! Raw input events delivered by the external event loop.
//!
//! Events are plain data. They derive serde so a session script can spell
//! them out in TOML:
//!
//! ```toml
//! events = [
//!     { type = "PointerDown", position = { x = 60, y = 700 } },
//!     { type = "KeyDown", key = "t", text = "t" },
//!     { type = "KeyDown", key = "Tab", modifiers = { alt = true } },
//! ]
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use xlos_render::Point;

/// A mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MouseButton {
    /// Primary button (usually left).
    #[default]
    Left,
    /// Secondary button (usually right).
    Right,
    /// Middle button (scroll wheel click).
    Middle,
}

/// Keyboard modifier state at the time of a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held.
    pub control: bool,
    /// The Alt key is held.
    pub alt: bool,
    /// The Meta/Super key is held.
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        control: true,
        ..Self::NONE
    };

    /// Alt modifier only.
    pub const ALT: Self = Self {
        alt: true,
        ..Self::NONE
    };

    /// Check if no modifiers are pressed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }
}

/// A key, either a named key or a printable character.
///
/// Characters are stored lowercase; shifted input arrives through the text
/// fragment of [`RawEvent::KeyDown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Key {
    Escape,
    Enter,
    Backspace,
    Delete,
    Tab,
    Space,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    Character(char),
}

/// A key name that could not be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown key '{0}'")]
pub struct ParseKeyError(pub String);

impl Key {
    /// The key producing character `c`.
    pub fn from_char(c: char) -> Self {
        match c {
            ' ' => Key::Space,
            '\n' | '\r' => Key::Enter,
            '\t' => Key::Tab,
            c => Key::Character(c.to_ascii_lowercase()),
        }
    }

    /// The character key for `c`, if this is it (case-insensitive).
    pub fn is_char(&self, c: char) -> bool {
        matches!(self, Key::Character(k) if *k == c.to_ascii_lowercase())
    }

    /// Check if this is an arrow key.
    pub fn is_arrow(&self) -> bool {
        matches!(
            self,
            Key::ArrowUp | Key::ArrowDown | Key::ArrowLeft | Key::ArrowRight
        )
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Key::Escape => "Escape",
            Key::Enter => "Enter",
            Key::Backspace => "Backspace",
            Key::Delete => "Delete",
            Key::Tab => "Tab",
            Key::Space => "Space",
            Key::ArrowUp => "ArrowUp",
            Key::ArrowDown => "ArrowDown",
            Key::ArrowLeft => "ArrowLeft",
            Key::ArrowRight => "ArrowRight",
            Key::Home => "Home",
            Key::End => "End",
            Key::Character(c) => return write!(f, "{c}"),
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for Key {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(Key::from_char(c));
        }
        match s.to_ascii_lowercase().as_str() {
            "escape" | "esc" => Ok(Key::Escape),
            "enter" | "return" => Ok(Key::Enter),
            "backspace" => Ok(Key::Backspace),
            "delete" => Ok(Key::Delete),
            "tab" => Ok(Key::Tab),
            "space" => Ok(Key::Space),
            "arrowup" | "up" => Ok(Key::ArrowUp),
            "arrowdown" | "down" => Ok(Key::ArrowDown),
            "arrowleft" | "left" => Ok(Key::ArrowLeft),
            "arrowright" | "right" => Ok(Key::ArrowRight),
            "home" => Ok(Key::Home),
            "end" => Ok(Key::End),
            _ => Err(ParseKeyError(s.to_owned())),
        }
    }
}

impl TryFrom<String> for Key {
    type Error = ParseKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.to_string()
    }
}

/// One discrete input or display event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RawEvent {
    PointerDown {
        #[serde(default)]
        button: MouseButton,
        position: Point,
    },
    PointerUp {
        #[serde(default)]
        button: MouseButton,
        position: Point,
    },
    PointerMove {
        position: Point,
    },
    KeyDown {
        key: Key,
        #[serde(default)]
        modifiers: KeyboardModifiers,
        /// Text produced by the key press, if any.
        #[serde(default)]
        text: Option<String>,
    },
    KeyUp {
        key: Key,
    },
    Quit,
    SurfaceResize {
        width: u32,
        height: u32,
    },
}

impl RawEvent {
    /// Left-button press at `(x, y)`.
    pub fn pointer_down(x: f32, y: f32) -> Self {
        RawEvent::PointerDown {
            button: MouseButton::Left,
            position: Point::new(x, y),
        }
    }

    /// Left-button release at `(x, y)`.
    pub fn pointer_up(x: f32, y: f32) -> Self {
        RawEvent::PointerUp {
            button: MouseButton::Left,
            position: Point::new(x, y),
        }
    }

    /// Pointer motion to `(x, y)`.
    pub fn pointer_move(x: f32, y: f32) -> Self {
        RawEvent::PointerMove {
            position: Point::new(x, y),
        }
    }

    /// Press of a named key without text.
    pub fn key(key: Key) -> Self {
        RawEvent::KeyDown {
            key,
            modifiers: KeyboardModifiers::NONE,
            text: None,
        }
    }

    /// Press of a key with modifiers held.
    pub fn key_with(key: Key, modifiers: KeyboardModifiers) -> Self {
        RawEvent::KeyDown {
            key,
            modifiers,
            text: None,
        }
    }

    /// Press of the key that types `c`.
    pub fn char(c: char) -> Self {
        RawEvent::KeyDown {
            key: Key::from_char(c),
            modifiers: KeyboardModifiers::NONE,
            text: Some(c.to_string()),
        }
    }

    /// Pointer position carried by this event, if any.
    pub fn position(&self) -> Option<Point> {
        match self {
            RawEvent::PointerDown { position, .. }
            | RawEvent::PointerUp { position, .. }
            | RawEvent::PointerMove { position } => Some(*position),
            _ => None,
        }
    }

    /// Whether this is a keyboard event.
    pub fn is_key(&self) -> bool {
        matches!(self, RawEvent::KeyDown { .. } | RawEvent::KeyUp { .. })
    }

    /// Printable text typed by a key press without Control or Alt held.
    pub fn typed_text(&self) -> Option<&str> {
        match self {
            RawEvent::KeyDown {
                modifiers,
                text: Some(text),
                ..
            } if !modifiers.control
                && !modifiers.alt
                && !text.is_empty()
                && !text.chars().any(char::is_control) =>
            {
                Some(text.as_str())
            }
            _ => None,
        }
    }

    /// The key of a key press.
    pub fn pressed_key(&self) -> Option<Key> {
        match self {
            RawEvent::KeyDown { key, .. } => Some(*key),
            _ => None,
        }
    }

    /// Position of a left-button press.
    pub fn left_press(&self) -> Option<Point> {
        match self {
            RawEvent::PointerDown {
                button: MouseButton::Left,
                position,
            } => Some(*position),
            _ => None,
        }
    }

    /// Position of a left-button release.
    pub fn left_release(&self) -> Option<Point> {
        match self {
            RawEvent::PointerUp {
                button: MouseButton::Left,
                position,
            } => Some(*position),
            _ => None,
        }
    }
}
