//! Events flowing into the display loop.

use std::path::PathBuf;

/// A keyboard (or shell) event, already translated from the platform key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Escape or `q`: leave the show.
    Quit,
    /// Space or `p`: toggle pause.
    TogglePause,
    /// Right arrow: skip forward.
    Next,
    /// Left arrow: step back.
    Prev,
    /// `.` or `>`: shorten the interval between advances.
    SpeedUp,
    /// `,` or `<`: lengthen the interval.
    SlowDown,
    /// `b` or `s`: blank the screen.
    Blank,
    /// Any other key: show the usage screen.
    Other,
}

/// Named non-character keys the input surface can deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Escape,
    Space,
    Left,
    Right,
}

impl InputEvent {
    /// Translate a key press into a loop event. Every key maps to something;
    /// unrecognized keys become [`InputEvent::Other`].
    #[must_use]
    pub fn from_key(key: Key) -> Self {
        match key {
            Key::Escape => Self::Quit,
            Key::Space => Self::TogglePause,
            Key::Right => Self::Next,
            Key::Left => Self::Prev,
            Key::Char(c) => match c.to_ascii_lowercase() {
                'q' => Self::Quit,
                'p' => Self::TogglePause,
                '.' | '>' => Self::SpeedUp,
                ',' | '<' => Self::SlowDown,
                'b' | 's' => Self::Blank,
                _ => Self::Other,
            },
        }
    }
}

/// Emitted by the filesystem watcher when a new image appears in the library.
#[derive(Debug, Clone)]
pub struct ItemAdded(pub PathBuf);
