//! Line-oriented key input from stdin, feeding the display loop's event
//! channel. A windowing shell would replace this producer with its own key
//! events; the translation table in [`crate::events`] is shared.

use std::io::{self, BufRead};
use std::thread;

use crossbeam_channel::Sender;

use crate::events::{InputEvent, Key};

/// Spawn the reader thread. One line per command; EOF quits the show.
pub fn spawn_stdin_reader(tx: Sender<InputEvent>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(InputEvent::from_key(parse_key(&line))).is_err() {
                return;
            }
        }
        let _ = tx.send(InputEvent::Quit);
    })
}

fn parse_key(line: &str) -> Key {
    match line.trim() {
        // A bare Enter toggles pause, like Space on a keyboard surface.
        "" => Key::Space,
        "left" => Key::Left,
        "right" => Key::Right,
        "esc" => Key::Escape,
        s => {
            let c = s.chars().next().unwrap_or(' ');
            if c == '\x1b' { Key::Escape } else { Key::Char(c) }
        }
    }
}
