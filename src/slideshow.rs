//! The display loop: a single-threaded, poll-driven state machine that owns
//! all timing state and dispatches input events to history-buffer operations
//! and to the screen.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossbeam_channel::{Receiver, RecvTimeoutError};
use tracing::{debug, info, warn};

use crate::events::{InputEvent, ItemAdded};
use crate::history::HistoryBuffer;
use crate::item::ItemDescriptor;
use crate::meta;
use crate::platform::brightness::Brightness;
use crate::render::{Compositor, Placeholder, Screen};

/// How long the loop parks between polls when no event arrives.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Used when the saved brightness cannot be read at blanking time.
const FALLBACK_BRIGHTNESS: u32 = 50;

/// Shorten the auto-advance interval by one tier step. Coarse above twenty
/// increments, fine below, floored at one increment.
#[must_use]
pub fn decrease_interval(t: Duration, inc: Duration) -> Duration {
    if t > inc * 20 {
        t - inc * 10
    } else if t > inc {
        t - inc
    } else {
        t
    }
}

/// Lengthen the auto-advance interval by one tier step. Fine below ten
/// increments, coarse above, with no ceiling.
#[must_use]
pub fn increase_interval(t: Duration, inc: Duration) -> Duration {
    if t < inc * 10 { t + inc } else { t + inc * 10 }
}

/// Timer and mode state owned by the loop. No ambient globals; constructed
/// once at startup.
#[derive(Debug, Clone)]
pub struct LoopState {
    pub sleep_time: Duration,
    pub next_wake: Instant,
    pub paused: bool,
    pub blanked: bool,
    pub saved_brightness: u32,
    pub changed: bool,
    pub quit: bool,
}

/// Fixed timing parameters from configuration.
#[derive(Debug, Clone, Copy)]
pub struct Timing {
    /// Initial interval between automatic advances.
    pub sleep_time: Duration,
    /// Hold time for transient screens (usage help, no-items placeholder).
    pub usage_time: Duration,
    /// Base increment for speed adjustment.
    pub increment: Duration,
}

pub struct Slideshow {
    history: Option<HistoryBuffer>,
    compositor: Compositor,
    brightness: Box<dyn Brightness>,
    timing: Timing,
    state: LoopState,
}

impl Slideshow {
    /// `history` is `None` when the startup scan found nothing; the loop then
    /// shows the no-items placeholder until quit (or until the watcher
    /// reports a first item).
    pub fn new(
        history: Option<HistoryBuffer>,
        compositor: Compositor,
        brightness: Box<dyn Brightness>,
        timing: Timing,
        now: Instant,
    ) -> Self {
        Self {
            history,
            compositor,
            brightness,
            timing,
            state: LoopState {
                sleep_time: timing.sleep_time,
                next_wake: now + timing.sleep_time,
                paused: false,
                blanked: false,
                saved_brightness: FALLBACK_BRIGHTNESS,
                changed: false,
                quit: false,
            },
        }
    }

    #[must_use]
    pub fn state(&self) -> &LoopState {
        &self.state
    }

    #[must_use]
    pub fn history(&self) -> Option<&HistoryBuffer> {
        self.history.as_ref()
    }

    /// Dispatch one input event. Each arm is a direct method so transitions
    /// can be driven from tests without synthesizing platform events.
    pub fn handle_event(
        &mut self,
        ev: InputEvent,
        now: Instant,
        screen: &mut dyn Screen,
    ) -> Result<()> {
        debug!(?ev, "input event");
        if ev == InputEvent::Quit {
            self.on_quit();
            return Ok(());
        }
        // With nothing to show, every other input is a no-op.
        if self.history.is_none() {
            return Ok(());
        }
        // Any key while blanked re-exposes the screen and is consumed;
        // play/pause state is left as it was.
        if self.state.blanked {
            self.unblank();
            return Ok(());
        }
        match ev {
            InputEvent::Quit => {}
            InputEvent::TogglePause => self.on_toggle_pause(screen)?,
            InputEvent::Next => self.on_next(),
            InputEvent::Prev => self.on_prev(),
            InputEvent::SpeedUp => self.on_speed_up(screen)?,
            InputEvent::SlowDown => self.on_slow_down(screen)?,
            InputEvent::Blank => self.on_blank(),
            InputEvent::Other => self.on_usage(now, screen)?,
        }
        Ok(())
    }

    /// One timer pass: redraw a pending manual change, or auto-advance when
    /// playing and the deadline has passed.
    pub fn tick(&mut self, now: Instant, screen: &mut dyn Screen) -> Result<()> {
        let Some(history) = &mut self.history else {
            self.compositor
                .show_placeholder(screen, Placeholder::NoItemsFound);
            screen.present()?;
            self.state.next_wake = now + self.timing.usage_time;
            return Ok(());
        };

        if self.state.changed {
            // Manual navigation redraws even when paused.
            let item = history.current().clone();
            self.compositor.show_item(screen, &item);
            if self.state.paused {
                screen.note("PAUSED");
            }
            screen.present()?;
            self.state.next_wake = now + self.state.sleep_time;
            self.state.changed = false;
        } else if !self.state.paused && !self.state.blanked && now >= self.state.next_wake {
            let item = history.next().clone();
            self.compositor.show_item(screen, &item);
            screen.present()?;
            self.state.next_wake = now + self.state.sleep_time;
        }
        Ok(())
    }

    /// A new file appeared in the library. Appends to the buffer; if the show
    /// started empty, a first buffer is built and displayed.
    pub fn handle_added(&mut self, added: ItemAdded, now: Instant) {
        let ItemAdded(path) = added;
        info!(path = %path.display(), "item discovered");
        let item = ItemDescriptor::new(path.clone()).with_date(meta::capture_date(&path));
        if let Some(history) = &mut self.history {
            history.append(item);
            return;
        }
        match HistoryBuffer::from_items(vec![item], 1) {
            Ok(buf) => {
                self.history = Some(buf);
                self.state.changed = true;
                self.state.next_wake = now;
            }
            Err(err) => warn!(error = %err, "could not start history from new item"),
        }
    }

    /// Run until quit: drain pending input and discovery events, take one
    /// timer pass, park briefly. Single-threaded and cooperative; the park is
    /// interrupted by any input event.
    pub fn run(
        mut self,
        screen: &mut dyn Screen,
        events: &Receiver<InputEvent>,
        added: Option<&Receiver<ItemAdded>>,
    ) -> Result<()> {
        // Show the first item before entering the loop.
        if let Some(history) = &self.history {
            let item = history.current().clone();
            self.compositor.show_item(screen, &item);
            screen.present()?;
        }

        loop {
            match events.recv_timeout(POLL_INTERVAL) {
                Ok(ev) => self.handle_event(ev, Instant::now(), screen)?,
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => self.on_quit(),
            }
            while let Ok(ev) = events.try_recv() {
                self.handle_event(ev, Instant::now(), screen)?;
            }
            if let Some(rx) = added {
                while let Ok(item) = rx.try_recv() {
                    self.handle_added(item, Instant::now());
                }
            }
            if self.state.quit {
                break;
            }
            self.tick(Instant::now(), screen)?;
        }
        Ok(())
    }

    fn on_quit(&mut self) {
        if self.state.blanked {
            self.restore_brightness();
            self.state.blanked = false;
        }
        self.state.quit = true;
        info!("quit requested");
    }

    fn on_toggle_pause(&mut self, screen: &mut dyn Screen) -> Result<()> {
        if self.state.paused {
            self.state.paused = false;
            return Ok(());
        }
        self.state.paused = true;
        if let Some(history) = &self.history {
            let item = history.current().clone();
            self.compositor.show_item(screen, &item);
            screen.note("PAUSED");
            screen.present()?;
        }
        Ok(())
    }

    fn on_next(&mut self) {
        if let Some(history) = &mut self.history {
            history.next();
            self.state.changed = true;
        }
    }

    fn on_prev(&mut self) {
        if let Some(history) = &mut self.history {
            history.prev();
            self.state.changed = true;
        }
    }

    fn on_speed_up(&mut self, screen: &mut dyn Screen) -> Result<()> {
        self.state.sleep_time = decrease_interval(self.state.sleep_time, self.timing.increment);
        debug!(sleep_ms = self.state.sleep_time.as_millis() as u64, "interval decreased");
        self.redraw_current(screen)
    }

    fn on_slow_down(&mut self, screen: &mut dyn Screen) -> Result<()> {
        self.state.sleep_time = increase_interval(self.state.sleep_time, self.timing.increment);
        debug!(sleep_ms = self.state.sleep_time.as_millis() as u64, "interval increased");
        self.redraw_current(screen)
    }

    fn on_blank(&mut self) {
        self.state.saved_brightness = match self.brightness.get() {
            Ok(level) => level,
            Err(err) => {
                warn!(error = %err, "could not read brightness; using fallback");
                FALLBACK_BRIGHTNESS
            }
        };
        if let Err(err) = self.brightness.set(0) {
            warn!(error = %err, "could not blank the display");
        }
        self.state.blanked = true;
    }

    fn on_usage(&mut self, now: Instant, screen: &mut dyn Screen) -> Result<()> {
        self.compositor
            .show_placeholder(screen, Placeholder::UsageError);
        screen.present()?;
        // Hold the help screen by pushing the deadline out; the next timer
        // expiry replaces it with the next item.
        self.state.next_wake = now + self.timing.usage_time;
        Ok(())
    }

    fn unblank(&mut self) {
        self.restore_brightness();
        self.state.blanked = false;
    }

    fn restore_brightness(&mut self) {
        if let Err(err) = self.brightness.set(self.state.saved_brightness) {
            warn!(error = %err, "could not restore brightness");
        }
    }

    // Immediate redraw of the current item without advancing.
    fn redraw_current(&mut self, screen: &mut dyn Screen) -> Result<()> {
        if let Some(history) = &self.history {
            let item = history.current().clone();
            self.compositor.show_item(screen, &item);
            screen.present()?;
        }
        Ok(())
    }
}
