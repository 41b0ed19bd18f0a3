pub mod config;
pub mod error;
pub mod events;
pub mod history;
pub mod input;
pub mod item;
pub mod meta;
pub mod platform {
    pub mod brightness;
}
pub mod render;
pub mod scan;
pub mod slideshow;
pub mod watch;
