//! Backlight brightness control used for screen blanking.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Brightness as an opaque platform level; blanking saves the current level
/// and writes zero.
pub trait Brightness {
    fn get(&self) -> Result<u32>;
    fn set(&mut self, level: u32) -> Result<()>;
}

/// Controls a sysfs backlight directory (`brightness` plus `max_brightness`).
#[derive(Debug, Clone)]
pub struct BacklightSysfs {
    dir: PathBuf,
}

impl BacklightSysfs {
    #[must_use]
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn max(&self) -> Result<u32> {
        read_level(&self.dir.join("max_brightness"))
    }
}

impl Brightness for BacklightSysfs {
    fn get(&self) -> Result<u32> {
        read_level(&self.dir.join("brightness"))
    }

    fn set(&mut self, level: u32) -> Result<()> {
        let path = self.dir.join("brightness");
        fs::write(&path, level.to_string())
            .with_context(|| format!("writing backlight value to {}", path.display()))
    }
}

fn read_level(path: &std::path::Path) -> Result<u32> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading backlight value from {}", path.display()))?;
    raw.trim()
        .parse()
        .with_context(|| format!("parsing backlight value from {}", path.display()))
}

/// Used when no backlight is configured; blanking becomes a no-op beyond the
/// loop's own state.
#[derive(Debug, Default)]
pub struct NoBacklight;

impl Brightness for NoBacklight {
    fn get(&self) -> Result<u32> {
        Ok(0)
    }

    fn set(&mut self, _level: u32) -> Result<()> {
        Ok(())
    }
}
