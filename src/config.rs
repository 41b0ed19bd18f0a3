//! YAML configuration (kebab-case keys, everything but the library path
//! defaulted).

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::ensure;
use serde::Deserialize;

use crate::error::Error;
use crate::history::MAX_HISTORY_SIZE;
use crate::scan::ScanOptions;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Configuration {
    /// Root directory scanned for images.
    pub photo_library_path: PathBuf,

    /// Interval between automatic advances.
    #[serde(default = "Configuration::default_sleep_time", with = "humantime_serde")]
    pub sleep_time: Duration,

    /// How long transient screens (usage help, no-items placeholder) hold.
    #[serde(default = "Configuration::default_usage_time", with = "humantime_serde")]
    pub usage_time: Duration,

    /// Base increment for the tier-stepped speed adjustment.
    #[serde(
        default = "Configuration::default_sleep_time_increment",
        with = "humantime_serde"
    )]
    pub sleep_time_increment: Duration,

    /// Upper bound on retained history.
    #[serde(default = "Configuration::default_max_history_size")]
    pub max_history_size: usize,

    #[serde(default)]
    pub screen: ScreenConfig,

    /// Height in pixels of the caption bar reserved at the bottom edge.
    #[serde(default = "Configuration::default_caption_height")]
    pub caption_height: u32,

    #[serde(default)]
    pub placeholders: PlaceholderConfig,

    /// Backlight sysfs directory for screen blanking; `None` disables
    /// brightness control.
    #[serde(default)]
    pub backlight_path: Option<PathBuf>,

    /// Override for allowed image extensions (lowercase, without dot).
    #[serde(default)]
    pub extensions: Option<Vec<String>>,

    /// Whether the startup scan recurses into subdirectories.
    #[serde(default = "Configuration::default_recursive")]
    pub recursive: bool,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ScreenConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        // The XO laptop panel.
        Self {
            width: 1200,
            height: 900,
        }
    }
}

/// Reserved full-screen images shown on failure conditions.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PlaceholderConfig {
    #[serde(default = "PlaceholderConfig::default_download_error")]
    pub download_error: PathBuf,
    #[serde(default = "PlaceholderConfig::default_parse_error")]
    pub parse_error: PathBuf,
    #[serde(default = "PlaceholderConfig::default_usage_error")]
    pub usage_error: PathBuf,
    #[serde(default = "PlaceholderConfig::default_no_items_found")]
    pub no_items_found: PathBuf,
}

impl Default for PlaceholderConfig {
    fn default() -> Self {
        Self {
            download_error: Self::default_download_error(),
            parse_error: Self::default_parse_error(),
            usage_error: Self::default_usage_error(),
            no_items_found: Self::default_no_items_found(),
        }
    }
}

impl PlaceholderConfig {
    fn default_download_error() -> PathBuf {
        PathBuf::from("assets/error_download.png")
    }
    fn default_parse_error() -> PathBuf {
        PathBuf::from("assets/error_parse.png")
    }
    fn default_usage_error() -> PathBuf {
        PathBuf::from("assets/error_usage.png")
    }
    fn default_no_items_found() -> PathBuf {
        PathBuf::from("assets/error_found.png")
    }
}

impl Configuration {
    fn default_sleep_time() -> Duration {
        Duration::from_millis(6000)
    }
    fn default_usage_time() -> Duration {
        Duration::from_millis(3000)
    }
    fn default_sleep_time_increment() -> Duration {
        Duration::from_millis(1500)
    }
    fn default_max_history_size() -> usize {
        MAX_HISTORY_SIZE
    }
    fn default_caption_height() -> u32 {
        32
    }
    fn default_recursive() -> bool {
        true
    }

    /// Sanity checks beyond what deserialization enforces.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.photo_library_path.is_dir(),
            "photo-library-path must be an existing directory: {}",
            self.photo_library_path.display()
        );
        ensure!(
            self.screen.width > 0 && self.screen.height > 0,
            "screen dimensions must be non-zero"
        );
        ensure!(
            self.screen.height > self.caption_height,
            "caption bar must leave room for the image area"
        );
        ensure!(self.max_history_size > 0, "max-history-size must be non-zero");
        ensure!(
            !self.sleep_time_increment.is_zero(),
            "sleep-time-increment must be non-zero"
        );
        Ok(())
    }

    #[must_use]
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            recursive: self.recursive,
            max_depth: None,
            exts: self.extensions.clone(),
            read_dates: true,
        }
    }
}

/// Load and deserialize a configuration file.
///
/// # Errors
/// Returns [`Error::Io`] if the file cannot be read and [`Error::Config`] if
/// it does not parse.
pub fn from_yaml_file(path: &Path) -> Result<Configuration, Error> {
    let raw = std::fs::read_to_string(path)?;
    let cfg = serde_yaml::from_str(&raw)?;
    Ok(cfg)
}
