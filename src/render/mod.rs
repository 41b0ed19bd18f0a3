//! Rendering boundary: the [`Screen`] trait the display loop draws through,
//! plus the item/placeholder composition logic shared by every
//! implementation.

pub mod software;

use std::path::{Path, PathBuf};

use image::RgbaImage;
use thiserror::Error;
use tracing::warn;

use crate::config::PlaceholderConfig;
use crate::item::ItemDescriptor;

/// A decoded, displayable image.
#[derive(Debug, Clone)]
pub struct Surface {
    pub image: RgbaImage,
}

impl Surface {
    #[must_use]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// A specific item's image could not be decoded. Recovered at the call site
/// by placeholder substitution; never propagates past the render boundary.
#[derive(Debug, Error)]
#[error("failed to load image {}: {reason}", path.display())]
pub struct LoadError {
    pub path: PathBuf,
    pub reason: String,
}

/// The display surface the loop draws to. Implementations own pixel storage
/// and presentation; the loop only composes.
pub trait Screen {
    /// Logical size in pixels.
    fn size(&self) -> (u32, u32);

    /// Decode an image file into a surface.
    fn load(&mut self, path: &Path) -> Result<Surface, LoadError>;

    /// Resize a surface to exactly `width` x `height`.
    fn scale(&mut self, surface: Surface, width: u32, height: u32) -> Surface;

    /// Copy a surface onto the frame at the given top-left position.
    fn blit(&mut self, surface: &Surface, x: i64, y: i64);

    /// Fill the frame with the background color.
    fn clear(&mut self);

    /// Annotate the frame's caption area. Text layout is the implementation's
    /// concern; a headless screen may simply record it.
    fn note(&mut self, text: &str);

    /// Push the composed frame to the output.
    fn present(&mut self) -> anyhow::Result<()>;
}

/// The reserved full-screen failure images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    DownloadError,
    ParseError,
    UsageError,
    NoItemsFound,
}

impl Placeholder {
    #[must_use]
    pub fn path<'a>(&self, cfg: &'a PlaceholderConfig) -> &'a Path {
        match self {
            Self::DownloadError => &cfg.download_error,
            Self::ParseError => &cfg.parse_error,
            Self::UsageError => &cfg.usage_error,
            Self::NoItemsFound => &cfg.no_items_found,
        }
    }
}

/// Target size and horizontal offset for an image scaled to fit the area
/// `max_w` x `max_h` while preserving aspect ratio, centered horizontally.
#[must_use]
pub fn fit(img_w: u32, img_h: u32, max_w: u32, max_h: u32) -> (u32, u32, i64) {
    if img_w == 0 || img_h == 0 || max_w == 0 || max_h == 0 {
        return (0, 0, 0);
    }
    let scale_v = f64::from(max_h) / f64::from(img_h);
    let scale_h = f64::from(max_w) / f64::from(img_w);
    let scale = scale_v.min(scale_h);
    let w = ((f64::from(img_w) * scale) as u32).max(1);
    let h = ((f64::from(img_h) * scale) as u32).max(1);
    let x = (i64::from(max_w) - i64::from(w)) / 2;
    (w, h, x)
}

/// Composes items and placeholders onto a [`Screen`]. The caption bar at the
/// bottom is excluded from the image area, matching the fixed screen layout.
#[derive(Debug, Clone)]
pub struct Compositor {
    caption_height: u32,
    placeholders: PlaceholderConfig,
}

impl Compositor {
    #[must_use]
    pub fn new(caption_height: u32, placeholders: PlaceholderConfig) -> Self {
        Self {
            caption_height,
            placeholders,
        }
    }

    fn image_area(&self, screen: &dyn Screen) -> (u32, u32) {
        let (w, h) = screen.size();
        (w, h.saturating_sub(self.caption_height).max(1))
    }

    /// Draw `item` scaled to fit, with its caption. On load failure the
    /// download-error placeholder is drawn instead with the failing path as
    /// the caption; the item itself is left untouched in history. Does not
    /// present.
    pub fn show_item(&self, screen: &mut dyn Screen, item: &ItemDescriptor) {
        match screen.load(&item.path) {
            Ok(surface) => {
                self.draw_surface(screen, surface);
                if let Some(caption) = caption_line(item) {
                    screen.note(&caption);
                }
            }
            Err(err) => {
                warn!(path = %err.path.display(), reason = %err.reason, "item load failed");
                self.show_placeholder(screen, Placeholder::DownloadError);
                screen.note(&item.path.to_string_lossy());
            }
        }
    }

    /// Draw a reserved failure image full-screen. A placeholder that itself
    /// fails to load degrades to a cleared frame. Does not present.
    pub fn show_placeholder(&self, screen: &mut dyn Screen, kind: Placeholder) {
        let path = kind.path(&self.placeholders).to_path_buf();
        match screen.load(&path) {
            Ok(surface) => self.draw_surface(screen, surface),
            Err(err) => {
                warn!(path = %err.path.display(), reason = %err.reason, "placeholder load failed");
                screen.clear();
            }
        }
    }

    fn draw_surface(&self, screen: &mut dyn Screen, surface: Surface) {
        let (max_w, max_h) = self.image_area(screen);
        let (w, h, x) = fit(surface.width(), surface.height(), max_w, max_h);
        let scaled = if (w, h) == (surface.width(), surface.height()) {
            surface
        } else {
            screen.scale(surface, w, h)
        };
        screen.clear();
        screen.blit(&scaled, x, 0);
    }
}

fn caption_line(item: &ItemDescriptor) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(title) = &item.title {
        parts.push(title.clone());
    }
    if let Some(desc) = &item.description {
        parts.push(desc.clone());
    }
    if let Some(date) = &item.date {
        parts.push(date.clone());
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" | "))
    }
}
