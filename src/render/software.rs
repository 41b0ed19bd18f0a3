//! CPU implementation of [`Screen`]: `image` decode with EXIF orientation
//! correction, `fast_image_resize` scaling, and an RGBA framebuffer handed to
//! a pluggable sink on present.

use std::path::Path;

use anyhow::Result;
use fast_image_resize::images::Image;
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};
use image::RgbaImage;
use tracing::debug;

use super::{LoadError, Screen, Surface};
use crate::meta;

const BACKGROUND: image::Rgba<u8> = image::Rgba([0, 0, 0, 255]);

/// Receives composed frames. The binary logs presentation; a windowed shell
/// would copy into its surface here.
pub trait FrameSink {
    fn present(&mut self, width: u32, height: u32, pixels: &[u8]) -> Result<()>;
}

/// Sink that only logs, for headless operation.
#[derive(Debug, Default)]
pub struct LogSink;

impl FrameSink for LogSink {
    fn present(&mut self, width: u32, height: u32, _pixels: &[u8]) -> Result<()> {
        debug!(width, height, "frame presented");
        Ok(())
    }
}

pub struct SoftwareScreen<S: FrameSink> {
    frame: RgbaImage,
    notes: Vec<String>,
    resizer: Resizer,
    sink: S,
}

impl<S: FrameSink> SoftwareScreen<S> {
    pub fn new(width: u32, height: u32, sink: S) -> Self {
        Self {
            frame: RgbaImage::from_pixel(width, height, BACKGROUND),
            notes: Vec::new(),
            resizer: Resizer::new(),
            sink,
        }
    }

    /// Notes attached to the frame since the last clear.
    #[must_use]
    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    /// Read back the framebuffer, for tests and sinks that pull.
    #[must_use]
    pub fn frame(&self) -> &RgbaImage {
        &self.frame
    }
}

// Decodes to RGBA8 and applies EXIF orientation if available. Orientation
// handling is best-effort; missing metadata leaves the image as decoded.
fn decode_rgba8_apply_exif(path: &Path) -> Result<RgbaImage> {
    let img = image::ImageReader::open(path)?
        .with_guessed_format()?
        .decode()?;
    let mut img = img.to_rgba8();

    match meta::read_orientation(path).unwrap_or(1) {
        2 => img = image::imageops::flip_horizontal(&img),
        3 => img = image::imageops::rotate180(&img),
        4 => img = image::imageops::flip_vertical(&img),
        5 => {
            img = image::imageops::rotate90(&img);
            img = image::imageops::flip_horizontal(&img);
        }
        6 => img = image::imageops::rotate90(&img),
        7 => {
            img = image::imageops::rotate270(&img);
            img = image::imageops::flip_horizontal(&img);
        }
        8 => img = image::imageops::rotate270(&img),
        _ => {}
    }

    Ok(img)
}

impl<S: FrameSink> Screen for SoftwareScreen<S> {
    fn size(&self) -> (u32, u32) {
        (self.frame.width(), self.frame.height())
    }

    fn load(&mut self, path: &Path) -> Result<Surface, LoadError> {
        decode_rgba8_apply_exif(path)
            .map(|image| Surface { image })
            .map_err(|err| LoadError {
                path: path.to_path_buf(),
                reason: err.to_string(),
            })
    }

    fn scale(&mut self, surface: Surface, width: u32, height: u32) -> Surface {
        let (src_w, src_h) = (surface.width(), surface.height());
        if (src_w, src_h) == (width, height) || width == 0 || height == 0 {
            return surface;
        }
        let Ok(src) = Image::from_vec_u8(src_w, src_h, surface.image.into_raw(), PixelType::U8x4)
        else {
            // Dimension/buffer mismatch cannot occur for a valid RgbaImage;
            // fall back to an empty surface rather than panic.
            return Surface {
                image: RgbaImage::new(width, height),
            };
        };
        let mut dst = Image::new(width, height, PixelType::U8x4);
        let opts =
            ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Bilinear));
        if self.resizer.resize(&src, &mut dst, &opts).is_err() {
            return Surface {
                image: RgbaImage::new(width, height),
            };
        }
        let image = RgbaImage::from_raw(width, height, dst.into_vec())
            .unwrap_or_else(|| RgbaImage::new(width, height));
        Surface { image }
    }

    fn blit(&mut self, surface: &Surface, x: i64, y: i64) {
        let (fw, fh) = (i64::from(self.frame.width()), i64::from(self.frame.height()));
        for (sx, sy, px) in surface.image.enumerate_pixels() {
            let dx = x + i64::from(sx);
            let dy = y + i64::from(sy);
            if dx >= 0 && dy >= 0 && dx < fw && dy < fh {
                self.frame.put_pixel(dx as u32, dy as u32, *px);
            }
        }
    }

    fn clear(&mut self) {
        for px in self.frame.pixels_mut() {
            *px = BACKGROUND;
        }
        self.notes.clear();
    }

    fn note(&mut self, text: &str) {
        // Glyph rendering is the shell's concern; record and log.
        debug!(note = text, "frame note");
        self.notes.push(text.to_owned());
    }

    fn present(&mut self) -> Result<()> {
        let (w, h) = self.size();
        self.sink.present(w, h, self.frame.as_raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_failure_reports_the_path() {
        let mut screen = SoftwareScreen::new(8, 8, LogSink);
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join("not_an_image.jpg");
        let mut f = std::fs::File::create(&bogus).unwrap();
        f.write_all(b"plainly not a jpeg").unwrap();

        let err = screen.load(&bogus).unwrap_err();
        assert_eq!(err.path, bogus);
    }

    #[test]
    fn roundtrip_load_scale_blit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("red.png");
        let red = RgbaImage::from_pixel(4, 4, image::Rgba([255, 0, 0, 255]));
        red.save(&path).unwrap();

        let mut screen = SoftwareScreen::new(8, 8, LogSink);
        let surface = screen.load(&path).unwrap();
        let scaled = screen.scale(surface, 2, 2);
        assert_eq!((scaled.width(), scaled.height()), (2, 2));

        screen.clear();
        screen.blit(&scaled, 3, 3);
        screen.present().unwrap();
        assert_eq!(screen.frame().get_pixel(3, 3)[0], 255);
        assert_eq!(screen.frame().get_pixel(0, 0)[0], 0);
    }

    #[test]
    fn blit_clips_outside_the_frame() {
        let mut screen = SoftwareScreen::new(4, 4, LogSink);
        let surface = Surface {
            image: RgbaImage::from_pixel(4, 4, image::Rgba([9, 9, 9, 255])),
        };
        screen.blit(&surface, -2, -2);
        assert_eq!(screen.frame().get_pixel(0, 0)[0], 9);
        assert_eq!(screen.frame().get_pixel(3, 3)[0], 0);
    }
}
