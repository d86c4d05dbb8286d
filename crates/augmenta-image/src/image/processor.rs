// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor — orientation-aware loading, rotation, crop, brightness/
// contrast, saturation, padded resize and encoding. Operates on in-memory
// images using the `image` and `imageproc` crates.

use std::path::Path;

use augmenta_core::error::{AugmentError, Result};
use augmenta_core::OutputFormat;
use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder, ImageReader, Rgba, RgbaImage, imageops};
use imageproc::geometric_transformations::{self, Interpolation};
use rand::Rng;
use tracing::{debug, info, instrument};

/// Image processing pipeline operating on a single in-memory image.
///
/// All operations are non-destructive: each method consumes `self` and returns a
/// new `ImageProcessor` wrapping the transformed image, enabling method chaining.
///
/// ```ignore
/// let rotated = ImageProcessor::open("photo.jpg")?
///     .rotate(7.5, Rgba([255, 255, 255, 255]))
///     .adjust_saturation(1.2);
/// rotated.save_as("out.png", OutputFormat::Png, 90)?;
/// ```
#[derive(Debug, Clone)]
pub struct ImageProcessor {
    /// The current working image.
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Load an image from a file path and apply its EXIF orientation.
    ///
    /// Missing or unreadable orientation metadata is ignored and the image is
    /// kept as stored.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let open_err = |err: &dyn std::fmt::Display| {
            AugmentError::ImageError(format!("failed to open {}: {}", path.display(), err))
        };

        let mut decoder = ImageReader::open(path)?
            .with_guessed_format()?
            .into_decoder()
            .map_err(|err| open_err(&err))?;
        let orientation = decoder.orientation().unwrap_or(Orientation::NoTransforms);
        let mut img = DynamicImage::from_decoder(decoder).map_err(|err| open_err(&err))?;

        if orientation != Orientation::NoTransforms {
            debug!(?orientation, "Applying EXIF orientation");
            img.apply_orientation(orientation);
        }
        info!(width = img.width(), height = img.height(), "Image loaded");
        Ok(Self { image: img })
    }

    /// Create a processor from raw encoded bytes (JPEG, PNG, etc.).
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(data)
            .map_err(|err| AugmentError::ImageError(format!("failed to decode image: {}", err)))?;
        Ok(Self { image: img })
    }

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    /// Current image width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Current image height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Borrow the underlying `DynamicImage`.
    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }

    /// Consume the processor and return the underlying `DynamicImage`.
    pub fn into_dynamic(self) -> DynamicImage {
        self.image
    }

    // -- Transformations (consume self, return new Self) -----------------------

    /// Rotate about the centre by `degrees` (positive is counterclockwise).
    ///
    /// The canvas keeps its size; corners uncovered by the rotation are
    /// painted with `fill`. A zero angle returns the image untouched and 180
    /// degrees takes the lossless path.
    #[instrument(skip(self))]
    pub fn rotate(self, degrees: f32, fill: Rgba<u8>) -> Self {
        let normalised = degrees.rem_euclid(360.0);
        if normalised < 0.01 || normalised > 359.99 {
            return self;
        }
        if (normalised - 180.0).abs() < 0.01 {
            return Self {
                image: self.image.rotate180(),
            };
        }

        // imageproc rotates clockwise for positive theta.
        let rgba = self.image.to_rgba8();
        let rotated: RgbaImage = geometric_transformations::rotate_about_center(
            &rgba,
            -degrees.to_radians(),
            Interpolation::Bilinear,
            fill,
        );

        debug!("General rotation applied");
        Self {
            image: DynamicImage::ImageRgba8(rotated),
        }
    }

    /// Crop a rectangular region from the image.
    ///
    /// `x` and `y` are the top-left corner; `width` and `height` define the
    /// size of the crop rectangle. Values are clamped to image bounds.
    #[instrument(skip(self))]
    pub fn crop(self, x: u32, y: u32, width: u32, height: u32) -> Self {
        let img_w = self.image.width();
        let img_h = self.image.height();

        let safe_x = x.min(img_w.saturating_sub(1));
        let safe_y = y.min(img_h.saturating_sub(1));
        let safe_w = width.min(img_w - safe_x);
        let safe_h = height.min(img_h - safe_y);

        debug!(safe_x, safe_y, safe_w, safe_h, "Cropping image");

        let cropped = self.image.crop_imm(safe_x, safe_y, safe_w, safe_h);
        Self { image: cropped }
    }

    /// Cut a random square whose side lies in `[min_size, min(width, height)]`.
    ///
    /// Images with either side below `min_size` are returned unchanged.
    pub fn random_crop<R: Rng>(self, min_size: u32, rng: &mut R) -> Self {
        let min_size = min_size.max(1);
        let (width, height) = (self.image.width(), self.image.height());
        if width < min_size || height < min_size {
            debug!(width, height, min_size, "Image smaller than crop size, skipping crop");
            return self;
        }
        let side = rng.random_range(min_size..=width.min(height));
        let x = rng.random_range(0..=width - side);
        let y = rng.random_range(0..=height - side);
        self.crop(x, y, side, side)
    }

    /// Apply `p * (1 + contrast / 100) + brightness` to every colour channel,
    /// saturating to `0..=255`. Alpha is preserved.
    ///
    /// With both values at zero the image (and its pixel buffer) is returned
    /// as-is.
    #[instrument(skip(self))]
    pub fn adjust_brightness_contrast(self, brightness: f32, contrast: f32) -> Self {
        if brightness == 0.0 && contrast == 0.0 {
            return self;
        }
        let gain = 1.0 + contrast / 100.0;
        info!(gain, brightness, "Adjusting brightness/contrast");

        let rgba = self.image.to_rgba8();
        let adjusted = image::ImageBuffer::from_fn(rgba.width(), rgba.height(), |x, y| {
            let Rgba([r, g, b, a]) = *rgba.get_pixel(x, y);
            let adjust = |channel: u8| -> u8 {
                (channel as f32 * gain + brightness).round().clamp(0.0, 255.0) as u8
            };
            Rgba([adjust(r), adjust(g), adjust(b), a])
        });

        Self {
            image: DynamicImage::ImageRgba8(adjusted),
        }
    }

    /// Scale HSV saturation by `factor`, clamping to the valid range. A factor
    /// of 1.0 is a no-op.
    #[instrument(skip(self))]
    pub fn adjust_saturation(self, factor: f32) -> Self {
        if (factor - 1.0).abs() < f32::EPSILON {
            return self;
        }
        info!(factor, "Adjusting saturation");

        let mut rgba = self.image.to_rgba8();
        for pixel in rgba.pixels_mut() {
            let Rgba([r, g, b, a]) = *pixel;
            let (h, s, v) = rgb_to_hsv(r, g, b);
            let (r, g, b) = hsv_to_rgb(h, (s * factor).clamp(0.0, 1.0), v);
            *pixel = Rgba([r, g, b, a]);
        }

        Self {
            image: DynamicImage::ImageRgba8(rgba),
        }
    }

    /// Fit the image inside `width` x `height` (aspect ratio preserved,
    /// Lanczos3) and centre it on a transparent canvas of exactly that size.
    #[instrument(skip(self))]
    pub fn resize_padded(self, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(AugmentError::InvalidInput(format!(
                "resize target must be non-zero, got {width}x{height}"
            )));
        }
        info!(
            from_w = self.image.width(),
            from_h = self.image.height(),
            width,
            height,
            "Resizing image with padding"
        );

        let fitted = self
            .image
            .resize(width, height, imageops::FilterType::Lanczos3)
            .to_rgba8();
        let x = width.saturating_sub(fitted.width()) / 2;
        let y = height.saturating_sub(fitted.height()) / 2;

        let mut canvas = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]));
        imageops::replace(&mut canvas, &fitted, x as i64, y as i64);
        debug!(fit_w = fitted.width(), fit_h = fitted.height(), x, y, "Resize complete");

        Ok(Self {
            image: DynamicImage::ImageRgba8(canvas),
        })
    }

    // -- Output ---------------------------------------------------------------

    /// Encode the current image in `format`. JPEG uses `jpeg_quality` (1-100).
    pub fn encode(&self, format: OutputFormat, jpeg_quality: u8) -> Result<Vec<u8>> {
        let mut cursor = std::io::Cursor::new(Vec::new());
        let encoded = match format {
            OutputFormat::Jpeg => {
                let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(
                    &mut cursor,
                    jpeg_quality.clamp(1, 100),
                );
                self.image.to_rgb8().write_with_encoder(encoder)
            }
            OutputFormat::Gif | OutputFormat::Bmp => DynamicImage::ImageRgba8(self.image.to_rgba8())
                .write_to(&mut cursor, format.image_format()),
            OutputFormat::Png => match &self.image {
                DynamicImage::ImageRgb32F(_) | DynamicImage::ImageRgba32F(_) => {
                    DynamicImage::ImageRgba16(self.image.to_rgba16())
                        .write_to(&mut cursor, format.image_format())
                }
                other => other.write_to(&mut cursor, format.image_format()),
            },
            // The TIFF encoder has no gray+alpha or float layouts.
            OutputFormat::Tiff => match &self.image {
                DynamicImage::ImageLumaA8(_) => DynamicImage::ImageRgba8(self.image.to_rgba8())
                    .write_to(&mut cursor, format.image_format()),
                DynamicImage::ImageLumaA16(_)
                | DynamicImage::ImageRgb32F(_)
                | DynamicImage::ImageRgba32F(_) => {
                    DynamicImage::ImageRgba16(self.image.to_rgba16())
                        .write_to(&mut cursor, format.image_format())
                }
                other => other.write_to(&mut cursor, format.image_format()),
            },
        };
        encoded.map_err(|err| {
            AugmentError::ImageError(format!("{} encoding failed: {}", format, err))
        })?;
        Ok(cursor.into_inner())
    }

    /// Encode in `format` and write the result to `path`.
    pub fn save_as(
        &self,
        path: impl AsRef<Path>,
        format: OutputFormat,
        jpeg_quality: u8,
    ) -> Result<()> {
        let bytes = self.encode(format, jpeg_quality)?;
        std::fs::write(path.as_ref(), bytes)?;
        debug!(path = %path.as_ref().display(), %format, "Image written");
        Ok(())
    }
}

/// RGB (0-255) to HSV with hue in degrees and saturation/value in `0..=1`.
fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    let (r, g, b) = (r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let hue = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    let saturation = if max == 0.0 { 0.0 } else { delta / max };
    (hue, saturation, max)
}

fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (u8, u8, u8) {
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0).rem_euclid(2.0) - 1.0).abs());
    let m = v - c;
    let (r, g, b) = match (h / 60.0) as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let to_u8 = |channel: f32| ((channel + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    (to_u8(r), to_u8(g), to_u8(b))
}
