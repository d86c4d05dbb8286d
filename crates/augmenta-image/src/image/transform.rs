// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Randomised transform dispatch: maps a `TransformKind` to the processor
// operation and draws its parameter from the configured range.

use augmenta_core::{AugmentConfig, TransformKind};
use image::{DynamicImage, Rgba};
use rand::Rng;
use rand::rngs::ThreadRng;
use tracing::debug;

use super::processor::ImageProcessor;

/// One randomly parameterised copy of a source image.
#[derive(Debug)]
pub struct Variant {
    pub image: ImageProcessor,
    /// The sampled parameter: angle in degrees, contrast or brightness delta,
    /// saturation factor, or crop side in pixels.
    pub parameter: f32,
}

/// Produces variants of source images using the ranges in `AugmentConfig`.
pub struct Augmenter<R> {
    config: AugmentConfig,
    rng: R,
}

impl Augmenter<ThreadRng> {
    /// Augmenter backed by the thread-local RNG.
    pub fn with_thread_rng(config: AugmentConfig) -> Self {
        Self::new(config, rand::rng())
    }
}

impl<R: Rng> Augmenter<R> {
    pub fn new(config: AugmentConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &AugmentConfig {
        &self.config
    }

    /// Apply `kind` to a copy of `source` with a freshly sampled parameter.
    pub fn variant(&mut self, kind: TransformKind, source: &DynamicImage) -> Variant {
        let processor = ImageProcessor::from_dynamic(source.clone());
        let config = &self.config;

        let variant = match kind {
            TransformKind::Rotate => {
                let angle = config.rotation_degrees.sample(&mut self.rng);
                Variant {
                    image: processor.rotate(angle, Rgba(config.border_fill)),
                    parameter: angle,
                }
            }
            TransformKind::Crop => {
                let image = processor.random_crop(config.min_crop_size, &mut self.rng);
                let side = image.width() as f32;
                Variant {
                    image,
                    parameter: side,
                }
            }
            TransformKind::Contrast => {
                let delta = config.contrast_delta.sample(&mut self.rng);
                Variant {
                    image: processor.adjust_brightness_contrast(0.0, delta),
                    parameter: delta,
                }
            }
            TransformKind::Brightness => {
                let delta = config.brightness_delta.sample(&mut self.rng);
                Variant {
                    image: processor.adjust_brightness_contrast(delta, 0.0),
                    parameter: delta,
                }
            }
            TransformKind::Saturation => {
                let factor = config.saturation_factor.sample(&mut self.rng);
                Variant {
                    image: processor.adjust_saturation(factor),
                    parameter: factor,
                }
            }
        };

        debug!(%kind, parameter = variant.parameter, "Variant generated");
        variant
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn source() -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(64, 48, |x, y| {
            Rgb([(x * 4) as u8, (y * 5) as u8, 128])
        }))
    }

    fn augmenter(seed: u64) -> Augmenter<StdRng> {
        Augmenter::new(AugmentConfig::default(), StdRng::seed_from_u64(seed))
    }

    #[test]
    fn parameters_come_from_configured_ranges() {
        let mut aug = augmenter(3);
        let config = aug.config().clone();
        let img = source();
        for _ in 0..25 {
            assert!(config.rotation_degrees.contains(aug.variant(TransformKind::Rotate, &img).parameter));
            assert!(config.contrast_delta.contains(aug.variant(TransformKind::Contrast, &img).parameter));
            assert!(config.brightness_delta.contains(aug.variant(TransformKind::Brightness, &img).parameter));
            assert!(config.saturation_factor.contains(aug.variant(TransformKind::Saturation, &img).parameter));
        }
    }

    #[test]
    fn same_seed_gives_same_variants() {
        let img = source();
        let a = augmenter(99).variant(TransformKind::Rotate, &img);
        let b = augmenter(99).variant(TransformKind::Rotate, &img);
        assert_eq!(a.parameter, b.parameter);
        assert_eq!(a.image.as_dynamic(), b.image.as_dynamic());
    }

    #[test]
    fn crop_reports_side_and_respects_minimum() {
        let config = AugmentConfig {
            min_crop_size: 32,
            ..AugmentConfig::default()
        };
        let mut aug = Augmenter::new(config, StdRng::seed_from_u64(5));
        let variant = aug.variant(TransformKind::Crop, &source());
        assert_eq!(variant.image.width(), variant.parameter as u32);
        assert!((32..=48).contains(&variant.image.width()));
    }

    #[test]
    fn rotation_keeps_dimensions() {
        let variant = augmenter(11).variant(TransformKind::Rotate, &source());
        assert_eq!((variant.image.width(), variant.image.height()), (64, 48));
    }
}
