// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Augmenta image augmenter.

use image::ImageFormat;
use rand::Rng;

/// File extensions picked up when scanning an input directory (matched
/// case-insensitively).
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "gif", "tiff"];

/// A randomised transform applied to produce variants of a source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformKind {
    /// Rotation about the centre by a random angle.
    Rotate,
    /// Random square crop.
    Crop,
    /// Contrast gain jitter.
    Contrast,
    /// Additive brightness jitter.
    Brightness,
    /// HSV saturation scaling.
    Saturation,
}

impl TransformKind {
    pub const ALL: [TransformKind; 5] = [
        Self::Rotate,
        Self::Crop,
        Self::Contrast,
        Self::Brightness,
        Self::Saturation,
    ];

    /// Short label used in output file names and progress lines.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Rotate => "rotate",
            Self::Crop => "crop",
            Self::Contrast => "contrast",
            Self::Brightness => "brightness",
            Self::Saturation => "saturation",
        }
    }
}

impl std::fmt::Display for TransformKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One menu-driven request: apply `kind` `variant_count` times per image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformRequest {
    pub kind: TransformKind,
    pub variant_count: u32,
    /// Also write an unmodified copy of each source image.
    pub include_original: bool,
}

/// Several transform kinds applied in one pass, each with its own count.
/// The unmodified original is always written first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AugmentationPlan {
    pub counts: Vec<(TransformKind, u32)>,
}

impl AugmentationPlan {
    /// Number of output files one source image produces under this plan,
    /// original included.
    pub fn outputs_per_image(&self) -> u32 {
        1 + self.counts.iter().map(|(_, n)| n).sum::<u32>()
    }
}

/// Encodings Augmenta can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
    Bmp,
    Gif,
    Tiff,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 5] = [Self::Png, Self::Jpeg, Self::Bmp, Self::Gif, Self::Tiff];

    /// Canonical file extension (without the dot).
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Bmp => "bmp",
            Self::Gif => "gif",
            Self::Tiff => "tiff",
        }
    }

    /// Encoder format understood by the `image` crate.
    pub fn image_format(&self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Jpeg => ImageFormat::Jpeg,
            Self::Bmp => ImageFormat::Bmp,
            Self::Gif => ImageFormat::Gif,
            Self::Tiff => ImageFormat::Tiff,
        }
    }

    /// Infer the output format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "bmp" => Some(Self::Bmp),
            "gif" => Some(Self::Gif),
            "tif" | "tiff" => Some(Self::Tiff),
            _ => None,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Closed interval a transform parameter is drawn from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    pub min: f32,
    pub max: f32,
}

impl ParamRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Draw uniformly from `[min, max]`. A degenerate or inverted range
    /// always yields `min`.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f32 {
        if self.min >= self.max {
            return self.min;
        }
        rng.random_range(self.min..=self.max)
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Totals reported after a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Source images attempted.
    pub sources: usize,
    /// Output files written.
    pub written: usize,
    /// Source images that failed and were skipped.
    pub failed: usize,
}

impl std::fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} image(s) processed, {} file(s) written, {} failed",
            self.sources, self.written, self.failed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn output_format_from_extension_is_case_insensitive() {
        assert_eq!(OutputFormat::from_extension("JPG"), Some(OutputFormat::Jpeg));
        assert_eq!(OutputFormat::from_extension("jpeg"), Some(OutputFormat::Jpeg));
        assert_eq!(OutputFormat::from_extension("Tif"), Some(OutputFormat::Tiff));
        assert_eq!(OutputFormat::from_extension("webp"), None);
    }

    #[test]
    fn param_range_samples_stay_in_bounds() {
        let range = ParamRange::new(-10.0, 10.0);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            assert!(range.contains(range.sample(&mut rng)));
        }
    }

    #[test]
    fn degenerate_range_yields_min() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(ParamRange::new(3.0, 3.0).sample(&mut rng), 3.0);
        assert_eq!(ParamRange::new(5.0, 1.0).sample(&mut rng), 5.0);
    }

    #[test]
    fn plan_counts_original() {
        let plan = AugmentationPlan {
            counts: vec![(TransformKind::Rotate, 2), (TransformKind::Crop, 3)],
        };
        assert_eq!(plan.outputs_per_image(), 6);
        assert_eq!(AugmentationPlan::default().outputs_per_image(), 1);
    }
}
