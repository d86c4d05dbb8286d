// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Sequential batch driver. Every operation walks the source list in order,
// decodes one image at a time, writes its outputs under collision-free names
// and reports progress through a caller-supplied callback.
//
// A failure aborts only the current source file; the run continues with the
// next one and the failure is counted in the returned `BatchSummary`.

use std::path::{Path, PathBuf};

use augmenta_core::error::{AugmentError, Result};
use augmenta_core::{AugmentationPlan, BatchSummary, OutputFormat, TransformKind, TransformRequest};
use rand::Rng;
use tracing::{info, instrument, warn};

use crate::image::processor::ImageProcessor;
use crate::image::transform::Augmenter;
use crate::naming::unique_filename;

/// Progress notifications emitted while a batch runs.
#[derive(Debug)]
pub enum BatchEvent<'a> {
    /// About to decode `source` (zero-based `index` of `total`).
    Processing {
        source: &'a Path,
        index: usize,
        total: usize,
    },
    /// An output file was written. `kind` is `None` for unmodified copies and
    /// for orientation/format/resize outputs.
    Saved {
        path: &'a Path,
        kind: Option<TransformKind>,
        parameter: Option<f32>,
    },
    /// `source` was skipped because of `error`.
    Failed {
        source: &'a Path,
        error: &'a AugmentError,
    },
}

/// Counts written files and forwards events to the caller.
struct Progress<'f> {
    on_event: &'f mut dyn FnMut(BatchEvent<'_>),
    written: usize,
}

impl Progress<'_> {
    fn saved(&mut self, path: &Path, kind: Option<TransformKind>, parameter: Option<f32>) {
        self.written += 1;
        (self.on_event)(BatchEvent::Saved {
            path,
            kind,
            parameter,
        });
    }
}

/// Writes transformed copies of source images into one output directory.
pub struct Batch<R> {
    output_dir: PathBuf,
    augmenter: Augmenter<R>,
}

impl<R: Rng> Batch<R> {
    /// Create a batch writing into `output_dir`, creating it if needed.
    pub fn new(output_dir: impl Into<PathBuf>, augmenter: Augmenter<R>) -> Result<Self> {
        let output_dir = output_dir.into();
        std::fs::create_dir_all(&output_dir)?;
        Ok(Self {
            output_dir,
            augmenter,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn augmenter(&self) -> &Augmenter<R> {
        &self.augmenter
    }

    // -- Operations -----------------------------------------------------------

    /// Write `variant_count` variants of `kind` per source, preceded by an
    /// unmodified PNG copy when `include_original` is set.
    #[instrument(skip_all, fields(kind = %request.kind, count = request.variant_count))]
    pub fn run_variants(
        &mut self,
        paths: &[PathBuf],
        request: &TransformRequest,
        mut on_event: impl FnMut(BatchEvent<'_>),
    ) -> BatchSummary {
        let counts = [(request.kind, request.variant_count)];
        self.for_each_source(paths, &mut on_event, |batch, source, progress| {
            batch.write_variants(source, request.include_original, &counts, progress)
        })
    }

    /// Write the original plus every kind's count of variants per source.
    #[instrument(skip_all, fields(outputs_per_image = plan.outputs_per_image()))]
    pub fn run_plan(
        &mut self,
        paths: &[PathBuf],
        plan: &AugmentationPlan,
        mut on_event: impl FnMut(BatchEvent<'_>),
    ) -> BatchSummary {
        self.for_each_source(paths, &mut on_event, |batch, source, progress| {
            batch.write_variants(source, true, &plan.counts, progress)
        })
    }

    /// Write each source with its EXIF orientation applied, keeping the
    /// source's format and extension.
    #[instrument(skip_all)]
    pub fn fix_orientation(
        &mut self,
        paths: &[PathBuf],
        mut on_event: impl FnMut(BatchEvent<'_>),
    ) -> BatchSummary {
        self.for_each_source(paths, &mut on_event, |batch, source, progress| {
            let extension = source
                .extension()
                .map(|ext| ext.to_string_lossy().into_owned())
                .unwrap_or_default();
            let format = OutputFormat::from_extension(&extension)
                .ok_or_else(|| AugmentError::UnsupportedFormat(extension.clone()))?;
            let oriented = ImageProcessor::open(source)?;
            let path = batch.write(&oriented, &source_stem(source), format, &extension)?;
            progress.saved(&path, None, None);
            Ok(())
        })
    }

    /// Re-encode each source as `format`.
    #[instrument(skip_all, fields(format = %format))]
    pub fn convert_format(
        &mut self,
        paths: &[PathBuf],
        format: OutputFormat,
        mut on_event: impl FnMut(BatchEvent<'_>),
    ) -> BatchSummary {
        self.for_each_source(paths, &mut on_event, |batch, source, progress| {
            let image = ImageProcessor::open(source)?;
            let path = batch.write(&image, &source_stem(source), format, format.extension())?;
            progress.saved(&path, None, None);
            Ok(())
        })
    }

    /// Fit each source into `width` x `height` on a transparent canvas and
    /// write it as PNG.
    #[instrument(skip_all, fields(width = width, height = height))]
    pub fn resize(
        &mut self,
        paths: &[PathBuf],
        width: u32,
        height: u32,
        mut on_event: impl FnMut(BatchEvent<'_>),
    ) -> BatchSummary {
        self.for_each_source(paths, &mut on_event, |batch, source, progress| {
            let resized = ImageProcessor::open(source)?.resize_padded(width, height)?;
            let stem = format!("{}_{}x{}", source_stem(source), width, height);
            let path = batch.write(&resized, &stem, OutputFormat::Png, "png")?;
            progress.saved(&path, None, None);
            Ok(())
        })
    }

    // -- Internals ------------------------------------------------------------

    fn for_each_source<F>(
        &mut self,
        paths: &[PathBuf],
        on_event: &mut dyn FnMut(BatchEvent<'_>),
        mut step: F,
    ) -> BatchSummary
    where
        F: FnMut(&mut Self, &Path, &mut Progress<'_>) -> Result<()>,
    {
        let total = paths.len();
        let mut summary = BatchSummary::default();
        let mut progress = Progress {
            on_event,
            written: 0,
        };

        for (index, source) in paths.iter().enumerate() {
            let source = source.as_path();
            summary.sources += 1;
            (progress.on_event)(BatchEvent::Processing {
                source,
                index,
                total,
            });
            if let Err(error) = step(self, source, &mut progress) {
                warn!(source = %source.display(), %error, "Source skipped");
                summary.failed += 1;
                (progress.on_event)(BatchEvent::Failed {
                    source,
                    error: &error,
                });
            }
        }

        summary.written = progress.written;
        info!(
            sources = summary.sources,
            written = summary.written,
            failed = summary.failed,
            "Batch complete"
        );
        summary
    }

    fn write_variants(
        &mut self,
        source: &Path,
        include_original: bool,
        counts: &[(TransformKind, u32)],
        progress: &mut Progress<'_>,
    ) -> Result<()> {
        let original = ImageProcessor::open(source)?;
        let stem = source_stem(source);

        if include_original {
            let path = self.write(&original, &stem, OutputFormat::Png, "png")?;
            progress.saved(&path, None, None);
        }

        for &(kind, count) in counts {
            let variant_stem = format!("{stem}_{}", kind.label());
            for _ in 0..count {
                let variant = self.augmenter.variant(kind, original.as_dynamic());
                let path = self.write(&variant.image, &variant_stem, OutputFormat::Png, "png")?;
                progress.saved(&path, Some(kind), Some(variant.parameter));
            }
        }
        Ok(())
    }

    fn write(
        &self,
        image: &ImageProcessor,
        stem: &str,
        format: OutputFormat,
        extension: &str,
    ) -> Result<PathBuf> {
        let path = unique_filename(&self.output_dir, stem, extension);
        image.save_as(&path, format, self.augmenter.config().jpeg_quality)?;
        Ok(path)
    }
}

/// File stem of `path`, falling back to `image` for odd names.
fn source_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| "image".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_stem_strips_extension() {
        assert_eq!(source_stem(Path::new("/in/holiday.JPG")), "holiday");
        assert_eq!(source_stem(Path::new("/in/archive.tar.gif")), "archive.tar");
    }
}
