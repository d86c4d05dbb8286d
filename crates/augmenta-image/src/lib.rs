// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// augmenta-image — Image augmentation for the Augmenta batch tool.
//
// Provides the image processor (rotate, crop, brightness/contrast, saturation,
// orientation fix, padded resize, encoding), the randomised transform
// dispatch, collision-free output naming, input discovery and the sequential
// batch driver.

pub mod batch;
pub mod discovery;
pub mod image;
pub mod naming;

// Re-export the primary items so callers can use `augmenta_image::Batch` etc.
pub use batch::{Batch, BatchEvent};
pub use discovery::discover_images;
pub use self::image::processor::ImageProcessor;
pub use self::image::transform::{Augmenter, Variant};
pub use naming::unique_filename;
