// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module — per-image transforms and the randomised dispatch over them.

pub mod processor;
pub mod transform;

pub use processor::ImageProcessor;
pub use transform::{Augmenter, Variant};
