// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Augmenta.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for all Augmenta operations.
#[derive(Debug, Error)]
pub enum AugmentError {
    // -- Image errors --
    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    // -- User input --
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("no images found in {}", .0.display())]
    NoImagesFound(PathBuf),

    // -- Filesystem --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, AugmentError>;
