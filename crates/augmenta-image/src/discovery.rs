// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Input discovery: the images directly inside a folder.

use std::path::{Path, PathBuf};

use augmenta_core::SUPPORTED_EXTENSIONS;
use augmenta_core::error::{AugmentError, Result};
use tracing::{debug, info, instrument};
use walkdir::WalkDir;

/// List the supported images directly inside `dir`, sorted by file name.
///
/// Subdirectories are not descended into. Extensions are matched
/// case-insensitively.
#[instrument(skip_all, fields(dir = %dir.display()))]
pub fn discover_images(dir: &Path) -> Result<Vec<PathBuf>> {
    if !std::fs::metadata(dir)?.is_dir() {
        return Err(AugmentError::InvalidInput(format!(
            "{} is not a directory",
            dir.display()
        )));
    }

    let mut images = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if is_supported_image(path) {
            images.push(entry.into_path());
        } else {
            debug!(path = %path.display(), "Skipping non-image file");
        }
    }

    info!(count = images.len(), "Images discovered");
    Ok(images)
}

/// Whether `path` has one of the supported image extensions.
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}
