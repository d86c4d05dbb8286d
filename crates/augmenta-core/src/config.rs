// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Augmentation configuration.

use crate::types::ParamRange;

/// Parameter ranges and output settings used by every batch run.
#[derive(Debug, Clone)]
pub struct AugmentConfig {
    /// Rotation angle in degrees (positive is counterclockwise).
    pub rotation_degrees: ParamRange,
    /// Contrast delta in percent; the gain applied is `1 + delta / 100`.
    pub contrast_delta: ParamRange,
    /// Brightness offset added to every colour channel.
    pub brightness_delta: ParamRange,
    /// Multiplier applied to HSV saturation.
    pub saturation_factor: ParamRange,
    /// Smallest side of a random crop. Images smaller than this are left uncropped.
    pub min_crop_size: u32,
    /// RGBA fill for pixels uncovered by a rotation.
    pub border_fill: [u8; 4],
    /// JPEG encoder quality (1-100).
    pub jpeg_quality: u8,
    /// Default target for padded resizing (width, height).
    pub resize_target: (u32, u32),
}

impl Default for AugmentConfig {
    fn default() -> Self {
        Self {
            rotation_degrees: ParamRange::new(-10.0, 10.0),
            contrast_delta: ParamRange::new(0.2, 2.0),
            brightness_delta: ParamRange::new(-100.0, 100.0),
            saturation_factor: ParamRange::new(0.5, 1.5),
            min_crop_size: 512,
            border_fill: [255, 255, 255, 255],
            jpeg_quality: 90,
            resize_target: (512, 512),
        }
    }
}
