// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Top-level numbered menu.

use std::io::{self, Write};

use augmenta_core::TransformKind;

/// One entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Randomised variants of one transform kind (options 1-5).
    Variants(TransformKind),
    FixOrientation,
    ConvertFormat,
    Resize,
    /// Rotations, crops, contrast and brightness in one pass.
    FullAugmentation,
    Exit,
}

impl MenuChoice {
    pub fn from_number(n: u32) -> Option<Self> {
        let choice = match n {
            0 => Self::Exit,
            1 => Self::Variants(TransformKind::Rotate),
            2 => Self::Variants(TransformKind::Crop),
            3 => Self::Variants(TransformKind::Contrast),
            4 => Self::Variants(TransformKind::Brightness),
            5 => Self::Variants(TransformKind::Saturation),
            6 => Self::FixOrientation,
            7 => Self::ConvertFormat,
            8 => Self::Resize,
            9 => Self::FullAugmentation,
            _ => return None,
        };
        Some(choice)
    }

    pub fn parse(answer: &str) -> Result<Self, String> {
        answer
            .parse::<u32>()
            .ok()
            .and_then(Self::from_number)
            .ok_or_else(|| format!("'{answer}' is not a menu option (0-9)"))
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Variants(TransformKind::Rotate) => "Rotate (random angle)",
            Self::Variants(TransformKind::Crop) => "Random crop",
            Self::Variants(TransformKind::Contrast) => "Contrast jitter",
            Self::Variants(TransformKind::Brightness) => "Brightness jitter",
            Self::Variants(TransformKind::Saturation) => "Saturation jitter",
            Self::FixOrientation => "Fix orientation (EXIF)",
            Self::ConvertFormat => "Convert format",
            Self::Resize => "Resize to fixed size (padded)",
            Self::FullAugmentation => "Full augmentation (rotate, crop, contrast, brightness)",
            Self::Exit => "Exit",
        }
    }
}

/// Print the menu, options 1-9 followed by 0.
pub fn render(out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "=== Augmenta ===")?;
    for n in (1..=9).chain(std::iter::once(0)) {
        if let Some(choice) = MenuChoice::from_number(n) {
            writeln!(out, "  {n}. {}", choice.description())?;
        }
    }
    Ok(())
}
