// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the interactive menu.
//
// Every technical error is mapped to plain English with a clear suggestion.

use crate::error::AugmentError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// User must do something (pick another folder, fix permissions).
    ActionRequired,
    /// The file itself is the problem; retrying will not help.
    Permanent,
    /// Likely to succeed if tried again (disk briefly busy, etc.).
    Transient,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary.
    pub message: String,
    /// What the user should try.
    pub suggestion: String,
    pub severity: Severity,
}

impl std::fmt::Display for HumanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.message, self.suggestion)
    }
}

/// Convert an `AugmentError` into a `HumanError`.
pub fn humanize_error(err: &AugmentError) -> HumanError {
    match err {
        AugmentError::ImageError(detail) => {
            if detail.contains("failed to open") || detail.contains("decode") {
                HumanError {
                    message: "This image couldn't be read.".into(),
                    suggestion: "The file may be damaged or not really an image. It was skipped.".into(),
                    severity: Severity::Permanent,
                }
            } else {
                HumanError {
                    message: "This image couldn't be saved.".into(),
                    suggestion: format!("Check the output folder has free space. ({detail})"),
                    severity: Severity::Transient,
                }
            }
        }

        AugmentError::UnsupportedFormat(detail) => HumanError {
            message: "That image format isn't supported.".into(),
            suggestion: format!("Use one of png, jpg, bmp, gif or tiff. (Format: {detail})"),
            severity: Severity::Permanent,
        },

        AugmentError::InvalidInput(detail) => HumanError {
            message: "That value isn't valid.".into(),
            suggestion: format!("Please try again. ({detail})"),
            severity: Severity::ActionRequired,
        },

        AugmentError::NoImagesFound(dir) => HumanError {
            message: "No images were found in the input folder.".into(),
            suggestion: format!(
                "Choose a folder that directly contains jpg, jpeg, png, bmp, gif or tiff files. ({})",
                dir.display()
            ),
            severity: Severity::ActionRequired,
        },

        AugmentError::Io(io_err) => match io_err.kind() {
            std::io::ErrorKind::NotFound => HumanError {
                message: "The file or folder couldn't be found.".into(),
                suggestion: "It may have been moved or deleted. Try choosing the folder again.".into(),
                severity: Severity::ActionRequired,
            },
            std::io::ErrorKind::PermissionDenied => HumanError {
                message: "Permission was denied.".into(),
                suggestion: "Check the folder permissions, or pick an output folder you can write to.".into(),
                severity: Severity::ActionRequired,
            },
            _ => HumanError {
                message: "There was a problem reading or writing a file.".into(),
                suggestion: "Try again. If this keeps happening, the disk may be full.".into(),
                severity: Severity::Transient,
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_failure_is_permanent() {
        let err = AugmentError::ImageError("failed to open a.jpg: invalid JPEG".into());
        assert_eq!(humanize_error(&err).severity, Severity::Permanent);
    }

    #[test]
    fn missing_folder_is_action_required() {
        let err = AugmentError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(humanize_error(&err).severity, Severity::ActionRequired);
    }

    #[test]
    fn no_images_mentions_folder() {
        let err = AugmentError::NoImagesFound("/tmp/empty".into());
        let human = humanize_error(&err);
        assert!(human.suggestion.contains("/tmp/empty"));
    }
}
