// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Interactive session — the menu loop over one input/output folder pair.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use augmenta_core::error::{AugmentError, Result};
use augmenta_core::human_errors::humanize_error;
use augmenta_core::{AugmentationPlan, BatchSummary, OutputFormat, TransformKind, TransformRequest};
use augmenta_image::{Augmenter, Batch, BatchEvent, discover_images};
use rand::Rng;
use tracing::{debug, info};

use crate::menu::{self, MenuChoice};
use crate::prompt::Prompter;

/// Upper bound accepted for any per-image count prompt.
const MAX_VARIANTS: u32 = 1000;
/// Upper bound accepted for resize dimensions.
const MAX_DIMENSION: u32 = 16_384;

/// Whether the menu loop keeps going after an action.
enum Flow {
    Continue,
    /// Input ended while the action was prompting.
    Stop,
}

pub struct Session<G> {
    input_dir: PathBuf,
    images: Vec<PathBuf>,
    batch: Batch<G>,
}

impl<G: Rng> Session<G> {
    /// Discover the images in `input_dir` and prepare `output_dir`.
    pub fn open(input_dir: PathBuf, output_dir: PathBuf, augmenter: Augmenter<G>) -> Result<Self> {
        let images = discover_images(&input_dir)?;
        if images.is_empty() {
            return Err(AugmentError::NoImagesFound(input_dir));
        }
        let batch = Batch::new(output_dir, augmenter)?;
        info!(
            input = %input_dir.display(),
            output = %batch.output_dir().display(),
            images = images.len(),
            "Session opened"
        );
        Ok(Self {
            input_dir,
            images,
            batch,
        })
    }

    /// Run the menu until the user exits or input ends.
    pub fn run<R: BufRead, W: Write>(&mut self, prompter: &mut Prompter<R, W>) -> Result<()> {
        prompter.say(format!(
            "Found {} image(s) in {}. Output goes to {}.",
            self.images.len(),
            self.input_dir.display(),
            self.batch.output_dir().display()
        ))?;

        loop {
            menu::render(prompter.output())?;
            let Some(choice) = prompter.ask("Select an option (0-9): ", MenuChoice::parse)? else {
                return Ok(());
            };
            if choice == MenuChoice::Exit {
                prompter.say("Goodbye.")?;
                return Ok(());
            }
            if let Flow::Stop = self.handle(choice, prompter)? {
                return Ok(());
            }
        }
    }

    fn handle<R: BufRead, W: Write>(
        &mut self,
        choice: MenuChoice,
        prompter: &mut Prompter<R, W>,
    ) -> Result<Flow> {
        let images = &self.images;
        let summary = match choice {
            MenuChoice::Variants(kind) => {
                let Some(request) = ask_request(kind, prompter)? else {
                    return Ok(Flow::Stop);
                };
                prompter.say("Processing images...")?;
                let out = prompter.output();
                self.batch
                    .run_variants(images, &request, |event| report(&mut *out, event))
            }
            MenuChoice::FullAugmentation => {
                let Some(plan) = ask_plan(prompter)? else {
                    return Ok(Flow::Stop);
                };
                prompter.say("Processing images...")?;
                let out = prompter.output();
                self.batch.run_plan(images, &plan, |event| report(&mut *out, event))
            }
            MenuChoice::FixOrientation => {
                prompter.say("Fixing orientation...")?;
                let out = prompter.output();
                self.batch.fix_orientation(images, |event| report(&mut *out, event))
            }
            MenuChoice::ConvertFormat => {
                let Some(format) =
                    prompter.ask(&format!("Target format ({}): ", format_list()), parse_format)?
                else {
                    return Ok(Flow::Stop);
                };
                prompter.say(format!("Converting to {format}..."))?;
                let out = prompter.output();
                self.batch
                    .convert_format(images, format, |event| report(&mut *out, event))
            }
            MenuChoice::Resize => {
                let (default_w, default_h) = self.batch.augmenter().config().resize_target;
                let Some(width) = prompter.number_or_default(
                    &format!("Target width [{default_w}]: "),
                    1..=MAX_DIMENSION,
                    default_w,
                )?
                else {
                    return Ok(Flow::Stop);
                };
                let Some(height) = prompter.number_or_default(
                    &format!("Target height [{default_h}]: "),
                    1..=MAX_DIMENSION,
                    default_h,
                )?
                else {
                    return Ok(Flow::Stop);
                };
                prompter.say(format!("Resizing to {width}x{height}..."))?;
                let out = prompter.output();
                self.batch
                    .resize(images, width, height, |event| report(&mut *out, event))
            }
            MenuChoice::Exit => return Ok(Flow::Stop),
        };

        print_summary(prompter, &summary)?;
        Ok(Flow::Continue)
    }
}

fn ask_request<R: BufRead, W: Write>(
    kind: TransformKind,
    prompter: &mut Prompter<R, W>,
) -> Result<Option<TransformRequest>> {
    let Some(variant_count) = prompter.number(
        &format!("Enter the number of {kind} variants for each image: "),
        0..=MAX_VARIANTS,
    )?
    else {
        return Ok(None);
    };
    let Some(include_original) = prompter.yes_no("Include the original image? (y/n): ")? else {
        return Ok(None);
    };
    Ok(Some(TransformRequest {
        kind,
        variant_count,
        include_original,
    }))
}

fn ask_plan<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> Result<Option<AugmentationPlan>> {
    let questions = [
        (TransformKind::Rotate, "rotations"),
        (TransformKind::Crop, "random crops"),
        (TransformKind::Contrast, "contrast adjustments"),
        (TransformKind::Brightness, "brightness adjustments"),
    ];
    let mut plan = AugmentationPlan::default();
    for (kind, noun) in questions {
        let Some(count) = prompter.number(
            &format!("Enter the number of {noun} for each image: "),
            0..=MAX_VARIANTS,
        )?
        else {
            return Ok(None);
        };
        plan.counts.push((kind, count));
    }
    Ok(Some(plan))
}

fn format_list() -> String {
    OutputFormat::ALL
        .iter()
        .map(OutputFormat::extension)
        .collect::<Vec<_>>()
        .join(", ")
}

fn parse_format(answer: &str) -> std::result::Result<OutputFormat, String> {
    OutputFormat::from_extension(answer.trim_start_matches('.'))
        .ok_or_else(|| format!("'{answer}' is not one of {}", format_list()))
}

/// Print one progress line. A failed terminal write is logged and the batch
/// carries on.
fn report(out: &mut impl Write, event: BatchEvent<'_>) {
    let written = match event {
        BatchEvent::Processing {
            source,
            index,
            total,
        } => writeln!(out, "[{}/{}] Processing image: {}", index + 1, total, source.display()),
        BatchEvent::Saved {
            path,
            kind: Some(kind),
            parameter: Some(parameter),
        } => writeln!(out, "  Saved {kind} image ({parameter:.2}): {}", path.display()),
        BatchEvent::Saved { path, .. } => writeln!(out, "  Saved image: {}", path.display()),
        BatchEvent::Failed { source, error } => {
            writeln!(out, "  Skipped {}: {}", source.display(), humanize_error(error))
        }
    };
    if let Err(err) = written {
        debug!(error = %err, "Progress line not written");
    }
}

fn print_summary<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    summary: &BatchSummary,
) -> Result<()> {
    prompter.say(format!("Done: {summary}."))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use augmenta_core::AugmentConfig;
    use image::{DynamicImage, Rgb, RgbImage};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::io::Cursor;
    use std::path::Path;
    use tempfile::TempDir;

    fn fixture() -> (TempDir, TempDir) {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        DynamicImage::ImageRgb8(RgbImage::from_pixel(40, 30, Rgb([20, 120, 220])))
            .save(input.path().join("a.jpg"))
            .unwrap();
        (input, output)
    }

    fn run_script(input: &Path, output: &Path, script: &str) -> String {
        let augmenter = Augmenter::new(AugmentConfig::default(), StdRng::seed_from_u64(8));
        let mut session =
            Session::open(input.to_path_buf(), output.to_path_buf(), augmenter).unwrap();
        let mut prompter = Prompter::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
        session.run(&mut prompter).unwrap();
        String::from_utf8(prompter.output().clone()).unwrap()
    }

    fn listing(dir: &Path) -> Vec<String> {
        let mut names: Vec<_> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn rotate_menu_writes_original_and_two_variants() {
        let (input, output) = fixture();
        let transcript = run_script(input.path(), output.path(), "1\n2\ny\n0\n");

        assert_eq!(listing(output.path()), ["a.png", "a_rotate (1).png", "a_rotate.png"]);
        assert!(transcript.contains("Done: 1 image(s) processed, 3 file(s) written, 0 failed."));
        assert!(transcript.contains("Goodbye."));
    }

    #[test]
    fn invalid_menu_input_is_reasked() {
        let (input, output) = fixture();
        let transcript = run_script(input.path(), output.path(), "x\n42\n0\n");
        assert_eq!(transcript.matches("is not a menu option").count(), 2);
        assert!(listing(output.path()).is_empty());
    }

    #[test]
    fn end_of_input_mid_prompt_exits_cleanly() {
        let (input, output) = fixture();
        run_script(input.path(), output.path(), "3\n2\n");
        assert!(listing(output.path()).is_empty());
    }

    #[test]
    fn convert_and_resize_from_menu() {
        let (input, output) = fixture();
        run_script(input.path(), output.path(), "7\n.tiff\n8\n16\n\n0\n");
        assert_eq!(listing(output.path()), ["a.tiff", "a_16x512.png"]);
    }

    #[test]
    fn full_augmentation_asks_four_counts() {
        let (input, output) = fixture();
        run_script(input.path(), output.path(), "9\n1\n0\n1\n1\n0\n");
        assert_eq!(
            listing(output.path()),
            ["a.png", "a_brightness.png", "a_contrast.png", "a_rotate.png"]
        );
    }

    #[test]
    fn format_prompt_lists_and_accepts_every_format() {
        assert_eq!(format_list(), "png, jpg, bmp, gif, tiff");
        for format in OutputFormat::ALL {
            assert_eq!(parse_format(format.extension()), Ok(format));
        }
        assert_eq!(parse_format(".JPEG"), Ok(OutputFormat::Jpeg));
        assert!(parse_format("webp").unwrap_err().contains("png, jpg, bmp, gif, tiff"));
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn report_survives_a_closed_terminal() {
        let source = Path::new("a.jpg");
        report(
            &mut BrokenPipe,
            BatchEvent::Processing {
                source,
                index: 0,
                total: 1,
            },
        );
    }

    #[test]
    fn empty_input_folder_is_rejected() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        let augmenter = Augmenter::new(AugmentConfig::default(), StdRng::seed_from_u64(0));
        let err = Session::open(input.path().to_path_buf(), output.path().to_path_buf(), augmenter)
            .err()
            .unwrap();
        assert!(matches!(err, AugmentError::NoImagesFound(_)));
    }
}
