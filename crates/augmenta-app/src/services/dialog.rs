// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Folder selection: the native picker first, a typed path when the picker is
// cancelled or unavailable (headless sessions, SSH).

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use tracing::debug;

use crate::prompt::Prompter;

/// The folder pair a session works on.
#[derive(Debug, Clone)]
pub struct Directories {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Ask for the input folder, then the output folder.
///
/// Returns `Ok(None)` if input ends before both are chosen.
pub fn choose_directories<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> io::Result<Option<Directories>> {
    prompter.say("Please select the input directory...")?;
    let Some(input) = pick_folder("Select input directory", prompter, true)? else {
        return Ok(None);
    };
    prompter.say("Please select the output directory...")?;
    let Some(output) = pick_folder("Select output directory", prompter, false)? else {
        return Ok(None);
    };
    Ok(Some(Directories { input, output }))
}

fn pick_folder<R: BufRead, W: Write>(
    title: &str,
    prompter: &mut Prompter<R, W>,
    must_exist: bool,
) -> io::Result<Option<PathBuf>> {
    if let Some(path) = rfd::FileDialog::new().set_title(title).pick_folder() {
        debug!(path = %path.display(), "Folder picked");
        return Ok(Some(path));
    }

    debug!("Folder picker cancelled or unavailable, falling back to stdin");
    prompter.ask("Type the folder path: ", |answer| parse_folder(answer, must_exist))
}

/// Validate a typed folder path. Output folders may not exist yet.
pub fn parse_folder(answer: &str, must_exist: bool) -> Result<PathBuf, String> {
    if answer.is_empty() {
        return Err("a folder path is required".into());
    }
    let path = PathBuf::from(answer);
    if must_exist && !path.is_dir() {
        return Err(format!("{answer} is not an existing folder"));
    }
    if !must_exist && path.is_file() {
        return Err(format!("{answer} is a file, not a folder"));
    }
    Ok(path)
}
