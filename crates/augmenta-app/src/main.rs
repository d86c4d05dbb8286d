// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Augmenta — Interactive batch image augmentation
//
// Entry point. Initialises logging, asks for the input/output folders, then
// runs the menu loop on a blocking thread while the runtime listens for
// Ctrl-C.

mod menu;
mod prompt;
mod services;
mod session;

use std::io;
use std::process::ExitCode;

use augmenta_core::AugmentConfig;
use augmenta_core::error::{AugmentError, Result};
use augmenta_core::human_errors::humanize_error;
use augmenta_image::Augmenter;
use tokio::task::JoinError;

use prompt::Prompter;
use services::dialog::choose_directories;
use session::Session;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    tracing::info!("Augmenta starting");

    let mut interactive = tokio::task::spawn_blocking(run_interactive);

    tokio::select! {
        joined = &mut interactive => return finish(joined),
        signal = tokio::signal::ctrl_c() => match signal {
            Ok(()) => {
                println!();
                println!("Augmentation interrupted by the user.");
                // The blocking thread may be parked on stdin; exit without joining it.
                std::process::exit(0);
            }
            Err(err) => tracing::warn!(error = %err, "Ctrl-C handler unavailable"),
        },
    }

    finish(interactive.await)
}

/// Folder selection followed by the menu loop.
fn run_interactive() -> Result<()> {
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());

    let Some(dirs) = choose_directories(&mut prompter)? else {
        return Ok(());
    };
    let augmenter = Augmenter::with_thread_rng(AugmentConfig::default());
    let mut session = Session::open(dirs.input, dirs.output, augmenter)?;
    session.run(&mut prompter)
}

fn finish(joined: std::result::Result<Result<()>, JoinError>) -> ExitCode {
    match joined {
        Ok(Ok(())) => ExitCode::SUCCESS,
        Ok(Err(err)) => {
            report_fatal(&err);
            ExitCode::FAILURE
        }
        Err(err) => {
            tracing::error!(error = %err, "interactive session panicked");
            ExitCode::FAILURE
        }
    }
}

fn report_fatal(err: &AugmentError) {
    tracing::error!(error = %err, "session ended with an error");
    let human = humanize_error(err);
    eprintln!("{}", human.message);
    eprintln!("{}", human.suggestion);
}
