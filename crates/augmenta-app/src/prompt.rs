// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Line-oriented prompts over any reader/writer pair.
//
// Every question re-asks until the answer parses. `Ok(None)` means the input
// ended (Ctrl-D or a closed pipe) and the caller should wind down.

use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::ops::RangeInclusive;

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Print one line.
    pub fn say(&mut self, line: impl Display) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }

    /// Ask `question` and return the trimmed answer.
    pub fn line(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(buf.trim().to_string()))
    }

    /// Ask until `parse` accepts the answer.
    pub fn ask<T>(
        &mut self,
        question: &str,
        parse: impl Fn(&str) -> Result<T, String>,
    ) -> io::Result<Option<T>> {
        loop {
            let Some(answer) = self.line(question)? else {
                return Ok(None);
            };
            match parse(&answer) {
                Ok(value) => return Ok(Some(value)),
                Err(reason) => self.say(format!("Invalid input: {reason}. Please try again."))?,
            }
        }
    }

    /// Ask for a whole number inside `range`.
    pub fn number(&mut self, question: &str, range: RangeInclusive<u32>) -> io::Result<Option<u32>> {
        self.ask(question, |answer| parse_number(answer, &range))
    }

    /// Like [`Prompter::number`], but an empty answer picks `default`.
    pub fn number_or_default(
        &mut self,
        question: &str,
        range: RangeInclusive<u32>,
        default: u32,
    ) -> io::Result<Option<u32>> {
        self.ask(question, |answer| {
            if answer.is_empty() {
                Ok(default)
            } else {
                parse_number(answer, &range)
            }
        })
    }

    /// Ask a y/n question.
    pub fn yes_no(&mut self, question: &str) -> io::Result<Option<bool>> {
        self.ask(question, parse_yes_no)
    }
}

pub fn parse_number(answer: &str, range: &RangeInclusive<u32>) -> Result<u32, String> {
    let value: u32 = answer
        .parse()
        .map_err(|_| format!("'{answer}' is not a whole number"))?;
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(format!(
            "{value} is outside {}-{}",
            range.start(),
            range.end()
        ))
    }
}

pub fn parse_yes_no(answer: &str) -> Result<bool, String> {
    match answer.to_ascii_lowercase().as_str() {
        "y" | "yes" => Ok(true),
        "n" | "no" => Ok(false),
        _ => Err(format!("'{answer}' is not y or n")),
    }
}
