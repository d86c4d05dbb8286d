// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Collision-free output file names.
//
// Names are checked against the directory listing at call time. Nothing is
// reserved, so a concurrent writer can still race us between the check and
// the write.

use std::path::{Path, PathBuf};

/// Return the first path `dir/<stem>.<extension>` that does not exist yet.
///
/// If the plain name is taken, a parenthesised counter is appended
/// (`a (1).png`). A stem that already ends in ` (k)` continues counting from
/// `k + 1` instead of nesting counters.
pub fn unique_filename(dir: &Path, stem: &str, extension: &str) -> PathBuf {
    let candidate = dir.join(file_name(stem, extension));
    if !candidate.exists() {
        return candidate;
    }

    let (base, counter) = split_counter(stem);
    let mut next = counter.map_or(1, |k| k.saturating_add(1));
    loop {
        let candidate = dir.join(file_name(&format!("{base} ({next})"), extension));
        if !candidate.exists() {
            return candidate;
        }
        next = next.saturating_add(1);
    }
}

/// Split a trailing ` (k)` counter off `stem`.
///
/// `"a (3)"` gives `("a", Some(3))`; anything without a well-formed counter
/// comes back whole with `None`.
pub fn split_counter(stem: &str) -> (&str, Option<u32>) {
    let Some(inner) = stem.strip_suffix(')') else {
        return (stem, None);
    };
    let Some(idx) = inner.rfind(" (") else {
        return (stem, None);
    };
    let digits = &inner[idx + 2..];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return (stem, None);
    }
    match digits.parse::<u32>() {
        Ok(k) => (&inner[..idx], Some(k)),
        Err(_) => (stem, None),
    }
}

fn file_name(stem: &str, extension: &str) -> String {
    if extension.is_empty() {
        stem.to_string()
    } else {
        format!("{stem}.{extension}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), b"x").unwrap();
    }

    #[test]
    fn free_name_is_returned_as_is() {
        let dir = TempDir::new().unwrap();
        assert_eq!(unique_filename(dir.path(), "a", "png"), dir.path().join("a.png"));
    }

    #[test]
    fn taken_name_gets_counter() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a.png");
        assert_eq!(unique_filename(dir.path(), "a", "png"), dir.path().join("a (1).png"));
    }

    #[test]
    fn existing_counter_is_incremented() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a (1).png");
        assert_eq!(
            unique_filename(dir.path(), "a (1)", "png"),
            dir.path().join("a (2).png")
        );

        touch(dir.path(), "a.png");
        assert_eq!(unique_filename(dir.path(), "a", "png"), dir.path().join("a (2).png"));
    }

    #[test]
    fn plain_base_is_free_beside_a_counted_copy() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a (1).png");
        assert_eq!(unique_filename(dir.path(), "a", "png"), dir.path().join("a.png"));
    }

    #[test]
    fn never_returns_existing_name() {
        let dir = TempDir::new().unwrap();
        for _ in 0..5 {
            let path = unique_filename(dir.path(), "shot", "jpg");
            assert!(!path.exists());
            std::fs::write(&path, b"x").unwrap();
        }
        let mut names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort();
        assert_eq!(
            names,
            ["shot (1).jpg", "shot (2).jpg", "shot (3).jpg", "shot (4).jpg", "shot.jpg"]
        );
    }

    #[test]
    fn deterministic_for_same_listing() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "b.png");
        touch(dir.path(), "b (1).png");
        let first = unique_filename(dir.path(), "b", "png");
        let second = unique_filename(dir.path(), "b", "png");
        assert_eq!(first, second);
    }

    #[test]
    fn split_counter_cases() {
        assert_eq!(split_counter("a (3)"), ("a", Some(3)));
        assert_eq!(split_counter("my photo (12)"), ("my photo", Some(12)));
        assert_eq!(split_counter("a"), ("a", None));
        assert_eq!(split_counter("a (x)"), ("a (x)", None));
        assert_eq!(split_counter("a ()"), ("a ()", None));
        assert_eq!(split_counter("a(3)"), ("a(3)", None));
    }
}
