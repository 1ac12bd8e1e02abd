use std::{
    fs::{self, OpenOptions},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local};

use crate::error::Result;

const PROMPT_PREFIX_CHARS: usize = 30;

/// First 30 characters of the prompt, reduced to alphanumerics, spaces,
/// hyphens and underscores, without trailing whitespace.
pub fn sanitize_prompt(prompt: &str) -> String {
    let filtered: String = prompt
        .chars()
        .take(PROMPT_PREFIX_CHARS)
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();
    filtered.trim_end().to_string()
}

pub fn file_stem(prompt: &str, time: DateTime<Local>) -> String {
    format!(
        "image_{}_{}",
        time.format("%Y%m%d_%H%M%S"),
        sanitize_prompt(prompt)
    )
}

/// Writes `bytes` to `dir/image_{timestamp}_{prefix}.png`, creating `dir` if needed.
///
/// The file is always newly created. When the name is already taken, e.g. by a
/// generation finished within the same second, `_2`, `_3`, ... is appended.
/// A failed write leaves no partial file behind.
pub fn save_image(
    dir: &Path,
    prompt: &str,
    time: DateTime<Local>,
    bytes: &[u8],
) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let stem = file_stem(prompt, time);
    let mut n = 1;
    loop {
        let name = if n == 1 {
            format!("{stem}.png")
        } else {
            format!("{stem}_{n}.png")
        };
        let path = dir.join(name);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => {
                write_or_remove(&path, file, bytes)?;
                return Ok(path);
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => n += 1,
            Err(e) => return Err(e.into()),
        }
    }
}

/// Writes into the freshly created `path`, deleting it again if the write fails.
fn write_or_remove(path: &Path, mut file: impl Write, bytes: &[u8]) -> std::io::Result<()> {
    let written = file.write_all(bytes).and_then(|()| file.flush());
    if written.is_err() {
        let _ = fs::remove_file(path);
    }
    written
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use tempfile::tempdir;

    use super::*;

    fn noon() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 5, 17, 12, 3, 9).unwrap()
    }

    #[test]
    fn sanitizes_prompt() {
        assert_eq!(sanitize_prompt("A/B*cool! robot_2024"), "ABcool robot_2024");
        assert_eq!(sanitize_prompt("trailing space   "), "trailing space");
        assert_eq!(sanitize_prompt("héllo-wörld"), "héllo-wörld");
        assert_eq!(sanitize_prompt(""), "");
    }

    #[test]
    fn truncates_before_filtering() {
        // 28 symbols then "abcdef": only "ab" is within the first 30 chars
        let prompt = format!("{}abcdef", "!".repeat(28));
        assert_eq!(sanitize_prompt(&prompt), "ab");

        let long = "a very long prompt that keeps going and going";
        assert_eq!(sanitize_prompt(long), "a very long prompt that keeps");
    }

    #[test]
    fn stem_format() {
        assert_eq!(
            file_stem("a red bicycle", noon()),
            "image_20240517_120309_a red bicycle"
        );
    }

    #[test]
    fn saves_without_overwriting() -> Result<()> {
        let dir = tempdir()?;
        let first = save_image(dir.path(), "a cat", noon(), b"one")?;
        let second = save_image(dir.path(), "a cat", noon(), b"two")?;

        assert_eq!(first, dir.path().join("image_20240517_120309_a cat.png"));
        assert_eq!(second, dir.path().join("image_20240517_120309_a cat_2.png"));
        assert_eq!(std::fs::read(first)?, b"one");
        assert_eq!(std::fs::read(second)?, b"two");
        Ok(())
    }

    #[test]
    fn creates_missing_output_dir() -> Result<()> {
        let dir = tempdir()?;
        let nested = dir.path().join("renders").join("today");

        let path = save_image(&nested, "a cat", noon(), b"png")?;

        assert_eq!(path, nested.join("image_20240517_120309_a cat.png"));
        assert_eq!(std::fs::read(path)?, b"png");
        Ok(())
    }

    #[test]
    fn failed_write_leaves_no_file() {
        struct Full;
        impl Write for Full {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("disk full"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let dir = tempdir().unwrap();
        let path = dir.path().join("image_20240517_120309_a cat.png");
        std::fs::write(&path, b"").unwrap();

        assert!(write_or_remove(&path, Full, b"png").is_err());
        assert!(!path.exists());
    }

    #[test]
    fn unusable_output_dir_is_an_error() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("not_a_dir");
        std::fs::write(&blocker, b"").unwrap();

        let err = save_image(&blocker, "a cat", noon(), b"png").unwrap_err();
        assert_eq!(err.kind(), "Io");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
