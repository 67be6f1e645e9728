use std::fs;
use std::path::PathBuf;
use std::process::Command;

use chrono::{DateTime, Local};

/// `~/Desktop/Screenshots`, the destination for every capture.
pub fn screenshots_dir() -> Result<PathBuf, String> {
    let desktop = dirs::desktop_dir().ok_or("could not determine desktop directory")?;
    Ok(desktop.join("Screenshots"))
}

/// Second-resolution local timestamp, e.g. `2024-03-05_09-07-02.png`.
/// Two captures within the same second overwrite each other.
pub fn timestamp_filename(now: &DateTime<Local>) -> String {
    format!("{}.png", now.format("%Y-%m-%d_%H-%M-%S"))
}

/// Run the interactive region selection and copy the result to the clipboard.
///
/// Blocks until the user finishes or cancels selection. Returns the saved path,
/// or `None` when the user cancelled (screencapture produced no file).
pub fn capture_interactive() -> Result<Option<PathBuf>, String> {
    let dir = screenshots_dir()?;
    fs::create_dir_all(&dir).map_err(|e| format!("failed to create {}: {}", dir.display(), e))?;

    let path = dir.join(timestamp_filename(&Local::now()));

    // screencapture exits 0 even on cancel; the file is the success signal.
    Command::new("screencapture")
        .arg("-i")
        .arg(&path)
        .status()
        .map_err(|e| format!("failed to run screencapture: {}", e))?;

    if !path.exists() {
        return Ok(None);
    }

    crate::clipboard::copy_png_file(&path)?;
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn filename_format() {
        let t = Local.with_ymd_and_hms(2024, 3, 5, 9, 7, 2).unwrap();
        assert_eq!(timestamp_filename(&t), "2024-03-05_09-07-02.png");
    }

    #[test]
    fn distinct_seconds_never_collide() {
        let a = Local.with_ymd_and_hms(2024, 3, 5, 9, 7, 2).unwrap();
        let b = Local.with_ymd_and_hms(2024, 3, 5, 9, 7, 3).unwrap();
        assert_ne!(timestamp_filename(&a), timestamp_filename(&b));
    }

    #[test]
    fn same_second_reuses_the_name() {
        // Sub-second captures share a filename and the later one overwrites.
        let a = Local.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();
        let b = a + chrono::Duration::milliseconds(400);
        assert_eq!(timestamp_filename(&a), timestamp_filename(&b));
    }
}
