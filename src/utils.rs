//! Utility functions for date handling, logging, and file system checks.

use chrono::{Local, NaiveDate};
use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

/// Today's date in the `YYYYMMDD` form used by the CSV filename convention.
pub fn today_stamp() -> String {
    Local::now().format("%Y%m%d").to_string()
}

/// Validate a `YYYYMMDD` date string.
///
/// The filename convention requires exactly eight digits that form a real
/// calendar date; anything else would silently discover nothing.
pub fn is_valid_date_stamp(s: &str) -> bool {
    s.len() == 8 && NaiveDate::parse_from_str(s, "%Y%m%d").is_ok()
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to `max` bytes with an ellipsis and byte
/// count indicator appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        let mut cut = max;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
    }
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if it doesn't exist, then performs a write test by
/// creating and immediately deleting a probe file.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    if let Err(e) = fs::create_dir_all(path).await {
        return Err(Box::new(e));
    }
    // Try a small sync write using std fs (simpler error surface)
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_today_stamp_shape() {
        let stamp = today_stamp();
        assert_eq!(stamp.len(), 8);
        assert!(stamp.chars().all(|c| c.is_ascii_digit()));
        assert!(is_valid_date_stamp(&stamp));
    }

    #[test]
    fn test_valid_date_stamps() {
        assert!(is_valid_date_stamp("20250601"));
        assert!(is_valid_date_stamp("19991231"));
    }

    #[test]
    fn test_invalid_date_stamps() {
        assert!(!is_valid_date_stamp("2025-06-01"));
        assert!(!is_valid_date_stamp("2025060"));
        assert!(!is_valid_date_stamp("202506011"));
        assert!(!is_valid_date_stamp("20251340"));
        assert!(!is_valid_date_stamp("abcdefgh"));
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        let s = "Hello, world!";
        assert_eq!(truncate_for_log(s, 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_respects_char_boundaries() {
        let s = "论文论文论文";
        let result = truncate_for_log(s, 4); // falls inside the second char
        assert!(result.starts_with("论"));
    }

    #[tokio::test]
    async fn test_ensure_writable_dir_creates_missing() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("reports");
        ensure_writable_dir(target.to_str().unwrap()).await.unwrap();
        assert!(target.is_dir());
    }
}
