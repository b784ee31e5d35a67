//! Tests for the options-file source.

use std::io::Write;

use tempfile::NamedTempFile;

use super::{FileSource, OptionsSource, RawValue, SourceError};

/// Helper to write an options file and read it back through the source.
fn read_file(content: &str) -> super::RawOptions {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    FileSource::new(file.path()).read().unwrap()
}

mod reading {
    use super::*;

    #[test]
    fn one_token_per_line() {
        let raw = read_file("--blocking=true\n--metrics_location=gs://bucket/m\n");

        assert_eq!(raw.len(), 2);
        assert_eq!(raw.get("blocking"), Some(&RawValue::single("true")));
        assert_eq!(
            raw.get("metrics_location"),
            Some(&RawValue::single("gs://bucket/m"))
        );
    }

    #[test]
    fn blank_lines_ignored() {
        let raw = read_file("\n--blocking=true\n\n   \n--runner=local\n\n");

        assert_eq!(raw.len(), 2);
    }

    #[test]
    fn lines_are_trimmed() {
        let raw = read_file("  --blocking=true  \n");

        assert_eq!(raw.get("blocking"), Some(&RawValue::single("true")));
    }

    #[test]
    fn bare_flag_lines_supported() {
        let raw = read_file("--blocking\n");

        assert_eq!(raw.get("blocking"), Some(&RawValue::single("true")));
    }

    #[test]
    fn repeated_lines_accumulate() {
        let raw = read_file("--zstd_dictionary=a:f1\n--zstd_dictionary=b:f2\n");

        let items: Vec<&str> = raw.get("zstd_dictionary").unwrap().occurrences().collect();
        assert_eq!(items, vec!["a:f1", "b:f2"]);
    }
}

mod failures {
    use super::*;

    #[test]
    fn missing_file_is_fatal() {
        let source = FileSource::new("/nonexistent/options.txt");
        let result = source.read();

        assert!(matches!(
            result,
            Err(SourceError::FileRead { ref path, .. })
                if path.to_string_lossy().contains("nonexistent")
        ));
    }

    #[test]
    fn malformed_line_is_fatal() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"blocking=true\n").unwrap();

        let result = FileSource::new(file.path()).read();

        assert!(matches!(result, Err(SourceError::InvalidToken { .. })));
    }
}

mod origin {
    use super::*;

    #[test]
    fn origin_names_the_path() {
        let source = FileSource::new("/tmp/options.txt");

        assert_eq!(source.origin(), "file:/tmp/options.txt");
    }
}
