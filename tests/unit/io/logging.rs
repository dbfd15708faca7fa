//! Tests for tracing subscriber setup

#[cfg(test)]
mod tests {
    use pegboard::SearchError;
    use pegboard::io::logging::{build_filter, init};

    // Tests explicit directives parse and invalid ones are reported
    // Verified by ignoring the explicit directive
    #[test]
    fn test_build_filter() {
        assert!(build_filter(Some("pegboard=debug")).is_ok());
        assert!(build_filter(None).is_ok());
        assert!(matches!(
            build_filter(Some("pegboard=notalevel")),
            Err(SearchError::InvalidLogFilter { .. })
        ));
    }

    // Tests the trace file is created and events are written to it
    // Verified by writing events to stderr when a file is given
    #[test]
    fn test_trace_file_written() {
        let dir = tempfile::tempdir().unwrap_or_else(|error| panic!("{error}"));
        let path = dir.path().join("trace.log");

        let installed = init(Some("info"), Some(&path)).unwrap_or_else(|error| panic!("{error}"));
        assert!(path.exists());
        if installed {
            tracing::info!("trace file check");
            let contents = std::fs::read_to_string(&path).unwrap_or_default();
            assert!(contents.contains("trace file check"));
        }
        assert!(!init(None, None).unwrap_or(true));
    }

    // Tests a trace file in a missing directory reports a file system error
    // Verified by ignoring the create error
    #[test]
    fn test_trace_file_unwritable() {
        let dir = tempfile::tempdir().unwrap_or_else(|error| panic!("{error}"));
        let path = dir.path().join("missing").join("trace.log");
        assert!(matches!(
            init(None, Some(&path)),
            Err(SearchError::FileSystem { .. })
        ));
    }
}
