use crate::ErrorLocation;

/// **VALUE**: `ErrorLocation::here()` reports the line it was written on.
///
/// **BUG THIS CATCHES**: Would catch if `#[track_caller]` is dropped from `here()`,
/// which would make every error in the workspace point into `error_location.rs`.
#[test]
fn given_here_called_when_location_captured_then_points_at_call_site() {
    // GIVEN / WHEN: Capturing the current location
    let location = ErrorLocation::here();

    // THEN: File is this test file and the line is the capture line
    assert!(
        location.file.ends_with("tests/error_location.rs"),
        "Should capture the test file, got {}",
        location.file
    );
    assert_eq!(location.line, 10, "Should capture the call line");
    assert!(location.column > 0, "Should capture a column");
}

/// **VALUE**: Display format is `[file:line:column]`.
///
/// **WHY THIS MATTERS**: Every error message in the workspace appends this
/// suffix; log scraping relies on the bracketed shape.
#[test]
fn given_error_location_when_formatted_then_produces_bracketed_format() {
    let location = ErrorLocation::here();

    let formatted = location.to_string();

    assert!(formatted.starts_with('['));
    assert!(formatted.ends_with(']'));
    assert!(formatted.contains(&format!(":{}:", location.line)));
    assert_eq!(formatted.matches(':').count(), 2, "Exactly two separators");
}

#[test]
fn given_nested_track_caller_when_capturing_then_reports_outer_call_site() {
    #[track_caller]
    fn raise() -> ErrorLocation {
        ErrorLocation::here()
    }

    let first = raise();
    let second = raise();

    assert_eq!(first.file, second.file);
    assert_eq!(first.line + 1, second.line, "Each call site gets its own line");
}

#[test]
fn given_error_location_when_serialized_then_exposes_fields() {
    let location = ErrorLocation::here();

    let json = serde_json::to_value(location).expect("location should serialize");

    assert_eq!(json["line"], location.line);
    assert_eq!(json["column"], location.column);
    assert_eq!(json["file"], location.file);
}
