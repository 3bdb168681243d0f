use scc_lib::{ErrorLocation, SccError, StylesheetError, StylesheetErrorKind};

#[test]
fn config_error_display_includes_message() {
    let err = SccError::Config("max_rules must be greater than zero".to_string());

    assert_eq!(
        format!("{}", err),
        "Configuration error: max_rules must be greater than zero"
    );
}

#[test]
fn io_error_display_wraps_source() {
    let io_err = std::io::Error::other("disk full");
    let err: SccError = io_err.into();
    let rendered = format!("{}", err);

    assert!(rendered.starts_with("IO error: "));
    assert!(rendered.contains("disk full"));
}

#[test]
fn input_too_large_names_both_counts() {
    let err = SccError::InputTooLarge {
        rules: 6000,
        limit: 5000,
    };

    assert_eq!(
        format!("{}", err),
        "Input too large: 6000 rules exceeds the limit of 5000"
    );
}

#[test]
fn stylesheet_errors_render_kind_and_location() {
    let err = StylesheetError::syntax("expected '{'", ErrorLocation::at(4, 9));
    assert_eq!(err.kind(), StylesheetErrorKind::Syntax);
    assert_eq!(
        format!("{}", err),
        "syntax error (line 4, column 9): expected '{'"
    );

    let err = StylesheetError::declaration("invalid value", ErrorLocation::line(Some(2)));
    assert_eq!(format!("{}", err), "declaration error (line 2): invalid value");

    let err = StylesheetError::unresolved_variable(
        "reference to undefined variable '$accent'",
        ErrorLocation::unknown(),
    );
    assert_eq!(
        format!("{}", err),
        "unresolved variable: reference to undefined variable '$accent'"
    );
}

#[test]
fn parse_error_wraps_stylesheet_error() {
    let err: SccError = StylesheetError::syntax("unexpected end", ErrorLocation::unknown()).into();

    assert_eq!(
        format!("{}", err),
        "Stylesheet error: syntax error: unexpected end"
    );
}
