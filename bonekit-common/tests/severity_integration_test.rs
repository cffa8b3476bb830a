//! Integration tests for the Severity classification of BonekitError
//!
//! Every variant is exercised once so a new variant without a severity
//! assignment shows up as a compile error in the `match` and a missing case
//! here.

use bonekit_common::{BonekitError, ErrorSeverity, Severity};

#[test]
fn test_all_error_variants_have_severity() {
    use std::io;

    let test_cases = vec![
        (BonekitError::storage("put rejected"), ErrorSeverity::Critical),
        (
            BonekitError::Io(io::Error::new(io::ErrorKind::Other, "disk")),
            ErrorSeverity::Error,
        ),
        (
            BonekitError::Serialization(
                serde_yaml::from_str::<serde_yaml::Value>("invalid: yaml: content:").unwrap_err(),
            ),
            ErrorSeverity::Error,
        ),
        (
            BonekitError::Json(
                serde_json::from_str::<serde_json::Value>("{invalid json").unwrap_err(),
            ),
            ErrorSeverity::Error,
        ),
        (BonekitError::other("unexpected"), ErrorSeverity::Error),
        (
            BonekitError::not_found("module-conf", "shop.orders"),
            ErrorSeverity::Warning,
        ),
    ];

    for (error, expected_severity) in test_cases {
        assert_eq!(
            error.severity(),
            expected_severity,
            "Severity mismatch for: {}",
            error
        );
    }
}

#[test]
fn test_severity_usage_pattern() {
    let error = BonekitError::not_found("module-conf", "user");

    match error.severity() {
        ErrorSeverity::Warning => {}
        ErrorSeverity::Error | ErrorSeverity::Critical => {
            panic!("a missing index entry must not abort the request")
        }
    }
}

#[test]
fn test_custom_error_type_with_severity() {
    #[derive(Debug)]
    enum CustomError {
        Fatal,
        Recoverable,
        Minor,
    }

    impl Severity for CustomError {
        fn severity(&self) -> ErrorSeverity {
            match self {
                CustomError::Fatal => ErrorSeverity::Critical,
                CustomError::Recoverable => ErrorSeverity::Error,
                CustomError::Minor => ErrorSeverity::Warning,
            }
        }
    }

    assert_eq!(CustomError::Fatal.severity(), ErrorSeverity::Critical);
    assert_eq!(CustomError::Recoverable.severity(), ErrorSeverity::Error);
    assert_eq!(CustomError::Minor.severity(), ErrorSeverity::Warning);
}
