use aggregator_core::{validate_candidate, ValidationError};

#[test]
fn accepts_a_fresh_http_url() {
    let url = validate_candidate("https://example.com/feed", &[]).expect("valid");
    assert_eq!(url.as_str(), "https://example.com/feed");
}

#[test]
fn trims_surrounding_whitespace() {
    assert!(validate_candidate("  https://example.com/feed \n", &[]).is_ok());
}

#[test]
fn rejects_text_that_is_not_a_url() {
    let err = validate_candidate("not a url", &[]).expect_err("invalid");
    assert!(matches!(err, ValidationError::InvalidUrl(_)));
}

#[test]
fn rejects_non_http_schemes() {
    let err = validate_candidate("ftp://example.com/feed", &[]).expect_err("invalid");
    assert_eq!(err, ValidationError::UnsupportedScheme);
}

#[test]
fn rejects_an_already_registered_url() {
    let registered = vec!["https://example.com/feed".to_string()];
    let err = validate_candidate("https://example.com/feed", &registered).expect_err("duplicate");
    assert_eq!(err, ValidationError::AlreadyExists);

    // A different path on the same host is a different feed.
    assert!(validate_candidate("https://example.com/other", &registered).is_ok());
}
