use thiserror::Error;
use url::Url;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("the link must be a valid URL")]
    InvalidUrl(#[from] url::ParseError),
    #[error("only http and https feeds are supported")]
    UnsupportedScheme,
    #[error("this RSS feed has already been added")]
    AlreadyExists,
}

/// Pre-registration rule engine: a candidate must be a well-formed http(s)
/// URL that is not already tracked. Pure and synchronous; callers pass the
/// currently registered URLs.
pub fn validate_candidate(candidate: &str, registered: &[String]) -> Result<Url, ValidationError> {
    let candidate = candidate.trim();
    let url = Url::parse(candidate)?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ValidationError::UnsupportedScheme);
    }
    if registered.iter().any(|existing| existing == candidate) {
        return Err(ValidationError::AlreadyExists);
    }
    Ok(url)
}
