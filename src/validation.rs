//! Field validation for the "add your data" dialog.
//!
//! A failed validation blocks submission and is reported inline next to the
//! offending field; it never reaches the network layer.

use thiserror::Error;

/// Accepted upload file extensions.
const ACCEPTED_EXTENSIONS: [&str; 3] = ["txt", "csv", "tsv"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please provide a name for your resource")]
    MissingName,
    #[error("The URL provided is not valid")]
    InvalidUrl,
    #[error("Please select a file to upload")]
    MissingFile,
    #[error("File type is not supported: .{0}")]
    UnsupportedFile(String),
    #[error("The content does not look like tab or comma separated tuples")]
    InvalidContent,
}

/// Resource names must be non-empty after trimming.
pub fn validate_name(input: &str) -> Result<(), ValidationError> {
    if input.trim().is_empty() {
        Err(ValidationError::MissingName)
    } else {
        Ok(())
    }
}

/// URLs must carry an http(s) scheme, a host and no whitespace.
pub fn validate_url(input: &str) -> Result<(), ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidUrl);
    }
    let rest = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))
        .ok_or(ValidationError::InvalidUrl)?;
    let host = rest.split('/').next().unwrap_or("");
    if host.is_empty() {
        return Err(ValidationError::InvalidUrl);
    }
    Ok(())
}

/// Upload files must be named and use one of the accepted extensions.
pub fn validate_file(filename: &str) -> Result<(), ValidationError> {
    let trimmed = filename.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingFile);
    }
    let extension = trimmed.rsplit('.').next().unwrap_or("").to_lowercase();
    if trimmed.contains('.') && ACCEPTED_EXTENSIONS.contains(&extension.as_str()) {
        Ok(())
    } else {
        Err(ValidationError::UnsupportedFile(extension))
    }
}

/// Pasted content must be non-empty and contain at least one column
/// separator somewhere.
pub fn validate_content(input: &str) -> Result<(), ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !(trimmed.contains('\t') || trimmed.contains(',')) {
        return Err(ValidationError::InvalidContent);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name() {
        assert!(validate_name("My resource").is_ok());
        assert_eq!(validate_name("   "), Err(ValidationError::MissingName));
    }

    #[test]
    fn test_url() {
        assert!(validate_url("https://example.org/tuples.csv").is_ok());
        assert!(validate_url("http://example.org").is_ok());
        assert_eq!(validate_url("ftp://example.org"), Err(ValidationError::InvalidUrl));
        assert_eq!(validate_url("https:// example.org"), Err(ValidationError::InvalidUrl));
        assert_eq!(validate_url("https:///path"), Err(ValidationError::InvalidUrl));
        assert_eq!(validate_url(""), Err(ValidationError::InvalidUrl));
    }

    #[test]
    fn test_file() {
        assert!(validate_file("interactions.tsv").is_ok());
        assert!(validate_file("DATA.CSV").is_ok());
        assert_eq!(validate_file(""), Err(ValidationError::MissingFile));
        assert_eq!(
            validate_file("archive.zip"),
            Err(ValidationError::UnsupportedFile("zip".into()))
        );
        assert!(matches!(
            validate_file("noextension"),
            Err(ValidationError::UnsupportedFile(_))
        ));
    }

    #[test]
    fn test_content() {
        assert!(validate_content("A\tB\t0.9").is_ok());
        assert!(validate_content("A,B,0.9").is_ok());
        assert_eq!(validate_content("  "), Err(ValidationError::InvalidContent));
        assert_eq!(
            validate_content("single column"),
            Err(ValidationError::InvalidContent)
        );
    }
}
