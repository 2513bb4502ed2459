use pathview::validation::{
    validate_content, validate_file, validate_name, validate_url, ValidationError,
};

#[test]
fn test_name_blocks_blank_input() {
    assert!(validate_name("IntAct subset").is_ok());
    assert_eq!(validate_name(""), Err(ValidationError::MissingName));
    assert_eq!(validate_name(" \t "), Err(ValidationError::MissingName));
}

#[test]
fn test_url_requires_http_scheme_and_host() {
    assert!(validate_url("http://example.org/data.tsv").is_ok());
    assert!(validate_url("  https://example.org  ").is_ok());
    for bad in [
        "",
        "example.org/data.tsv",
        "ftp://example.org/data.tsv",
        "https://exa mple.org",
        "https:///data.tsv",
    ] {
        assert_eq!(validate_url(bad), Err(ValidationError::InvalidUrl), "{bad}");
    }
}

#[test]
fn test_file_extension_allow_list() {
    assert!(validate_file("tuples.txt").is_ok());
    assert!(validate_file("tuples.tsv").is_ok());
    assert!(validate_file("TUPLES.CSV").is_ok());
    assert_eq!(validate_file("   "), Err(ValidationError::MissingFile));
    assert_eq!(
        validate_file("tuples.xlsx"),
        Err(ValidationError::UnsupportedFile("xlsx".into()))
    );
}

#[test]
fn test_content_requires_column_separator() {
    assert!(validate_content("A\tB\t0.75\nC\tD\t0.9").is_ok());
    assert!(validate_content("A,B,0.75").is_ok());
    assert_eq!(validate_content(""), Err(ValidationError::InvalidContent));
    assert_eq!(
        validate_content("only one column per line"),
        Err(ValidationError::InvalidContent)
    );
}
