use nf_derive::nf_error;
use std::borrow::Cow;

#[nf_error]
pub enum LoadError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Unexpected status {status}{}", format_context(.context))]
    Status { status: u16, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read_missing() -> Result<String, LoadError> {
    std::fs::read_to_string("/definitely/not/here.json").context("Reading content file")
}

#[test]
fn nf_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/nf_error_pass.rs");
}

#[test]
fn source_errors_convert_with_context() {
    let err = read_missing().expect_err("file must be missing");
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(err.to_string().starts_with("IO error (Reading content file): "));
}

#[test]
fn context_is_attached_to_own_variants() {
    let res: Result<(), LoadError> = Err(LoadError::Status { status: 503, context: None });
    let err = res.context("GET /content/nf-content.json").unwrap_err();
    assert_eq!(err.to_string(), "Unexpected status 503 (GET /content/nf-content.json)");
}

#[test]
fn strings_become_internal_errors() {
    let borrowed = LoadError::from("cache slot poisoned");
    let owned = LoadError::from(format!("fetch task {} aborted", 7));

    assert_eq!(borrowed.to_string(), "Internal error: cache slot poisoned");
    assert_eq!(owned.to_string(), "Internal error: fetch task 7 aborted");
}
