use nf_derive::nf_error;
use std::borrow::Cow;

#[nf_error]
#[derive(Clone)]
pub enum FetchError {
    #[error("Unexpected status {status}{}", format_context(.context))]
    Status { status: u16, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn main() {
    let err = FetchError::from("boom");
    let _ = err.clone();
}
