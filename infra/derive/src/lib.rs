#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the content loader workspace.
//!
//! * [`macro@nf_error`] turns an enum into a context-aware error type.
//! * [`macro@main`] boots an `async fn main` on the `nf-runtime` event loop.
//!
//! Examples are `ignore`d here because the expansions refer to crates
//! (`thiserror`, `nf_runtime`) that only the consuming crates depend on.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, parse_macro_input};

/// Attribute macro to bootstrap a Tokio runtime from an `async fn main`.
///
/// The body runs on `nf_runtime::RuntimeConfig::event_loop()`, a single-threaded
/// scheduler on the calling thread. The `event_loop` argument is optional; any
/// other argument is rejected.
///
/// The annotated function must be `async` and return a `Result`.
///
/// # Examples
///
/// ```rust,ignore
/// #[nf_runtime::main(event_loop)]
/// async fn main() -> anyhow::Result<()> {
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn main(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::runtime::expand_main(args.into(), input).into()
}

/// Attribute macro for error enums used across the workspace.
///
/// # Generated items
///
/// * `#[derive(Debug, thiserror::Error)]` unless already derived. Other derives
///   (for example `Clone`) are left untouched.
/// * `<Name>Ext` trait with `.context(...)` for `Result<T, Name>` and, for every
///   variant with a source field, for `Result<T, Source>` as well.
/// * `From<Source>` for variants with a `source` field (or `#[source]`/`#[from]`).
/// * `From<&'static str>` and `From<String>` when an `Internal` variant exists.
/// * A module-local `format_context` helper for `#[error(...)]` strings.
///
/// # Requirements
///
/// 1. Only enums are accepted.
/// 2. Every variant uses named fields; tuple and unit variants are rejected.
/// 3. Variants with a source field must also carry `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[nf_derive::nf_error]
/// #[derive(Clone)]
/// pub enum FetchError {
///     #[error("Unexpected status {status}{}", format_context(.context))]
///     Status { status: u16, context: Option<Cow<'static, str>> },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn check(status: u16) -> Result<(), FetchError> {
///     if status >= 400 {
///         return Err(FetchError::Status { status, context: None }).context("GET /content");
///     }
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn nf_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand(input).into()
}
