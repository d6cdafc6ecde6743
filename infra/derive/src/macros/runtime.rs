use proc_macro2::TokenStream;
use quote::quote;
use syn::{Ident, ItemFn, ReturnType, Type};

/// Expands `#[nf_runtime::main]` / `#[nf_runtime::main(event_loop)]`.
///
/// The body is moved into `block_on` of the event-loop runtime; a runtime that
/// cannot be built is returned through the function's own `Result`.
#[must_use]
pub fn expand_main(args: TokenStream, input: ItemFn) -> TokenStream {
    match check(&args, &input) {
        Ok(()) => wrap(input),
        Err(err) => err.to_compile_error(),
    }
}

fn check(args: &TokenStream, input: &ItemFn) -> syn::Result<()> {
    if !args.is_empty() {
        let profile: Ident = syn::parse2(args.clone())?;
        if profile != "event_loop" {
            return Err(syn::Error::new_spanned(
                profile,
                "unsupported runtime profile, the only profile is `event_loop`",
            ));
        }
    }

    if input.sig.asyncness.is_none() {
        return Err(syn::Error::new_spanned(input.sig.fn_token, "#[nf_runtime::main] needs an `async fn`"));
    }

    let ReturnType::Type(_, ty) = &input.sig.output else {
        return Err(syn::Error::new_spanned(&input.sig.ident, "#[nf_runtime::main] needs a `Result` return type"));
    };
    let is_result = matches!(&**ty, Type::Path(p) if p.path.segments.last().is_some_and(|s| s.ident == "Result"));
    if !is_result {
        return Err(syn::Error::new_spanned(ty, "#[nf_runtime::main] needs a `Result` return type"));
    }

    Ok(())
}

fn wrap(input: ItemFn) -> TokenStream {
    let ItemFn { attrs, vis, mut sig, block } = input;
    sig.asyncness = None;

    quote! {
        #(#attrs)*
        #vis #sig {
            ::nf_runtime::build_runtime_with_config(&::nf_runtime::RuntimeConfig::event_loop())?
                .block_on(async move #block)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn expand(args: TokenStream, input: ItemFn) -> String {
        expand_main(args, input).to_string()
    }

    #[test]
    fn wraps_the_body_in_the_event_loop_runtime() {
        let out = expand(quote!(event_loop), parse_quote! {
            async fn main() -> anyhow::Result<()> { Ok(()) }
        });
        assert!(out.contains("RuntimeConfig :: event_loop"));
        assert!(out.contains("block_on"));
        assert!(!out.contains("async fn main"));
    }

    #[test]
    fn profile_argument_is_optional() {
        let out = expand(TokenStream::new(), parse_quote! {
            async fn main() -> Result<(), std::io::Error> { Ok(()) }
        });
        assert!(!out.contains("compile_error"));
    }

    #[test]
    fn rejects_other_profiles() {
        let out = expand(quote!(high_performance), parse_quote! {
            async fn main() -> anyhow::Result<()> { Ok(()) }
        });
        assert!(out.contains("compile_error"));
        assert!(out.contains("event_loop"));
    }

    #[test]
    fn rejects_sync_functions_and_unit_returns() {
        let sync = expand(TokenStream::new(), parse_quote! { fn main() -> anyhow::Result<()> { Ok(()) } });
        assert!(sync.contains("async fn"));

        let unit = expand(TokenStream::new(), parse_quote! { async fn main() {} });
        assert!(unit.contains("Result"));
        assert!(unit.contains("compile_error"));
    }
}
