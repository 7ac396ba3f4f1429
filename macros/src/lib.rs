use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{parse_macro_input, LitStr};

/// Expands an error code literal into a unit constant named after the code.
///
/// Two errors declared with the same code in one module expand to the same constant name, so the
/// duplicate is rejected at compile time.
#[proc_macro]
pub fn error_code_to_ident(input: TokenStream) -> TokenStream {
    let code = parse_macro_input!(input as LitStr);
    let value = code.value();

    if value.is_empty() || !value.chars().all(|c| c.is_ascii_alphanumeric()) {
        return syn::Error::new(code.span(), "error codes must be non-empty and alphanumeric")
            .to_compile_error()
            .into();
    }

    let ident = format_ident!("__ERROR_CODE_{}", value);

    quote! {
        #[allow(dead_code, non_upper_case_globals)]
        const #ident: () = ();
    }
    .into()
}
