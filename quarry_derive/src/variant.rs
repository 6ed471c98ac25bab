use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{
    FnArg, ImplItemFn, Pat, PatType, Token, parse_macro_input, punctuated::Punctuated,
    spanned::Spanned,
};

pub fn variant_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr with Punctuated::<syn::Ident, Token![,]>::parse_terminated);
    let method = parse_macro_input!(item as ImplItemFn);
    match expand(args, method) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(args: Punctuated<syn::Ident, Token![,]>, method: ImplItemFn) -> syn::Result<TokenStream2> {
    let mut args = args.into_iter();
    let base = args.next().ok_or_else(|| {
        syn::Error::new(method.sig.ident.span(), "expected the public method name")
    })?;

    let mut negatable = false;
    for flag in args {
        if flag == "not" {
            negatable = true;
        } else {
            return Err(syn::Error::new(flag.span(), "unknown flag, expected `not`"));
        }
    }

    let mut inputs = method.sig.inputs.iter();
    if !matches!(inputs.next(), Some(FnArg::Receiver(_))) {
        return Err(syn::Error::new(
            method.sig.span(),
            "expected a `&mut self` method",
        ));
    }

    // logic, then negate when the family has a NOT form
    let leading = if negatable { 2 } else { 1 };
    let forwarded: Vec<&PatType> = inputs
        .skip(leading)
        .map(|arg| match arg {
            FnArg::Typed(typed) => Ok(typed),
            FnArg::Receiver(receiver) => {
                Err(syn::Error::new(receiver.span(), "unexpected receiver"))
            }
        })
        .collect::<syn::Result<_>>()?;

    let names = forwarded
        .iter()
        .map(|typed| match &*typed.pat {
            Pat::Ident(pat) => Ok(&pat.ident),
            other => Err(syn::Error::new(other.span(), "expected a plain argument name")),
        })
        .collect::<syn::Result<Vec<_>>>()?;

    let inner = &method.sig.ident;
    let generics = &method.sig.generics;
    let where_clause = &method.sig.generics.where_clause;
    let output = &method.sig.output;

    let generate = |name: syn::Ident, logic: TokenStream2, negate: Option<bool>, doc: String| {
        let negate = negate.map(|negate| quote!(#negate,));
        quote! {
            #[doc = #doc]
            pub fn #name #generics (&mut self, #(#forwarded),*) #output #where_clause {
                self.#inner(#logic, #negate #(#names),*)
            }
        }
    };

    let and = quote!(crate::Logic::And);
    let or = quote!(crate::Logic::Or);
    let plain_negate = negatable.then_some(false);

    let mut generated = vec![
        generate(
            base.clone(),
            and.clone(),
            plain_negate,
            "Appends the predicate joined with `AND`.".to_string(),
        ),
        generate(
            format_ident!("or_{}", base),
            or.clone(),
            plain_negate,
            "Appends the predicate joined with `OR`.".to_string(),
        ),
    ];

    if negatable {
        let negated = negated_name(&base.to_string());
        generated.push(generate(
            format_ident!("{}", negated),
            and,
            Some(true),
            "Appends the negated predicate joined with `AND NOT`.".to_string(),
        ));
        generated.push(generate(
            format_ident!("or_{}", negated),
            or,
            Some(true),
            "Appends the negated predicate joined with `OR NOT`.".to_string(),
        ));
    }

    Ok(quote! {
        #method
        #(#generated)*
    })
}

/// `where_in` -> `where_not_in`, `having` -> `having_not`.
fn negated_name(base: &str) -> String {
    match base.split_once('_') {
        Some((head, tail)) => format!("{head}_not_{tail}"),
        None => format!("{base}_not"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negated_name() {
        assert_eq!("where_not_in", negated_name("where_in"));
        assert_eq!("where_not_in_sub", negated_name("where_in_sub"));
        assert_eq!("having_not", negated_name("having"));
        assert_eq!("having_not_eq", negated_name("having_eq"));
    }
}
