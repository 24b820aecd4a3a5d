extern crate quote;
extern crate syn;
extern crate synstructure;

use quote::quote;
use syn::{
    Ident,
    parse::{Parse, ParseStream},
};
use synstructure::{AddBounds, Structure, decl_derive};

decl_derive! {
    [Trace, attributes(ephemera, ignore_trace)] =>
    /// Derive the `Trace` trait.
    derive_trace
}

/// Derives the `Trace` trait.
///
/// Every field is traced unless it carries `#[ignore_trace]`. A container
/// marked `#[ephemera(empty_trace)]` holds no heap references at all and
/// gets an empty implementation; such types must be `Copy`.
fn derive_trace(mut s: Structure<'_>) -> proc_macro2::TokenStream {
    struct EmptyTrace;

    impl Parse for EmptyTrace {
        fn parse(input: ParseStream<'_>) -> syn::Result<Self> {
            let i: Ident = input.parse()?;

            if i != "empty_trace" {
                let msg = format!("expected token \"empty_trace\", found {i:?}");
                return Err(syn::Error::new_spanned(i.clone(), msg));
            }

            Ok(Self)
        }
    }

    for attr in &s.ast().attrs {
        if attr.path().is_ident("ephemera") {
            if let Err(e) = attr.parse_args::<EmptyTrace>() {
                return e.into_compile_error();
            }

            s.add_where_predicate(syn::parse_quote!(Self: Copy));

            return s.bound_impl(
                quote!(::ephemera::Trace),
                quote! {
                    #[inline(always)]
                    fn trace(&self, _tracer: &mut ::ephemera::Tracer<'_>) {}
                },
            );
        }
    }

    s.filter(|bi| {
        !bi.ast()
            .attrs
            .iter()
            .any(|attr| attr.path().is_ident("ignore_trace"))
    });
    let trace_body = s.each(|bi| quote!(::ephemera::Trace::trace(#bi, tracer)));
    let finalizer_body = s.each(|bi| quote!(::ephemera::Trace::run_finalizer(#bi)));

    s.add_bounds(AddBounds::Fields);
    s.bound_impl(
        quote!(::ephemera::Trace),
        quote! {
            #[inline]
            #[allow(unused_variables)]
            fn trace(&self, tracer: &mut ::ephemera::Tracer<'_>) {
                match *self { #trace_body }
            }
            #[inline]
            fn run_finalizer(&self) {
                ::ephemera::Finalize::finalize(self);
                match *self { #finalizer_body }
            }
        },
    )
}

decl_derive! {
    [Finalize] =>
    /// Derive the `Finalize` trait.
    derive_finalize
}

/// Derives the `Finalize` trait.
#[allow(clippy::needless_pass_by_value)]
fn derive_finalize(s: Structure<'_>) -> proc_macro2::TokenStream {
    s.unbound_impl(quote!(::ephemera::Finalize), quote!())
}
