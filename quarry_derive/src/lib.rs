use proc_macro::TokenStream;

mod function;
mod variant;

/// Generates `where_<fn>`, `or_where_<fn>`, `where_<fn>_eq` and
/// `or_where_<fn>_eq` on `Builder` for every unit variant of a SQL function
/// enum.
#[proc_macro_derive(WhereFunction, attributes(function))]
pub fn where_function_methods(input: TokenStream) -> TokenStream {
    function::where_function_methods_impl(input)
}

/// Generates the public AND / OR (and with `not`, AND NOT / OR NOT) siblings
/// of an inner `&mut self` method whose leading arguments are the logic
/// connective and, with `not`, the negate flag.
///
/// `#[variant(where_in, not)]` on `fn where_in_expr(&mut self, logic, negate, ..)`
/// yields `where_in`, `or_where_in`, `where_not_in` and `or_where_not_in`.
#[proc_macro_attribute]
pub fn variant(attr: TokenStream, item: TokenStream) -> TokenStream {
    variant::variant_impl(attr, item)
}
