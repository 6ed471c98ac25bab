use darling::{FromDeriveInput, FromVariant, ast};
use heck::ToSnakeCase;
use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{DeriveInput, parse_macro_input};

#[derive(Debug, FromDeriveInput)]
#[darling(supports(enum_unit))]
struct FunctionDeriveInput {
    ident: syn::Ident,
    data: ast::Data<FunctionVariant, ()>,
}

#[derive(Debug, FromVariant)]
#[darling(attributes(function))]
struct FunctionVariant {
    ident: syn::Ident,
    #[darling(default)]
    ignore: bool,
}

pub fn where_function_methods_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let enum_info = match FunctionDeriveInput::from_derive_input(&input) {
        Ok(v) => v,
        Err(e) => return e.write_errors().into(),
    };

    let enum_name = &enum_info.ident;

    let Some(variants) = enum_info.data.take_enum() else {
        return syn::Error::new_spanned(&input.ident, "only enums are supported")
            .to_compile_error()
            .into();
    };

    let methods = variants.iter().filter(|var| !var.ignore).map(|var| {
        let var_name = &var.ident;
        let snake = var_name.to_string().to_snake_case();
        let sql = snake.to_uppercase();

        let where_fn = format_ident!("where_{}", snake);
        let or_where_fn = format_ident!("or_where_{}", snake);
        let where_eq_fn = format_ident!("where_{}_eq", snake);
        let or_where_eq_fn = format_ident!("or_where_{}_eq", snake);

        let where_doc = format!("Adds `{sql}(column) <operator> ?` joined with `AND`.");
        let or_where_doc = format!("Adds `{sql}(column) <operator> ?` joined with `OR`.");
        let where_eq_doc = format!("Adds `{sql}(column)=?` joined with `AND`.");
        let or_where_eq_doc = format!("Adds `{sql}(column)=?` joined with `OR`.");

        quote! {
            #[doc = #where_doc]
            pub fn #where_fn<C, O, V>(&mut self, column: C, operator: O, value: V) -> crate::Result<&mut Self>
            where
                C: crate::IntoIdent,
                O: crate::IntoOperator,
                V: crate::IntoBind,
            {
                self.where_function_expr(crate::Logic::And, #enum_name::#var_name, column, operator, value)
            }

            #[doc = #or_where_doc]
            pub fn #or_where_fn<C, O, V>(&mut self, column: C, operator: O, value: V) -> crate::Result<&mut Self>
            where
                C: crate::IntoIdent,
                O: crate::IntoOperator,
                V: crate::IntoBind,
            {
                self.where_function_expr(crate::Logic::Or, #enum_name::#var_name, column, operator, value)
            }

            #[doc = #where_eq_doc]
            pub fn #where_eq_fn<C, V>(&mut self, column: C, value: V) -> crate::Result<&mut Self>
            where
                C: crate::IntoIdent,
                V: crate::IntoBind,
            {
                self.where_function_expr(crate::Logic::And, #enum_name::#var_name, column, crate::Operator::Eq, value)
            }

            #[doc = #or_where_eq_doc]
            pub fn #or_where_eq_fn<C, V>(&mut self, column: C, value: V) -> crate::Result<&mut Self>
            where
                C: crate::IntoIdent,
                V: crate::IntoBind,
            {
                self.where_function_expr(crate::Logic::Or, #enum_name::#var_name, column, crate::Operator::Eq, value)
            }
        }
    });

    quote! {
        impl crate::Builder {
            #(#methods)*
        }
    }
    .into()
}
