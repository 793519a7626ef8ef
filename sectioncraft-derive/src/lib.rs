use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput, Fields, FieldsNamed};

fn named_fields(input: &DeriveInput) -> Option<&FieldsNamed> {
    if let syn::Data::Struct(ref data) = input.data {
        if let Fields::Named(ref fields) = data.fields {
            return Some(fields);
        }
    }
    None
}

fn only_named_structs(input: &DeriveInput, derive: &str) -> TokenStream {
    TokenStream::from(
        syn::Error::new(
            input.ident.span(),
            format!("Only structs with named fields can derive `{derive}`"),
        )
        .to_compile_error(),
    )
}

/// This derives the `SizedProt` trait for structs
#[proc_macro_derive(SizedProt)]
pub fn derive_sized_prot(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let Some(fields) = named_fields(&input) else {
        return only_named_structs(&input, "SizedProt");
    };

    let field_vals = fields.named.iter().map(|field| {
        let name = &field.ident;
        quote!(crate::protocol_types::traits::SizedProt::prot_size(&self.#name))
    });
    let name = &input.ident;

    TokenStream::from(quote!(
        impl crate::protocol_types::traits::SizedProt for #name {
            fn prot_size(&self) -> usize {
                0 #(+ #field_vals)*
            }
        }
    ))
}

/// This derives the `WriteProt` trait for structs, writing fields in declaration order
#[proc_macro_derive(WriteProt)]
pub fn derive_write_prot(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let Some(fields) = named_fields(&input) else {
        return only_named_structs(&input, "WriteProt");
    };

    let field_vals = fields.named.iter().map(|field| {
        let name = &field.ident;
        quote!(crate::protocol_types::traits::WriteProt::write(&self.#name, stream)?;)
    });
    let name = &input.ident;

    TokenStream::from(quote!(
        impl crate::protocol_types::traits::WriteProt for #name {
            fn write(&self, stream: &mut impl std::io::Write) -> Result<(), crate::err::CodecError> {
                #(#field_vals)*
                Ok(())
            }
        }
    ))
}

/// This derives the `ReadProt` trait for structs, reading fields in declaration order
#[proc_macro_derive(ReadProt)]
pub fn derive_read_prot(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let Some(fields) = named_fields(&input) else {
        return only_named_structs(&input, "ReadProt");
    };

    let field_vals = fields.named.iter().map(|field| {
        let name = &field.ident;
        let ty = &field.ty;
        quote!(#name: <#ty as crate::protocol_types::traits::ReadProt>::read(stream)?,)
    });
    let name = &input.ident;

    TokenStream::from(quote!(
        impl crate::protocol_types::traits::ReadProt for #name {
            fn read(stream: &mut impl std::io::Read) -> Result<Self, crate::err::CodecError>
            where
                Self: Sized,
            {
                Ok(#name {
                    #(#field_vals)*
                })
            }
        }
    ))
}
