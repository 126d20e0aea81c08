use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Fields, parse_macro_input};

/// Turns a struct of uniform values into a named uniform block.
///
/// Every named field maps to a shader uniform whose name is the field name in
/// lowerCamelCase (`model_matrix` -> `modelMatrix`). The macro keeps the struct
/// as written and generates:
///
/// - `<Name>Locations`, one `Option<UniformLocation>` per field;
/// - `<Name>::UNIFORM_NAMES`;
/// - `<Name>::locate(gpu, program)` and `<Name>::upload(&self, gpu, &locations)`.
///
/// Field types must implement `crate::uniforms::UniformValue`.
#[proc_macro_attribute]
pub fn uniform_block(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    let vis = &input.vis;
    let ident = &input.ident;
    let locations_ident = format_ident!("{}Locations", ident);

    let fields = if let Data::Struct(ref data_struct) = input.data {
        match &data_struct.fields {
            Fields::Named(fields) => fields.named.clone(),
            _ => panic!("Only named fields are supported for #[uniform_block]"),
        }
    } else {
        panic!("Only structs are supported for #[uniform_block]");
    };

    let idents: Vec<_> = fields.iter().filter_map(|f| f.ident.clone()).collect();
    let names: Vec<String> = idents
        .iter()
        .map(|i| camel_case(&i.to_string()))
        .collect();

    let location_fields = idents.iter().map(|f_ident| {
        quote! { #vis #f_ident: Option<crate::gpu::UniformLocation> }
    });

    let lookups = idents.iter().zip(&names).map(|(f_ident, name)| {
        quote! { #f_ident: gpu.uniform_location(program, #name) }
    });

    let uploads = idents.iter().map(upload_field);

    let expanded = quote! {
        #input

        #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
        #vis struct #locations_ident {
            #(#location_fields,)*
        }

        impl #ident {
            #vis const UNIFORM_NAMES: &'static [&'static str] = &[#(#names),*];

            #vis fn locate<G: crate::gpu::Gpu + ?Sized>(
                gpu: &G,
                program: crate::gpu::ProgramId,
            ) -> #locations_ident {
                #locations_ident {
                    #(#lookups,)*
                }
            }

            #vis fn upload<G: crate::gpu::Gpu + ?Sized>(
                &self,
                gpu: &G,
                locations: &#locations_ident,
            ) {
                #(#uploads)*
            }
        }
    };

    TokenStream::from(expanded)
}

fn upload_field(f_ident: &syn::Ident) -> TokenStream2 {
    quote! {
        if let Some(location) = locations.#f_ident {
            crate::uniforms::UniformValue::upload(&self.#f_ident, gpu, location);
        }
    }
}

fn camel_case(snake: &str) -> String {
    let mut out = String::with_capacity(snake.len());
    let mut upper = false;
    for c in snake.chars() {
        if c == '_' {
            upper = !out.is_empty();
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
