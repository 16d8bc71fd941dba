//! wasm-bindgen binding generation from TypeScript ambient declarations.
//!
//! `normalize-bindgen` reads `.d.ts` files made of `declare namespace`
//! blocks and writes the `#[wasm_bindgen]` extern declarations needed to
//! call them from Rust, one binding unit per namespace.
//!
//! # Architecture
//!
//! ```text
//! Declarations              Parsed                 Binding unit
//! ────────────        ──────────────────     ──────────────────────────
//! declare namespace ─>  Namespace          ┌─> extern "C" block
//!   class           ─>   ObjectDecl ───────┤     (classes, functions)
//!   function        ─>   FunctionDecl ─────┘
//!   interface       ─>   ObjectDecl ───────┐
//!   enum            ─>   EnumDecl ─────────┼─> local declarations
//!   type alias      ─>   TypeAliasDecl ────┤     (interfaces, int_enum!,
//!   "a" | "b"       ─>   (synthesized) ────┘      str_enum!)
//! ```
//!
//! Parsing is a backtracking recursive descent over a [`Cursor`]; types are
//! translated by [`types::TypeExpr::translate`] within a [`Session`] that
//! collects helper enums for anonymous string-literal unions.
//!
//! # Example
//!
//! ```
//! use normalize_bindgen::{BindgenOptions, generate};
//!
//! let source = "declare namespace demo {\n  export function ping(): void;\n}\n";
//! let units = generate(source, &BindgenOptions::default()).unwrap();
//!
//! assert_eq!(units[0].name, "demo");
//! assert!(units[0].code.contains("pub fn ping();"));
//! ```

pub mod context;
pub mod cursor;
pub mod decl;
pub mod docs;
pub mod emit;
pub mod error;
pub mod files;
pub mod ident;
pub mod namespace;
pub mod options;
pub mod scan;
pub mod types;

pub use context::{HelperRegistry, NamingPath, Session};
pub use cursor::Cursor;
pub use error::{Error, Result, Unsupported};
pub use files::{WriteError, write_bindings};
pub use namespace::{Namespace, NamespaceMember, parse_document};
pub use options::{BindgenOptions, ConfigError};
pub use types::{Ownership, TranslatedType, TypeExpr};

/// Generated bindings for one namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingUnit {
    /// Namespace name, e.g. `monaco.editor`.
    pub name: String,
    pub code: String,
}

impl BindingUnit {
    pub fn file_name(&self, extension: &str) -> String {
        format!("{}.{extension}", self.name)
    }
}

/// Parse a declaration file and translate every namespace in it.
pub fn generate(source: &str, options: &BindgenOptions) -> Result<Vec<BindingUnit>> {
    let namespaces = parse_document(source)?;
    let mut units = Vec::with_capacity(namespaces.len());
    for namespace in &namespaces {
        units.push(BindingUnit {
            name: namespace.name.clone(),
            code: namespace.to_rust(options)?,
        });
    }
    Ok(units)
}
