//! Module syntax model.
//!
//! The generator builds these; [`render_module`](super::render_module) turns
//! them into Rust source. Type positions hold [`TypeExpr`]s so the renderer
//! can pick output or input syntax per item kind.

use crate::package::{ImportSpec, SymbolKind, SymbolRegistry};
use crate::typegen::TypeExpr;
use crate::Result;

/// Module holding the generated client struct and its constructors.
pub const CLIENT_MODULE: &str = "client";

/// One generated Rust module.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub name: String,
    /// Inner doc lines (`//!`).
    pub doc: Vec<String>,
    /// `use` items, in render order.
    pub imports: Vec<ImportSpec>,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    /// A response record.
    Struct(StructDecl),
    /// A polymorphic field: one variant per branch record plus the base.
    Dispatch(DispatchDecl),
    Enum(EnumDecl),
    Input(InputDecl),
    Const(ConstDecl),
    /// An operation method on the generated client.
    Method(MethodDecl),
    Client(ClientDecl),
}

/// A record or input-object field.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub ident: String,
    /// Response key or input field name on the wire.
    pub wire_name: String,
    pub ty: TypeExpr,
    pub doc: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructDecl {
    pub name: String,
    pub doc: Option<String>,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DispatchVariant {
    pub ident: String,
    /// Record the variant wraps.
    pub record: String,
    /// Concrete type name compared against the discriminator.
    pub typename: String,
    /// Response keys of the record, for structural matching.
    pub keys: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DispatchDecl {
    pub name: String,
    /// Response key carrying `__typename`.
    pub discriminator: Option<String>,
    pub branches: Vec<DispatchVariant>,
    /// Variant wrapping the base record, used for `base_types`.
    pub fallback: DispatchVariant,
    /// Possible types without a branch, in schema order.
    pub base_types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumValue {
    pub ident: String,
    pub wire_name: String,
    pub doc: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumDecl {
    pub name: String,
    pub doc: Option<String>,
    pub values: Vec<EnumValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InputDecl {
    pub name: String,
    pub doc: Option<String>,
    pub fields: Vec<Field>,
}

impl InputDecl {
    /// Every field may be left out, so `Default` is all-missing.
    pub fn is_defaultable(&self) -> bool {
        self.fields.iter().all(|field| field.ty.is_optional())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstDecl {
    pub name: String,
    pub doc: Option<String>,
    /// Rendered as a raw string literal.
    pub value: String,
}

/// A method parameter bound to one operation variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub ident: String,
    pub wire_name: String,
    /// Rendered in input position.
    pub ty: TypeExpr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub client: String,
    pub name: String,
    pub doc: Option<String>,
    pub params: Vec<Param>,
    /// Constant holding the operation text.
    pub operation: String,
    /// Root record the response decodes into.
    pub returns: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientDecl {
    pub name: String,
    pub doc: Option<String>,
}

impl ClientDecl {
    /// Inherent methods the client itself defines.
    pub const METHODS: [&'static str; 3] = ["new", "from_base", "close"];
}

impl Item {
    /// The name this item defines and the module it lands in.
    fn symbol<'i>(&'i self, module: &'i str) -> (&'i str, SymbolKind, &'i str) {
        match self {
            Item::Struct(decl) => (&decl.name, SymbolKind::Type, module),
            Item::Dispatch(decl) => (&decl.name, SymbolKind::Type, module),
            Item::Enum(decl) => (&decl.name, SymbolKind::Type, module),
            Item::Input(decl) => (&decl.name, SymbolKind::Type, module),
            Item::Client(decl) => (&decl.name, SymbolKind::Type, module),
            Item::Const(decl) => (&decl.name, SymbolKind::Constant, module),
            Item::Method(decl) => (&decl.name, SymbolKind::Function, CLIENT_MODULE),
        }
    }
}

impl Module {
    /// Record every item in `registry` and re-export the module's public
    /// types and constants from the package root.
    ///
    /// Methods are registered against the client module, where they become
    /// callable, and are not re-exported.
    pub fn publish(&self, registry: &mut SymbolRegistry) -> Result<()> {
        let mut exported = Vec::new();
        for item in &self.items {
            let (name, kind, module) = item.symbol(&self.name);
            registry.define(name, kind, module)?;
            if kind != SymbolKind::Function {
                exported.push(name);
            }
            if let Item::Client(_) = item {
                for method in ClientDecl::METHODS {
                    registry.define(method, SymbolKind::Function, module)?;
                }
            }
        }
        registry.reexport(ImportSpec::new(&self.name, 1, exported));
        Ok(())
    }
}
