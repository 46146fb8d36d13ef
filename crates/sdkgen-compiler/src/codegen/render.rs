//! Rust source rendering.

use super::items::{
    ClientDecl, ConstDecl, DispatchDecl, EnumDecl, Field, InputDecl, Item, MethodDecl, Module,
    StructDecl,
};
use crate::typegen::{Position, render};

/// Render a module as Rust source ending in exactly one newline.
pub fn render_module(module: &Module) -> String {
    let mut out = String::new();
    for line in &module.doc {
        if line.is_empty() {
            out.push_str("//!\n");
        } else {
            out.push_str(&format!("//! {line}\n"));
        }
    }
    if !module.doc.is_empty() {
        out.push('\n');
    }

    for spec in &module.imports {
        out.push_str(&format!("use {spec};\n"));
    }
    if !module.imports.is_empty() {
        out.push('\n');
    }

    for item in &module.items {
        match item {
            Item::Struct(decl) => render_struct(&mut out, decl),
            Item::Dispatch(decl) => render_dispatch(&mut out, decl),
            Item::Enum(decl) => render_enum(&mut out, decl),
            Item::Input(decl) => render_input(&mut out, decl),
            Item::Const(decl) => render_const(&mut out, decl),
            Item::Method(decl) => render_method(&mut out, decl),
            Item::Client(decl) => render_client(&mut out, decl),
        }
        out.push('\n');
    }

    out.truncate(out.trim_end().len());
    out.push('\n');
    out
}

fn push_doc(out: &mut String, doc: Option<&str>, indent: &str) {
    let Some(doc) = doc else {
        return;
    };
    for line in doc.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            out.push_str(&format!("{indent}///\n"));
        } else {
            out.push_str(&format!("{indent}/// {line}\n"));
        }
    }
}

fn push_rename(out: &mut String, ident: &str, wire_name: &str, indent: &str) {
    if ident != wire_name {
        out.push_str(&format!("{indent}#[serde(rename = \"{wire_name}\")]\n"));
    }
}

fn push_fields(out: &mut String, fields: &[Field], position: Position, rename: bool) {
    for field in fields {
        push_doc(out, field.doc.as_deref(), "    ");
        if rename {
            push_rename(out, &field.ident, &field.wire_name, "    ");
        }
        out.push_str(&format!(
            "    pub {}: {},\n",
            field.ident,
            render(&field.ty, position)
        ));
    }
}

fn render_struct(out: &mut String, decl: &StructDecl) {
    push_doc(out, decl.doc.as_deref(), "");
    out.push_str("#[derive(Debug, Clone, PartialEq, Deserialize)]\n");
    if decl.fields.is_empty() {
        out.push_str(&format!("pub struct {} {{}}\n", decl.name));
        return;
    }
    out.push_str(&format!("pub struct {} {{\n", decl.name));
    push_fields(out, &decl.fields, Position::Output, true);
    out.push_str("}\n");
}

/// The enum plus a `Deserialize` impl routing through `pick_branch`.
fn render_dispatch(out: &mut String, decl: &DispatchDecl) {
    out.push_str("#[derive(Debug, Clone, PartialEq)]\n");
    out.push_str(&format!("pub enum {} {{\n", decl.name));
    for variant in decl.branches.iter().chain([&decl.fallback]) {
        out.push_str(&format!("    {}({}),\n", variant.ident, variant.record));
    }
    out.push_str("}\n\n");

    out.push_str(&format!("impl<'de> Deserialize<'de> for {} {{\n", decl.name));
    out.push_str(
        "    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {\n",
    );
    out.push_str("        const BRANCHES: &[Branch] = &[\n");
    for variant in &decl.branches {
        out.push_str(&format!(
            "            Branch::new(\"{}\", &[{}]),\n",
            variant.typename,
            quoted(&variant.keys)
        ));
    }
    out.push_str("        ];\n");
    out.push_str(&format!(
        "        const FALLBACK: Fallback = Fallback::new(&[{}], &[{}]);\n\n",
        quoted(&decl.base_types),
        quoted(&decl.fallback.keys)
    ));

    let discriminator = match &decl.discriminator {
        Some(key) => format!("Some(\"{key}\")"),
        None => "None".to_string(),
    };
    out.push_str("        let mut value = serde_json::Value::deserialize(deserializer)?;\n");
    out.push_str(&format!(
        "        let picked = pick_branch(&mut value, {discriminator}, BRANCHES, &FALLBACK)\n"
    ));
    out.push_str("            .map_err(serde::de::Error::custom)?;\n");
    out.push_str("        let decoded = match picked {\n");
    for (index, variant) in decl.branches.iter().enumerate() {
        out.push_str(&format!(
            "            Some({index}) => serde_json::from_value(value).map(Self::{}),\n",
            variant.ident
        ));
    }
    out.push_str(&format!(
        "            _ => serde_json::from_value(value).map(Self::{}),\n",
        decl.fallback.ident
    ));
    out.push_str("        };\n");
    out.push_str("        decoded.map_err(serde::de::Error::custom)\n");
    out.push_str("    }\n");
    out.push_str("}\n");
}

fn quoted(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("\"{item}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_enum(out: &mut String, decl: &EnumDecl) {
    push_doc(out, decl.doc.as_deref(), "");
    out.push_str("#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]\n");
    out.push_str(&format!("pub enum {} {{\n", decl.name));
    for value in &decl.values {
        push_doc(out, value.doc.as_deref(), "    ");
        push_rename(out, &value.ident, &value.wire_name, "    ");
        out.push_str(&format!("    {},\n", value.ident));
    }
    out.push_str("}\n\n");

    out.push_str(&format!("impl {} {{\n", decl.name));
    out.push_str("    /// The GraphQL name of this value.\n");
    out.push_str("    pub fn as_str(self) -> &'static str {\n");
    out.push_str("        match self {\n");
    for value in &decl.values {
        out.push_str(&format!(
            "            Self::{} => \"{}\",\n",
            value.ident, value.wire_name
        ));
    }
    out.push_str("        }\n");
    out.push_str("    }\n");
    out.push_str("}\n\n");

    out.push_str(&format!("impl IntoInput for {} {{\n", decl.name));
    out.push_str("    fn into_input(self) -> InputValue {\n");
    out.push_str("        InputValue::String(self.as_str().to_string())\n");
    out.push_str("    }\n");
    out.push_str("}\n");
}

fn render_input(out: &mut String, decl: &InputDecl) {
    push_doc(out, decl.doc.as_deref(), "");
    if decl.is_defaultable() {
        out.push_str("#[derive(Debug, Clone, PartialEq, Default)]\n");
    } else {
        out.push_str("#[derive(Debug, Clone, PartialEq)]\n");
    }
    if decl.fields.is_empty() {
        out.push_str(&format!("pub struct {} {{}}\n\n", decl.name));
    } else {
        out.push_str(&format!("pub struct {} {{\n", decl.name));
        push_fields(out, &decl.fields, Position::Input, false);
        out.push_str("}\n\n");
    }

    out.push_str(&format!("impl IntoInput for {} {{\n", decl.name));
    out.push_str("    fn into_input(self) -> InputValue {\n");
    if decl.fields.is_empty() {
        out.push_str("        InputValue::object(Vec::<(&str, InputValue)>::new())\n");
    } else {
        out.push_str("        InputValue::object([\n");
        for field in &decl.fields {
            out.push_str(&format!(
                "            (\"{}\", self.{}.into_input()),\n",
                field.wire_name, field.ident
            ));
        }
        out.push_str("        ])\n");
    }
    out.push_str("    }\n");
    out.push_str("}\n");
}

fn render_const(out: &mut String, decl: &ConstDecl) {
    push_doc(out, decl.doc.as_deref(), "");
    out.push_str(&format!(
        "pub const {}: &str = {};\n",
        decl.name,
        raw_string(&decl.value)
    ));
}

/// `r"..."` with enough `#`s that `value` cannot close it early.
pub(crate) fn raw_string(value: &str) -> String {
    let mut longest = 0;
    let mut run: Option<usize> = None;
    for c in value.chars() {
        run = match (c, run) {
            ('"', _) => Some(0),
            ('#', Some(count)) => Some(count + 1),
            _ => None,
        };
        if let Some(count) = run {
            longest = longest.max(count + 1);
        }
    }
    let hashes = "#".repeat(longest);
    format!("r{hashes}\"{value}\"{hashes}")
}

fn render_method(out: &mut String, decl: &MethodDecl) {
    out.push_str(&format!("impl super::client::{} {{\n", decl.client));
    push_doc(out, decl.doc.as_deref(), "    ");

    let mut params = vec!["&self".to_string()];
    for param in &decl.params {
        params.push(format!(
            "{}: {}",
            param.ident,
            render(&param.ty, Position::Input)
        ));
    }
    out.push_str(&format!(
        "    pub async fn {}({}) -> Result<{}, ClientError> {{\n",
        decl.name,
        params.join(", "),
        decl.returns
    ));

    if decl.params.is_empty() {
        out.push_str("        let variables = Variables::new();\n");
    } else {
        out.push_str("        let variables = Variables::new()");
        for param in &decl.params {
            out.push_str(&format!(
                "\n            .with(\"{}\", {})",
                param.wire_name, param.ident
            ));
        }
        out.push_str(";\n");
    }
    out.push_str(&format!(
        "        let response = self.base.execute({}, variables).await?;\n",
        decl.operation
    ));
    out.push_str("        let data = self.base.get_data(response)?;\n");
    out.push_str("        decode(data)\n");
    out.push_str("    }\n");
    out.push_str("}\n");
}

fn render_client(out: &mut String, decl: &ClientDecl) {
    let name = &decl.name;
    push_doc(out, decl.doc.as_deref(), "");
    out.push_str("#[derive(Debug, Clone)]\n");
    out.push_str(&format!("pub struct {name} {{\n"));
    out.push_str("    pub(crate) base: BaseClient,\n");
    out.push_str("}\n\n");

    out.push_str(&format!("impl {name} {{\n"));
    out.push_str("    pub fn new(url: impl Into<String>) -> Self {\n");
    out.push_str("        Self::from_base(BaseClient::new(url))\n");
    out.push_str("    }\n\n");
    out.push_str("    /// Wrap a configured transport (headers, custom HTTP client).\n");
    out.push_str("    pub fn from_base(base: BaseClient) -> Self {\n");
    out.push_str("        Self { base }\n");
    out.push_str("    }\n\n");
    out.push_str("    /// Release this handle's share of the connection pool.\n");
    out.push_str("    pub fn close(self) {\n");
    out.push_str("        self.base.close();\n");
    out.push_str("    }\n");
    out.push_str("}\n\n");

    out.push_str(&format!("impl Deref for {name} {{\n"));
    out.push_str("    type Target = BaseClient;\n\n");
    out.push_str("    fn deref(&self) -> &BaseClient {\n");
    out.push_str("        &self.base\n");
    out.push_str("    }\n");
    out.push_str("}\n");
}
