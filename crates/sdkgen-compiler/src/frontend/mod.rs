//! GraphQL source lowering.
//!
//! - `schema` - SDL to [`Schema`]
//! - `document` - executable documents to [`Document`], with operation text
//!
//! The engine itself only sees the IR; anything that produces a `Schema` and
//! a `Document` (including the JSON form of the IR) can drive it.

mod document;
mod schema;

#[cfg(test)]
mod document_tests;
#[cfg(test)]
mod schema_tests;

use std::path::{Path, PathBuf};

use graphql_parser::schema::Type;
use sdkgen_core::{Document, Schema, TypeRef};

pub use document::{parse_document, parse_documents};
pub(crate) use document::with_typenames;
pub use schema::parse_schema;

use crate::{Error, Result};

const SOURCE_EXTENSIONS: [&str; 3] = ["graphql", "graphqls", "gql"];

pub(crate) fn lower_type(ty: &Type<'_, String>) -> TypeRef {
    match ty {
        Type::NamedType(name) => TypeRef::named(name).nullable(),
        Type::ListType(of) => TypeRef::list(lower_type(of)).nullable(),
        Type::NonNullType(of) => lower_type(of).non_null(),
    }
}

/// Load a schema from SDL files or a `.json` IR file.
///
/// A directory is read as the concatenation of its SDL files, sorted by path.
pub fn load_schema(path: &Path) -> Result<Schema> {
    if path.extension().is_some_and(|ext| ext == "json") {
        let text = read(path)?;
        return serde_json::from_str(&text).map_err(|err| Error::Parse {
            origin: path.display().to_string(),
            message: err.to_string(),
        });
    }

    let mut sdl = String::new();
    for file in source_files(path)? {
        sdl.push_str(&read(&file)?);
        sdl.push('\n');
    }
    parse_schema(&sdl)
}

/// Load every operation and fragment under `path`, files sorted by path.
pub fn load_documents(path: &Path) -> Result<Document> {
    let mut sources = Vec::new();
    for file in source_files(path)? {
        let text = read(&file)?;
        sources.push((file.display().to_string(), text));
    }
    parse_documents(&sources)
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|err| Error::io(path, err))
}

fn source_files(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let entries = std::fs::read_dir(path).map_err(|err| Error::io(path, err))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| Error::io(path, err))?;
        let file = entry.path();
        if file.is_dir() {
            files.extend(source_files(&file)?);
        } else if file
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
        {
            files.push(file);
        }
    }
    files.sort();
    Ok(files)
}
