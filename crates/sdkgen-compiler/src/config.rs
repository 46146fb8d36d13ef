//! Generator configuration.
//!
//! [`Config`] is what the engine reads; [`FileConfig`] is the on-disk
//! `sdkgen.toml` that the CLI turns into one.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::{Error, Result};

/// Configuration for one generation run.
#[derive(Clone, Debug)]
pub struct Config {
    /// Name of the generated package directory
    pub(crate) package_name: String,
    /// Name of the generated client struct
    pub(crate) client_name: String,
    /// Emit schema descriptions as doc comments, plus a generated-file header
    pub(crate) include_comments: bool,
    /// Custom scalar name -> Rust type path
    pub(crate) scalars: IndexMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            package_name: "graphql_client".to_string(),
            client_name: "Client".to_string(),
            include_comments: true,
            scalars: IndexMap::new(),
        }
    }
}

impl Config {
    /// Create a new Config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the generated package (directory and module) name.
    pub fn package_name(mut self, value: impl Into<String>) -> Self {
        self.package_name = value.into();
        self
    }

    /// Set the name of the generated client struct.
    pub fn client_name(mut self, value: impl Into<String>) -> Self {
        self.client_name = value.into();
        self
    }

    /// Set whether schema descriptions become doc comments.
    pub fn include_comments(mut self, value: bool) -> Self {
        self.include_comments = value;
        self
    }

    /// Map a custom scalar to a Rust type path.
    ///
    /// The type must implement `Deserialize`, `Clone`, `Debug` and
    /// `PartialEq`, and `sdkgen_client::IntoInput` when used in arguments.
    /// Unmapped custom scalars become `serde_json::Value`.
    pub fn scalar(mut self, graphql_name: impl Into<String>, rust_type: impl Into<String>) -> Self {
        self.scalars.insert(graphql_name.into(), rust_type.into());
        self
    }

    /// Reject names that cannot be used as Rust identifiers.
    pub fn validate(&self) -> Result<()> {
        if !is_identifier(&self.package_name) {
            return Err(Error::Config(format!(
                "`{}` is not a valid package name",
                self.package_name
            )));
        }
        if !is_identifier(&self.client_name) {
            return Err(Error::Config(format!(
                "`{}` is not a valid client name",
                self.client_name
            )));
        }
        Ok(())
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !sdkgen_core::utils::is_rust_keyword(name)
}

/// The `sdkgen.toml` file.
///
/// Relative paths are resolved against the directory holding the file.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Schema file (`.graphql` SDL or `.json` IR), or a directory of SDL files
    pub schema_path: PathBuf,
    /// Operation file or directory of operation files
    pub queries_path: PathBuf,
    #[serde(default = "default_package_name")]
    pub target_package_name: String,
    /// Directory the package directory is written into
    #[serde(default = "default_package_path")]
    pub target_package_path: PathBuf,
    #[serde(default = "default_client_name")]
    pub client_name: String,
    #[serde(default = "default_include_comments")]
    pub include_comments: bool,
    #[serde(default)]
    pub scalars: IndexMap<String, ScalarEntry>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScalarEntry {
    #[serde(rename = "type")]
    pub rust_type: String,
}

fn default_package_name() -> String {
    "graphql_client".to_string()
}

fn default_package_path() -> PathBuf {
    PathBuf::from(".")
}

fn default_client_name() -> String {
    "Client".to_string()
}

fn default_include_comments() -> bool {
    true
}

impl FileConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|err| Error::Config(err.to_string()))
    }

    /// Read `path` and resolve its relative paths against its directory.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|err| Error::io(path, err))?;
        let mut config = Self::from_toml(&text)?;
        if let Some(base) = path.parent() {
            config.rebase(base);
        }
        Ok(config)
    }

    fn rebase(&mut self, base: &Path) {
        for path in [
            &mut self.schema_path,
            &mut self.queries_path,
            &mut self.target_package_path,
        ] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }

    /// Engine configuration described by this file.
    pub fn generator_config(&self) -> Config {
        let mut config = Config::new()
            .package_name(&self.target_package_name)
            .client_name(&self.client_name)
            .include_comments(self.include_comments);
        for (name, entry) in &self.scalars {
            config = config.scalar(name, &entry.rust_type);
        }
        config
    }
}
