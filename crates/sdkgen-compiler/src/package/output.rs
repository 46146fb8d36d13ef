//! Rendered packages.

use std::path::{Path, PathBuf};

use super::Manifest;
use crate::{Error, Result};

/// One generated module, rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedModule {
    pub name: String,
    pub source: String,
}

/// A complete generated package, held in memory until written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub name: String,
    pub manifest: Manifest,
    /// Sorted by module name.
    pub modules: Vec<RenderedModule>,
}

impl Package {
    pub fn module(&self, name: &str) -> Option<&RenderedModule> {
        self.modules.iter().find(|module| module.name == name)
    }

    /// Relative file paths and contents: `mod.rs` first, then one file per
    /// module.
    pub fn files(&self) -> Vec<(PathBuf, String)> {
        let mut files = vec![(PathBuf::from("mod.rs"), self.manifest.render())];
        for module in &self.modules {
            files.push((
                PathBuf::from(format!("{}.rs", module.name)),
                module.source.clone(),
            ));
        }
        files
    }

    /// Write the package to `<out_dir>/<name>/` and return that directory.
    pub fn write(&self, out_dir: &Path) -> Result<PathBuf> {
        let root = out_dir.join(&self.name);
        std::fs::create_dir_all(&root).map_err(|err| Error::io(&root, err))?;
        for (relative, contents) in self.files() {
            let path = root.join(relative);
            std::fs::write(&path, contents).map_err(|err| Error::io(&path, err))?;
        }
        tracing::info!(path = %root.display(), modules = self.modules.len(), "package written");
        Ok(root)
    }
}
