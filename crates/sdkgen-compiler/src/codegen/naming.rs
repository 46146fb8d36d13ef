//! Collision-free identifiers.

use std::collections::BTreeSet;

/// Identifiers already taken in one Rust namespace.
#[derive(Clone, Debug, Default)]
pub(crate) struct Names {
    used: BTreeSet<String>,
}

impl Names {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Mark `name` as taken without handing it out.
    pub(crate) fn reserve(&mut self, name: impl Into<String>) {
        self.used.insert(name.into());
    }

    /// `base` if free, otherwise `base2`, `base3`, ...
    pub(crate) fn unique(&mut self, base: &str) -> String {
        if self.used.insert(base.to_string()) {
            return base.to_string();
        }

        let mut counter = 2;
        loop {
            let name = format!("{base}{counter}");
            if self.used.insert(name.clone()) {
                return name;
            }
            counter += 1;
        }
    }
}
