//! Link modes (`-buildmode`) a Go target may be built with.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// A Go link mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkMode {
    Normal,
    Shared,
    Pie,
    Plugin,
    CShared,
    CArchive,
}

impl LinkMode {
    /// Every known link mode, in catalog order.
    pub const ALL: [LinkMode; 6] = [
        LinkMode::Normal,
        LinkMode::Shared,
        LinkMode::Pie,
        LinkMode::Plugin,
        LinkMode::CShared,
        LinkMode::CArchive,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            LinkMode::Normal => "normal",
            LinkMode::Shared => "shared",
            LinkMode::Pie => "pie",
            LinkMode::Plugin => "plugin",
            LinkMode::CShared => "c-shared",
            LinkMode::CArchive => "c-archive",
        }
    }
}

impl fmt::Display for LinkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LinkMode {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LinkMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| CatalogError::UnknownName {
                kind: "linkmode",
                value: s.to_string(),
            })
    }
}

/// The set of link modes a transition accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkModeCatalog {
    modes: Vec<LinkMode>,
}

impl LinkModeCatalog {
    /// Build a catalog from an explicit list, keeping the given order.
    pub fn new(modes: Vec<LinkMode>) -> Self {
        Self { modes }
    }

    /// The full set of link modes the Go toolchain understands.
    pub fn builtin() -> Self {
        Self::new(LinkMode::ALL.to_vec())
    }

    pub fn contains(&self, mode: LinkMode) -> bool {
        self.modes.contains(&mode)
    }

    pub fn modes(&self) -> &[LinkMode] {
        &self.modes
    }

    /// Comma-separated list of the accepted modes, for error messages.
    pub fn describe(&self) -> String {
        self.modes
            .iter()
            .map(LinkMode::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for LinkModeCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hyphenated_modes() {
        assert_eq!("c-shared".parse::<LinkMode>().unwrap(), LinkMode::CShared);
        assert_eq!("c-archive".parse::<LinkMode>().unwrap(), LinkMode::CArchive);
        assert!("c_shared".parse::<LinkMode>().is_err());
    }

    #[test]
    fn builtin_describe() {
        assert_eq!(
            LinkModeCatalog::builtin().describe(),
            "normal, shared, pie, plugin, c-shared, c-archive"
        );
    }

    #[test]
    fn restricted_catalog() {
        let catalog = LinkModeCatalog::new(vec![LinkMode::Normal, LinkMode::Pie]);
        assert!(catalog.contains(LinkMode::Pie));
        assert!(!catalog.contains(LinkMode::Plugin));
        assert_eq!(catalog.describe(), "normal, pie");
    }

    #[test]
    fn auto_is_not_a_mode() {
        assert!("auto".parse::<LinkMode>().is_err());
    }
}
