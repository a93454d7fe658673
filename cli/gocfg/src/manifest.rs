//! `gocfg.toml` project configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use gocfg_catalog::{parse::load_catalog_toml, LinkModeCatalog, PlatformCatalog};
use gocfg_transition::label::DEFAULT_REPO;
use gocfg_transition::{LabelResolver, Transition};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// File name searched for by [`GocfgManifest::find_and_load`].
pub const MANIFEST_NAME: &str = "gocfg.toml";

/// The top-level configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GocfgManifest {
    /// Where the engine's settings live.
    #[serde(default)]
    pub workspace: WorkspaceConfig,
    /// Replacement platform catalog.
    #[serde(default)]
    pub catalog: Option<CatalogConfig>,
}

/// Workspace section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Canonical name of the repository owning the `go/config` settings.
    #[serde(default = "default_repo")]
    pub repo: String,
    /// Whether that repository is the main workspace of the build.
    #[serde(default)]
    pub main: bool,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            repo: default_repo(),
            main: false,
        }
    }
}

fn default_repo() -> String {
    DEFAULT_REPO.to_string()
}

/// Catalog section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to a `.catalog.toml`, relative to the manifest directory.
    pub path: PathBuf,
}

/// Command-line overrides applied on top of the manifest.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub repo: Option<String>,
    pub main: bool,
    pub catalog: Option<PathBuf>,
}

impl GocfgManifest {
    /// Search upward from `start_dir` for a `gocfg.toml` file, parse and return it
    /// along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(MANIFEST_NAME);
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let manifest: GocfgManifest = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                debug!(path = %candidate.display(), "loaded manifest");
                return Ok(Some((manifest, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a manifest from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing gocfg.toml")
    }

    /// Catalog file path, resolved against the manifest directory.
    pub fn catalog_path(&self, dir: &Path) -> Option<PathBuf> {
        self.catalog.as_ref().map(|c| dir.join(&c.path))
    }

    /// Build the transition described by this manifest and `overrides`.
    pub fn transition(&self, dir: &Path, overrides: &Overrides) -> Result<Transition> {
        let repo = overrides.repo.as_deref().unwrap_or(&self.workspace.repo);
        let resolver = LabelResolver::new(repo, overrides.main || self.workspace.main);

        let catalog_path = overrides.catalog.clone().or_else(|| self.catalog_path(dir));
        let (platforms, linkmodes) = match catalog_path {
            Some(path) => load_catalog_toml(&path)
                .with_context(|| format!("loading catalog {}", path.display()))?,
            None => (PlatformCatalog::builtin(), LinkModeCatalog::builtin()),
        };

        Ok(Transition::new(platforms, linkmodes, resolver))
    }
}
