//! TOML parsing, serialization, and validation for catalog files.
//!
//! A catalog file replaces the built-in platform table (and optionally the
//! link-mode list) for hosts whose toolchain registry differs from stock Go:
//!
//! ```toml
//! linkmodes = ["normal", "pie"]
//!
//! [[platforms]]
//! goos = "linux"
//! goarch = "amd64"
//! cgo = true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{CatalogError, Result};
use crate::linkmode::{LinkMode, LinkModeCatalog};
use crate::platform::{PlatformCatalog, PlatformEntry};

/// On-disk form of a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFile {
    /// Accepted link modes; the built-in list when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkmodes: Option<Vec<LinkMode>>,
    /// Supported platforms.
    #[serde(default)]
    pub platforms: Vec<PlatformEntry>,
}

impl CatalogFile {
    /// Split into the two lookup tables used by the transition.
    pub fn into_catalogs(self) -> (PlatformCatalog, LinkModeCatalog) {
        let linkmodes = self
            .linkmodes
            .map(LinkModeCatalog::new)
            .unwrap_or_default();
        (PlatformCatalog::new(self.platforms), linkmodes)
    }
}

/// A validation issue found in a catalog file.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Human-readable description.
    pub message: String,
}

/// Load, parse, and validate a catalog from a `.catalog.toml` file.
pub fn load_catalog_toml(path: &Path) -> Result<(PlatformCatalog, LinkModeCatalog)> {
    if !path.exists() {
        return Err(CatalogError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    let file = parse_catalog_toml(&content)?;
    if let Err(issues) = validate_catalog(&file) {
        let detail = issues
            .iter()
            .map(|i| i.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(CatalogError::Validation { detail });
    }
    info!(
        path = %path.display(),
        platforms = file.platforms.len(),
        "loaded platform catalog"
    );
    Ok(file.into_catalogs())
}

/// Parse a catalog from a TOML string without validating it.
pub fn parse_catalog_toml(toml_str: &str) -> Result<CatalogFile> {
    let file: CatalogFile = toml::from_str(toml_str)?;
    Ok(file)
}

/// Serialize a pair of catalogs to pretty TOML.
pub fn catalog_to_toml(platforms: &PlatformCatalog, linkmodes: &LinkModeCatalog) -> Result<String> {
    let file = CatalogFile {
        linkmodes: Some(linkmodes.modes().to_vec()),
        platforms: platforms.entries().to_vec(),
    };
    let toml_str = toml::to_string_pretty(&file)?;
    Ok(toml_str)
}

/// Validate a catalog file for structural correctness.
///
/// Returns `Ok(())` if valid, or `Err(issues)` with a list of problems.
pub fn validate_catalog(file: &CatalogFile) -> std::result::Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    if file.platforms.is_empty() {
        issues.push(ValidationIssue {
            message: "catalog has no platforms".into(),
        });
    }

    for (i, entry) in file.platforms.iter().enumerate() {
        if file.platforms[..i]
            .iter()
            .any(|prev| prev.platform() == entry.platform())
        {
            issues.push(ValidationIssue {
                message: format!("platform {} is listed more than once", entry.platform()),
            });
        }
    }

    if let Some(modes) = &file.linkmodes {
        if modes.is_empty() {
            issues.push(ValidationIssue {
                message: "linkmodes is present but empty".into(),
            });
        }
        for (i, mode) in modes.iter().enumerate() {
            if modes[..i].contains(mode) {
                issues.push(ValidationIssue {
                    message: format!("link mode {mode} is listed more than once"),
                });
            }
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

/// Render the built-in catalogs as a starting point for a custom file.
pub fn generate_template() -> Result<String> {
    catalog_to_toml(&PlatformCatalog::builtin(), &LinkModeCatalog::builtin())
}
