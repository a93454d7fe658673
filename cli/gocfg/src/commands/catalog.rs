//! `gocfg platforms`, `gocfg linkmodes`, and `gocfg catalog`.

use std::path::Path;

use anyhow::{bail, Context, Result};
use gocfg_catalog::parse::{generate_template, parse_catalog_toml, validate_catalog};
use gocfg_catalog::{LinkModeCatalog, PlatformCatalog};

/// One line per platform; `cgo_only` restricts to the cgo-capable subset.
pub fn render_platforms(catalog: &PlatformCatalog, cgo_only: bool) -> String {
    catalog
        .entries()
        .iter()
        .filter(|e| !cgo_only || e.cgo)
        .map(|e| {
            format!(
                "{:<20} {}",
                e.platform().to_string(),
                if e.cgo { "cgo" } else { "pure" }
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn platforms(catalog: &PlatformCatalog, cgo_only: bool) -> Result<()> {
    println!("{}", render_platforms(catalog, cgo_only));
    Ok(())
}

pub fn linkmodes(catalog: &LinkModeCatalog) -> Result<()> {
    for mode in catalog.modes() {
        println!("{mode}");
    }
    Ok(())
}

/// Validate a catalog file, reporting every issue.
pub fn check(path: &Path) -> Result<()> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let file = parse_catalog_toml(&content).with_context(|| format!("parsing {}", path.display()))?;
    match validate_catalog(&file) {
        Ok(()) => {
            println!(
                "{}: ok ({} platforms)",
                path.display(),
                file.platforms.len()
            );
            Ok(())
        }
        Err(issues) => {
            for issue in &issues {
                eprintln!("  {}", issue.message);
            }
            bail!("{}: {} issue(s)", path.display(), issues.len());
        }
    }
}

pub fn template() -> Result<()> {
    print!("{}", generate_template()?);
    Ok(())
}
