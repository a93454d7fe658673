//! `gocfg transition` — apply the transition to a settings file.

use std::path::Path;

use anyhow::{Context, Result};
use gocfg_transition::{RawAttributes, Settings, Transition};
use tracing::info;

/// Read ambient settings from a JSON file, or start empty.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let Some(path) = path else {
        return Ok(Settings::new());
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let settings: Settings = serde_json::from_str(&content)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(settings)
}

/// Apply `attrs` to `settings` and render the result as pretty JSON.
pub fn render(transition: &Transition, settings: &Settings, attrs: &RawAttributes) -> Result<String> {
    let out = transition.apply_raw(settings, attrs)?;
    info!(
        incoming = settings.len(),
        outgoing = out.len(),
        "applied transition"
    );
    Ok(serde_json::to_string_pretty(&out)?)
}

pub fn run(transition: &Transition, settings_path: Option<&Path>, attrs: &RawAttributes) -> Result<()> {
    let settings = load_settings(settings_path)?;
    println!("{}", render(transition, &settings, attrs)?);
    Ok(())
}
