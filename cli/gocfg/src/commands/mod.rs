//! CLI command implementations.

pub mod catalog;
pub mod resolve;
pub mod route;
pub mod transition;

use anyhow::{bail, Result};
use gocfg_transition::attrs::keys;
use gocfg_transition::{RawAttributes, RawValue};

/// Build raw attributes from `key=value` arguments.
///
/// `gotags` takes a comma-separated list; every other key takes a string.
pub fn parse_attrs(pairs: &[String]) -> Result<RawAttributes> {
    let mut attrs = RawAttributes::new();
    for pair in pairs {
        let Some((key, value)) = pair.split_once('=') else {
            bail!("invalid attribute '{pair}': expected key=value");
        };
        let key = key.trim();
        if key.is_empty() {
            bail!("invalid attribute '{pair}': empty key");
        }
        let value = if key == keys::GOTAGS {
            RawValue::List(
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
                    .collect(),
            )
        } else {
            RawValue::Str(value.to_string())
        };
        attrs.insert(key, value);
    }
    Ok(attrs)
}
