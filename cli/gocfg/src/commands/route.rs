//! `gocfg route` — report which rule variant a declaration would use.

use anyhow::Result;
use gocfg_transition::gate::{self, RuleKind};
use gocfg_transition::RawAttributes;

/// Route name, or the concrete rule name when `kind` is given.
pub fn render(attrs: &RawAttributes, kind: Option<&RuleKind>) -> String {
    let route = gate::route(attrs);
    match kind {
        Some(kind) => kind.rule_for(route).to_string(),
        None => route.to_string(),
    }
}

pub fn run(attrs: &RawAttributes, kind: Option<&RuleKind>) -> Result<()> {
    println!("{}", render(attrs, kind));
    Ok(())
}
