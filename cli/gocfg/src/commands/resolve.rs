//! `gocfg resolve` — show how setting labels are rewritten.

use anyhow::Result;
use gocfg_transition::LabelResolver;

pub fn run(resolver: &LabelResolver, labels: &[String]) -> Result<()> {
    for label in labels {
        println!("{}", resolver.resolve(label));
    }
    Ok(())
}
