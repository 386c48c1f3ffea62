use anyhow::{Context, Result};
use tracing::debug;

use cargo_mocker_core::TraitLocator;

pub fn list_command(filepath: &str, json: bool) -> Result<()> {
    debug!("listing traits for unit of {filepath}");

    let locator = TraitLocator::parse(filepath)
        .with_context(|| format!("failed to resolve unit of {filepath}"))?;
    let interfaces = locator.interfaces();

    if json {
        println!("{}", serde_json::to_string_pretty(&interfaces)?);
        return Ok(());
    }

    println!(
        "🔍 {} trait(s) in the unit of {}",
        interfaces.len(),
        locator.unit().path().display()
    );
    for iface in interfaces {
        println!("  {} ({} methods)", iface.name, iface.methods.len());
    }
    Ok(())
}
