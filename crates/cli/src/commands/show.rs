use anyhow::{Context, Result};
use tracing::debug;

use cargo_mocker_core::TraitLocator;

pub fn show_command(filepath: &str, name: &str, json: bool) -> Result<()> {
    debug!("showing trait {name} from unit of {filepath}");

    let locator = TraitLocator::parse(filepath)
        .with_context(|| format!("failed to resolve unit of {filepath}"))?;
    let iface = locator.find(name)?;

    if json {
        println!("{}", serde_json::to_string_pretty(iface)?);
        return Ok(());
    }

    println!("trait {} ({})", iface.name, iface.source_file.display());
    for method in &iface.methods {
        println!("  {method};");
    }
    Ok(())
}
