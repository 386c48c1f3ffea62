use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use cargo_mocker_core::{TraitLocator, codegen::mock_source};

pub fn generate_command(filepath: &str, name: &str, output: Option<&Path>) -> Result<()> {
    debug!("generating mock for {name} from unit of {filepath}");

    let locator = TraitLocator::parse(filepath)
        .with_context(|| format!("failed to resolve unit of {filepath}"))?;
    let iface = locator.find(name)?;
    let source = mock_source(iface);

    match output {
        Some(path) => {
            fs::write(path, &source)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("✅ wrote Mock{} to {}", iface.name, path.display());
        }
        None => print!("{source}"),
    }
    Ok(())
}
