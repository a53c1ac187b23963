//! The `kelime validate` command.

use anyhow::Result;

use kelime_core::catalog::{validate_catalog, Catalog};

use crate::commands::{resolve_config, Overrides};

pub fn execute(overrides: &Overrides) -> Result<()> {
    let config = resolve_config(overrides)?;
    let catalog = Catalog::load(&config.catalog, config.group_size)?;

    println!(
        "Catalog: {} words in {} groups of {}",
        catalog.len(),
        catalog.group_count(),
        catalog.group_size()
    );

    let warnings = validate_catalog(&catalog);
    for w in &warnings {
        let prefix = w
            .english
            .as_ref()
            .map(|e| format!("  [{e}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Catalog valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }
    Ok(())
}
