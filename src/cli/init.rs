use std::path::Path;

use anyhow::Context;
use bloodline::{Config, Store};
use tracing::instrument;

#[instrument]
pub fn run(root: &Path) -> anyhow::Result<()> {
    let store = Store::open(root.to_path_buf());
    let mut created = store
        .ensure_initialized()
        .context("Failed to initialize the registry")?;

    let config_path = root.join("config.toml");
    if !config_path.exists() {
        Config::default()
            .save(&config_path)
            .context("Failed to create config.toml")?;
        created.push(config_path);
    }

    if created.is_empty() {
        println!("Registry in {} is already initialized", root.display());
        return Ok(());
    }

    println!("Initialized donor registry in {}", root.display());
    for path in &created {
        let name = path.strip_prefix(root).unwrap_or(path);
        println!("  Created: {}", name.display());
    }

    println!();
    println!("Next steps:");
    println!(
        "  blood donor --name \"Jane Doe\" --age 30 --blood O- --location Springfield \
         --contact 5551234567"
    );

    Ok(())
}
