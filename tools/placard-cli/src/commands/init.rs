//! Write a default event config.

use std::path::PathBuf;

use placard_common::config::EventConfig;

pub fn run(out: PathBuf) -> anyhow::Result<()> {
    if out.exists() {
        anyhow::bail!("{} already exists; not overwriting", out.display());
    }

    let config = EventConfig::default();
    config.save(&out)?;

    println!("Config written to {}", out.display());
    println!("  Event: {} ({})", config.event.display_name, config.event.slug);
    println!("  API: {}", config.api.base_url);
    println!("  Token variable: {}", config.api.token_env);
    println!();
    println!("Asset paths are relative to the config file:");
    println!("  {}", config.style.font_path.display());
    for template in &config.templates {
        println!("  {}", template.path.display());
    }

    Ok(())
}
