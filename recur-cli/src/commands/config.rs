use anyhow::Result;
use owo_colors::OwoColorize;

use crate::recur_config::RecurConfig;

pub fn path() -> Result<()> {
    println!("{}", RecurConfig::config_path()?.display());
    Ok(())
}

pub fn init(force: bool) -> Result<()> {
    let path = RecurConfig::config_path()?;

    if path.exists() && !force {
        println!("Config already exists at {}", path.display());
        println!("{}", "Use --force to overwrite it.".dimmed());
        return Ok(());
    }

    RecurConfig::create_default_config(&path)?;
    println!("{} {}", "Created".green(), path.display());
    Ok(())
}

pub fn show(settings: &RecurConfig) -> Result<()> {
    print!("{}", toml::to_string_pretty(settings)?);
    Ok(())
}
