//! Print or validate show configuration

use anyhow::{Context, Result};
use flare_show::ShowConfig;

pub fn run(check: Option<&str>) -> Result<()> {
    if let Some(path) = check {
        let config = ShowConfig::load(path).with_context(|| format!("Invalid config {}", path))?;
        println!("{}: OK ({} message(s))", path, config.messages.len());
        return Ok(());
    }

    let toml = ShowConfig::default()
        .to_toml_string()
        .context("Failed to serialize default config")?;
    print!("{}", toml);
    Ok(())
}
