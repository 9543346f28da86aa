use anyhow::Result;

use cocoon_core::AppConfig;

pub fn run(config: &AppConfig, init: bool) -> Result<()> {
    let path = AppConfig::config_path();

    if init {
        if path.exists() {
            println!("Config already exists: {}", path.display());
            return Ok(());
        }
        AppConfig::default().save()?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    let state = if path.exists() { "" } else { " (not created, using defaults)" };
    println!("Config: {}{}", path.display(), state);
    println!("Log:    {}", config.log_path().display());
    Ok(())
}
