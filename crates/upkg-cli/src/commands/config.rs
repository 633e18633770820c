use anyhow::Result;
use upkg_config::Config;

pub fn handle(path_only: bool, config: &Config) -> Result<()> {
    let path = Config::config_path();
    if path_only {
        println!("{}", path.display());
        return Ok(());
    }

    println!("# {}", path.display());
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
