//! Config subcommands handler

use anyhow::Result;
use std::path::Path;

use orilabel::Config;

/// Show the effective configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show(config: &Config) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}

/// Print the path of the config file in use.
#[cfg(not(tarpaulin_include))]
pub fn handle_path(path: &Path) -> Result<()> {
    println!("{}", path.display());
    if !path.exists() {
        println!("(not present, defaults are used)");
    }
    Ok(())
}
