//! Handler functions for `hoa config` commands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use hoa::HoaConfig;
use hoa::core::config::PROJECT_NAME;

use crate::cli::ConfigAction;

/// Dispatch a config subcommand.
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path(config_path),
        ConfigAction::Show => cmd_config_show(config_path),
        ConfigAction::Init { file, force } => {
            let path = init_target(file.as_deref())?;
            cmd_config_init(&path, force)?;
            println!("Config file created at {}", path.display());
            Ok(())
        }
    }
}

/// Show the resolved config file path.
pub fn cmd_config_path(config_path: Option<&str>) -> Result<()> {
    let Some(path) = HoaConfig::resolve_config_path(config_path) else {
        bail!("Could not determine config directory for this platform");
    };
    println!("{}", path.display());
    if !path.exists() {
        eprintln!("(file does not exist; run `{PROJECT_NAME} config init` to create it)");
    }
    Ok(())
}

/// Print the effective configuration.
pub fn cmd_config_show(config_path: Option<&str>) -> Result<()> {
    let config = HoaConfig::load(config_path)?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}

fn init_target(file: Option<&str>) -> Result<PathBuf> {
    match file {
        Some(path) => Ok(PathBuf::from(path)),
        None => HoaConfig::default_config_path().context("Could not determine config directory"),
    }
}

/// Write the default configuration to `path`.
pub fn cmd_config_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let toml = HoaConfig::default().to_toml_string()?;
    std::fs::write(path, toml).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_loadable_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/config.toml");

        cmd_config_init(&path, false).unwrap();

        let loaded = HoaConfig::from_file(&path).unwrap();
        assert_eq!(loaded, HoaConfig::default());
    }

    #[test]
    fn test_init_refuses_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "# mine").unwrap();

        let err = cmd_config_init(&path, false).unwrap_err();
        assert!(err.to_string().contains("--force"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine");

        cmd_config_init(&path, true).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("[harvest]"));
    }

    #[test]
    fn test_explicit_init_target() {
        assert_eq!(init_target(Some("/tmp/x.toml")).unwrap(), PathBuf::from("/tmp/x.toml"));
    }
}
