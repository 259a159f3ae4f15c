//! Config command implementations

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::output::{print_error, print_info, print_success, print_warning};
use ov_core::config::{self, ConfigFile};

/// Config file in use: the `--config` override or the default location
pub fn resolve_path(config_path: Option<&PathBuf>) -> PathBuf {
    config_path
        .cloned()
        .unwrap_or_else(config::default_config_path)
}

/// Show the effective configuration
///
/// Missing keys are filled with defaults, so this prints every setting
/// even for a partial or missing file.
pub fn config_show(config_path: Option<&PathBuf>) -> Result<()> {
    let path = resolve_path(config_path);

    if path.exists() {
        print_info(&format!("Configuration file: {:?}", path));
    } else {
        print_warning(&format!("No configuration file found at {:?}", path));
        print_info("Showing defaults. Run 'overlayctl config init' to create one");
    }
    println!();

    let file = config::load_or_default(&path)
        .with_context(|| format!("Failed to load config from {:?}", path))?;
    println!("{}", render(&file)?);

    Ok(())
}

/// Print the config file path
pub fn config_path(config_path: Option<&PathBuf>) {
    println!("{}", resolve_path(config_path).display());
}

/// Write a default configuration file
pub fn config_init(config_path: Option<&PathBuf>, force: bool) -> Result<()> {
    let path = resolve_path(config_path);

    if path.exists() && !force {
        print_error(&format!("Config file already exists: {:?}", path));
        print_info("Use --force to overwrite");
        return Ok(());
    }

    write_default(&path)?;
    print_success(&format!("Created configuration file: {:?}", path));
    Ok(())
}

fn write_default(path: &Path) -> Result<()> {
    config::save_config(path, &ConfigFile::default())
        .with_context(|| format!("Failed to write config file: {:?}", path))
}

fn render(file: &ConfigFile) -> Result<String> {
    toml::to_string_pretty(file).context("Failed to serialize config")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_loadable_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        config_init(Some(&path), false).unwrap();

        let loaded = config::load_or_default(&path).unwrap();
        assert_eq!(loaded, ConfigFile::default());
    }

    #[test]
    fn test_init_does_not_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[renderer]\nx = 42\n").unwrap();

        config_init(Some(&path), false).unwrap();
        assert_eq!(config::load_or_default(&path).unwrap().renderer.x, 42);

        config_init(Some(&path), true).unwrap();
        assert_eq!(config::load_or_default(&path).unwrap().renderer.x, 0);
    }

    #[test]
    fn test_render_includes_every_section() {
        let rendered = render(&ConfigFile::default()).unwrap();
        assert!(rendered.contains("[renderer]"));
        assert!(rendered.contains("[supervisor]"));
        assert!(rendered.contains("[client]"));
        assert!(rendered.contains("port = 5010"));
        assert!(rendered.contains("handshake_timeout_ms = 10000"));
    }
}
