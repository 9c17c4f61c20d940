//! Project initialization.
//!
//! Creates a project directory with a default configuration and an empty
//! content directory.

use crate::{config::SiteConfig, log};
use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

/// Files to write ignore patterns to
const IGNORE_FILES: &[&str] = &[".gitignore"];

/// Create a new project at `config`'s root.
pub fn new_project(config: &SiteConfig) -> Result<()> {
    let root = config.get_root();

    if config.config_path.exists() {
        bail!(
            "Config file `{}` already exists. Remove it manually or init in a different path.",
            config.config_path.display()
        );
    }

    fs::create_dir_all(root).with_context(|| format!("Failed to create {}", root.display()))?;
    init_content_dir(&config.build.content)?;
    init_default_config(&config.config_path)?;
    init_ignored_files(root, &[config.build.output.as_path()])?;

    log!("init"; "created {}", root.display());
    Ok(())
}

/// Create the content directory, leaving an existing one untouched.
fn init_content_dir(content: &Path) -> Result<()> {
    if content.exists() && !content.is_dir() {
        bail!("`{}` exists and is not a directory", content.display());
    }
    fs::create_dir_all(content).with_context(|| format!("Failed to create {}", content.display()))
}

/// Write default configuration file
fn init_default_config(path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(&SiteConfig::default())?;
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Write ignore files listing generated paths, relative to `root` when possible.
fn init_ignored_files(root: &Path, paths: &[&Path]) -> Result<()> {
    let content = paths
        .iter()
        .map(|&p| p.strip_prefix(root).unwrap_or(p))
        .filter_map(|p| p.to_str())
        .map(|p| format!("/{p}/\n"))
        .collect::<String>();

    for filename in IGNORE_FILES {
        let path = root.join(filename);
        if !path.exists() {
            fs::write(&path, &content)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;
    use tempfile::TempDir;

    fn init_config(dir: &TempDir, name: &str) -> SiteConfig {
        let root = dir.path().to_str().unwrap();
        let cli = Cli::parse_from(["toolshelf", "--root", root, "init", name]);
        let mut config = SiteConfig::default();
        config.update_with_cli(&cli);
        config
    }

    #[test]
    fn test_new_project_layout() {
        let dir = TempDir::new().unwrap();
        let config = init_config(&dir, "tools");
        new_project(&config).unwrap();

        let root = dir.path().join("tools");
        assert!(root.join("content").is_dir());
        assert!(root.join("toolshelf.toml").is_file());
        assert_eq!(
            fs::read_to_string(root.join(".gitignore")).unwrap(),
            "/public/\n"
        );
    }

    #[test]
    fn test_written_config_round_trips() {
        let dir = TempDir::new().unwrap();
        let config = init_config(&dir, "tools");
        new_project(&config).unwrap();

        let loaded = SiteConfig::from_path(&config.config_path).unwrap();
        assert_eq!(loaded.base.title, SiteConfig::default().base.title);
        assert_eq!(loaded.build.index, "index.html");
        assert!(loaded.validate().is_ok());
    }

    #[test]
    fn test_refuses_existing_config() {
        let dir = TempDir::new().unwrap();
        let config = init_config(&dir, "tools");
        new_project(&config).unwrap();

        let err = new_project(&config).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_keeps_existing_gitignore() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("tools");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join(".gitignore"), "target/\n").unwrap();

        let config = init_config(&dir, "tools");
        new_project(&config).unwrap();

        assert_eq!(fs::read_to_string(root.join(".gitignore")).unwrap(), "target/\n");
    }
}
