//! Site configuration (site.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use topicnav_static::{BuildConfig, SiteInfo};
use topicnav_topics::TOPICS_FILE;

/// Configuration file structure.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub site: SiteSection,
    #[serde(default)]
    pub build: BuildSection,
    #[serde(default)]
    pub server: ServerSection,
}

#[derive(Debug, Deserialize)]
pub struct SiteSection {
    #[serde(default = "default_site_dir")]
    pub dir: String,
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Target shown before the first click
    pub home: Option<String>,
    /// Stylesheet URLs linked before the shell's own CSS
    #[serde(default)]
    pub styles: Vec<String>,
    /// Script URLs loaded before the runtime
    #[serde(default)]
    pub scripts: Vec<String>,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            dir: default_site_dir(),
            output: default_output(),
            title: default_title(),
            base_url: default_base_url(),
            home: None,
            styles: vec![],
            scripts: vec![],
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BuildSection {
    #[serde(default = "default_minify")]
    pub minify: bool,
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            minify: default_minify(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_host")]
    pub host: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

fn default_site_dir() -> String {
    "site".to_string()
}
fn default_output() -> String {
    "dist".to_string()
}
fn default_title() -> String {
    "Documentation".to_string()
}
fn default_base_url() -> String {
    "/".to_string()
}
fn default_minify() -> bool {
    true
}
fn default_port() -> u16 {
    7777
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}

impl ConfigFile {
    pub fn site_dir(&self) -> PathBuf {
        PathBuf::from(&self.site.dir)
    }

    pub fn topics_path(&self) -> PathBuf {
        self.site_dir().join(TOPICS_FILE)
    }

    pub fn site_info(&self) -> SiteInfo {
        SiteInfo {
            title: self.site.title.clone(),
            base_url: self.site.base_url.clone(),
            styles: self.site.styles.clone(),
            scripts: self.site.scripts.clone(),
        }
    }

    /// Static build settings, with command-line overrides applied.
    pub fn build_config(&self, output: Option<PathBuf>, minify: Option<bool>) -> BuildConfig {
        BuildConfig {
            site_dir: self.site_dir(),
            output_dir: output.unwrap_or_else(|| PathBuf::from(&self.site.output)),
            minify: minify.unwrap_or(self.build.minify),
            base_url: self.site.base_url.clone(),
            title: self.site.title.clone(),
            home: self.site.home.clone(),
            styles: self.site.styles.clone(),
            scripts: self.site.scripts.clone(),
        }
    }
}

/// Load configuration from `path` if it exists.
///
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        tracing::debug!("No {} found, using defaults", path.display());
        return Ok(ConfigFile::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: ConfigFile =
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))?;
    tracing::info!("Loaded config from {}", path.display());

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn missing_file_uses_defaults() {
        let temp = tempdir().unwrap();
        let config = load_config(&temp.path().join("site.toml")).unwrap();

        assert_eq!(config.site.dir, "site");
        assert_eq!(config.site.output, "dist");
        assert_eq!(config.server.port, 7777);
        assert!(config.build.minify);
        assert_eq!(config.topics_path(), PathBuf::from("site").join("topics.json"));
    }

    #[test]
    fn partial_file_fills_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("site.toml");
        fs::write(
            &path,
            r#"
[site]
title = "Handbook"
home = "intro.html"
styles = ["https://cdn.example.com/bootstrap.css"]

[build]
minify = false
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();

        assert_eq!(config.site.title, "Handbook");
        assert_eq!(config.site.home.as_deref(), Some("intro.html"));
        assert_eq!(config.site.base_url, "/");
        assert_eq!(config.server.host, "127.0.0.1");

        let build = config.build_config(None, None);
        assert!(!build.minify);
        assert_eq!(build.output_dir, PathBuf::from("dist"));
        assert_eq!(build.styles.len(), 1);
    }

    #[test]
    fn overrides_win_over_file() {
        let config = ConfigFile::default();
        let build = config.build_config(Some(PathBuf::from("public")), Some(false));

        assert_eq!(build.output_dir, PathBuf::from("public"));
        assert!(!build.minify);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("site.toml");
        fs::write(&path, "[site\ntitle = ").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
    }
}
