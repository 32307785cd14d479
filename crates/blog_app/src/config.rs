use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use blog_core::SiteConfig;
use blog_logging::{blog_debug, blog_info};

/// Load the site configuration; a missing file yields the defaults.
pub(crate) fn load_site_config(path: &Path) -> Result<SiteConfig> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            blog_debug!("No config at {:?}; using defaults", path);
            return Ok(SiteConfig::default());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("reading config {}", path.display()));
        }
    };

    let config: SiteConfig = ron::from_str(&content)
        .with_context(|| format!("parsing config {}", path.display()))?;
    blog_info!("Loaded site config from {:?}", path);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use blog_core::DateLocale;

    #[test]
    fn missing_file_means_defaults() {
        let temp = tempfile::TempDir::new().unwrap();
        let config = load_site_config(&temp.path().join("blog.ron")).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn partial_file_overrides_some_fields() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("blog.ron");
        fs::write(
            &path,
            r#"(blog_title: "Field Notes", preview_length: 80, date_locale: English)"#,
        )
        .unwrap();
        let config = load_site_config(&path).unwrap();
        assert_eq!(config.blog_title, "Field Notes");
        assert_eq!(config.preview_length, 80);
        assert_eq!(config.date_locale, DateLocale::English);
        assert_eq!(config.tag_colors.len(), 8);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("blog.ron");
        fs::write(&path, "(blog_title: ").unwrap();
        assert!(load_site_config(&path).is_err());
    }
}
