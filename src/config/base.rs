//! `[base]` section configuration.
//!
//! Catalog page heading and the base URL artifacts are published under.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[base]` section in toolshelf.toml.
///
/// # Example
/// ```toml
/// [base]
/// title = "My Tools"
/// description = "Little helpers I wrote"
/// url = "https://alice.github.io/tools"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    /// Heading and `<title>` of the generated page.
    #[serde(default = "defaults::base::title")]
    #[educe(Default = defaults::base::title())]
    pub title: String,

    /// Subtitle shown under the heading.
    #[serde(default = "defaults::base::description")]
    #[educe(Default = defaults::base::description())]
    pub description: String,

    /// Base URL the artifacts are published under.
    /// When unset, catalog links are relative to the generated page.
    #[serde(default = "defaults::base::url")]
    #[educe(Default = defaults::base::url())]
    pub url: Option<String>,

    /// BCP 47 language code for the `<html lang>` attribute.
    #[serde(default = "defaults::base::language")]
    #[educe(Default = defaults::base::language())]
    pub language: String,
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;

    #[test]
    fn test_base_config_full() {
        let config = r#"
            [base]
            title = "Alice's Tools"
            description = "Small helpers"
            url = "https://alice.github.io/tools"
            language = "es"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.base.title, "Alice's Tools");
        assert_eq!(config.base.description, "Small helpers");
        assert_eq!(
            config.base.url,
            Some("https://alice.github.io/tools".to_string())
        );
        assert_eq!(config.base.language, "es");
    }

    #[test]
    fn test_base_config_defaults() {
        let config: SiteConfig = toml::from_str("[base]").unwrap();

        assert_eq!(config.base.title, "Toolshelf");
        assert_eq!(config.base.language, "en");
        assert_eq!(config.base.url, None);
    }

    #[test]
    fn test_unknown_field_rejection() {
        let config = r#"
            [base]
            title = "Test"
            author = "should_fail"
        "#;
        let result: Result<SiteConfig, _> = toml::from_str(config);

        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }
}
