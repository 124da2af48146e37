//! Site settings (site.yml)

use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::content::PostFilter;

/// Settings file name, relative to the site directory
pub const SETTINGS_FILE: &str = "site.yml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read settings from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid settings: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Required setting `{0}` is empty")]
    Empty(&'static str),

    #[error("Setting `site` must be an absolute http(s) URL, got {0:?}")]
    SiteUrl(String),
}

/// Site-wide settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,

    // Identity
    pub site: String,
    pub title: String,
    pub slogan: String,
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(
        rename = "image_alt",
        default,
        deserialize_with = "non_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_alt: Option<String>,
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub social: Social,

    /// Posts shown on the home page
    pub homepage: PostFilter,

    // Features
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub google_analysis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<bool>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            lang: Some("es".to_string()),
            site: "https://yoursite.com".to_string(),
            title: "Your Site".to_string(),
            slogan: "The best SEO help".to_string(),
            image: Some("Image.webp".to_string()),
            image_alt: Some("Image alt".to_string()),
            description: Some("Page description.".to_string()),
            social: Social {
                github: Some("https://github.com/EloyEMC".to_string()),
                linkedin: Some("https://www.linkedin.com/in/eloymartinezemc/".to_string()),
                email: Some("example@gmail.com".to_string()),
                rss: Some(true),
            },
            homepage: PostFilter::default(),
            google_analysis: None,
            search: Some(true),
        }
    }
}

impl SiteSettings {
    /// Load settings from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_yaml(&content)?;
        tracing::debug!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    /// Parse and check settings from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let settings: SiteSettings = serde_yaml::from_str(content)?;
        settings.check()?;
        Ok(settings)
    }

    /// Check the required fields beyond their presence
    pub fn check(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("title", &self.title),
            ("slogan", &self.slogan),
            ("site", &self.site),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Empty(name));
            }
        }

        let host = self
            .site
            .strip_prefix("https://")
            .or_else(|| self.site.strip_prefix("http://"))
            .unwrap_or("");
        if host.is_empty() || host.starts_with('/') {
            return Err(ConfigError::SiteUrl(self.site.clone()));
        }

        Ok(())
    }

    pub fn search_enabled(&self) -> bool {
        self.search.unwrap_or(false)
    }

    pub fn rss_enabled(&self) -> bool {
        self.social.rss.unwrap_or(false)
    }

    pub fn analytics_id(&self) -> Option<&str> {
        self.google_analysis.as_deref()
    }

    /// Absolute URL for a site-relative path
    pub fn full_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.site.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Social profile links
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Social {
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, deserialize_with = "non_empty", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Whether an RSS feed is generated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rss: Option<bool>,
}

impl Social {
    /// Profile links that are set, in declaration order
    pub fn links(&self) -> Vec<(&'static str, &str)> {
        [
            ("github", &self.github),
            ("linkedin", &self.linkedin),
            ("email", &self.email),
        ]
        .into_iter()
        .filter_map(|(name, link)| link.as_deref().map(|l| (name, l)))
        .collect()
    }
}

/// Treat blank strings as unset
fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
site: https://blog.example.com
title: My Blog
slogan: Notes
social: {}
homepage:
  maxPosts: 3
"#;

    #[test]
    fn test_default_settings() {
        let settings = SiteSettings::default();
        assert_eq!(settings.title, "Your Site");
        assert_eq!(settings.lang.as_deref(), Some("es"));
        assert_eq!(settings.homepage.max_posts, 5);
        assert_eq!(settings.analytics_id(), None);
        assert!(settings.search_enabled());
        assert!(settings.rss_enabled());
        assert!(settings.check().is_ok());
    }

    #[test]
    fn test_parse_minimal_settings() {
        let settings = SiteSettings::from_yaml(MINIMAL).unwrap();
        assert_eq!(settings.title, "My Blog");
        assert_eq!(settings.homepage.max_posts, 3);
        assert_eq!(settings.lang, None);
        assert_eq!(settings.description, None);
        assert!(settings.social.links().is_empty());
        assert!(!settings.search_enabled());
        assert!(!settings.rss_enabled());
    }

    #[test]
    fn test_blank_optional_fields_are_absent() {
        let yaml = format!(
            "{}googleAnalysis: \"\"\nimage_alt: \"  \"\nsearch: true\n",
            MINIMAL
        );
        let settings = SiteSettings::from_yaml(&yaml).unwrap();
        assert_eq!(settings.google_analysis, None);
        assert_eq!(settings.image_alt, None);
        assert!(settings.search_enabled());
    }

    #[test]
    fn test_social_links() {
        let yaml = r#"
site: https://blog.example.com
title: My Blog
slogan: Notes
social:
  github: https://github.com/me
  linkedin: ""
  email: me@example.com
  rss: true
homepage:
  maxPosts: 5
  tags: [featured]
  excludeTags: [private]
"#;
        let settings = SiteSettings::from_yaml(yaml).unwrap();
        assert_eq!(
            settings.social.links(),
            vec![("github", "https://github.com/me"), ("email", "me@example.com")]
        );
        assert!(settings.rss_enabled());
        assert_eq!(settings.homepage.tags, vec!["featured"]);
        assert_eq!(settings.homepage.exclude_tags, vec!["private"]);
    }

    #[test]
    fn test_missing_required_field() {
        let yaml = MINIMAL.replace("slogan: Notes\n", "");
        let err = SiteSettings::from_yaml(&yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().contains("slogan"));
    }

    #[test]
    fn test_empty_required_field() {
        let yaml = MINIMAL.replace("title: My Blog", "title: \"\"");
        let err = SiteSettings::from_yaml(&yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Empty("title")));
    }

    #[test]
    fn test_site_must_be_absolute_url() {
        for site in ["blog.example.com", "https://", "ftp://example.com"] {
            let yaml = MINIMAL.replace("https://blog.example.com", site);
            let err = SiteSettings::from_yaml(&yaml).unwrap_err();
            assert!(matches!(err, ConfigError::SiteUrl(_)), "{}", site);
        }
    }

    #[test]
    fn test_full_url() {
        let settings = SiteSettings::from_yaml(&MINIMAL.replace(".com", ".com/")).unwrap();
        assert_eq!(settings.full_url("/rss.xml"), "https://blog.example.com/rss.xml");
    }

    #[test]
    fn test_round_trip_default() {
        let yaml = serde_yaml::to_string(&SiteSettings::default()).unwrap();
        assert!(yaml.contains("maxPosts: 5"));
        assert!(!yaml.contains("googleAnalysis"));
        assert_eq!(SiteSettings::from_yaml(&yaml).unwrap(), SiteSettings::default());
    }
}
