//! blogcfg: site settings and post front-matter validation for a static blog
//!
//! This crate holds the configuration layer of a blog: the site-wide
//! settings record and the schema every post's front-matter is checked
//! against before the site is built.

pub mod commands;
pub mod config;
pub mod content;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Default content directory, relative to the site directory
pub const CONTENT_DIR: &str = "src/content/blog";

/// A blog site on disk
#[derive(Debug, Clone)]
pub struct Site {
    /// Site settings; the one instance for this build
    pub settings: config::SiteSettings,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding the blog posts
    pub content_dir: PathBuf,
}

impl Site {
    /// Open a site directory, loading its settings file
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let settings = config::SiteSettings::load(base_dir.join(config::SETTINGS_FILE))?;
        let content_dir = base_dir.join(CONTENT_DIR);

        Ok(Self {
            settings,
            base_dir,
            content_dir,
        })
    }

    /// Use a different content directory (relative paths are taken from the base directory)
    pub fn with_content_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.content_dir = self.base_dir.join(dir);
        self
    }

    /// Validate every post
    pub fn check(&self) -> Result<()> {
        commands::check::run(self)
    }

    /// Load every post, failing on any invalid entry
    pub fn posts(&self) -> Result<Vec<content::Post>> {
        Ok(content::loader::ContentLoader::new(self).load_posts()?)
    }

    /// Posts selected by the homepage filter
    pub fn homepage_posts(&self) -> Result<Vec<content::Post>> {
        let posts = self.posts()?;
        Ok(self
            .settings
            .homepage
            .apply(&posts)
            .into_iter()
            .cloned()
            .collect())
    }
}
