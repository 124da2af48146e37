//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::config::{SiteSettings, SETTINGS_FILE};
use crate::CONTENT_DIR;

/// Write starter settings and a first post into the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let settings_path = target_dir.join(SETTINGS_FILE);
    if settings_path.exists() {
        anyhow::bail!("File already exists: {:?}", settings_path);
    }

    // Create directory structure
    let content_dir = target_dir.join(CONTENT_DIR);
    fs::create_dir_all(&content_dir)?;

    let settings = serde_yaml::to_string(&SiteSettings::default())?;
    fs::write(&settings_path, format!("# Site settings\n{}", settings))?;
    tracing::info!("Created {:?}", settings_path);

    let post_path = content_dir.join("hello-world.md");
    if !post_path.exists() {
        let today = chrono::Local::now().date_naive();
        let post = format!(
            r#"---
title: Hello World
description: First post
date: {}
tags:
  - welcome
ogType: article
---

Welcome to the blog.
"#,
            today.format("%Y-%m-%d")
        );
        fs::write(&post_path, post)?;
        tracing::info!("Created {:?}", post_path);
    }

    Ok(())
}
