//! Validate settings and every post

use anyhow::Result;

use crate::content::loader::{ContentLoader, LoadError};
use crate::Site;

/// Check every post against the schema, printing all problems found
pub fn run(site: &Site) -> Result<()> {
    print!("{}", summary(site));

    match ContentLoader::new(site).load_posts() {
        Ok(posts) => {
            tracing::info!("Checked {} posts", posts.len());
            println!("All {} posts are valid.", posts.len());
            Ok(())
        }
        Err(LoadError::Invalid { reports, total }) => {
            for report in &reports {
                print!("{}", report);
            }
            anyhow::bail!("{} of {} posts are invalid", reports.len(), total)
        }
        Err(e) => Err(e.into()),
    }
}

/// Short description of the site settings and enabled features
pub fn summary(site: &Site) -> String {
    let settings = &site.settings;
    let mut out = format!("Site: {} ({})\n", settings.title, settings.site);

    let mut features = Vec::new();
    if settings.search_enabled() {
        features.push("search".to_string());
    }
    if settings.rss_enabled() {
        features.push(format!("rss ({})", settings.full_url("rss.xml")));
    }
    if let Some(id) = settings.analytics_id() {
        features.push(format!("analytics ({})", id));
    }
    if features.is_empty() {
        out.push_str("Features: none\n");
    } else {
        out.push_str(&format!("Features: {}\n", features.join(", ")));
    }

    for (name, link) in settings.social.links() {
        out.push_str(&format!("Social: {} {}\n", name, link));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteSettings;
    use std::fs;
    use tempfile::TempDir;

    fn site(dir: &TempDir, settings: SiteSettings) -> Site {
        Site {
            settings,
            base_dir: dir.path().to_path_buf(),
            content_dir: dir.path().join("blog"),
        }
    }

    #[test]
    fn test_summary() {
        let dir = TempDir::new().unwrap();
        let mut settings = SiteSettings::default();
        settings.google_analysis = Some("G-123".to_string());
        settings.social.linkedin = None;

        let text = summary(&site(&dir, settings));
        assert_eq!(
            text,
            "Site: Your Site (https://yoursite.com)\n\
             Features: search, rss (https://yoursite.com/rss.xml), analytics (G-123)\n\
             Social: github https://github.com/EloyEMC\n\
             Social: email example@gmail.com\n"
        );
    }

    #[test]
    fn test_summary_without_features() {
        let dir = TempDir::new().unwrap();
        let mut settings = SiteSettings::default();
        settings.search = None;
        settings.social.rss = Some(false);

        assert!(summary(&site(&dir, settings)).contains("Features: none\n"));
    }

    #[test]
    fn test_run_fails_on_invalid_post() {
        let dir = TempDir::new().unwrap();
        let site = site(&dir, SiteSettings::default());
        fs::create_dir_all(&site.content_dir).unwrap();
        fs::write(site.content_dir.join("ok.md"), "---\ntitle: Ok\ndate: 2024-01-01\n---\n").unwrap();
        assert!(run(&site).is_ok());

        fs::write(site.content_dir.join("bad.md"), "---\ntitle: Bad\n---\n").unwrap();
        let err = run(&site).unwrap_err();
        assert_eq!(err.to_string(), "1 of 2 posts are invalid");
    }
}
