//! Post models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;
use std::fmt;
use std::path::{Path, PathBuf};

/// Open Graph object type of a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OgType {
    Website,
    Article,
}

impl OgType {
    /// Accepted spellings, in declaration order
    pub const NAMES: &'static [&'static str] = &["website", "article"];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "website" => Some(OgType::Website),
            "article" => Some(OgType::Article),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OgType::Website => "website",
            OgType::Article => "article",
        }
    }
}

impl fmt::Display for OgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated front-matter of a blog post
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMetadata {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub date: NaiveDate,
    /// Free-form; never parsed as a date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(rename = "image_alt", skip_serializing_if = "Option::is_none")]
    pub image_alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(rename = "twitter_img", skip_serializing_if = "Option::is_none")]
    pub twitter_img: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_creator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_site: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_type: Option<OgType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub noindex: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nofollow: Option<bool>,

    /// Front-matter keys the schema does not know about
    #[serde(skip)]
    pub extra: Mapping,
}

impl PostMetadata {
    pub fn is_draft(&self) -> bool {
        self.draft.unwrap_or(false)
    }

    /// Tags of the post, empty when none are declared
    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or(&[])
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags().iter().any(|t| t == tag)
    }
}

/// A blog post loaded from the content directory
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    #[serde(flatten)]
    pub meta: PostMetadata,

    /// Source file path (relative to the content directory)
    pub source: String,

    /// Full source file path
    #[serde(skip)]
    pub full_source: PathBuf,

    /// URL-friendly name taken from the file name
    pub slug: String,

    /// Body text after the front-matter
    #[serde(skip)]
    pub raw: String,
}

impl Post {
    pub fn new(meta: PostMetadata, source: String) -> Self {
        let slug = slug_for(Path::new(&source));
        Self {
            meta,
            full_source: PathBuf::from(&source),
            source,
            slug,
            raw: String::new(),
        }
    }
}

/// Slug from the file stem (not the title)
fn slug_for(path: &Path) -> String {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("untitled");

    // `post/index.md` takes the directory name
    let stem = if stem == "index" {
        path.parent()
            .and_then(|p| p.file_name())
            .and_then(|s| s.to_str())
            .unwrap_or(stem)
    } else {
        stem
    };

    slug::slugify(stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(title: &str) -> PostMetadata {
        PostMetadata {
            title: title.to_string(),
            description: None,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            modified_date: None,
            tags: None,
            draft: None,
            image: None,
            image_alt: None,
            keywords: None,
            twitter_img: None,
            twitter_creator: None,
            twitter_site: None,
            canonical_url: None,
            author: None,
            author_url: None,
            author_image: None,
            og_type: None,
            locale: None,
            site_name: None,
            noindex: None,
            nofollow: None,
            extra: Mapping::new(),
        }
    }

    #[test]
    fn test_slug_from_file_name() {
        let post = Post::new(meta("Anything"), "2024/Hello World.md".to_string());
        assert_eq!(post.slug, "hello-world");

        let post = Post::new(meta("Anything"), "seo-tips/index.mdx".to_string());
        assert_eq!(post.slug, "seo-tips");
    }

    #[test]
    fn test_og_type_names() {
        assert_eq!(OgType::from_name("article"), Some(OgType::Article));
        assert_eq!(OgType::from_name("Article"), None);
        assert_eq!(OgType::Website.to_string(), "website");
    }

    #[test]
    fn test_serialize_uses_front_matter_keys() {
        let mut m = meta("Hi");
        m.image_alt = Some("alt".to_string());
        m.og_type = Some(OgType::Article);
        m.canonical_url = Some("https://example.com".to_string());

        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["image_alt"], "alt");
        assert_eq!(json["ogType"], "article");
        assert_eq!(json["canonicalUrl"], "https://example.com");
        assert_eq!(json["date"], "2024-01-01");
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_tags_default_empty() {
        let mut m = meta("Hi");
        assert!(m.tags().is_empty());
        m.tags = Some(vec!["rust".to_string()]);
        assert!(m.has_tag("rust"));
        assert!(!m.has_tag("go"));
        assert!(!m.is_draft());
    }
}
