//! Post filters (homepage selection and similar listings)

use serde::{Deserialize, Serialize};

use super::Post;

/// Selects a bounded, tag-constrained subset of posts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostFilter {
    /// Upper bound on the number of posts selected
    pub max_posts: usize,
    /// A post must carry every one of these tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// A post carrying any of these tags is left out
    #[serde(default)]
    pub exclude_tags: Vec<String>,
}

impl Default for PostFilter {
    fn default() -> Self {
        Self {
            max_posts: 5,
            tags: Vec::new(),
            exclude_tags: Vec::new(),
        }
    }
}

impl PostFilter {
    /// Whether a single post passes the filter (drafts never do)
    pub fn matches(&self, post: &Post) -> bool {
        let meta = &post.meta;
        if meta.is_draft() {
            return false;
        }

        self.tags.iter().all(|tag| meta.has_tag(tag))
            && !self.exclude_tags.iter().any(|tag| meta.has_tag(tag))
    }

    /// Apply the filter, newest posts first
    pub fn apply<'a>(&self, posts: &'a [Post]) -> Vec<&'a Post> {
        let mut selected: Vec<&Post> = posts.iter().filter(|p| self.matches(p)).collect();

        selected.sort_by(|a, b| {
            b.meta
                .date
                .cmp(&a.meta.date)
                .then_with(|| a.meta.title.cmp(&b.meta.title))
        });
        selected.truncate(self.max_posts);

        tracing::debug!(
            "Post filter selected {} of {} posts",
            selected.len(),
            posts.len()
        );
        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::schema;

    fn post(file: &str, yaml: &str) -> Post {
        let mapping = serde_yaml::from_str(yaml).unwrap();
        let meta = schema::validate(&mapping).into_result().unwrap();
        Post::new(meta, file.to_string())
    }

    fn posts() -> Vec<Post> {
        vec![
            post("a.md", "title: A\ndate: 2024-01-01\ntags: [rust]\n"),
            post("b.md", "title: B\ndate: 2024-03-01\ntags: [rust, seo]\n"),
            post("c.md", "title: C\ndate: 2024-02-01\n"),
            post("d.md", "title: D\ndate: 2024-04-01\ndraft: true\n"),
            post("e.md", "title: E\ndate: 2024-03-01\ntags: [news]\n"),
        ]
    }

    fn titles(selected: &[&Post]) -> Vec<String> {
        selected.iter().map(|p| p.meta.title.clone()).collect()
    }

    #[test]
    fn test_default_filter() {
        let posts = posts();
        let selected = PostFilter::default().apply(&posts);
        assert_eq!(titles(&selected), vec!["B", "E", "C", "A"]);
    }

    #[test]
    fn test_max_posts() {
        let posts = posts();
        let filter = PostFilter {
            max_posts: 2,
            ..Default::default()
        };
        assert_eq!(titles(&filter.apply(&posts)), vec!["B", "E"]);

        let filter = PostFilter {
            max_posts: 0,
            ..Default::default()
        };
        assert!(filter.apply(&posts).is_empty());
    }

    #[test]
    fn test_required_and_excluded_tags() {
        let posts = posts();
        let filter = PostFilter {
            tags: vec!["rust".to_string()],
            ..Default::default()
        };
        assert_eq!(titles(&filter.apply(&posts)), vec!["B", "A"]);

        let filter = PostFilter {
            tags: vec!["rust".to_string()],
            exclude_tags: vec!["seo".to_string()],
            ..Default::default()
        };
        assert_eq!(titles(&filter.apply(&posts)), vec!["A"]);

        let filter = PostFilter {
            tags: vec!["rust".to_string(), "news".to_string()],
            ..Default::default()
        };
        assert!(filter.apply(&posts).is_empty());
    }

    #[test]
    fn test_parse_filter() {
        let yaml = r#"
maxPosts: 3
excludeTags: [draft-ideas]
"#;
        let filter: PostFilter = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(filter.max_posts, 3);
        assert!(filter.tags.is_empty());
        assert_eq!(filter.exclude_tags, vec!["draft-ideas"]);
    }
}
