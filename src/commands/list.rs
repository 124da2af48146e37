//! List site posts

use anyhow::Result;
use std::collections::HashMap;

use crate::content::Post;
use crate::Site;

/// List posts or tags
pub fn run(site: &Site, content_type: &str, json: bool) -> Result<()> {
    let posts = site.posts()?;

    match content_type {
        "post" | "posts" => {
            if json {
                println!("{}", serde_json::to_string_pretty(&posts)?);
            } else {
                println!("Posts ({}):", posts.len());
                for post in &posts {
                    println!("  {}", post_line(post));
                }
            }
        }
        "tag" | "tags" => {
            let tags = tag_counts(&posts);
            if json {
                let map: serde_json::Map<String, serde_json::Value> = tags
                    .iter()
                    .map(|(tag, count)| (tag.clone(), (*count).into()))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&map)?);
            } else {
                println!("Tags ({}):", tags.len());
                for (tag, count) in tags {
                    println!("  {} ({})", tag, count);
                }
            }
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: post, tag", content_type);
        }
    }

    Ok(())
}

/// One line describing a post
pub fn post_line(post: &Post) -> String {
    let draft = if post.meta.is_draft() { " (draft)" } else { "" };
    format!(
        "{} - {}{} [{}]",
        post.meta.date.format("%Y-%m-%d"),
        post.meta.title,
        draft,
        post.source
    )
}

/// Tags with their post counts, most used first
pub fn tag_counts(posts: &[Post]) -> Vec<(String, usize)> {
    let mut tags: HashMap<String, usize> = HashMap::new();
    for post in posts {
        for tag in post.meta.tags() {
            *tags.entry(tag.clone()).or_insert(0) += 1;
        }
    }

    let mut tags: Vec<_> = tags.into_iter().collect();
    tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::schema;

    fn post(file: &str, yaml: &str) -> Post {
        let mapping = serde_yaml::from_str(yaml).unwrap();
        Post::new(schema::validate(&mapping).into_result().unwrap(), file.to_string())
    }

    #[test]
    fn test_post_line() {
        let p = post("hello.md", "title: Hello\ndate: 2024-01-15\ndraft: true\n");
        assert_eq!(post_line(&p), "2024-01-15 - Hello (draft) [hello.md]");
    }

    #[test]
    fn test_tag_counts() {
        let posts = vec![
            post("a.md", "title: A\ndate: 2024-01-01\ntags: [seo, rust]\n"),
            post("b.md", "title: B\ndate: 2024-01-02\ntags: [seo]\n"),
            post("c.md", "title: C\ndate: 2024-01-03\n"),
        ];
        assert_eq!(
            tag_counts(&posts),
            vec![("seo".to_string(), 2), ("rust".to_string(), 1)]
        );
    }
}
