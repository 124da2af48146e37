//! Show the posts selected for the home page

use anyhow::Result;

use super::list::post_line;
use crate::content::PostFilter;
use crate::Site;

/// Print the homepage filter and the posts it selects
pub fn run(site: &Site) -> Result<()> {
    let posts = site.homepage_posts()?;

    println!("{}", describe(&site.settings.homepage));
    println!("Homepage posts ({}):", posts.len());
    for post in &posts {
        println!("  {}", post_line(post));
    }

    Ok(())
}

/// Human-readable form of a post filter
pub fn describe(filter: &PostFilter) -> String {
    let mut parts = vec![format!("at most {} posts", filter.max_posts)];
    if !filter.tags.is_empty() {
        parts.push(format!("tagged {}", filter.tags.join(" + ")));
    }
    if !filter.exclude_tags.is_empty() {
        parts.push(format!("excluding {}", filter.exclude_tags.join(", ")));
    }
    format!("Filter: {}", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe() {
        assert_eq!(describe(&PostFilter::default()), "Filter: at most 5 posts");

        let filter = PostFilter {
            max_posts: 3,
            tags: vec!["seo".to_string(), "astro".to_string()],
            exclude_tags: vec!["old".to_string()],
        };
        assert_eq!(
            describe(&filter),
            "Filter: at most 3 posts, tagged seo + astro, excluding old"
        );
    }
}
