//! Route manifest
//!
//! `routes.json` lists every route in the bundle so deploy tooling and
//! smoke tests can inspect the site without crawling its HTML.

use std::path::Path;

use serde::{Deserialize, Serialize};

use codewalk_core::config::SiteConfig;

use crate::build::BuiltPost;
use crate::error::Result;

/// Bundle manifest written to `routes.json`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Manifest {
    /// Build timestamp, RFC 3339.
    pub generated_at: String,
    /// Path prefix the routes are served under.
    pub base_path: String,
    /// Every route in the bundle: the index first, then the post variants
    /// in slug order.
    pub routes: Vec<RouteEntry>,
}

/// One route in the bundle.
#[derive(Debug, Serialize, Deserialize)]
pub struct RouteEntry {
    /// Route path without the base prefix.
    pub route: String,
    /// Which page variant the route serves.
    pub kind: RouteKind,
    /// Slug of the backing post, absent on the index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Post title, absent on the index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Variant of page a route serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteKind {
    /// The navigation index at `/`.
    Index,
    /// Themed post page at `/post/<slug>/`.
    Post,
    /// Plain variant at `/<slug>/`.
    Plain,
}

/// Writes `routes.json` into the staging directory.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn write(staging: &Path, config: &SiteConfig, posts: &[BuiltPost]) -> Result<()> {
    let manifest = build_manifest(config, posts);
    let json = serde_json::to_vec_pretty(&manifest)?;
    std::fs::write(staging.join("routes.json"), json)?;
    Ok(())
}

fn build_manifest(config: &SiteConfig, posts: &[BuiltPost]) -> Manifest {
    let mut routes = Vec::with_capacity(posts.len() * 2 + 1);
    routes.push(RouteEntry {
        route: "/".to_string(),
        kind: RouteKind::Index,
        slug: None,
        title: None,
    });
    for post in posts {
        routes.push(RouteEntry {
            route: post.slug.primary_route(),
            kind: RouteKind::Post,
            slug: Some(post.slug.as_str().to_string()),
            title: Some(post.document.title.clone()),
        });
        routes.push(RouteEntry {
            route: post.slug.secondary_route(),
            kind: RouteKind::Plain,
            slug: Some(post.slug.as_str().to_string()),
            title: Some(post.document.title.clone()),
        });
    }
    Manifest {
        generated_at: chrono::Utc::now().to_rfc3339(),
        base_path: config.site.base_path.clone(),
        routes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codewalk_core::slug::Slug;

    fn built_post(slug: &str) -> BuiltPost {
        let slug = Slug::new(slug).unwrap();
        let document = codewalk_render::compile("# Title\n\nProse.\n", &slug).unwrap();
        BuiltPost { slug, document }
    }

    fn test_config(base_path: &str) -> SiteConfig {
        let yaml = format!("site:\n  title: t\n  base_path: \"{base_path}\"\n");
        serde_yaml::from_str(&yaml).unwrap()
    }

    #[test]
    fn test_manifest_lists_index_then_post_variants() {
        let posts = vec![built_post("alpha"), built_post("beta")];
        let manifest = build_manifest(&test_config(""), &posts);

        let routes: Vec<&str> = manifest.routes.iter().map(|r| r.route.as_str()).collect();
        assert_eq!(
            routes,
            ["/", "/post/alpha/", "/alpha/", "/post/beta/", "/beta/"]
        );
        assert_eq!(manifest.routes[0].kind, RouteKind::Index);
        assert_eq!(manifest.routes[1].kind, RouteKind::Post);
        assert_eq!(manifest.routes[2].kind, RouteKind::Plain);
        assert_eq!(manifest.routes[1].title.as_deref(), Some("Title"));
    }

    #[test]
    fn test_manifest_carries_base_path() {
        let manifest = build_manifest(&test_config("/courses"), &[]);
        assert_eq!(manifest.base_path, "/courses");
        assert_eq!(manifest.routes.len(), 1);
    }

    #[test]
    fn test_write_emits_parseable_json() {
        let dir = tempfile::tempdir().unwrap();
        let posts = vec![built_post("hello")];
        write(dir.path(), &test_config(""), &posts).unwrap();

        let raw = std::fs::read_to_string(dir.path().join("routes.json")).unwrap();
        let parsed: Manifest = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.routes.len(), 3);
        assert!(parsed.generated_at.contains('T'));
    }
}
