//! Bundle emission
//!
//! Writes the complete static bundle into a staging directory: public files
//! are copied first, then generated assets and pages, so a public file can
//! never shadow a generated route.

use std::path::Path;

use codewalk_core::config::{CourseConfig, IndexConfig, SectionConfig, SiteConfig};
use codewalk_render::assets;
use codewalk_render::html::page::{PageContext, PageVariant};

use crate::build::{BuiltPost, ThemeSet, manifest};
use crate::error::Result;

/// Writes every file of a site bundle.
pub struct BundleWriter<'a> {
    config: &'a SiteConfig,
    themes: &'a ThemeSet,
    public_dir: Option<&'a Path>,
}

impl<'a> BundleWriter<'a> {
    #[must_use]
    pub const fn new(
        config: &'a SiteConfig,
        themes: &'a ThemeSet,
        public_dir: Option<&'a Path>,
    ) -> Self {
        Self {
            config,
            themes,
            public_dir,
        }
    }

    /// Writes the whole bundle under `staging`.
    ///
    /// # Errors
    ///
    /// Returns the first I/O or render failure.
    pub fn write_bundle(&self, staging: &Path, posts: &[BuiltPost]) -> Result<()> {
        self.copy_public(staging)?;
        self.write_assets(staging)?;
        self.write_pages(staging, posts)?;
        self.write_index(staging, posts)?;
        self.write_not_found(staging)?;
        manifest::write(staging, self.config, posts)?;
        Ok(())
    }

    fn copy_public(&self, staging: &Path) -> Result<()> {
        let Some(public) = self.public_dir else {
            return Ok(());
        };
        if !public.is_dir() {
            tracing::warn!(path = %public.display(), "public directory does not exist, skipping");
            return Ok(());
        }
        for entry in walkdir::WalkDir::new(public) {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }
            let rel = entry
                .path()
                .strip_prefix(public)
                .map_err(std::io::Error::other)?;
            let dest = staging.join(rel);
            if let Some(parent) = dest.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::copy(entry.path(), &dest)?;
        }
        Ok(())
    }

    fn write_assets(&self, staging: &Path) -> Result<()> {
        let assets_dir = staging.join("assets");
        std::fs::create_dir_all(&assets_dir)?;
        std::fs::write(assets_dir.join("site.css"), assets::STYLESHEET)?;
        std::fs::write(assets_dir.join("walkthrough.js"), assets::WALKTHROUGH_JS)?;
        for (stem, css) in self.themes.stylesheets() {
            std::fs::write(assets_dir.join(format!("{stem}.css")), css)?;
        }
        Ok(())
    }

    fn write_pages(&self, staging: &Path, posts: &[BuiltPost]) -> Result<()> {
        let ctx = PageContext::new(&self.config.site);
        for post in posts {
            let themed = ctx.post_page(
                &post.document,
                self.themes.for_document(&post.document),
                PageVariant::Post,
            )?;
            write_page(staging, &post.slug.primary_output(), &themed)?;

            let plain = ctx.post_page(&post.document, self.themes.plain(), PageVariant::Plain)?;
            write_page(staging, &post.slug.secondary_output(), &plain)?;
        }
        Ok(())
    }

    fn write_index(&self, staging: &Path, posts: &[BuiltPost]) -> Result<()> {
        let ctx = PageContext::new(&self.config.site);
        let html = self.config.index.as_ref().map_or_else(
            || ctx.index_page(&generated_index(posts), self.themes.plain()),
            |index| ctx.index_page(index, self.themes.plain()),
        );
        std::fs::write(staging.join("index.html"), html)?;
        Ok(())
    }

    fn write_not_found(&self, staging: &Path) -> Result<()> {
        let ctx = PageContext::new(&self.config.site);
        let html = ctx.not_found_page(self.themes.plain());
        std::fs::write(staging.join("404.html"), html)?;
        Ok(())
    }
}

/// Index listing every post, used when the configuration defines none.
fn generated_index(posts: &[BuiltPost]) -> IndexConfig {
    IndexConfig {
        intro: Vec::new(),
        sections: vec![SectionConfig {
            heading: "Posts".to_string(),
            blurb: None,
            courses: posts
                .iter()
                .map(|post| CourseConfig {
                    title: post.document.title.clone(),
                    post: Some(post.slug.as_str().to_string()),
                    url: None,
                    sandbox: None,
                })
                .collect(),
        }],
    }
}

fn write_page(staging: &Path, relative: &Path, html: &str) -> Result<()> {
    let dest = staging.join(relative);
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(dest, html)?;
    Ok(())
}
