// src/specs/fandom.rs
//! Source adapter for the Fandom wiki (`megabonk.fandom.com`).
//!
//! Images are served from the wikia CDN and lazy-loaded: the real URL sits in
//! `data-src`, `src` holds a placeholder. CDN URLs look like
//! `…/megabonk/images/a/ab/Anvil.png/revision/latest/scale-to-width-down/40?cb=…`;
//! cutting after `/revision/latest` gives the original upload.

use super::Source;
use crate::core::html::{self, ImgRef};

pub const BASE_URL: &str = "https://megabonk.fandom.com";
const CDN_MARKER: &str = "static.wikia.nocookie.net/megabonk/images";
const REVISION: &str = "/revision/latest";

pub struct Fandom {
    base: String,
}

impl Default for Fandom {
    fn default() -> Self {
        Self { base: BASE_URL.to_string() }
    }
}

impl Source for Fandom {
    fn name(&self) -> &'static str { "fandom" }

    fn base_url(&self) -> &str { &self.base }

    fn asset_url(&self, img: &ImgRef) -> Option<String> {
        let url = img.best_url();
        if !url.contains(CDN_MARKER) { return None; }
        let url = if url.starts_with("//") { format!("https:{url}") } else { url.to_string() };
        Some(match url.find(REVISION) {
            Some(p) => url[..p + REVISION.len()].to_string(),
            None => url,
        })
    }

    /// `…/images/<x>/<xx>/<Name>.<ext>…` → `Name`.
    fn name_from_url(&self, url: &str, extensions: &[String]) -> Option<String> {
        let segs = html::path_segments(url);
        let at = segs.iter().position(|s| *s == "images")?;
        let (hash1, hash2, file) = (segs.get(at + 1)?, segs.get(at + 2)?, segs.get(at + 3)?);
        let wordy = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_alphanumeric() || c == '_');
        if !wordy(hash1) || !wordy(hash2) { return None; }
        let stem = html::file_stem(file, extensions)?;
        Some(html::name_from_stem(stem)).filter(|n| !n.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exts() -> Vec<String> {
        ["png", "jpg", "jpeg", "gif"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn prefers_data_src_and_trims_revision() {
        let img = ImgRef {
            src: "data:image/gif;base64,R0lGOD".into(),
            data_src: "https://static.wikia.nocookie.net/megabonk/images/a/ab/Ice_Cube.png/revision/latest/scale-to-width-down/40?cb=2025".into(),
            alt: String::new(),
        };
        assert_eq!(
            Fandom::default().asset_url(&img).as_deref(),
            Some("https://static.wikia.nocookie.net/megabonk/images/a/ab/Ice_Cube.png/revision/latest")
        );
    }

    #[test]
    fn foreign_hosts_are_ignored() {
        let img = ImgRef { src: "https://example.org/megabonk/images/a/ab/X.png".into(), ..ImgRef::default() };
        assert_eq!(Fandom::default().asset_url(&img), None);
    }

    #[test]
    fn name_comes_from_the_file_segment() {
        let f = Fandom::default();
        let url = "https://static.wikia.nocookie.net/megabonk/images/4/4f/Joe%27s_Dagger.png/revision/latest";
        assert_eq!(f.name_from_url(url, &exts()).as_deref(), Some("Joe's Dagger"));
        assert_eq!(f.name_from_url("https://static.wikia.nocookie.net/megabonk/images/x.png", &exts()), None);
    }

    #[test]
    fn urls_are_built_from_titles() {
        let f = Fandom::default();
        assert_eq!(f.listing_url(crate::store::EntityKind::Tome), "https://megabonk.fandom.com/wiki/Tomes");
        assert_eq!(f.file_url("Anvil", "png"), "https://megabonk.fandom.com/wiki/File:Anvil.png");
    }
}
