// src/specs/images.rs
//! Candidate extraction shared by every source.

use super::{ImageCandidate, Source};
use crate::core::html;

/// Rules applied to every `<img>` on a page, on top of the source's own hosting check.
pub struct Extractor<'a> {
    pub source: &'a dyn Source,
    /// Lowercase substrings that mark UI chrome (logos, rarity frames, stat icons…).
    pub denylist: &'a [String],
    pub extensions: &'a [String],
}

impl Extractor<'_> {
    /// Candidates in document order. Same bytes, same result.
    pub fn extract(&self, page: &[u8]) -> Vec<ImageCandidate> {
        let mut out = Vec::new();
        for img in html::img_refs(page) {
            let Some(url) = self.source.asset_url(&img) else { continue };
            if self.is_chrome(&url) { continue; }

            let name = if img.alt.is_empty() {
                self.source.name_from_url(&url, self.extensions)
            } else {
                Some(self.alt_name(&img.alt))
            };
            match name {
                Some(raw_name) => out.push(ImageCandidate { raw_name, source_url: url }),
                None => log::debug!("{}: no name for {url}", self.source.name()),
            }
        }
        out
    }

    fn is_chrome(&self, url: &str) -> bool {
        let lc = url.to_ascii_lowercase();
        html::url_extension(&lc, &["svg".to_string()]).is_some()
            || self.denylist.iter().any(|d| lc.contains(&d.to_ascii_lowercase()))
    }

    /// Some wikis put the file name in `alt`; `Big_Bonk.png` reads as `Big Bonk`.
    fn alt_name(&self, alt: &str) -> String {
        match html::file_stem(alt, self.extensions) {
            Some(stem) => html::name_from_stem(stem),
            None => alt.to_string(),
        }
    }
}
