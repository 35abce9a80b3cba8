// src/specs/megabonk_wiki.rs
//! Source adapter for the community wiki (`megabonk.wiki`), a MediaWiki install.
//!
//! Image paths are root-relative (`/images/a/ab/Item_Anvil.png`, or
//! `/images/thumb/a/ab/Item_Anvil.png/64px-Item_Anvil.png` for thumbnails) and
//! file names usually carry the entity type as a prefix.

use super::Source;
use crate::core::html::{self, ImgRef};

pub const BASE_URL: &str = "https://megabonk.wiki";
const TYPE_PREFIXES: &[&str] = &["Item_", "Weapon_", "Tome_", "Character_"];

pub struct MegabonkWiki {
    base: String,
}

impl Default for MegabonkWiki {
    fn default() -> Self {
        Self { base: BASE_URL.to_string() }
    }
}

impl Source for MegabonkWiki {
    fn name(&self) -> &'static str { "megabonk.wiki" }

    fn base_url(&self) -> &str { &self.base }

    fn asset_url(&self, img: &ImgRef) -> Option<String> {
        let src = img.best_url();
        if !src.contains("/images/") { return None; }
        if src.starts_with("//") {
            Some(format!("https:{src}"))
        } else if src.starts_with('/') {
            Some(format!("{}{}", self.base, src))
        } else if src.starts_with("http") {
            Some(src.to_string())
        } else {
            None
        }
    }

    /// First `<Name>.<ext>` segment; thumbnails repeat the name, so the first wins.
    fn name_from_url(&self, url: &str, extensions: &[String]) -> Option<String> {
        let stem = html::path_segments(url)
            .into_iter()
            .find_map(|seg| html::file_stem(seg, extensions))?;
        let stem = TYPE_PREFIXES
            .iter()
            .find_map(|p| stem.strip_prefix(p))
            .unwrap_or(stem);
        Some(html::name_from_stem(stem)).filter(|n| !n.is_empty())
    }
}
