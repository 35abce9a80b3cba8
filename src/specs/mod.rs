// src/specs/mod.rs
//! # Wiki sources
//!
//! One adapter per wiki that hosts MegaBonk images. An adapter encodes *where the
//! pictures live in that wiki's HTML* and *how its URLs are built*; the rest of
//! the pipeline is shared.
//!
//! ## What lives here
//! - **URL construction** for listing pages (`/wiki/Items`, …), article pages and
//!   `File:` namespace pages.
//! - **Asset recognition**: which `<img>` URLs are hosted content for this wiki,
//!   and how to rewrite them to the full-resolution file.
//! - **Name recovery** from a file URL when the `<img>` has no alt text.
//! - `images::Extractor`: the shared candidate extractor. It applies one source
//!   plus the configured denylist to a page.
//!
//! ## What does **not** live here
//! - **Networking** (`core::net`), **matching** (`resolve`), **downloading and
//!   validation** (`scrape`). Sources never touch the network or the disk.
//!
//! ## Conventions & invariants
//! - Extraction is restartable: same bytes in, same candidates out, in document order.
//! - Markup problems never error; a broken page just yields fewer candidates.
//! - `.svg` and denylisted URLs are never candidates.
pub mod fandom;
pub mod images;
pub mod megabonk_wiki;

use serde::{Deserialize, Serialize};

use crate::core::html::ImgRef;
use crate::store::EntityKind;

/// A (name, URL) pair scraped from a page, not yet attributed to any entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageCandidate {
    pub raw_name: String,
    pub source_url: String,
}

/// Configurable selector for the built-in specs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Fandom,
    MegabonkWiki,
}

pub trait Source {
    fn name(&self) -> &'static str;

    fn base_url(&self) -> &str;

    fn listing_url(&self, kind: EntityKind) -> String {
        let title = match kind {
            EntityKind::Item => "Items",
            EntityKind::Weapon => "Weapons",
            EntityKind::Tome => "Tomes",
            EntityKind::Character => "Characters",
        };
        self.page_url(title)
    }

    /// Article URL; `title` is used verbatim (alias tables may hold pre-encoded titles).
    fn page_url(&self, title: &str) -> String {
        format!("{}/wiki/{}", self.base_url(), title)
    }

    fn file_url(&self, stem: &str, ext: &str) -> String {
        self.page_url(&format!("File:{stem}.{ext}"))
    }

    /// Absolute full-resolution URL when `img` is a content image hosted by this wiki.
    fn asset_url(&self, img: &ImgRef) -> Option<String>;

    /// Display-ish name recovered from an asset URL.
    fn name_from_url(&self, url: &str, extensions: &[String]) -> Option<String>;
}

pub fn build(kind: SourceKind) -> Box<dyn Source> {
    match kind {
        SourceKind::Fandom => Box::new(fandom::Fandom::default()),
        SourceKind::MegabonkWiki => Box::new(megabonk_wiki::MegabonkWiki::default()),
    }
}

pub fn build_all(kinds: &[SourceKind]) -> Vec<Box<dyn Source>> {
    kinds.iter().copied().map(build).collect()
}
