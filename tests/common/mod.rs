// tests/common/mod.rs
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;

use mb_scrape::config::Options;
use mb_scrape::core::Fetch;
use mb_scrape::error::FetchError;
use mb_scrape::specs::SourceKind;
use mb_scrape::store::{Catalog, EntityKind};

pub const FANDOM: &str = "https://megabonk.fandom.com/wiki";
pub const CDN: &str = "https://static.wikia.nocookie.net/megabonk/images";

/// Scripted transport: known URLs answer with fixed bytes, anything else is a 404.
#[derive(Default)]
pub struct FakeFetcher {
    pages: HashMap<String, Vec<u8>>,
    pub requests: RefCell<Vec<String>>,
}

impl FakeFetcher {
    pub fn with(mut self, url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.pages.insert(url.into(), body.into());
        self
    }

    pub fn requested(&self, url: &str) -> bool {
        self.requests.borrow().iter().any(|u| u == url)
    }

    pub fn clear(&self) {
        self.requests.borrow_mut().clear();
    }
}

impl Fetch for FakeFetcher {
    fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.requests.borrow_mut().push(url.to_string());
        self.pages.get(url).cloned().ok_or_else(|| FetchError::transport(url, "HTTP 404"))
    }
}

/// PNG signature padded to `len` bytes.
pub fn png(len: usize) -> Vec<u8> {
    let mut v = b"\x89PNG\r\n\x1a\n".to_vec();
    v.resize(len, 0);
    v
}

/// A Fandom page with one lazy-loaded CDN image.
pub fn page_with(file: &str, alt: &str) -> String {
    format!(
        r#"<html><body><figure><img src="data:image/gif;base64,R0lGOD" data-src="{CDN}/1/1a/{file}/revision/latest/scale-to-width-down/200?cb=1" alt="{alt}"></figure></body></html>"#
    )
}

/// Full-resolution CDN URL the extractor produces for `file`.
pub fn cdn(file: &str) -> String {
    format!("{CDN}/1/1a/{file}/revision/latest")
}

/// Options rooted in `root`, Fandom only, no pauses.
pub fn options(root: &std::path::Path) -> Options {
    let mut opts = Options::default();
    opts.data_dir = root.join("data");
    opts.images_dir = root.join("images");
    opts.sources = vec![SourceKind::Fandom];
    opts.net.delay_ms = 0;
    opts.net.kind_pause_ms = 0;
    opts
}

pub fn write_catalog(opts: &Options, kind: EntityKind, json: &str) {
    fs::create_dir_all(&opts.data_dir).unwrap();
    fs::write(Catalog::path_for(&opts.data_dir, kind), json).unwrap();
}
