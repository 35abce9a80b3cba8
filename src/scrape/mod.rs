// src/scrape/mod.rs
//! Everything that turns URLs into asset files.
//!
//! `listing` runs the cheap pass (one listing page per source, many entries);
//! `fallback` walks per-entry guesses for whatever is left. Both end in
//! [`Context::download`], the single place where bytes are validated and written.
pub mod fallback;
pub mod listing;
pub mod validate;

use std::path::PathBuf;

use crate::config::Options;
use crate::core::{html, Fetch};
use crate::error::FetchError;
use crate::file::AssetDir;
use crate::specs::{images::Extractor, Source};
use crate::store::EntityKind;

pub use fallback::{guesses, Guess, Outcome};
pub use validate::validate_payload;

/// What one resolution pass works against. Borrowed, never owned.
pub struct Context<'a> {
    pub fetch: &'a dyn Fetch,
    pub opts: &'a Options,
    pub assets: &'a AssetDir,
    pub sources: &'a [Box<dyn Source>],
}

impl Context<'_> {
    pub fn extractor<'s>(&'s self, source: &'s dyn Source) -> Extractor<'s> {
        Extractor {
            source,
            denylist: &self.opts.extract.denylist,
            extensions: &self.opts.extensions,
        }
    }

    /// GET, validate, write `<id>.<ext>`. Nothing is written unless validation passes.
    pub fn download(&self, kind: EntityKind, id: &str, url: &str) -> Result<PathBuf, FetchError> {
        let bytes = self.fetch.get(url)?;
        let format = validate::validate_payload(&bytes, &self.opts.validation)
            .map_err(|reason| FetchError::Validation { url: url.to_string(), reason })?;

        let ext = html::url_extension(url, &self.opts.extensions)
            .or_else(|| {
                validate::format_extension(format)
                    .filter(|e| self.opts.extensions.iter().any(|a| a == e))
                    .map(str::to_string)
            })
            .unwrap_or_else(|| "png".to_string());

        let path = self.assets.write_asset(kind, id, &ext, &bytes)?;
        log::info!("{kind}/{id}: saved {} ({} bytes)", path.display(), bytes.len());
        Ok(path)
    }
}
