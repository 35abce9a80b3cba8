// src/scrape/listing.rs

use std::{collections::HashSet, path::PathBuf};

use super::Context;
use crate::resolve::{resolve, EntityIndex};
use crate::specs::Source;
use crate::store::Catalog;

/// One listing page of one source against one catalog.
///
/// Returns `(id, written path)` for every entry resolved here. Entries whose
/// download fails stay unresolved for the next source or the fallback pass.
pub fn listing_pass(ctx: &Context, source: &dyn Source, catalog: &Catalog) -> Vec<(String, PathBuf)> {
    let kind = catalog.kind;
    let existing = match ctx.assets.existing_ids(kind) {
        Ok(ids) => ids,
        Err(e) => {
            log::warn!("{kind}: cannot scan {}: {e}", ctx.assets.kind_dir(kind).display());
            HashSet::new()
        }
    };

    let index = EntityIndex::build(&catalog.entries, &existing);
    if index.is_empty() {
        log::debug!("{kind}: nothing left for {}", source.name());
        return Vec::new();
    }

    let url = source.listing_url(kind);
    let page = match ctx.fetch.get(&url) {
        Ok(p) => p,
        Err(e) => {
            log::warn!("{kind}: listing page unavailable: {e}");
            return Vec::new();
        }
    };

    let candidates = ctx.extractor(source).extract(&page);
    let assignments = resolve(&candidates, &index);
    log::info!(
        "{kind}: {} candidates on {}, {} matched",
        candidates.len(),
        source.name(),
        assignments.len()
    );

    let mut out = Vec::new();
    for a in assignments {
        match ctx.download(kind, &a.entry_id, &a.candidate.source_url) {
            Ok(path) => out.push((a.entry_id, path)),
            Err(e) => log::debug!("{kind}/{}: {e}", a.entry_id),
        }
    }
    out
}
