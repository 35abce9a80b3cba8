// src/sync.rs
//! Asset directory → catalog `image` fields.
//!
//! The directory is the truth: an entry gets `<prefix><types>/<file>` when a
//! file with its id as stem exists, and loses the field otherwise. Running it
//! twice in a row changes nothing the second time.

use std::error::Error;

use crate::config::Options;
use crate::file::AssetDir;
use crate::store::{self, CatalogEntry, EntityKind};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub set: usize,
    pub cleared: usize,
    pub unchanged: usize,
}

impl SyncReport {
    pub fn changed(&self) -> bool { self.set + self.cleared > 0 }
}

/// Reconcile `entries` in place.
pub fn sync_entries(
    kind: EntityKind,
    entries: &mut [CatalogEntry],
    assets: &AssetDir,
    prefix: &str,
) -> SyncReport {
    let mut report = SyncReport::default();
    for entry in entries.iter_mut().filter(|e| !e.id.is_empty()) {
        let want = assets
            .find(kind, &entry.id)
            .map(|file| format!("{prefix}{}/{file}", kind.key()));

        if entry.image_ref == want {
            report.unchanged += 1;
            continue;
        }
        match &want {
            Some(r) => {
                log::debug!("{kind}/{}: image = {r}", entry.id);
                report.set += 1;
            }
            None => {
                log::debug!("{kind}/{}: image cleared", entry.id);
                report.cleared += 1;
            }
        }
        entry.image_ref = want;
    }
    report
}

/// Sync every catalog in `kinds`; a file is rewritten only if an entry changed.
/// Missing catalogs are skipped.
pub fn sync_catalogs(opts: &Options, kinds: &[EntityKind]) -> Result<Vec<(EntityKind, SyncReport)>, Box<dyn Error>> {
    let assets = AssetDir::new(&opts.images_dir, &opts.extensions);
    let mut out = Vec::new();

    for &kind in kinds {
        let Some(mut catalog) = store::load_catalog(&opts.data_dir, kind)? else {
            log::warn!("{kind}: no catalog at {}, skipped", store::Catalog::path_for(&opts.data_dir, kind).display());
            continue;
        };

        let report = sync_entries(kind, &mut catalog.entries, &assets, &opts.ref_prefix);
        if report.changed() {
            store::save_catalog(&catalog)?;
            log::info!("{kind}: {} set, {} cleared", report.set, report.cleared);
        } else {
            log::info!("{kind}: up to date");
        }
        out.push((kind, report));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exts() -> Vec<String> {
        vec!["png".into(), "webp".into()]
    }

    #[test]
    fn sets_clears_and_settles() {
        let tmp = tempfile::tempdir().unwrap();
        let assets = AssetDir::new(tmp.path(), &exts());
        assets.write_asset(EntityKind::Item, "anvil", "png", b"x").unwrap();

        let mut entries = vec![CatalogEntry::new("anvil", "Anvil"), CatalogEntry::new("bow", "Bow")];
        entries[1].image_ref = Some("items/bow.png".into());

        let first = sync_entries(EntityKind::Item, &mut entries, &assets, "");
        assert_eq!(first, SyncReport { set: 1, cleared: 1, unchanged: 0 });
        assert_eq!(entries[0].image_ref.as_deref(), Some("items/anvil.png"));
        assert_eq!(entries[1].image_ref, None);

        let second = sync_entries(EntityKind::Item, &mut entries, &assets, "");
        assert!(!second.changed());
    }

    #[test]
    fn prefix_and_extension_preference() {
        let tmp = tempfile::tempdir().unwrap();
        let assets = AssetDir::new(tmp.path(), &exts());
        assets.write_asset(EntityKind::Tome, "hp", "webp", b"x").unwrap();
        assets.write_asset(EntityKind::Tome, "hp", "png", b"x").unwrap();

        let mut entries = vec![CatalogEntry::new("hp", "HP Tome")];
        sync_entries(EntityKind::Tome, &mut entries, &assets, "images/");
        assert_eq!(entries[0].image_ref.as_deref(), Some("images/tomes/hp.png"));
    }
}
