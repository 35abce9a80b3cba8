// src/runner.rs
use std::collections::HashSet;
use std::error::Error;
use std::thread;

use crate::{
    config::Options,
    core::{Fetch, Paced},
    file::AssetDir,
    progress::{NullProgress, Progress},
    scrape::{fallback, listing::listing_pass, Context, Outcome},
    specs,
    store::{self, Catalog, EntityKind},
};

/// What happened to one kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KindReport {
    pub kind: EntityKind,
    /// Entries with an id.
    pub total: usize,
    /// Already had an asset before the run.
    pub already: usize,
    pub from_listing: Vec<String>,
    pub from_fallback: Vec<String>,
    pub exhausted: Vec<String>,
}

impl KindReport {
    fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            total: 0,
            already: 0,
            from_listing: Vec::new(),
            from_fallback: Vec::new(),
            exhausted: Vec::new(),
        }
    }

    pub fn resolved(&self) -> usize { self.from_listing.len() + self.from_fallback.len() }
}

/// Summary of a resolution run.
#[derive(Clone, Debug, Default)]
pub struct RunSummary {
    pub kinds: Vec<KindReport>,
}

impl RunSummary {
    pub fn resolved(&self) -> usize { self.kinds.iter().map(KindReport::resolved).sum() }

    pub fn exhausted(&self) -> impl Iterator<Item = (EntityKind, &str)> {
        self.kinds.iter().flat_map(|k| k.exhausted.iter().map(move |id| (k.kind, id.as_str())))
    }
}

/// Load the catalogs of `kinds`. Any read or parse failure is fatal; a missing
/// file only drops that kind.
fn load_all(opts: &Options, kinds: &[EntityKind]) -> Result<Vec<Catalog>, Box<dyn Error>> {
    let mut out = Vec::new();
    for &kind in kinds {
        match store::load_catalog(&opts.data_dir, kind)? {
            Some(c) => out.push(c),
            None => log::warn!("{kind}: no catalog at {}, skipped", Catalog::path_for(&opts.data_dir, kind).display()),
        }
    }
    Ok(out)
}

/// Top-level resolution run: listing pages for every source, then per-entry
/// fallback for what is left. Catalogs are all read before the first request.
/// `progress` can be None (no UI updates) or Some(&mut impl Progress).
pub fn run(
    opts: &Options,
    kinds: &[EntityKind],
    fetch: &dyn Fetch,
    progress: Option<&mut dyn Progress>,
) -> Result<RunSummary, Box<dyn Error>> {
    let catalogs = load_all(opts, kinds)?;

    let mut null = NullProgress;
    let progress: &mut dyn Progress = match progress {
        Some(p) => p,
        None => &mut null,
    };

    let paced = Paced::new(fetch, opts.net.delay());
    let sources = specs::build_all(&opts.sources);
    let assets = AssetDir::new(&opts.images_dir, &opts.extensions);
    let ctx = Context { fetch: &paced, opts, assets: &assets, sources: &sources };

    let mut summary = RunSummary::default();
    for (i, catalog) in catalogs.iter().enumerate() {
        if i > 0 && !opts.net.kind_pause().is_zero() {
            thread::sleep(opts.net.kind_pause());
        }
        let report = run_kind(&ctx, catalog, &mut *progress);
        log::info!(
            "{}: {} resolved ({} listing, {} fallback), {} exhausted, {} already present",
            report.kind,
            report.resolved(),
            report.from_listing.len(),
            report.from_fallback.len(),
            report.exhausted.len(),
            report.already
        );
        summary.kinds.push(report);
    }
    Ok(summary)
}

fn run_kind(
    ctx: &Context,
    catalog: &Catalog,
    progress: &mut dyn Progress,
) -> KindReport {
    let kind = catalog.kind;
    let mut report = KindReport::new(kind);

    let mut done = match ctx.assets.existing_ids(kind) {
        Ok(ids) => ids,
        Err(e) => {
            let msg = format!("{kind}: cannot scan {}: {e}", ctx.assets.kind_dir(kind).display());
            log::warn!("{msg}");
            progress.log(&msg);
            HashSet::new()
        }
    };
    let ids: HashSet<&str> = catalog.entries.iter().map(|e| e.id.as_str()).filter(|id| !id.is_empty()).collect();
    report.total = ids.len();
    report.already = ids.iter().filter(|id| done.contains(**id)).count();

    progress.begin(kind, report.total - report.already);

    for source in ctx.sources {
        for (id, path) in listing_pass(ctx, source.as_ref(), catalog) {
            progress.item_done(&id, &path);
            done.insert(id.clone());
            report.from_listing.push(id);
        }
    }

    for entry in &catalog.entries {
        if entry.id.is_empty() || done.contains(&entry.id) { continue; }
        done.insert(entry.id.clone());

        match fallback::run(ctx, kind, entry) {
            Outcome::Resolved { path, via } => {
                log::debug!("{kind}/{}: via {via}", entry.id);
                progress.item_done(&entry.id, &path);
                report.from_fallback.push(entry.id.clone());
            }
            Outcome::Exhausted { .. } => {
                progress.item_failed(&entry.id);
                report.exhausted.push(entry.id.clone());
            }
        }
    }

    progress.finish(kind);
    report
}

/// Per-kind entry count and how many of them have an asset file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusLine {
    pub kind: EntityKind,
    pub entries: usize,
    pub with_asset: usize,
}

pub fn status(opts: &Options, kinds: &[EntityKind]) -> Result<Vec<StatusLine>, Box<dyn Error>> {
    let assets = AssetDir::new(&opts.images_dir, &opts.extensions);
    let mut out = Vec::new();
    for catalog in load_all(opts, kinds)? {
        let existing = assets.existing_ids(catalog.kind).unwrap_or_else(|e| {
            log::warn!("{}: cannot scan {}: {e}", catalog.kind, assets.kind_dir(catalog.kind).display());
            HashSet::new()
        });
        let ids: HashSet<&str> = catalog.entries.iter().map(|e| e.id.as_str()).filter(|id| !id.is_empty()).collect();
        out.push(StatusLine {
            kind: catalog.kind,
            entries: ids.len(),
            with_asset: ids.iter().filter(|id| existing.contains(**id)).count(),
        });
    }
    Ok(out)
}
